use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::value::{ProfileFields, Scalar, VarMap};

/// Parsed, validated script document: an order-insensitive mapping from step
/// key to [`Step`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptDocument {
    /// Steps keyed by identifier, from the required top-level `script` key.
    pub script: BTreeMap<StepKey, Step>,
}

impl ScriptDocument {
    /// Look up a step by key.
    pub fn step(&self, key: &StepKey) -> Option<&Step> {
        self.script.get(key)
    }
}

/// Step identifier: a small integer or string key, normalized to its string
/// form so `0` and `"0"` address the same step.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StepKey(String);

impl StepKey {
    /// String form of the key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for StepKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Int(i64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Int(num) => Ok(StepKey(num.to_string())),
            Repr::Text(text) => Ok(StepKey(text)),
        }
    }
}

impl From<&str> for StepKey {
    fn from(text: &str) -> Self {
        StepKey(text.to_string())
    }
}

impl From<String> for StepKey {
    fn from(text: String) -> Self {
        StepKey(text)
    }
}

impl From<i64> for StepKey {
    fn from(num: i64) -> Self {
        StepKey(num.to_string())
    }
}

impl From<u32> for StepKey {
    fn from(num: u32) -> Self {
        StepKey(num.to_string())
    }
}

/// One addressable unit of a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Outbound entries sent when the step fires.
    #[serde(default)]
    pub send: SendSpec,
    /// Action tree evaluated when a reply arrives at this step.
    #[serde(default)]
    pub on_receive: Option<ActionNode>,
    /// Declared variable sources. Recognized but opaque: the engine only
    /// substitutes `{{name}}` tokens against the caller-supplied context.
    #[serde(default)]
    pub variables: Option<VarMap>,
}

/// Outbound send spec: a single message string or an ordered list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SendSpec {
    /// A single message entry.
    One(String),
    /// An ordered sequence of message entries.
    Many(Vec<String>),
}

impl SendSpec {
    /// Entries in dispatch order.
    pub fn entries(&self) -> &[String] {
        match self {
            SendSpec::One(entry) => std::slice::from_ref(entry),
            SendSpec::Many(entries) => entries,
        }
    }
}

impl Default for SendSpec {
    fn default() -> Self {
        SendSpec::Many(Vec::new())
    }
}

/// Node of an `on_receive` action tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionNode {
    /// Ordered sequence of nodes, each evaluated in turn.
    List(Vec<ActionNode>),
    /// Conditional branch.
    Conditional {
        /// Condition guarding the branch.
        #[serde(rename = "if")]
        condition: Condition,
        /// Node (or list) evaluated when the condition holds.
        #[serde(rename = "then")]
        then_branch: Box<ActionNode>,
        /// Node (or list) evaluated when the condition fails.
        #[serde(rename = "else", default)]
        else_branch: Option<Box<ActionNode>>,
    },
    /// Leaf instruction dispatching effects.
    Effect(EffectNode),
}

/// Leaf action: status and/or profile updates for the context's user.
///
/// Unrecognized keys deserialize to an empty node and are ignored at
/// evaluation time, so newer script vocabulary does not break older engines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectNode {
    /// New status value for the user.
    #[serde(default)]
    pub user_status: Option<Scalar>,
    /// Profile fields to set for the user.
    #[serde(default)]
    pub set_profile: Option<ProfileFields>,
}

impl EffectNode {
    /// True when the node carries no effect at all.
    pub fn is_empty(&self) -> bool {
        self.user_status.is_none() && self.set_profile.is_none()
    }
}

/// Boolean condition over the runtime context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Condition {
    /// Atom: a bare variable name or a `regex(a, b)` call form.
    Atom(String),
    /// Conjunction; short-circuits on the first false sub-condition.
    All {
        /// Sub-conditions, all of which must hold.
        and: Vec<Condition>,
    },
    /// Disjunction; short-circuits on the first true sub-condition.
    Any {
        /// Sub-conditions, at least one of which must hold.
        or: Vec<Condition>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_keys_normalize_integers_and_strings() {
        let doc: ScriptDocument = serde_yaml::from_str(
            "script:\n  0:\n    send: hello\n  intro:\n    send: hi\n",
        )
        .expect("parse");
        assert!(doc.step(&StepKey::from(0i64)).is_some());
        assert!(doc.step(&StepKey::from("0")).is_some());
        assert!(doc.step(&StepKey::from("intro")).is_some());
        assert!(doc.step(&StepKey::from(1i64)).is_none());
    }

    #[test]
    fn send_spec_accepts_single_entry_and_list() {
        let single: SendSpec = serde_yaml::from_str("just one message").expect("single");
        assert_eq!(single.entries(), ["just one message"]);

        let many: SendSpec = serde_yaml::from_str("- first\n- second\n").expect("list");
        assert_eq!(many.entries(), ["first", "second"]);
    }

    #[test]
    fn action_nodes_deserialize_by_shape() {
        let effect: ActionNode = serde_yaml::from_str("user_status: completed").expect("effect");
        match effect {
            ActionNode::Effect(node) => {
                assert_eq!(node.user_status, Some(Scalar::from("completed")));
                assert!(node.set_profile.is_none());
            }
            other => panic!("expected effect node, got {:?}", other),
        }

        let conditional: ActionNode = serde_yaml::from_str(
            "if: var1\nthen:\n  user_status: 2\nelse:\n  user_status: 3\n",
        )
        .expect("conditional");
        assert!(matches!(conditional, ActionNode::Conditional { .. }));

        let list: ActionNode =
            serde_yaml::from_str("- user_status: 1\n- user_status: 2\n").expect("list");
        match list {
            ActionNode::List(items) => assert_eq!(items.len(), 2),
            other => panic!("expected list node, got {:?}", other),
        }
    }

    #[test]
    fn unknown_action_keys_are_ignored() {
        let node: ActionNode =
            serde_yaml::from_str("ring_bell: loudly\n").expect("forward-compatible");
        match node {
            ActionNode::Effect(effect) => assert!(effect.is_empty()),
            other => panic!("expected empty effect node, got {:?}", other),
        }
    }

    #[test]
    fn documents_round_trip_through_json() {
        let doc: ScriptDocument = serde_yaml::from_str(
            "script:\n  0:\n    send:\n      - Hello {{name}}!\n      - attach(welcome)\n    on_receive:\n      if: confirmed\n      then:\n        user_status: 2\n        set_profile:\n          name: ada\n      else:\n        user_status: 3\n",
        )
        .expect("parse");
        let json = serde_json::to_string(&doc).expect("serialize");
        let back: ScriptDocument = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(doc, back);
    }

    #[test]
    fn combinators_deserialize_from_maps() {
        let cond: Condition =
            serde_yaml::from_str("and:\n- var1\n- or:\n  - var2\n  - var3\n").expect("combinator");
        match cond {
            Condition::All { and } => {
                assert_eq!(and.len(), 2);
                assert!(matches!(and[1], Condition::Any { .. }));
            }
            other => panic!("expected and-combinator, got {:?}", other),
        }
    }
}
