use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Scalar runtime value carried by variables, status updates, and profile
/// fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// UTF-8 string value.
    String(String),
}

impl Scalar {
    /// General truthiness: `false`, `0`, `0.0`, and the empty string are
    /// false; every other value is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Scalar::Bool(flag) => *flag,
            Scalar::Int(num) => *num != 0,
            Scalar::Float(num) => *num != 0.0,
            Scalar::String(text) => !text.is_empty(),
        }
    }

    /// Convenience accessor for string references.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(text) => Some(text),
            _ => None,
        }
    }

    /// String form used by interpolation and regex-atom resolution.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(flag) => write!(f, "{}", flag),
            Scalar::Int(num) => write!(f, "{}", num),
            Scalar::Float(num) => write!(f, "{}", num),
            Scalar::String(text) => write!(f, "{}", text),
        }
    }
}

impl From<&str> for Scalar {
    fn from(text: &str) -> Self {
        Scalar::String(text.to_string())
    }
}

impl From<String> for Scalar {
    fn from(text: String) -> Self {
        Scalar::String(text)
    }
}

impl From<i64> for Scalar {
    fn from(num: i64) -> Self {
        Scalar::Int(num)
    }
}

impl From<bool> for Scalar {
    fn from(flag: bool) -> Self {
        Scalar::Bool(flag)
    }
}

/// Variable bindings supplied by the caller for one `send`/`receive` call.
pub type VarMap = BTreeMap<String, Scalar>;

/// Profile fields dispatched by a `set_profile` effect.
pub type ProfileFields = BTreeMap<String, Scalar>;

/// Caller-supplied runtime context for one `receive` call.
///
/// Never retained by the interpreter; borrowed only for the duration of the
/// call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    /// User the inbound event belongs to; target of status/profile effects.
    pub user_id: String,
    /// Variable bindings for condition evaluation.
    pub vars: VarMap,
}

impl Context {
    /// Construct a context for the given user with no variables bound.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            vars: VarMap::new(),
        }
    }

    /// Bind a variable, builder-style.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}
