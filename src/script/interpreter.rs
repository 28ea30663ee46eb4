use std::fmt;
use std::sync::Arc;

use super::ast::{ScriptDocument, Step, StepKey};
use super::effects::{Messenger, UserStore};
use super::value::{Context, VarMap};
use super::{Result, ScriptError, loader, receive, send};

/// Facade owning one parsed script document plus the two collaborator
/// handles.
///
/// Constructed once per script; `send`/`receive` are synchronous, take
/// `&self`, and hold no mutable state, so a shared interpreter is safe to
/// call from multiple threads when the collaborators are.
pub struct Interpreter {
    document: Option<ScriptDocument>,
    messenger: Arc<dyn Messenger>,
    store: Arc<dyn UserStore>,
}

impl Interpreter {
    /// Construct an interpreter with no document loaded.
    ///
    /// `send`/`receive` fail with [`ScriptError::NotInitialized`] until a
    /// call to [`Interpreter::load`] succeeds.
    pub fn new(messenger: Arc<dyn Messenger>, store: Arc<dyn UserStore>) -> Self {
        Self {
            document: None,
            messenger,
            store,
        }
    }

    /// Construct an interpreter and load a script in one step.
    pub fn from_source(
        raw: &str,
        messenger: Arc<dyn Messenger>,
        store: Arc<dyn UserStore>,
    ) -> Result<Self> {
        let mut interpreter = Self::new(messenger, store);
        interpreter.load(raw)?;
        Ok(interpreter)
    }

    /// Parse and install a script document, replacing any previous one.
    ///
    /// On failure the interpreter is left uninitialized; no partial document
    /// is ever installed.
    pub fn load(&mut self, raw: &str) -> Result<()> {
        self.document = None;
        let document = loader::load(raw).map_err(ScriptError::InvalidScript)?;
        self.document = Some(document);
        Ok(())
    }

    /// Whether a document is currently loaded.
    pub fn is_initialized(&self) -> bool {
        self.document.is_some()
    }

    /// Dispatch the outbound entries of `step`, interpolating `{{var}}`
    /// tokens from `vars`.
    pub fn send(&self, step: impl Into<StepKey>, vars: &VarMap) -> Result<()> {
        let step = self.lookup(step.into())?;
        send::send_step(&step.send, vars, self.messenger.as_ref())
    }

    /// Evaluate the `on_receive` action tree of `step` against `ctx`,
    /// dispatching status/profile effects. A step without `on_receive` is a
    /// no-op.
    pub fn receive(&self, step: impl Into<StepKey>, ctx: &Context) -> Result<()> {
        let step = self.lookup(step.into())?;
        match &step.on_receive {
            Some(node) => receive::evaluate_receive(node, ctx, self.store.as_ref()),
            None => Ok(()),
        }
    }

    fn lookup(&self, key: StepKey) -> Result<&Step> {
        let document = self.document.as_ref().ok_or(ScriptError::NotInitialized)?;
        document
            .step(&key)
            .ok_or_else(|| ScriptError::StepMissing(key.to_string()))
    }
}

// The collaborator handles are opaque trait objects, so Debug is written by
// hand around the document.
impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
            .field("document", &self.document)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::effects::{TracingMessenger, TracingUserStore};

    fn interpreter() -> Interpreter {
        Interpreter::new(Arc::new(TracingMessenger), Arc::new(TracingUserStore))
    }

    #[test]
    fn calls_before_load_are_rejected() {
        let interp = interpreter();
        assert!(matches!(
            interp.send(0u32, &VarMap::new()),
            Err(ScriptError::NotInitialized)
        ));
        assert!(matches!(
            interp.receive(0u32, &Context::new("u1")),
            Err(ScriptError::NotInitialized)
        ));
    }

    #[test]
    fn construction_failure_surfaces_invalid_script() {
        let err = Interpreter::from_source(
            "invalid yaml input",
            Arc::new(TracingMessenger),
            Arc::new(TracingUserStore),
        )
        .expect_err("must fail");
        assert!(matches!(err, ScriptError::InvalidScript(_)));
    }

    #[test]
    fn debug_output_shows_document_state_only() {
        let mut interp = interpreter();
        assert!(format!("{:?}", interp).starts_with("Interpreter"));
        interp.load("script:\n  0:\n    send: hello\n").expect("load");
        assert!(format!("{:?}", interp).contains("document"));
    }

    #[test]
    fn failed_load_leaves_interpreter_uninitialized() {
        let mut interp = interpreter();
        let err = interp.load("invalid yaml input").expect_err("must fail");
        assert!(err.to_string().starts_with("Invalid"));
        assert!(!interp.is_initialized());
        assert!(matches!(
            interp.send(0u32, &VarMap::new()),
            Err(ScriptError::NotInitialized)
        ));
    }

    #[test]
    fn failed_reload_discards_previous_document() {
        let mut interp = interpreter();
        interp.load("script:\n  0:\n    send: hello\n").expect("load");
        assert!(interp.is_initialized());
        interp.load("not: a script").expect_err("must fail");
        assert!(!interp.is_initialized());
    }

    #[test]
    fn missing_step_is_reported_by_key() {
        let mut interp = interpreter();
        interp.load("script:\n  0:\n    send: hello\n").expect("load");
        match interp.send(7u32, &VarMap::new()) {
            Err(ScriptError::StepMissing(key)) => assert_eq!(key, "7"),
            other => panic!("expected StepMissing, got {:?}", other.err()),
        }
    }

    #[test]
    fn integer_and_string_keys_address_the_same_step() {
        let mut interp = interpreter();
        interp.load("script:\n  0:\n    send: hello\n").expect("load");
        interp.send(0u32, &VarMap::new()).expect("integer key");
        interp.send("0", &VarMap::new()).expect("string key");
    }
}
