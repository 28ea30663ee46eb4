//! Script interpretation for the Rhyzal dialogue engine.
//!
//! A script is a YAML document mapping step identifiers to steps. Each step
//! bundles an outbound `send` spec and an optional `on_receive` action tree.
//! This module provides the data model, the loader, the condition and
//! receive-action evaluators, and the [`Interpreter`] facade that ties them
//! to the two external collaborators.

/// Data model for parsed script documents.
pub mod ast;
/// Condition evaluation (atoms, `regex(a, b)`, boolean combinators).
pub mod condition;
/// Collaborator traits for dispatching effects.
pub mod effects;
/// Error types for loading and evaluation.
pub mod error;
/// Interpreter facade owning the parsed document.
pub mod interpreter;
/// Script document loader.
pub mod loader;
/// Recursive receive-action evaluator.
pub mod receive;
/// Step sender and variable interpolation.
pub mod send;
/// Runtime values and contexts.
pub mod value;

pub use ast::{ActionNode, Condition, EffectNode, ScriptDocument, SendSpec, Step, StepKey};
pub use condition::evaluate_condition;
pub use effects::{Messenger, TracingMessenger, TracingUserStore, UserStore};
pub use error::{ConditionError, LoadError, ScriptError};
pub use interpreter::Interpreter;
pub use loader::load;
pub use receive::evaluate_receive;
pub use send::{interpolate, send_step};
pub use value::{Context, ProfileFields, Scalar, VarMap};

/// Convenience result alias for script operations.
pub type Result<T> = std::result::Result<T, ScriptError>;
