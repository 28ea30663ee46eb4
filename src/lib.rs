//! Rhyzal – a declarative YAML conversational-script interpreter
//!
//! Script authors describe, per step, what to send outbound and what to do
//! when a reply arrives, without writing code. This crate turns that
//! declaration into concrete effects against two injected collaborators:
//! - An outbound messaging transport (text messages and file attachments)
//! - A user-state store (status updates and profile fields)
//!
//! The engine itself is a pure, synchronous evaluator: script
//! parsing/validation, `{{var}}` interpolation, a boolean condition
//! evaluator, and a recursive receive-action evaluator.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Script model, loader, and evaluators
pub mod script;

// Re-export key types for convenience
pub use script::{Context, Interpreter, Messenger, ScriptError, UserStore};

/// Current version of the Rhyzal interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
