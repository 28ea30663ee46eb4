//! Error types for the Rhyzal interpreter
//!
//! Domain errors use thiserror; collaborator failures cross the trait
//! boundary as `anyhow::Error` and are folded in at the top level.

use thiserror::Error;

/// Top-level interpreter error
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Script text could not be loaded into a document
    #[error("Invalid script: {0}")]
    InvalidScript(#[from] LoadError),

    /// `send`/`receive` called before a document was loaded
    #[error("script not initialized: no document loaded")]
    NotInitialized,

    /// Requested step key is absent from the document
    #[error("step '{0}' missing from script")]
    StepMissing(String),

    /// Condition evaluation failed
    #[error("Invalid condition: {0}")]
    Condition(#[from] ConditionError),

    /// A collaborator call (message, attachment, status, profile) failed
    #[error("effect dispatch failed: {0}")]
    Effect(#[from] anyhow::Error),
}

/// Loader-specific errors
#[derive(Debug, Error)]
pub enum LoadError {
    /// Input was not well-formed YAML
    #[error("malformed input: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Input parsed but was not a mapping
    #[error("document is not a mapping")]
    NotAMapping,

    /// Top-level `script` key is missing
    #[error("missing top-level 'script' key")]
    MissingScriptKey,

    /// Document contains no steps
    #[error("script contains no steps")]
    Empty,
}

/// Convenience result alias for loader operations
pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// Condition-evaluation errors
///
/// These are local and recoverable: the receive evaluator treats a failed
/// condition as false rather than aborting the surrounding action tree.
#[derive(Debug, Error)]
pub enum ConditionError {
    /// Condition atom did not match any recognized form
    #[error("malformed condition atom: {0}")]
    Malformed(String),

    /// A `/…/` literal did not compile as a regular expression
    #[error("invalid pattern '{pattern}': {detail}")]
    Pattern {
        /// Pattern text as written in the script
        pattern: String,
        /// Compilation failure details
        detail: String,
    },
}

/// Convenience result alias for condition evaluation
pub type ConditionResult<T> = std::result::Result<T, ConditionError>;
