//! Error types for prompt rendering.

use thiserror::Error;

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors emitted by the prompt engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// An example or history interaction failed validation.
    #[error(transparent)]
    Interaction {
        /// Source validation error.
        #[from]
        source: codeprompt_primitives::Error,
    },

    /// The input to complete was empty.
    #[error("invalid pending input: {reason}")]
    InvalidPendingInput {
        /// Human-readable reason for rejection.
        reason: String,
    },
}
