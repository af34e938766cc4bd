//! Shared error definitions for prompt primitives.

use thiserror::Error;

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing prompt primitives.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Interaction failed validation.
    #[error("invalid interaction: {reason}")]
    InvalidInteraction {
        /// Human-readable reason for rejection.
        reason: String,
    },
}

impl Error {
    /// Helper to construct interaction errors from string-like values.
    #[must_use]
    pub fn invalid_interaction(reason: impl Into<String>) -> Self {
        Self::InvalidInteraction {
            reason: reason.into(),
        }
    }
}
