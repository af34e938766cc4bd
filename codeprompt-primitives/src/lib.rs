//! Core shared types for natural-language-to-code prompting.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod interaction;

/// Error type and result alias shared across the workspace.
pub use error::{Error, Result};
/// A natural-language input paired with its code response.
pub use interaction::Interaction;
