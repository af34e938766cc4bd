//! Natural-language-to-code prompt engine facade.
//!
//! Bundles the workspace crates behind feature flags and re-exports the types
//! most callers need.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use codeprompt_primitives as primitives;

/// Prompt rendering and budgeting.
pub use codeprompt_engine as engine;

/// Configuration management (enabled by `config` feature).
#[cfg(feature = "config")]
pub use codeprompt_config as config;

pub use codeprompt_engine::{
    BudgetConfig, CodeEngine, CommentStyle, EngineError, EngineResult, RenderedPrompt,
    TokenEstimator, TruncationPolicy,
};
pub use codeprompt_primitives::Interaction;
