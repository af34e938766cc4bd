//! Token estimation strategies.
//!
//! The renderer only relies on an estimator being deterministic and monotone:
//! estimating more text never yields a smaller count than estimating less.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Shared, swappable estimator handle held by the engine.
pub type SharedEstimator = Arc<dyn TokenEstimator>;

/// Maps text to an approximate, non-negative size in tokens.
pub trait TokenEstimator: Send + Sync {
    /// Returns the estimated size of `text`.
    fn estimate(&self, text: &str) -> usize;

    /// Short label used in diagnostics.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> TokenEstimator for F
where
    F: Fn(&str) -> usize + Send + Sync,
{
    fn estimate(&self, text: &str) -> usize {
        self(text)
    }
}

/// Counts Unicode scalar values. This is the default estimator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CharCountEstimator;

impl TokenEstimator for CharCountEstimator {
    fn estimate(&self, text: &str) -> usize {
        text.chars().count()
    }

    fn name(&self) -> &str {
        "characters"
    }
}

/// Counts whitespace-separated words.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WordCountEstimator;

impl TokenEstimator for WordCountEstimator {
    fn estimate(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }

    fn name(&self) -> &str {
        "words"
    }
}

/// Heuristic of roughly four characters per token (average for English), rounded up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApproxTokenEstimator;

const CHARS_PER_TOKEN: usize = 4;

impl TokenEstimator for ApproxTokenEstimator {
    fn estimate(&self, text: &str) -> usize {
        text.chars().count().div_ceil(CHARS_PER_TOKEN)
    }

    fn name(&self) -> &str {
        "approximate"
    }
}

/// Built-in estimators selectable from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorKind {
    /// [`CharCountEstimator`].
    #[default]
    Characters,
    /// [`WordCountEstimator`].
    Words,
    /// [`ApproxTokenEstimator`].
    Approximate,
}

impl EstimatorKind {
    /// Instantiates the selected estimator.
    #[must_use]
    pub fn build(self) -> SharedEstimator {
        match self {
            Self::Characters => Arc::new(CharCountEstimator),
            Self::Words => Arc::new(WordCountEstimator),
            Self::Approximate => Arc::new(ApproxTokenEstimator),
        }
    }
}
