//! Token budget configuration.

use serde::{Deserialize, Serialize};

/// What happens to history entries dropped to fit the budget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruncationPolicy {
    /// Entries are only left out of the returned prompt; the owned history is untouched.
    #[default]
    Transient,
    /// Dropped entries are permanently removed from the owned history.
    Commit,
}

/// Budget applied to every rendered prompt.
///
/// # Examples
///
/// ```
/// use codeprompt_engine::{BudgetConfig, TruncationPolicy};
///
/// let budget = BudgetConfig::with_max_tokens(180);
/// assert!(budget.fits(180));
/// assert!(!budget.fits(181));
/// assert_eq!(budget.truncation, TruncationPolicy::Transient);
/// assert!(BudgetConfig::default().fits(usize::MAX));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    /// Upper bound on the estimated size of a rendered prompt. `None` is unbounded.
    pub max_tokens: Option<usize>,
    /// Whether truncation is committed to the owned history.
    pub truncation: TruncationPolicy,
}

impl BudgetConfig {
    /// Creates a bounded budget with the default truncation policy.
    #[must_use]
    pub fn with_max_tokens(max_tokens: usize) -> Self {
        Self {
            max_tokens: Some(max_tokens),
            ..Self::default()
        }
    }

    /// Sets the truncation policy.
    #[must_use]
    pub const fn truncation(mut self, truncation: TruncationPolicy) -> Self {
        self.truncation = truncation;
        self
    }

    /// Returns `true` if `estimated_tokens` is within the budget.
    #[must_use]
    pub fn fits(&self, estimated_tokens: usize) -> bool {
        self.max_tokens.is_none_or(|max| estimated_tokens <= max)
    }
}
