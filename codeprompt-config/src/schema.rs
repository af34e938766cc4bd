//! Strongly typed configuration schema.

use codeprompt_engine::estimator::EstimatorKind;
use codeprompt_engine::{BudgetConfig, CodeEngine, CommentStyle};
use codeprompt_primitives::Interaction;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigResult;

/// Comment syntax of the target language.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageConfig {
    /// `/* ... */` block comments.
    #[default]
    Javascript,
    /// `# ...` line comments.
    Python,
    /// Custom comment operators.
    Custom {
        /// Opening operator.
        open: String,
        /// Closing operator, empty for line comments.
        #[serde(default)]
        close: String,
    },
}

impl LanguageConfig {
    /// Comment style used by the formatter.
    #[must_use]
    pub fn comment_style(&self) -> CommentStyle {
        match self {
            Self::Javascript => CommentStyle::javascript(),
            Self::Python => CommentStyle::python(),
            Self::Custom { open, close } => CommentStyle::new(open.clone(), close.clone()),
        }
    }
}

/// Declarative description of a [`CodeEngine`].
///
/// ```
/// use codeprompt_config::EngineConfig;
///
/// let config = EngineConfig::from_json_str(
///     r#"{
///         "description": "Natural Language Commands to Math Code",
///         "examples": [{ "input": "what's 10 plus 18", "response": "console.log(10 + 18);" }],
///         "budget": { "max_tokens": 180 }
///     }"#,
/// )
/// .unwrap();
///
/// let mut engine = config.build_engine().unwrap();
/// assert!(engine.craft_prompt("what's 2 plus 2").unwrap().ends_with("/* what's 2 plus 2 */\n"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Task description rendered first.
    pub description: Option<String>,
    /// Priming examples in order.
    pub examples: Vec<Interaction>,
    /// Text rendered after the examples.
    pub flow_reset_text: Option<String>,
    /// Comment syntax.
    pub language: LanguageConfig,
    /// Token estimation strategy.
    pub estimator: EstimatorKind,
    /// Token budget.
    pub budget: BudgetConfig,
}

impl EngineConfig {
    /// Builds an engine with an empty history.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Engine`](crate::ConfigError::Engine) if an example
    /// has no response.
    pub fn build_engine(&self) -> ConfigResult<CodeEngine> {
        let mut builder = CodeEngine::builder()
            .examples(self.examples.iter().cloned())
            .comment_style(self.language.comment_style())
            .budget(self.budget)
            .shared_estimator(self.estimator.build());
        if let Some(description) = &self.description {
            builder = builder.description(description.clone());
        }
        if let Some(text) = &self.flow_reset_text {
            builder = builder.flow_reset_text(text.clone());
        }

        let engine = builder.build()?;
        debug!(
            examples = self.examples.len(),
            max_tokens = ?self.budget.max_tokens,
            estimator = ?self.estimator,
            "engine built from config"
        );
        Ok(engine)
    }
}
