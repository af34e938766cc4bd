//! Prompt context engine for natural-language-to-code completion.
//!
//! A [`CodeEngine`] holds a fixed priming context (description, examples and an
//! optional flow-reset block) plus a growing conversation history, and renders
//! them together with a new input into a single prompt. When a token budget is
//! configured, the oldest history entries are dropped until the prompt fits.
//!
//! ```
//! use codeprompt_engine::{CodeEngine, Interaction};
//!
//! let mut engine = CodeEngine::builder()
//!     .description("Natural Language Commands to Math Code")
//!     .example(Interaction::new("what's 10 plus 18", "console.log(10 + 18);").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let prompt = engine.craft_prompt("what's 10 times 18").unwrap();
//! assert!(prompt.ends_with("/* what's 10 times 18 */\n"));
//! ```

#![warn(missing_docs, clippy::pedantic)]

pub mod budget;
pub mod engine;
pub mod error;
pub mod estimator;
pub mod format;
pub mod history;
pub mod priming;
pub mod style;

pub use budget::{BudgetConfig, TruncationPolicy};
pub use codeprompt_primitives::Interaction;
pub use engine::{CodeEngine, CodeEngineBuilder, RenderedPrompt};
pub use error::{EngineError, EngineResult};
pub use estimator::{
    ApproxTokenEstimator, CharCountEstimator, EstimatorKind, SharedEstimator, TokenEstimator,
    WordCountEstimator,
};
pub use history::History;
pub use priming::PrimingContext;
pub use style::CommentStyle;
