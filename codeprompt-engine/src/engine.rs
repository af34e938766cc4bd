//! Budgeted prompt renderer.

use std::fmt;
use std::sync::Arc;

use codeprompt_primitives::Interaction;
use tracing::{debug, warn};

use crate::budget::{BudgetConfig, TruncationPolicy};
use crate::error::{EngineError, EngineResult};
use crate::estimator::{CharCountEstimator, SharedEstimator, TokenEstimator};
use crate::format::{BLOCK_SEPARATOR, format_interaction};
use crate::history::History;
use crate::priming::PrimingContext;
use crate::style::CommentStyle;

/// A rendered prompt together with its budget accounting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedPrompt {
    text: String,
    estimated_tokens: usize,
    dropped: usize,
    max_tokens: Option<usize>,
}

impl RenderedPrompt {
    /// Prompt text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the prompt, returning its text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }

    /// Estimated size of the text.
    #[must_use]
    pub const fn estimated_tokens(&self) -> usize {
        self.estimated_tokens
    }

    /// Number of oldest history entries left out to fit the budget.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Returns `true` if the prompt still exceeds the budget, which only happens
    /// when the priming context and pending input alone are too large.
    #[must_use]
    pub fn is_over_budget(&self) -> bool {
        self.max_tokens.is_some_and(|max| self.estimated_tokens > max)
    }
}

impl fmt::Display for RenderedPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Natural-language-to-code prompt engine.
///
/// Rendering keeps the priming context and pending input intact and drops the
/// oldest history entries, one at a time, until the estimate fits the budget.
/// With [`TruncationPolicy::Transient`] (the default) the owned history is left
/// untouched; with [`TruncationPolicy::Commit`] the dropped entries are removed
/// for good.
///
/// # Examples
///
/// ```
/// use codeprompt_engine::{CodeEngine, Interaction};
///
/// let mut engine = CodeEngine::builder()
///     .description("D")
///     .example(Interaction::new("Make a cube", "makeCube();").unwrap())
///     .build()
///     .unwrap();
///
/// engine
///     .add_interaction(Interaction::new("Make a sphere", "makeSphere();").unwrap())
///     .unwrap();
///
/// assert_eq!(
///     engine.craft_prompt("Make a cone").unwrap(),
///     "/* D */\n\n/* Make a cube */\nmakeCube();\n\n/* Make a sphere */\nmakeSphere();\n\n/* Make a cone */\n"
/// );
/// ```
#[derive(Clone)]
pub struct CodeEngine {
    priming: PrimingContext,
    history: History,
    budget: BudgetConfig,
    style: CommentStyle,
    estimator: SharedEstimator,
}

impl CodeEngine {
    /// Returns a new builder instance.
    #[must_use]
    pub fn builder() -> CodeEngineBuilder {
        CodeEngineBuilder::new()
    }

    /// Priming context rendered at the top of every prompt.
    #[must_use]
    pub fn priming(&self) -> &PrimingContext {
        &self.priming
    }

    /// Current conversation history.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Active budget configuration.
    #[must_use]
    pub const fn budget(&self) -> BudgetConfig {
        self.budget
    }

    /// Comment delimiters used for natural-language text.
    #[must_use]
    pub fn comment_style(&self) -> &CommentStyle {
        &self.style
    }

    /// Estimates the size of `text` with the configured estimator.
    #[must_use]
    pub fn estimate(&self, text: &str) -> usize {
        self.estimator.estimate(text)
    }

    /// Renders the priming context. Returns `""` when there is none.
    #[must_use]
    pub fn build_context(&self) -> String {
        self.priming.render(&self.style)
    }

    /// Renders the history section, each entry followed by a separator.
    #[must_use]
    pub fn build_history(&self) -> String {
        self.history
            .iter()
            .map(|interaction| self.history_block(interaction))
            .collect()
    }

    /// Appends a resolved interaction to the history.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Interaction`] if the interaction has no response.
    pub fn add_interaction(&mut self, interaction: Interaction) -> EngineResult<()> {
        self.history.push(interaction)?;
        debug!(history_len = self.history.len(), "interaction added");
        Ok(())
    }

    /// Appends several interactions in order; nothing is appended on error.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Interaction`] if any interaction has no response.
    pub fn add_interactions(
        &mut self,
        interactions: impl IntoIterator<Item = Interaction>,
    ) -> EngineResult<()> {
        self.history.extend(interactions)?;
        debug!(history_len = self.history.len(), "interactions added");
        Ok(())
    }

    /// Removes the most recent interaction. Returns `None` on an empty history.
    pub fn remove_last_interaction(&mut self) -> Option<Interaction> {
        let removed = self.history.pop_newest();
        debug!(
            removed = removed.is_some(),
            history_len = self.history.len(),
            "last interaction removed"
        );
        removed
    }

    /// Removes the oldest interaction. Returns `None` on an empty history.
    pub fn remove_first_interaction(&mut self) -> Option<Interaction> {
        let removed = self.history.pop_oldest();
        debug!(
            removed = removed.is_some(),
            history_len = self.history.len(),
            "first interaction removed"
        );
        removed
    }

    /// Removes every interaction from the history.
    pub fn clear_history(&mut self) {
        self.history.clear();
        debug!("history cleared");
    }

    /// Renders a prompt for `input` without mutating the engine.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPendingInput`] if `input` is blank.
    pub fn render(&self, input: &str) -> EngineResult<RenderedPrompt> {
        let pending = Interaction::pending(input).map_err(|_| EngineError::InvalidPendingInput {
            reason: "input cannot be empty".into(),
        })?;

        let context = self.build_context();
        let pending = format_interaction(&self.style, &pending);
        let blocks: Vec<String> = self
            .history
            .iter()
            .map(|interaction| self.history_block(interaction))
            .collect();

        let max_tokens = self.budget.max_tokens;
        let mut start = 0;
        loop {
            let text = assemble(&context, &blocks[start..], &pending);
            let estimated_tokens = self.estimator.estimate(&text);

            if self.budget.fits(estimated_tokens) {
                if start > 0 {
                    debug!(
                        dropped = start,
                        estimated_tokens,
                        "history truncated to fit budget"
                    );
                }
                return Ok(RenderedPrompt {
                    text,
                    estimated_tokens,
                    dropped: start,
                    max_tokens,
                });
            }

            if start == blocks.len() {
                warn!(
                    estimated_tokens,
                    max_tokens,
                    estimator = self.estimator.name(),
                    "priming context and input exceed token budget"
                );
                return Ok(RenderedPrompt {
                    text,
                    estimated_tokens,
                    dropped: start,
                    max_tokens,
                });
            }

            start += 1;
        }
    }

    /// Renders a prompt for `input`, applying the configured truncation policy.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPendingInput`] if `input` is blank.
    pub fn craft(&mut self, input: &str) -> EngineResult<RenderedPrompt> {
        let rendered = self.render(input)?;
        if self.budget.truncation == TruncationPolicy::Commit && rendered.dropped() > 0 {
            self.history.drop_oldest(rendered.dropped());
            debug!(
                dropped = rendered.dropped(),
                history_len = self.history.len(),
                "truncation committed to history"
            );
        }
        Ok(rendered)
    }

    /// Renders a prompt for `input` and returns only its text.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPendingInput`] if `input` is blank.
    pub fn craft_prompt(&mut self, input: &str) -> EngineResult<String> {
        self.craft(input).map(RenderedPrompt::into_text)
    }

    fn history_block(&self, interaction: &Interaction) -> String {
        let mut block = format_interaction(&self.style, interaction);
        block.push_str(BLOCK_SEPARATOR);
        block
    }
}

impl Default for CodeEngine {
    fn default() -> Self {
        Self {
            priming: PrimingContext::default(),
            history: History::new(),
            budget: BudgetConfig::default(),
            style: CommentStyle::default(),
            estimator: Arc::new(CharCountEstimator),
        }
    }
}

impl fmt::Debug for CodeEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeEngine")
            .field("priming", &self.priming)
            .field("history", &self.history)
            .field("budget", &self.budget)
            .field("style", &self.style)
            .field("estimator", &self.estimator.name())
            .finish()
    }
}

fn assemble(context: &str, history: &[String], pending: &str) -> String {
    let len = context.len() + history.iter().map(String::len).sum::<usize>() + pending.len();
    let mut text = String::with_capacity(len);
    text.push_str(context);
    for block in history {
        text.push_str(block);
    }
    text.push_str(pending);
    text
}

/// Builder for [`CodeEngine`].
#[derive(Default)]
pub struct CodeEngineBuilder {
    description: Option<String>,
    examples: Vec<Interaction>,
    flow_reset_text: Option<String>,
    history: Vec<Interaction>,
    budget: BudgetConfig,
    style: CommentStyle,
    estimator: Option<SharedEstimator>,
}

impl CodeEngineBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the task description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds one priming example.
    #[must_use]
    pub fn example(mut self, example: Interaction) -> Self {
        self.examples.push(example);
        self
    }

    /// Adds priming examples in order.
    #[must_use]
    pub fn examples(mut self, examples: impl IntoIterator<Item = Interaction>) -> Self {
        self.examples.extend(examples);
        self
    }

    /// Sets text rendered after the examples, before the conversation.
    #[must_use]
    pub fn flow_reset_text(mut self, text: impl Into<String>) -> Self {
        self.flow_reset_text = Some(text.into());
        self
    }

    /// Seeds the history.
    #[must_use]
    pub fn history(mut self, interactions: impl IntoIterator<Item = Interaction>) -> Self {
        self.history.extend(interactions);
        self
    }

    /// Sets the budget configuration.
    #[must_use]
    pub const fn budget(mut self, budget: BudgetConfig) -> Self {
        self.budget = budget;
        self
    }

    /// Sets the token budget, keeping the current truncation policy.
    #[must_use]
    pub const fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.budget.max_tokens = Some(max_tokens);
        self
    }

    /// Sets the truncation policy.
    #[must_use]
    pub const fn truncation(mut self, truncation: TruncationPolicy) -> Self {
        self.budget.truncation = truncation;
        self
    }

    /// Sets the comment delimiters.
    #[must_use]
    pub fn comment_style(mut self, style: CommentStyle) -> Self {
        self.style = style;
        self
    }

    /// Replaces the default character-count estimator.
    #[must_use]
    pub fn estimator(mut self, estimator: impl TokenEstimator + 'static) -> Self {
        self.estimator = Some(Arc::new(estimator));
        self
    }

    /// Replaces the estimator with an already shared handle.
    #[must_use]
    pub fn shared_estimator(mut self, estimator: SharedEstimator) -> Self {
        self.estimator = Some(estimator);
        self
    }

    /// Finalises engine construction.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Interaction`] if an example or seeded history
    /// entry has no response.
    pub fn build(self) -> EngineResult<CodeEngine> {
        let priming = PrimingContext::new(self.description, self.examples, self.flow_reset_text)?;
        let mut history = History::new();
        history.extend(self.history)?;

        Ok(CodeEngine {
            priming,
            history,
            budget: self.budget,
            style: self.style,
            estimator: self
                .estimator
                .unwrap_or_else(|| Arc::new(CharCountEstimator)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::WordCountEstimator;

    fn math_engine(max_tokens: usize, truncation: TruncationPolicy) -> CodeEngine {
        CodeEngine::builder()
            .description("Natural Language Commands to Math Code")
            .example(Interaction::new("what's 10 plus 18", "console.log(10 + 18);").unwrap())
            .example(Interaction::new("what's 10 times 18", "console.log(10 * 18);").unwrap())
            .max_tokens(max_tokens)
            .truncation(truncation)
            .build()
            .unwrap()
    }

    fn divide() -> Interaction {
        Interaction::new("what's 18 divided by 10", "console.log(18 / 10);").unwrap()
    }

    fn modulo() -> Interaction {
        Interaction::new("what's 18 factorial 10", "console.log(18 % 10);").unwrap()
    }

    #[test]
    fn empty_engine_renders_only_input() {
        let mut engine = CodeEngine::default();
        assert_eq!(engine.build_context(), "");
        assert_eq!(engine.craft_prompt("Make a cube").unwrap(), "/* Make a cube */\n");
    }

    #[test]
    fn blank_input_is_rejected() {
        let engine = CodeEngine::default();
        let err = engine.render("  ").expect_err("should fail");
        assert!(matches!(err, EngineError::InvalidPendingInput { .. }));
    }

    #[test]
    fn rejects_unresolved_history() {
        let mut engine = CodeEngine::default();
        let err = engine
            .add_interaction(Interaction::pending("Make a cube").unwrap())
            .expect_err("should fail");
        assert!(matches!(err, EngineError::Interaction { .. }));
        assert!(engine.history().is_empty());
    }

    #[test]
    fn render_reports_dropped_entries() {
        let mut engine = math_engine(180, TruncationPolicy::Transient);
        engine.add_interaction(divide()).unwrap();

        let rendered = engine.render("what's 18 factorial 10").unwrap();
        assert_eq!(rendered.dropped(), 1);
        assert_eq!(rendered.estimated_tokens(), 170);
        assert!(!rendered.is_over_budget());
        assert!(!rendered.text().contains("divided"));
    }

    #[test]
    fn transient_truncation_keeps_history() {
        let mut engine = math_engine(210, TruncationPolicy::Transient);
        engine.add_interaction(divide()).unwrap();

        let first = engine.craft_prompt("what's 18 factorial 10").unwrap();
        assert_eq!(engine.history().len(), 1);
        let second = engine.craft_prompt("what's 18 factorial 10").unwrap();
        assert_eq!(first, second);

        // A shorter input leaves room for the retained entry again.
        let short = engine.craft_prompt("18!").unwrap();
        assert!(short.contains("divided"));
    }

    #[test]
    fn committed_truncation_shrinks_history() {
        let mut engine = math_engine(210, TruncationPolicy::Commit);
        engine.add_interaction(divide()).unwrap();

        let first = engine.craft_prompt("what's 18 factorial 10").unwrap();
        assert!(engine.history().is_empty());
        let second = engine.craft_prompt("what's 18 factorial 10").unwrap();
        assert_eq!(first, second);

        let short = engine.craft_prompt("18!").unwrap();
        assert!(!short.contains("divided"));
    }

    #[test]
    fn commit_drops_only_what_was_needed() {
        let mut engine = math_engine(260, TruncationPolicy::Commit);
        engine.add_interactions([divide(), modulo()]).unwrap();

        let rendered = engine.craft("what's 18 to the power of 10").unwrap();
        assert_eq!(rendered.dropped(), 1);
        assert_eq!(engine.history().to_vec(), vec![modulo()]);
    }

    #[test]
    fn oversized_minimal_prompt_is_flagged() {
        let mut engine = math_engine(10, TruncationPolicy::Transient);
        engine.add_interaction(divide()).unwrap();

        let rendered = engine.render("what's 18 factorial 10").unwrap();
        assert!(rendered.is_over_budget());
        assert_eq!(rendered.dropped(), 1);
        assert!(rendered.text().starts_with("/* Natural Language Commands to Math Code */\n"));
        assert!(rendered.text().ends_with("/* what's 18 factorial 10 */\n"));
    }

    #[test]
    fn unbounded_budget_never_truncates() {
        let mut engine = CodeEngine::builder().build().unwrap();
        engine
            .add_interactions((0..50).map(|n| {
                Interaction::new(format!("step {n}"), "x".repeat(100)).unwrap()
            }))
            .unwrap();
        let rendered = engine.render("done").unwrap();
        assert_eq!(rendered.dropped(), 0);
        assert!(!rendered.is_over_budget());
    }

    #[test]
    fn custom_estimator_drives_truncation() {
        let mut engine = CodeEngine::builder()
            .estimator(WordCountEstimator)
            .max_tokens(8)
            .build()
            .unwrap();
        engine
            .add_interactions([
                Interaction::new("one two", "a").unwrap(),
                Interaction::new("three", "b").unwrap(),
            ])
            .unwrap();

        // "/* three */\nb\n\n/* go */\n" is 7 words; with the first entry it is 12.
        let rendered = engine.render("go").unwrap();
        assert_eq!(rendered.dropped(), 1);
        assert_eq!(rendered.text(), "/* three */\nb\n\n/* go */\n");
    }

    #[test]
    fn closure_estimator_is_accepted() {
        let engine = CodeEngine::builder()
            .estimator(|text: &str| text.lines().count())
            .build()
            .unwrap();
        assert_eq!(engine.estimate("a\nb"), 2);
    }

    #[test]
    fn remove_first_and_clear() {
        let mut engine = CodeEngine::builder()
            .history([divide(), modulo()])
            .build()
            .unwrap();

        assert_eq!(engine.remove_first_interaction(), Some(divide()));
        assert_eq!(engine.build_history(), "/* what's 18 factorial 10 */\nconsole.log(18 % 10);\n\n");
        engine.clear_history();
        assert_eq!(engine.build_history(), "");
        assert_eq!(engine.remove_last_interaction(), None);
    }

    #[test]
    fn python_style_prompt() {
        let mut engine = CodeEngine::builder()
            .description("Math in Python")
            .example(Interaction::new("add 1 and 2", "print(1 + 2)").unwrap())
            .comment_style(CommentStyle::python())
            .build()
            .unwrap();
        assert_eq!(
            engine.craft_prompt("add 3 and 4").unwrap(),
            "# Math in Python\n\n# add 1 and 2\nprint(1 + 2)\n\n# add 3 and 4\n"
        );
    }
}
