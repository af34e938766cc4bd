//! Fixed priming context rendered at the top of every prompt.

use codeprompt_primitives::Interaction;

use crate::error::EngineResult;
use crate::format::{BLOCK_SEPARATOR, format_comment, format_interaction};
use crate::style::CommentStyle;

/// Description, examples and optional flow-reset text. Immutable once built
/// and never truncated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrimingContext {
    description: Option<String>,
    examples: Vec<Interaction>,
    flow_reset_text: Option<String>,
}

impl PrimingContext {
    /// Creates a priming context.
    ///
    /// Blank descriptions and flow-reset texts are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Interaction`](crate::EngineError::Interaction) if
    /// an example has no response.
    pub fn new(
        description: Option<String>,
        examples: Vec<Interaction>,
        flow_reset_text: Option<String>,
    ) -> EngineResult<Self> {
        for example in &examples {
            example.ensure_resolved()?;
        }
        Ok(Self {
            description: description.filter(|text| !text.trim().is_empty()),
            examples,
            flow_reset_text: flow_reset_text.filter(|text| !text.trim().is_empty()),
        })
    }

    /// Task description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Examples in insertion order.
    #[must_use]
    pub fn examples(&self) -> &[Interaction] {
        &self.examples
    }

    /// Text rendered after the examples to separate them from the conversation.
    #[must_use]
    pub fn flow_reset_text(&self) -> Option<&str> {
        self.flow_reset_text.as_deref()
    }

    /// Returns `true` when nothing would be rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.examples.is_empty() && self.flow_reset_text.is_none()
    }

    /// Renders the context. Every block is followed by a separator, so further
    /// blocks can be appended directly. Empty contexts render as `""`.
    #[must_use]
    pub fn render(&self, style: &CommentStyle) -> String {
        let mut blocks = Vec::with_capacity(self.examples.len() + 2);
        if let Some(description) = &self.description {
            blocks.push(format_comment(style, description));
        }
        blocks.extend(
            self.examples
                .iter()
                .map(|example| format_interaction(style, example)),
        );
        if let Some(flow_reset_text) = &self.flow_reset_text {
            blocks.push(format_comment(style, flow_reset_text));
        }

        let mut context = String::new();
        for block in blocks {
            context.push_str(&block);
            context.push_str(BLOCK_SEPARATOR);
        }
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn examples() -> Vec<Interaction> {
        vec![
            Interaction::new("Make a cube", "makeCube();").unwrap(),
            Interaction::new("Make a sphere", "makeSphere();").unwrap(),
        ]
    }

    #[test]
    fn empty_context_renders_nothing() {
        let context = PrimingContext::default();
        assert!(context.is_empty());
        assert_eq!(context.render(&CommentStyle::default()), "");
    }

    #[test]
    fn renders_description_then_examples() {
        let context = PrimingContext::new(Some("D".into()), examples(), None).unwrap();
        assert_eq!(
            context.render(&CommentStyle::default()),
            "/* D */\n\n/* Make a cube */\nmakeCube();\n\n/* Make a sphere */\nmakeSphere();\n\n"
        );
    }

    #[test]
    fn flow_reset_follows_examples() {
        let context =
            PrimingContext::new(None, examples(), Some("New session".into())).unwrap();
        assert!(
            context
                .render(&CommentStyle::default())
                .ends_with("makeSphere();\n\n/* New session */\n\n")
        );
    }

    #[test]
    fn blank_description_is_ignored() {
        let context = PrimingContext::new(Some("  ".into()), Vec::new(), None).unwrap();
        assert!(context.is_empty());
    }

    #[test]
    fn rejects_pending_examples() {
        let examples = vec![Interaction::pending("Make a cone").unwrap()];
        assert!(PrimingContext::new(None, examples, None).is_err());
    }
}
