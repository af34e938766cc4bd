//! Block formatting shared by examples, history entries and the pending input.

use std::fmt::Write;

use codeprompt_primitives::Interaction;

use crate::style::CommentStyle;

/// Separator appended after every block except the pending one.
///
/// Each block already ends with a newline, so one more yields a blank line.
pub const BLOCK_SEPARATOR: &str = "\n";

/// Renders `text` as a single comment line terminated by a newline.
#[must_use]
pub fn format_comment(style: &CommentStyle, text: &str) -> String {
    let mut block = String::with_capacity(style.open().len() + text.len() + style.close().len() + 3);
    let _ = write!(block, "{} {text}", style.open());
    if !style.close().is_empty() {
        let _ = write!(block, " {}", style.close());
    }
    block.push('\n');
    block
}

/// Renders an interaction as its comment line followed by the response line, if any.
#[must_use]
pub fn format_interaction(style: &CommentStyle, interaction: &Interaction) -> String {
    let mut block = format_comment(style, interaction.input());
    if let Some(response) = interaction.response() {
        block.push_str(response);
        block.push('\n');
    }
    block
}
