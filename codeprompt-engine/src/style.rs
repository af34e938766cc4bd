//! Comment delimiters used to wrap natural-language text in a prompt.

use serde::{Deserialize, Serialize};

/// Opening and closing comment operators of the target language.
///
/// Natural-language text is rendered inside a comment so that the completion
/// model continues with plain code. An empty `close` operator is used for
/// line-comment languages.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CommentStyle {
    open: String,
    #[serde(default)]
    close: String,
}

impl CommentStyle {
    /// Creates a style from custom operators.
    #[must_use]
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// Block comments as used by JavaScript and other C-family languages.
    #[must_use]
    pub fn javascript() -> Self {
        Self::new("/*", "*/")
    }

    /// Line comments as used by Python.
    #[must_use]
    pub fn python() -> Self {
        Self::new("#", "")
    }

    /// Opening operator.
    #[must_use]
    pub fn open(&self) -> &str {
        &self.open
    }

    /// Closing operator, empty for line comments.
    #[must_use]
    pub fn close(&self) -> &str {
        &self.close
    }
}

impl Default for CommentStyle {
    fn default() -> Self {
        Self::javascript()
    }
}
