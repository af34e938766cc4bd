//! Natural-language input and code response pairs.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One natural-language input and, once resolved, the code that answers it.
///
/// Priming examples and history entries always carry a response. The trailing
/// input of a rendered prompt is *pending* and has none.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInteraction")]
pub struct Interaction {
    input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<String>,
}

#[derive(Deserialize)]
struct RawInteraction {
    input: String,
    #[serde(default)]
    response: Option<String>,
}

impl TryFrom<RawInteraction> for Interaction {
    type Error = Error;

    fn try_from(raw: RawInteraction) -> Result<Self> {
        validate_input(&raw.input)?;
        Ok(Self {
            input: raw.input,
            response: raw.response,
        })
    }
}

impl Interaction {
    /// Creates a resolved interaction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInteraction`] if `input` is empty or blank.
    pub fn new(input: impl Into<String>, response: impl Into<String>) -> Result<Self> {
        let input = input.into();
        validate_input(&input)?;
        Ok(Self {
            input,
            response: Some(response.into()),
        })
    }

    /// Creates a pending interaction that still awaits its response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInteraction`] if `input` is empty or blank.
    pub fn pending(input: impl Into<String>) -> Result<Self> {
        let input = input.into();
        validate_input(&input)?;
        Ok(Self {
            input,
            response: None,
        })
    }

    /// Natural-language input text.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Code response, if resolved.
    #[must_use]
    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    /// Returns `true` when the interaction carries a response.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.response.is_some()
    }

    /// Checks that the interaction can be stored as an example or history entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInteraction`] if the interaction has no response.
    pub fn ensure_resolved(&self) -> Result<()> {
        if self.is_resolved() {
            Ok(())
        } else {
            Err(Error::invalid_interaction(format!(
                "interaction `{}` has no response",
                self.input
            )))
        }
    }
}

fn validate_input(input: &str) -> Result<()> {
    if input.trim().is_empty() {
        return Err(Error::invalid_interaction("input cannot be empty"));
    }
    Ok(())
}
