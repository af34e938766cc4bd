//! Conversation history accumulated during a session.

use std::collections::VecDeque;

use codeprompt_primitives::Interaction;

use crate::error::EngineResult;

/// Ordered, resolved interactions. New entries go to the back; budget
/// truncation removes from the front.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<Interaction>,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one interaction.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Interaction`](crate::EngineError::Interaction) if
    /// the interaction has no response.
    pub fn push(&mut self, interaction: Interaction) -> EngineResult<()> {
        interaction.ensure_resolved()?;
        self.entries.push_back(interaction);
        Ok(())
    }

    /// Appends interactions in order. Nothing is appended if any is unresolved.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Interaction`](crate::EngineError::Interaction) for
    /// the first interaction without a response.
    pub fn extend(
        &mut self,
        interactions: impl IntoIterator<Item = Interaction>,
    ) -> EngineResult<()> {
        let interactions: Vec<_> = interactions.into_iter().collect();
        for interaction in &interactions {
            interaction.ensure_resolved()?;
        }
        self.entries.extend(interactions);
        Ok(())
    }

    /// Removes the most recently appended interaction.
    pub fn pop_newest(&mut self) -> Option<Interaction> {
        self.entries.pop_back()
    }

    /// Removes the oldest interaction.
    pub fn pop_oldest(&mut self) -> Option<Interaction> {
        self.entries.pop_front()
    }

    /// Permanently removes up to `count` of the oldest interactions.
    pub fn drop_oldest(&mut self, count: usize) {
        let count = count.min(self.entries.len());
        self.entries.drain(..count);
    }

    /// Removes every interaction.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of interactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no interactions are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Interaction> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Copies the interactions, oldest first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Interaction> {
        self.entries.iter().cloned().collect()
    }
}
