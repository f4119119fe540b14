//! Core domain types for the Flashdeck study tool.

/// A single flashcard: a name/definition pair plus a mistake counter.
///
/// Name and definition are fixed at construction; only the mistake count
/// changes over the card's lifetime. Uniqueness of names and definitions is
/// enforced by the store, not here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    name: String,
    definition: String,
    mistakes: u32,
}

impl Card {
    pub fn new(name: impl Into<String>, definition: impl Into<String>, mistakes: u32) -> Self {
        Self {
            name: name.into(),
            definition: definition.into(),
            mistakes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    /// Record one wrong answer against this card
    pub fn note_mistake(&mut self) {
        self.mistakes += 1;
    }

    /// Reset the mistake counter to zero
    pub fn reset_mistakes(&mut self) {
        self.mistakes = 0;
    }
}
