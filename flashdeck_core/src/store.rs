//! The in-memory card store.
//!
//! Holds the deck in insertion order and implements the rules the rest of
//! the system leans on:
//! - names and definitions are each unique across the store
//! - imports overwrite by name, moving the card to the end of the order
//! - quizzing walks the deck in insertion order and detects answers that
//!   belong to a different card
//! - hardest-card lookup reports ties in insertion order
//!
//! The store performs no terminal or file I/O; quizzing suspends on a
//! caller-supplied [`AnswerSource`], and every operation returns data for
//! the driver to render.

use crate::records::Record;
use crate::types::Card;
use crate::{Error, Result};
use std::collections::HashMap;
use std::fmt;

/// The verdict for one quiz question
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AskOutcome {
    Correct,
    Wrong {
        /// The asked card's definition
        expected: String,
        /// Set when the answer is the definition of a different card
        matches_other: Option<String>,
    },
}

impl fmt::Display for AskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AskOutcome::Correct => write!(f, "Correct!"),
            AskOutcome::Wrong {
                expected,
                matches_other: Some(other),
            } => write!(
                f,
                "Wrong. The right answer is \"{}\", but your definition is correct for \"{}\".",
                expected, other
            ),
            AskOutcome::Wrong {
                expected,
                matches_other: None,
            } => write!(f, "Wrong. The right answer is \"{}\".", expected),
        }
    }
}

/// Capability the caller supplies to a quiz run.
///
/// `answer` blocks until the user has typed a reply to the given card's
/// prompt; `observe` is called with each verdict as soon as it is
/// determined, so a driver can interleave verdicts with prompts.
pub trait AnswerSource {
    fn answer(&mut self, card: &Card) -> Result<String>;

    fn observe(&mut self, _outcome: &AskOutcome) {}
}

/// Any `FnMut(&Card) -> Result<String>` closure is an answer source that
/// ignores verdicts. Convenient for tests and scripted runs.
impl<F> AnswerSource for F
where
    F: FnMut(&Card) -> Result<String>,
{
    fn answer(&mut self, card: &Card) -> Result<String> {
        self(card)
    }
}

/// The cards sharing the maximum nonzero mistake count, in insertion order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HardestCards {
    pub names: Vec<String>,
    pub mistakes: u32,
}

/// An insertion-ordered deck of cards with unique names and definitions
#[derive(Clone, Debug, Default)]
pub struct CardStore {
    cards: Vec<Card>,
}

impl CardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in insertion order
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.cards.iter().any(|c| c.name() == name)
    }

    pub fn contains_definition(&self, definition: &str) -> bool {
        self.cards.iter().any(|c| c.definition() == definition)
    }

    /// Append a new card with a zero mistake count.
    ///
    /// Fails without touching the store if the name or the definition is
    /// already taken (checked in that order).
    pub fn add(&mut self, name: &str, definition: &str) -> Result<()> {
        if self.contains_name(name) {
            return Err(Error::DuplicateName(name.to_string()));
        }
        if self.contains_definition(definition) {
            return Err(Error::DuplicateDefinition(definition.to_string()));
        }
        self.cards.push(Card::new(name, definition, 0));
        tracing::debug!("Added card {:?}", name);
        Ok(())
    }

    /// Remove the card with the given name
    pub fn remove(&mut self, name: &str) -> Result<()> {
        match self.cards.iter().position(|c| c.name() == name) {
            Some(index) => {
                self.cards.remove(index);
                tracing::debug!("Removed card {:?}", name);
                Ok(())
            }
            None => Err(Error::NotFound(name.to_string())),
        }
    }

    /// Load one record, overwriting by name.
    ///
    /// A record whose name is already present replaces the existing card and
    /// becomes the newest entry, so re-imported cards move to the end of the
    /// quiz order.
    pub fn import_record(&mut self, record: Record) {
        if let Some(index) = self.cards.iter().position(|c| c.name() == record.name) {
            self.cards.remove(index);
        }
        self.cards.push(record.into());
    }

    /// Load parsed records into the store, overwriting by name.
    /// Returns the number of records loaded.
    pub fn import_records(&mut self, records: Vec<Record>) -> usize {
        let count = records.len();
        for record in records {
            self.import_record(record);
        }
        tracing::debug!("Imported {} records", count);
        count
    }

    /// Parse and load deck-file lines, one record per line.
    ///
    /// Lines are applied as they parse; the first malformed line aborts the
    /// import, but records loaded before it stay in the store.
    pub fn import_lines<'a>(&mut self, lines: impl IntoIterator<Item = &'a str>) -> Result<usize> {
        let mut count = 0;
        for (index, line) in lines.into_iter().enumerate() {
            let record = Record::parse_line(line, index + 1)?;
            self.import_record(record);
            count += 1;
        }
        tracing::debug!("Imported {} records", count);
        Ok(count)
    }

    /// The whole deck as records, in insertion order
    pub fn export_records(&self) -> Vec<Record> {
        self.cards.iter().map(Record::from).collect()
    }

    /// Run a quiz over the deck in insertion order.
    ///
    /// The stopping test is `index > count`, so a request for N presents up
    /// to N + 1 questions (bounded by the deck size). This boundary is part
    /// of the tool's observable contract and must not be tightened to `>=`.
    ///
    /// The definition-to-name map is built once over the full deck before
    /// the first question, so cross-card detection sees the deck as it was
    /// when the quiz began.
    pub fn ask<S>(&mut self, count: usize, source: &mut S) -> Result<Vec<AskOutcome>>
    where
        S: AnswerSource + ?Sized,
    {
        let names_by_definition: HashMap<String, String> = self
            .cards
            .iter()
            .map(|c| (c.definition().to_string(), c.name().to_string()))
            .collect();

        let mut outcomes = Vec::new();
        for index in 0..self.cards.len() {
            if index > count {
                break;
            }

            let answer = source.answer(&self.cards[index])?;
            let card = &mut self.cards[index];

            let outcome = if answer == card.definition() {
                AskOutcome::Correct
            } else {
                card.note_mistake();
                AskOutcome::Wrong {
                    expected: card.definition().to_string(),
                    matches_other: names_by_definition.get(&answer).cloned(),
                }
            };

            source.observe(&outcome);
            outcomes.push(outcome);
        }

        tracing::debug!("Asked {} questions", outcomes.len());
        Ok(outcomes)
    }

    /// The cards with the maximum mistake count, or `None` when the store is
    /// empty or no card has a mistake
    pub fn hardest_cards(&self) -> Option<HardestCards> {
        let max = self.cards.iter().map(Card::mistakes).max().unwrap_or(0);
        if max == 0 {
            return None;
        }
        let names = self
            .cards
            .iter()
            .filter(|c| c.mistakes() == max)
            .map(|c| c.name().to_string())
            .collect();
        Some(HardestCards {
            names,
            mistakes: max,
        })
    }

    /// Zero every card's mistake count
    pub fn reset_stats(&mut self) {
        for card in &mut self.cards {
            card.reset_mistakes();
        }
        tracing::debug!("Reset mistake counters for {} cards", self.cards.len());
    }
}
