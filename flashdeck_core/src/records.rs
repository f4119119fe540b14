//! The colon-delimited record codec.
//!
//! One record per line, `name:definition:mistakes`. The format has no
//! escaping: a colon inside a name or definition cannot round-trip. This is
//! a fixed wire contract shared with existing deck files, so the codec keeps
//! the plain split-on-colon behavior rather than adding quoting.

use crate::types::Card;
use crate::{Error, Result};

/// One parsed line of a deck file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub definition: String,
    pub mistakes: u32,
}

impl Record {
    /// Parse a single `name:definition:mistakes` line.
    ///
    /// `line_no` is 1-based and only used for error reporting. A line that
    /// does not split into exactly three fields, or whose count field is not
    /// a non-negative base-10 integer, is malformed.
    pub fn parse_line(line: &str, line_no: usize) -> Result<Self> {
        let fields: Vec<&str> = line.split(':').collect();
        if fields.len() != 3 {
            return Err(Error::MalformedRecord {
                line: line_no,
                reason: format!("expected 3 colon-separated fields, got {}", fields.len()),
            });
        }

        let mistakes: u32 = fields[2].parse().map_err(|_| Error::MalformedRecord {
            line: line_no,
            reason: format!("mistake count {:?} is not a non-negative integer", fields[2]),
        })?;

        Ok(Record {
            name: fields[0].to_string(),
            definition: fields[1].to_string(),
            mistakes,
        })
    }

    /// Serialize back to the wire format (no trailing newline)
    pub fn to_line(&self) -> String {
        format!("{}:{}:{}", self.name, self.definition, self.mistakes)
    }
}

impl From<&Card> for Record {
    fn from(card: &Card) -> Self {
        Record {
            name: card.name().to_string(),
            definition: card.definition().to_string(),
            mistakes: card.mistakes(),
        }
    }
}

impl From<Record> for Card {
    fn from(record: Record) -> Self {
        Card::new(record.name, record.definition, record.mistakes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_line() {
        let record = Record::parse_line("capital:Paris:3", 1).unwrap();
        assert_eq!(record.name, "capital");
        assert_eq!(record.definition, "Paris");
        assert_eq!(record.mistakes, 3);
    }

    #[test]
    fn test_parse_zero_mistakes() {
        let record = Record::parse_line("author:Orwell:0", 1).unwrap();
        assert_eq!(record.mistakes, 0);
    }

    #[test]
    fn test_too_few_fields_is_malformed() {
        let err = Record::parse_line("capital:Paris", 4).unwrap_err();
        match err {
            Error::MalformedRecord { line, .. } => assert_eq!(line, 4),
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_too_many_fields_is_malformed() {
        // A colon inside the definition cannot be told apart from a field
        // separator; the line is rejected.
        assert!(Record::parse_line("time:12:30:0", 1).is_err());
    }

    #[test]
    fn test_bad_count_is_malformed() {
        assert!(Record::parse_line("capital:Paris:many", 1).is_err());
        assert!(Record::parse_line("capital:Paris:-1", 1).is_err());
        assert!(Record::parse_line("capital:Paris:", 1).is_err());
    }

    #[test]
    fn test_line_roundtrip() {
        let record = Record {
            name: "capital".into(),
            definition: "Paris".into(),
            mistakes: 7,
        };
        let line = record.to_line();
        assert_eq!(line, "capital:Paris:7");
        assert_eq!(Record::parse_line(&line, 1).unwrap(), record);
    }

    #[test]
    fn test_card_conversion() {
        let card = Card::new("capital", "Paris", 2);
        let record = Record::from(&card);
        assert_eq!(record.to_line(), "capital:Paris:2");
        let back: Card = record.into();
        assert_eq!(back, card);
    }
}
