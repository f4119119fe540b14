#![forbid(unsafe_code)]

//! Core domain model and business logic for the Flashdeck study tool.
//!
//! This crate provides:
//! - Domain types (cards, quiz outcomes)
//! - The card store (uniqueness rules, quizzing, hardest-card stats)
//! - The colon-delimited record codec
//! - Configuration loading

pub mod types;
pub mod error;
pub mod records;
pub mod store;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::Card;
pub use records::Record;
pub use store::{AnswerSource, AskOutcome, CardStore, HardestCards};
pub use config::Config;
