//! Error types for the flashdeck_core library.
//!
//! Every user-visible failure is a variant here; the `Display` strings are
//! the exact messages the driver shows, so a failed operation can be printed
//! (and transcribed) directly.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for flashdeck_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A card with this name is already in the store
    #[error("The card \"{0}\" already exists.")]
    DuplicateName(String),

    /// A card with this definition is already in the store
    #[error("The definition \"{0}\" already exists.")]
    DuplicateDefinition(String),

    /// Removal target does not exist
    #[error("Can't remove \"{0}\": there is no such card.")]
    NotFound(String),

    /// Import path does not exist (detected by the driver, distinct from
    /// parse errors)
    #[error("File not found.")]
    SourceNotFound,

    /// An import line did not split into name:definition:count
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}
