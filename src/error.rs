//! Error types for the triespell library.
//!
//! The correction core itself never fails: every string is valid input and an
//! empty vocabulary simply degrades to a pass-through. Errors only arise at the
//! collaborator boundary (loading a vocabulary, reading or writing documents)
//! and while loading configuration. All of them are represented by the
//! [`SpellError`] enum.
//!
//! # Examples
//!
//! ```
//! use triespell::error::{SpellError, Result};
//!
//! fn load_words() -> Result<Vec<String>> {
//!     Err(SpellError::vocabulary_source("wordlist unavailable"))
//! }
//!
//! match load_words() {
//!     Ok(_) => println!("Loaded"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for triespell operations.
///
/// It uses the `thiserror` crate for the `Error` implementation and provides
/// constructor helpers for the string-carrying variants.
#[derive(Error, Debug)]
pub enum SpellError {
    /// I/O errors (file operations, stdin/stdout, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The vocabulary collaborator could not deliver a word list
    #[error("Vocabulary source error: {0}")]
    VocabularySource(String),

    /// The document collaborator could not deliver or accept a text buffer
    #[error("Document source error: {0}")]
    DocumentSource(String),

    /// Configuration could not be parsed or is inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SpellError.
pub type Result<T> = std::result::Result<T, SpellError>;

impl SpellError {
    /// Create a new vocabulary source error.
    pub fn vocabulary_source<S: Into<String>>(msg: S) -> Self {
        SpellError::VocabularySource(msg.into())
    }

    /// Create a new document source error.
    pub fn document_source<S: Into<String>>(msg: S) -> Self {
        SpellError::DocumentSource(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SpellError::InvalidConfig(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SpellError::InvalidArgument(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SpellError::Other(msg.into())
    }
}
