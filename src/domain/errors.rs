//! Domain error types
//!
//! This module defines the error hierarchy for medrecords.
//! Loading errors are fatal to the load call that raised them; there is no
//! partial recovery or row skipping.

use thiserror::Error;

/// Main medrecords error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum RecordsError {
    /// A source file does not exist or cannot be read
    #[error("Missing resource {path}: {reason}")]
    MissingResource { path: String, reason: String },

    /// A data row has fewer fields than the header
    #[error("Malformed row at {path}:{line}: expected {expected} fields, found {found}")]
    MalformedRow {
        path: String,
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A required column is absent from the header
    #[error("Missing column '{column}' in {path}")]
    MissingColumn { path: String, column: String },

    /// A header names the same column twice
    #[error("Duplicate column '{column}' in {path}")]
    DuplicateColumn { path: String, column: String },

    /// An identifying column repeats a value
    #[error("Duplicate identifier '{id}' in {path}")]
    DuplicateIdentifier { path: String, id: String },

    /// A field could not be parsed into its typed form
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Unknown patient identifier
    #[error("Patient not found: {0}")]
    NotFound(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Field-level parse failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Timestamp not in `YYYY-MM-DD HH:MM:SS.ffffff` form
    #[error("invalid timestamp '{value}': {reason}")]
    Timestamp { value: String, reason: String },

    /// Lab value is not numeric
    #[error("invalid lab value '{value}'")]
    LabValue { value: String },

    /// Identifier is empty or blank
    #[error("invalid identifier: {0}")]
    Identifier(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for RecordsError {
    fn from(err: std::io::Error) -> Self {
        RecordsError::Io(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for RecordsError {
    fn from(err: toml::de::Error) -> Self {
        RecordsError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl RecordsError {
    /// Returns true for errors raised by an unknown patient lookup
    pub fn is_not_found(&self) -> bool {
        matches!(self, RecordsError::NotFound(_))
    }
}
