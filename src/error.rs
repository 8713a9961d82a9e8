//! Custom error types for the ledger
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Every variant is recoverable by the caller.

use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// A record in the transaction file could not be parsed
    #[error("Corrupt data at line {line}: {reason} (content: \"{content}\")")]
    CorruptData {
        line: usize,
        content: String,
        reason: String,
    },

    /// The transaction file could not be written
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// A date string did not match `yyyy-MM-dd`
    #[error("Invalid date format: {0}")]
    DateFormat(String),

    /// An amount string could not be turned into money
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// A numbered menu or category choice was out of range
    #[error("Invalid selection '{choice}': expected a number between 1 and {max}")]
    InvalidSelection { choice: String, max: usize },

    /// Input rejected by the input layer (unknown category, month out of range)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl LedgerError {
    /// Create a corrupt data error for a record in the transaction file
    pub fn corrupt(line: usize, content: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CorruptData {
            line,
            content: content.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a corrupt data error
    pub fn is_corrupt_data(&self) -> bool {
        matches!(self, Self::CorruptData { .. })
    }

    /// Check if this is a persistence error
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_data_display() {
        let err = LedgerError::corrupt(3, "2024-01-01,Income", "expected 5 fields, found 2");
        assert_eq!(
            err.to_string(),
            "Corrupt data at line 3: expected 5 fields, found 2 (content: \"2024-01-01,Income\")"
        );
        assert!(err.is_corrupt_data());
        assert!(!err.is_persistence());
    }

    #[test]
    fn test_invalid_selection_display() {
        let err = LedgerError::InvalidSelection {
            choice: "7".into(),
            max: 5,
        };
        assert_eq!(
            err.to_string(),
            "Invalid selection '7': expected a number between 1 and 5"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: LedgerError = io_err.into();
        assert!(matches!(err, LedgerError::Io(_)));
    }
}
