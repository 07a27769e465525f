//! Error types for the data-loader crate.

use thiserror::Error;

/// Errors that can occur while loading, parsing and validating a catalog
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in the catalog file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Expected number of fields in a line doesn't match the header
    #[error("Expected {expected} fields but found {found} in line {line}")]
    FieldCountMismatch {
        expected: usize,
        found: usize,
        line: usize,
    },

    /// Header lacks a required column
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Two books share the same id
    #[error("Duplicate book id: {0}")]
    DuplicateId(u32),

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
