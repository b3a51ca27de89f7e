//! Error types for the catalog crate.

use thiserror::Error;

/// Errors that can occur while loading or validating the dataset.
///
/// Every variant carries enough context to point at the offending file,
/// line, or value. Dataset errors are fatal: the caller reports them and
/// exits, there is no partial-result delivery.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// I/O error occurred while reading a dataset file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in a CSV file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Expected number of fields in a line doesn't match actual
    #[error("Expected {expected} fields but found {found} in line {line} of {file}")]
    FieldCountMismatch {
        file: String,
        expected: usize,
        found: usize,
        line: usize,
    },

    /// Referenced entity doesn't exist (e.g., rating for non-existent movie)
    #[error("Missing reference: {entity} with id {id}")]
    MissingReference { entity: String, id: u32 },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
