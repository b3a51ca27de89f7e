//! Error types for the interactive session.
//!
//! All three domain variants are recoverable: the caller reports the
//! error to the operator and re-prompts. Only I/O failures on the
//! console itself propagate as fatal.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    /// The operator named a genre that is not in the catalog vocabulary
    #[error("Unknown genre: {name} (check spelling)")]
    InvalidCategory { name: String },

    /// A rating reply was neither a 1-10 integer nor a sentinel
    #[error("Not a valid entry: {input} (expected 1-10, n, or q)")]
    InvalidRatingInput { input: String },

    /// More recommendations were requested than candidates exist
    #[error("Only {available} candidates available, {requested} requested")]
    InsufficientCandidates {
        requested: usize,
        available: usize,
    },

    /// Console I/O failed
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, SessionError>;
