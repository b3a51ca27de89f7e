//! Error types for the engine crate.

use thiserror::Error;

/// Errors that can occur while building a trainset or fitting a model.
///
/// Training failures are fatal to the session: the caller reports them
/// and exits.
#[derive(Error, Debug)]
pub enum TrainError {
    /// No ratings to train on
    #[error("Cannot build a trainset from zero ratings")]
    EmptyTrainset,

    /// A hyperparameter had an unusable value
    #[error("Invalid hyperparameter {name}: {value}")]
    InvalidParameter { name: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, TrainError>;
