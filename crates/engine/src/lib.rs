//! # Engine Crate
//!
//! The in-process recommendation engine: Funk-SVD matrix factorization
//! trained by stochastic gradient descent on the historical ratings plus
//! whatever the interactive session collected.
//!
//! ## Components
//!
//! - **trainset**: remap raw ids onto dense inner indices
//! - **svd**: the factorization model, fitting and prediction
//! - **error**: error types for training
//!
//! The fitted model implements `session::Scorer`, which is the seam the
//! ranking stage consumes.
//!
//! ## Example Usage
//!
//! ```ignore
//! use engine::{SvdModel, SvdParams, Trainset};
//!
//! let trainset = Trainset::from_ratings(&all_ratings)?;
//! let model = SvdModel::fit(trainset, &SvdParams::default())?;
//!
//! let predicted = model.predict(synthetic_user, movie_id);
//! ```

// Public modules
pub mod error;
pub mod svd;
pub mod trainset;

// Re-export commonly used types
pub use error::{Result, TrainError};
pub use svd::{SvdModel, SvdParams, MAX_SCORE, MIN_SCORE};
pub use trainset::Trainset;
