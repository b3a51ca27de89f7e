//! # Catalog Crate
//!
//! This crate handles loading and indexing the MovieLens ml-latest-small
//! dataset.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, Rating, Catalog)
//! - **parser**: Parse the CSV files into Rust structs
//! - **index**: Build the Catalog with its lookup indices
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use std::path::Path;
//!
//! // Load the entire dataset
//! let catalog = Catalog::load_from_dir(Path::new("data/ml-latest-small"))?;
//!
//! // Query data
//! let movie = catalog.get_movie(1).unwrap();
//! let comedies = catalog.movies_in_genre("Comedy");
//!
//! println!("{} has {} comedies", movie.title, comedies.len());
//! ```

// Public modules
pub mod error;
pub mod index;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use types::{Catalog, Movie, MovieId, MovieStats, Rating, UserId, NO_GENRES};
