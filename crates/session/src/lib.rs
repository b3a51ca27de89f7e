//! # Session Crate
//!
//! This crate implements the interactive part of the recommender: the
//! genre filter, the rating collector, and candidate ranking.
//!
//! ## Components
//!
//! - **genre_filter**: narrow the catalog to one genre, or pass it through
//! - **collector**: sample unrated movies and gather operator ratings
//! - **ranking**: score and rank candidates through the Scorer seam
//! - **console**: trait seam over stdin/stdout so tests can script a session
//!
//! ## Example Usage
//!
//! ```ignore
//! use session::{filter_by_genre, RatingCollector, rank_candidates, top_k};
//! use session::console::StdConsole;
//!
//! let candidates = filter_by_genre(&catalog, &catalog.all_movie_ids(), Some("Comedy"))?;
//!
//! let collector = RatingCollector::new(&catalog, catalog.max_user_id() + 1);
//! let collected = collector.collect(&candidates, 5, &mut rng, &mut StdConsole)?;
//!
//! // ...train the engine on history + collected.ratings...
//!
//! let ranked = rank_candidates(&model, synthetic_user, &candidates);
//! for candidate in top_k(&ranked, 10)? {
//!     println!("{} {:.2}", candidate.movie_id, candidate.predicted_score);
//! }
//! ```

// Public modules
pub mod collector;
pub mod console;
pub mod error;
pub mod genre_filter;
pub mod ranking;

// Re-export commonly used types
pub use collector::{
    normalize_rating, parse_reply, CollectedRatings, RatingCollector, RatingReply,
    QUIT_SENTINEL, SKIP_SENTINEL,
};
pub use console::{Console, ScriptedConsole, StdConsole};
pub use error::{Result, SessionError};
pub use genre_filter::filter_by_genre;
pub use ranking::{display_score, rank_candidates, top_k, ScoredCandidate, Scorer};
