//! Core domain types for the MovieLens catalog.
//!
//! This module defines the fundamental data structures used throughout the
//! system:
//! - Type aliases for domain clarity (UserId, MovieId)
//! - Movie and Rating records parsed from the CSV files
//! - The Catalog, an in-memory store with secondary indices

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up user IDs with movie IDs

/// Unique identifier for a user in the historical ratings
pub type UserId = u32;

/// Unique identifier for a movie
pub type MovieId = u32;

/// The genre placeholder MovieLens uses for movies with no genre tags.
///
/// It is kept on the movie record but excluded from the selectable
/// genre vocabulary.
pub const NO_GENRES: &str = "(no genres listed)";

// =============================================================================
// Movie-related Types
// =============================================================================

/// Represents a movie in the dataset.
///
/// Genres are an open string vocabulary: the small MovieLens exports add
/// tags over time ("IMAX", "(no genres listed)"), so a closed enum would
/// reject valid rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Genre tags for this movie, in file order
    pub genres: Vec<String>,
}

impl Movie {
    /// Whether this movie carries the given genre tag
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

// =============================================================================
// Rating Type
// =============================================================================

/// A single rating observation: one user's score for one movie.
///
/// Scores live on the MovieLens half-star scale, 0.5 to 5.0 inclusive.
/// The timestamp column of ratings.csv is dropped at parse time; nothing
/// downstream uses it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Rating value from 0.5 to 5.0
    pub score: f32,
}

// =============================================================================
// Statistics Types
// =============================================================================

/// Precomputed statistics for a movie.
///
/// Computed once when loading data, displayed alongside recommendations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MovieStats {
    pub avg_rating: f32,
    pub rating_count: u32,
}

// =============================================================================
// Catalog - The Core In-Memory Store
// =============================================================================

/// Holds the full dataset and its indices.
///
/// The Catalog owns the data; accessor methods hand out references.
/// It is immutable once loaded - ratings collected during an interactive
/// session are accumulated elsewhere and never written back.
#[derive(Debug)]
pub struct Catalog {
    // Primary data stores
    pub(crate) movies: HashMap<MovieId, Movie>,
    pub(crate) ratings: Vec<Rating>,
    /// IMDb cross-reference ids from links.csv (tmdbId column is dropped)
    pub(crate) links: HashMap<MovieId, String>,

    // Secondary indices
    /// Movies grouped by genre tag (one movie can appear in multiple lists)
    pub(crate) genre_index: HashMap<String, Vec<MovieId>>,
    /// Genre vocabulary in first-seen order, excluding the NO_GENRES tag
    pub(crate) genre_vocab: Vec<String>,
    /// All ratings received by each movie
    pub(crate) movie_ratings: HashMap<MovieId, Vec<Rating>>,

    // Precomputed statistics
    pub(crate) movie_stats: HashMap<MovieId, MovieStats>,

    /// Highest user id seen in the historical ratings
    pub(crate) max_user_id: UserId,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self {
            movies: HashMap::new(),
            ratings: Vec::new(),
            links: HashMap::new(),
            genre_index: HashMap::new(),
            genre_vocab: Vec::new(),
            movie_ratings: HashMap::new(),
            movie_stats: HashMap::new(),
            max_user_id: 0,
        }
    }

    // Getters - these return references (&T), the Catalog keeps ownership

    /// Get a movie by ID
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    /// Get the IMDb id for a movie, if links.csv had one
    pub fn get_link(&self, id: MovieId) -> Option<&str> {
        self.links.get(&id).map(|s| s.as_str())
    }

    /// Get precomputed statistics for a movie
    pub fn get_movie_stats(&self, movie_id: MovieId) -> Option<&MovieStats> {
        self.movie_stats.get(&movie_id)
    }

    /// Get all ratings for a movie
    ///
    /// Returns an empty slice if the movie has no ratings
    pub fn get_movie_ratings(&self, movie_id: MovieId) -> &[Rating] {
        self.movie_ratings
            .get(&movie_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// All movies carrying a genre tag
    pub fn movies_in_genre(&self, genre: &str) -> &[MovieId] {
        self.genre_index
            .get(genre)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// The selectable genre vocabulary, in first-seen order.
    ///
    /// The "(no genres listed)" placeholder is excluded: it is not a
    /// category an operator can meaningfully filter by.
    pub fn genres(&self) -> &[String] {
        &self.genre_vocab
    }

    /// Whether a genre name is part of the selectable vocabulary
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genre_vocab.iter().any(|g| g == genre)
    }

    /// Every historical rating observation, in file order
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// All movie ids, sorted ascending.
    ///
    /// Sorted so that downstream consumers (sampling, ranking) see a
    /// deterministic order regardless of HashMap iteration.
    pub fn all_movie_ids(&self) -> Vec<MovieId> {
        let mut ids: Vec<MovieId> = self.movies.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Highest user id present in the historical data.
    ///
    /// The interactive session reserves `max_user_id() + 1` for its
    /// synthetic user, which therefore cannot collide with history.
    pub fn max_user_id(&self) -> UserId {
        self.max_user_id
    }

    /// Get counts for logging/validation: (movies, ratings, links)
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.movies.len(), self.ratings.len(), self.links.len())
    }

    // Mutators - used during data loading

    /// Insert a movie and update the genre index and vocabulary
    pub fn insert_movie(&mut self, movie: Movie) {
        for genre in &movie.genres {
            self.genre_index
                .entry(genre.clone())
                .or_insert_with(Vec::new)
                .push(movie.id);

            if genre != NO_GENRES && !self.genre_vocab.iter().any(|g| g == genre) {
                self.genre_vocab.push(genre.clone());
            }
        }
        self.movies.insert(movie.id, movie);
    }

    /// Insert a rating and update the per-movie index
    pub fn insert_rating(&mut self, rating: Rating) {
        self.max_user_id = self.max_user_id.max(rating.user_id);
        self.movie_ratings
            .entry(rating.movie_id)
            .or_insert_with(Vec::new)
            .push(rating);
        self.ratings.push(rating);
    }

    /// Insert an IMDb cross-reference
    pub fn insert_link(&mut self, movie_id: MovieId, imdb_id: String) {
        self.links.insert(movie_id, imdb_id);
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_vocab_first_seen_order() {
        let mut catalog = Catalog::new();
        catalog.insert_movie(Movie {
            id: 1,
            title: "A".to_string(),
            genres: vec!["Comedy".to_string(), "Drama".to_string()],
        });
        catalog.insert_movie(Movie {
            id: 2,
            title: "B".to_string(),
            genres: vec!["Drama".to_string(), "Romance".to_string()],
        });

        assert_eq!(catalog.genres(), &["Comedy", "Drama", "Romance"]);
    }

    #[test]
    fn test_no_genres_placeholder_excluded_from_vocab() {
        let mut catalog = Catalog::new();
        catalog.insert_movie(Movie {
            id: 1,
            title: "Untagged".to_string(),
            genres: vec![NO_GENRES.to_string()],
        });

        assert!(catalog.genres().is_empty());
        assert!(!catalog.has_genre(NO_GENRES));
        // The movie itself is still indexed under the placeholder
        assert_eq!(catalog.movies_in_genre(NO_GENRES), &[1]);
    }

    #[test]
    fn test_max_user_id_tracks_ratings() {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.max_user_id(), 0);

        catalog.insert_rating(Rating {
            user_id: 42,
            movie_id: 1,
            score: 4.0,
        });
        catalog.insert_rating(Rating {
            user_id: 7,
            movie_id: 1,
            score: 3.0,
        });

        assert_eq!(catalog.max_user_id(), 42);
    }

    #[test]
    fn test_all_movie_ids_sorted() {
        let mut catalog = Catalog::new();
        for id in [30, 10, 20] {
            catalog.insert_movie(Movie {
                id,
                title: format!("Movie {}", id),
                genres: vec!["Drama".to_string()],
            });
        }

        assert_eq!(catalog.all_movie_ids(), vec![10, 20, 30]);
    }
}
