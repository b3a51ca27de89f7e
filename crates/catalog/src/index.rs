//! Catalog building and indexing logic.
//!
//! This module assembles a Catalog from the parsed CSV data:
//! - Parse the three files in parallel
//! - Build primary and secondary indices
//! - Compute per-movie statistics
//! - Validate referential integrity

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::*;
use rayon::prelude::*;
use std::path::Path;
use tracing::info;

impl Catalog {
    /// Load the dataset from a directory containing the ml-latest-small
    /// CSV files.
    ///
    /// Steps:
    /// 1. Parse movies.csv, ratings.csv, links.csv in parallel
    /// 2. Build the primary stores and secondary indices
    /// 3. Compute per-movie statistics
    /// 4. Validate referential integrity
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        info!("Loading MovieLens dataset from {:?}", data_dir);

        let movies_path = data_dir.join("movies.csv");
        let ratings_path = data_dir.join("ratings.csv");
        let links_path = data_dir.join("links.csv");

        // Parse all three files in parallel with nested rayon joins
        let ((movies, ratings), links) = rayon::join(
            || {
                rayon::join(
                    || parser::parse_movies(&movies_path),
                    || parser::parse_ratings(&ratings_path),
                )
            },
            || parser::parse_links(&links_path),
        );

        let movies = movies?;
        let ratings = ratings?;
        let links = links?;

        info!(
            "Parsed {} movies, {} ratings, {} links",
            movies.len(),
            ratings.len(),
            links.len()
        );

        let mut catalog = Catalog::new();

        // Insert movies in file order so the genre vocabulary keeps its
        // first-seen ordering
        for movie in movies {
            catalog.insert_movie(movie);
        }
        for rating in ratings {
            catalog.insert_rating(rating);
        }
        for (movie_id, imdb_id) in links {
            catalog.insert_link(movie_id, imdb_id);
        }

        catalog.compute_movie_stats();
        catalog.validate()?;

        info!("Catalog built and validated");
        Ok(catalog)
    }

    /// Compute aggregate statistics for all movies.
    ///
    /// Runs in parallel over the per-movie rating index.
    pub fn compute_movie_stats(&mut self) {
        let movie_stats = self
            .movie_ratings
            .par_iter()
            .map(|(&movie_id, ratings)| {
                let rating_count = ratings.len() as u32;
                let avg_rating = if rating_count > 0 {
                    let total: f32 = ratings.iter().map(|r| r.score).sum();
                    total / rating_count as f32
                } else {
                    0.0
                };
                (
                    movie_id,
                    MovieStats {
                        avg_rating,
                        rating_count,
                    },
                )
            })
            .collect();
        self.movie_stats = movie_stats;
    }

    /// Validate data integrity.
    ///
    /// Checks that every rating references a known movie and that its
    /// score lies on the half-star scale, 0.5 to 5.0 inclusive. The
    /// range check goes through `contains` so NaN fails it too -
    /// `f32::from_str` accepts "nan", and one NaN score would poison
    /// every SGD update downstream. Any violation is fatal.
    pub fn validate(&self) -> Result<()> {
        for rating in &self.ratings {
            if !self.movies.contains_key(&rating.movie_id) {
                return Err(CatalogError::MissingReference {
                    entity: "Movie".to_string(),
                    id: rating.movie_id,
                });
            }
            if !(0.5..=5.0).contains(&rating.score) {
                return Err(CatalogError::InvalidValue {
                    field: "rating".to_string(),
                    value: rating.score.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_movie(id: MovieId) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            genres: vec!["Drama".to_string()],
        }
    }

    #[test]
    fn test_compute_movie_stats() {
        let mut catalog = Catalog::new();
        catalog.insert_movie(sample_movie(1));
        for score in [3.0, 4.0, 5.0] {
            catalog.insert_rating(Rating {
                user_id: 1,
                movie_id: 1,
                score,
            });
        }
        catalog.compute_movie_stats();

        let stats = catalog.get_movie_stats(1).unwrap();
        assert_eq!(stats.rating_count, 3);
        assert!((stats.avg_rating - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_validate_rejects_dangling_movie() {
        let mut catalog = Catalog::new();
        catalog.insert_rating(Rating {
            user_id: 1,
            movie_id: 999,
            score: 4.0,
        });

        let err = catalog.validate().unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MissingReference { id: 999, .. }
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_scale_score() {
        let mut catalog = Catalog::new();
        catalog.insert_movie(sample_movie(1));
        catalog.insert_rating(Rating {
            user_id: 1,
            movie_id: 1,
            score: 7.0,
        });

        assert!(matches!(
            catalog.validate().unwrap_err(),
            CatalogError::InvalidValue { .. }
        ));
    }

    #[test]
    fn test_validate_rejects_non_finite_scores() {
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let mut catalog = Catalog::new();
            catalog.insert_movie(sample_movie(1));
            catalog.insert_rating(Rating {
                user_id: 1,
                movie_id: 1,
                score: bad,
            });

            assert!(matches!(
                catalog.validate().unwrap_err(),
                CatalogError::InvalidValue { .. }
            ));
        }
    }

    #[test]
    fn test_load_rejects_nan_rating_row() {
        let dir = std::env::temp_dir().join("catalog-load-test-nan");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("movies.csv"),
            "movieId,title,genres\n1,Toy Story (1995),Comedy\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("ratings.csv"),
            "userId,movieId,rating,timestamp\n1,1,nan,964982703\n",
        )
        .unwrap();
        std::fs::write(dir.join("links.csv"), "movieId,imdbId,tmdbId\n1,0114709,862\n").unwrap();

        // "nan" parses as f32, so the row must die in validation
        assert!(matches!(
            Catalog::load_from_dir(&dir).unwrap_err(),
            CatalogError::InvalidValue { .. }
        ));
    }

    #[test]
    fn test_load_from_dir() {
        let dir = std::env::temp_dir().join("catalog-load-test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("movies.csv"),
            "movieId,title,genres\n\
             1,Toy Story (1995),Adventure|Animation|Children|Comedy|Fantasy\n\
             2,Jumanji (1995),Adventure|Children|Fantasy\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("ratings.csv"),
            "userId,movieId,rating,timestamp\n\
             1,1,4.0,964982703\n\
             2,1,3.5,964982931\n\
             2,2,5.0,964982932\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("links.csv"),
            "movieId,imdbId,tmdbId\n1,0114709,862\n2,0113497,8844\n",
        )
        .unwrap();

        let catalog = Catalog::load_from_dir(&dir).unwrap();
        assert_eq!(catalog.counts(), (2, 3, 2));
        assert_eq!(catalog.max_user_id(), 2);
        assert_eq!(catalog.get_link(1), Some("0114709"));
        assert_eq!(catalog.movies_in_genre("Adventure"), &[1, 2]);
    }

    #[test]
    fn test_load_missing_directory_fails() {
        let dir = std::env::temp_dir().join("catalog-load-test-missing");
        let _ = std::fs::remove_dir_all(&dir);
        assert!(Catalog::load_from_dir(&dir).is_err());
    }
}
