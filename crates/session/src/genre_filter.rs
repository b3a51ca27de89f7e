//! Genre filtering of the movie catalog.
//!
//! Narrows a candidate list to one genre, or passes it through unchanged
//! when no genre is requested. Filtering is idempotent: applying the same
//! genre to an already-filtered list returns the same list.

use crate::error::{Result, SessionError};
use catalog::{Catalog, MovieId};

/// Restrict `candidates` to movies carrying the given genre tag.
///
/// - `None` returns the candidates unchanged (stable order).
/// - An unknown genre fails with `InvalidCategory`; the caller is
///   expected to re-prompt the operator.
pub fn filter_by_genre(
    catalog: &Catalog,
    candidates: &[MovieId],
    genre: Option<&str>,
) -> Result<Vec<MovieId>> {
    let Some(name) = genre else {
        return Ok(candidates.to_vec());
    };

    if !catalog.has_genre(name) {
        return Err(SessionError::InvalidCategory {
            name: name.to_string(),
        });
    }

    Ok(candidates
        .iter()
        .copied()
        .filter(|&id| {
            catalog
                .get_movie(id)
                .map(|movie| movie.has_genre(name))
                .unwrap_or(false)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Movie;

    fn create_test_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert_movie(Movie {
            id: 1,
            title: "A".to_string(),
            genres: vec!["Comedy".to_string()],
        });
        catalog.insert_movie(Movie {
            id: 2,
            title: "B".to_string(),
            genres: vec!["Drama".to_string()],
        });
        catalog.insert_movie(Movie {
            id: 3,
            title: "C".to_string(),
            genres: vec!["Comedy".to_string(), "Drama".to_string()],
        });
        catalog
    }

    #[test]
    fn test_no_genre_passes_through() {
        let catalog = create_test_catalog();
        let all = catalog.all_movie_ids();
        let filtered = filter_by_genre(&catalog, &all, None).unwrap();
        assert_eq!(filtered, all);
    }

    #[test]
    fn test_filter_narrows_to_genre() {
        let catalog = create_test_catalog();
        let all = catalog.all_movie_ids();
        let filtered = filter_by_genre(&catalog, &all, Some("Comedy")).unwrap();
        assert_eq!(filtered, vec![1, 3]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let catalog = create_test_catalog();
        let all = catalog.all_movie_ids();
        let once = filter_by_genre(&catalog, &all, Some("Drama")).unwrap();
        let twice = filter_by_genre(&catalog, &once, Some("Drama")).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unknown_genre_is_invalid_category() {
        let catalog = create_test_catalog();
        let all = catalog.all_movie_ids();
        let err = filter_by_genre(&catalog, &all, Some("Westren")).unwrap_err();
        assert!(matches!(err, SessionError::InvalidCategory { .. }));
    }
}
