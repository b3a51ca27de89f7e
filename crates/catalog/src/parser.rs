//! Parsers for the MovieLens CSV files.
//!
//! This module handles the three files of the ml-latest-small export:
//! - movies.csv: movieId,title,genres
//! - ratings.csv: userId,movieId,rating,timestamp
//! - links.csv: movieId,imdbId,tmdbId
//!
//! Titles may be quoted and contain commas ("American President, The
//! (1995)"), so splitting is quote-aware. Each file starts with a header
//! row, which is skipped. The ratings timestamp and links tmdbId columns
//! are dropped: nothing downstream uses them.

use crate::error::{CatalogError, Result};
use crate::types::*;
use std::fs;
use std::path::Path;

/// Split one CSV line into fields, honoring double-quoted fields.
///
/// Inside quotes a doubled `""` is an escaped quote character. Quotes
/// themselves are stripped from the output.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    // Escaped quote inside a quoted field
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

fn expect_fields<'a>(
    file: &str,
    line_no: usize,
    fields: &'a [String],
    expected: usize,
) -> Result<&'a [String]> {
    if fields.len() != expected {
        return Err(CatalogError::FieldCountMismatch {
            file: file.to_string(),
            expected,
            found: fields.len(),
            line: line_no,
        });
    }
    Ok(fields)
}

/// Parse pipe-separated genre tags.
///
/// Example: "Comedy|Drama|Romance" -> ["Comedy", "Drama", "Romance"]
fn parse_genres(s: &str) -> Vec<String> {
    s.split('|')
        .map(|g| g.trim())
        .filter(|g| !g.is_empty())
        .map(|g| g.to_string())
        .collect()
}

/// Parse the movies.csv file
///
/// Format: movieId,title,genres
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let content = fs::read_to_string(path)?;
    let mut movies = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        if idx == 0 {
            continue; // Skip header row
        }
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let fields = split_csv_line(line_trimmed);
        let fields = expect_fields("movies.csv", line_no, &fields, 3)?;

        let movie = Movie {
            id: fields[0].parse().map_err(|e| CatalogError::ParseError {
                file: "movies.csv".to_string(),
                line: line_no,
                reason: format!("Invalid movieId: {}", e),
            })?,
            title: fields[1].clone(),
            genres: parse_genres(&fields[2]),
        };

        movies.push(movie);
    }
    Ok(movies)
}

/// Parse the ratings.csv file
///
/// Format: userId,movieId,rating,timestamp
///
/// The timestamp column is validated for presence but otherwise dropped.
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    let content = fs::read_to_string(path)?;
    let mut ratings = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        if idx == 0 {
            continue; // Skip header row
        }
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let fields = split_csv_line(line_trimmed);
        let fields = expect_fields("ratings.csv", line_no, &fields, 4)?;

        let rating = Rating {
            user_id: fields[0].parse().map_err(|e| CatalogError::ParseError {
                file: "ratings.csv".to_string(),
                line: line_no,
                reason: format!("Invalid userId: {}", e),
            })?,
            movie_id: fields[1].parse().map_err(|e| CatalogError::ParseError {
                file: "ratings.csv".to_string(),
                line: line_no,
                reason: format!("Invalid movieId: {}", e),
            })?,
            score: fields[2].parse().map_err(|e| CatalogError::ParseError {
                file: "ratings.csv".to_string(),
                line: line_no,
                reason: format!("Invalid rating: {}", e),
            })?,
        };

        ratings.push(rating);
    }
    Ok(ratings)
}

/// Parse the links.csv file
///
/// Format: movieId,imdbId,tmdbId
///
/// Only the IMDb id is kept; the tmdbId column is dropped. Rows with an
/// empty imdbId are skipped rather than rejected.
pub fn parse_links(path: &Path) -> Result<Vec<(MovieId, String)>> {
    let content = fs::read_to_string(path)?;
    let mut links = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        if idx == 0 {
            continue; // Skip header row
        }
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let fields = split_csv_line(line_trimmed);
        let fields = expect_fields("links.csv", line_no, &fields, 3)?;

        let movie_id: MovieId = fields[0].parse().map_err(|e| CatalogError::ParseError {
            file: "links.csv".to_string(),
            line: line_no,
            reason: format!("Invalid movieId: {}", e),
        })?;

        if !fields[1].is_empty() {
            links.push((movie_id, fields[1].clone()));
        }
    }
    Ok(links)
}
