//! Trainset construction.
//!
//! Raw MovieLens ids are sparse and large; the factor matrices want
//! dense rows. The Trainset remaps raw user and movie ids onto
//! contiguous inner indices and keeps the rating triples in insertion
//! order, which is also the order SGD visits them.

use crate::error::{Result, TrainError};
use catalog::{MovieId, Rating, UserId};
use std::collections::HashMap;

/// A dense view of a set of rating observations, ready for SGD.
#[derive(Debug)]
pub struct Trainset {
    /// Raw user id -> inner index
    pub(crate) user_index: HashMap<UserId, usize>,
    /// Raw movie id -> inner index
    pub(crate) movie_index: HashMap<MovieId, usize>,
    /// (inner user, inner movie, score) triples in insertion order
    pub(crate) triples: Vec<(usize, usize, f32)>,
    /// Mean score over all triples
    pub(crate) global_mean: f32,
}

impl Trainset {
    /// Build a trainset from rating observations.
    ///
    /// Fails with `EmptyTrainset` when there is nothing to train on.
    pub fn from_ratings(ratings: &[Rating]) -> Result<Self> {
        if ratings.is_empty() {
            return Err(TrainError::EmptyTrainset);
        }

        let mut user_index = HashMap::new();
        let mut movie_index = HashMap::new();
        let mut triples = Vec::with_capacity(ratings.len());
        let mut total = 0.0f64;

        for rating in ratings {
            let next_user = user_index.len();
            let u = *user_index.entry(rating.user_id).or_insert(next_user);
            let next_movie = movie_index.len();
            let i = *movie_index.entry(rating.movie_id).or_insert(next_movie);

            triples.push((u, i, rating.score));
            total += f64::from(rating.score);
        }

        let global_mean = (total / triples.len() as f64) as f32;

        Ok(Self {
            user_index,
            movie_index,
            triples,
            global_mean,
        })
    }

    /// Number of distinct users
    pub fn n_users(&self) -> usize {
        self.user_index.len()
    }

    /// Number of distinct movies
    pub fn n_movies(&self) -> usize {
        self.movie_index.len()
    }

    /// Number of rating triples
    pub fn n_ratings(&self) -> usize {
        self.triples.len()
    }

    /// Mean score over every triple
    pub fn global_mean(&self) -> f32 {
        self.global_mean
    }
}
