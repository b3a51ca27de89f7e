//! Funk-SVD matrix factorization trained by stochastic gradient descent.
//!
//! The model decomposes the rating matrix into user and item factor
//! vectors plus per-user and per-item biases around the global mean:
//!
//! ```text
//! r_hat(u, i) = mu + bu[u] + bi[i] + p[u] . q[i]
//! ```
//!
//! ## Algorithm
//! For each epoch, visit every rating triple in trainset order and step
//! the biases and factors down the regularized squared-error gradient:
//!
//! ```text
//! err    = r - r_hat(u, i)
//! bu[u] += lr * (err - reg * bu[u])
//! bi[i] += lr * (err - reg * bi[i])
//! p[u]  += lr * (err * q[i] - reg * p[u])
//! q[i]  += lr * (err * p[u] - reg * q[i])
//! ```
//!
//! Predictions are clamped to the 0.5-5.0 half-star scale. An unknown
//! user or movie falls back to whichever terms are known, degrading to
//! the global mean when neither side was in the trainset.

use crate::error::{Result, TrainError};
use crate::trainset::Trainset;
use catalog::{MovieId, UserId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use tracing::{debug, info};

/// Lowest score on the rating scale
pub const MIN_SCORE: f32 = 0.5;
/// Highest score on the rating scale
pub const MAX_SCORE: f32 = 5.0;

/// SGD hyperparameters.
///
/// Defaults follow the tuning the recommender ships with: 100 factors,
/// 35 epochs, learning rate 0.007, regularization 0.07.
#[derive(Debug, Clone)]
pub struct SvdParams {
    pub n_factors: usize,
    pub n_epochs: usize,
    pub learning_rate: f32,
    pub regularization: f32,
    /// Factors initialize uniformly in [-init_spread, init_spread]
    pub init_spread: f32,
    /// Fixed RNG seed for reproducible fits; None draws from the OS
    pub seed: Option<u64>,
}

impl Default for SvdParams {
    fn default() -> Self {
        Self {
            n_factors: 100,
            n_epochs: 35,
            learning_rate: 0.007,
            regularization: 0.07,
            init_spread: 0.1,
            seed: None,
        }
    }
}

/// A fitted matrix-factorization model.
#[derive(Debug)]
pub struct SvdModel {
    n_factors: usize,
    global_mean: f32,
    user_index: HashMap<UserId, usize>,
    movie_index: HashMap<MovieId, usize>,
    /// Per-user biases, indexed by inner user id
    bu: Vec<f32>,
    /// Per-movie biases, indexed by inner movie id
    bi: Vec<f32>,
    /// User factors, flat with stride n_factors
    p: Vec<f32>,
    /// Movie factors, flat with stride n_factors
    q: Vec<f32>,
}

impl SvdModel {
    /// Fit a model to the trainset.
    ///
    /// A single blocking call; with the reference hyperparameters on the
    /// small MovieLens export it finishes in seconds.
    pub fn fit(trainset: Trainset, params: &SvdParams) -> Result<Self> {
        if params.n_factors == 0 {
            return Err(TrainError::InvalidParameter {
                name: "n_factors".to_string(),
                value: "0".to_string(),
            });
        }

        let f = params.n_factors;
        let lr = params.learning_rate;
        let reg = params.regularization;

        let mut rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let n_users = trainset.n_users();
        let n_movies = trainset.n_movies();

        info!(
            "Fitting SVD: {} users, {} movies, {} ratings, {} factors, {} epochs",
            n_users,
            n_movies,
            trainset.n_ratings(),
            f,
            params.n_epochs
        );

        let mut bu = vec![0.0f32; n_users];
        let mut bi = vec![0.0f32; n_movies];
        let mut p: Vec<f32> = (0..n_users * f)
            .map(|_| rng.random_range(-params.init_spread..=params.init_spread))
            .collect();
        let mut q: Vec<f32> = (0..n_movies * f)
            .map(|_| rng.random_range(-params.init_spread..=params.init_spread))
            .collect();

        let mu = trainset.global_mean();

        for epoch in 0..params.n_epochs {
            let mut sq_err = 0.0f64;

            for &(u, i, r) in &trainset.triples {
                let pu = u * f;
                let qi = i * f;

                let mut dot = 0.0f32;
                for k in 0..f {
                    dot += p[pu + k] * q[qi + k];
                }

                let err = r - (mu + bu[u] + bi[i] + dot);
                sq_err += f64::from(err) * f64::from(err);

                bu[u] += lr * (err - reg * bu[u]);
                bi[i] += lr * (err - reg * bi[i]);

                for k in 0..f {
                    let puk = p[pu + k];
                    let qik = q[qi + k];
                    p[pu + k] += lr * (err * qik - reg * puk);
                    q[qi + k] += lr * (err * puk - reg * qik);
                }
            }

            debug!(
                "Epoch {}/{}: train RMSE {:.4}",
                epoch + 1,
                params.n_epochs,
                (sq_err / trainset.n_ratings() as f64).sqrt()
            );
        }

        Ok(Self {
            n_factors: f,
            global_mean: mu,
            user_index: trainset.user_index,
            movie_index: trainset.movie_index,
            bu,
            bi,
            p,
            q,
        })
    }

    /// Predicted score for a (user, movie) pair, clamped to the
    /// 0.5-5.0 scale.
    pub fn predict(&self, user: UserId, movie: MovieId) -> f32 {
        let u = self.user_index.get(&user).copied();
        let i = self.movie_index.get(&movie).copied();

        let mut est = self.global_mean;
        if let Some(u) = u {
            est += self.bu[u];
        }
        if let Some(i) = i {
            est += self.bi[i];
        }
        if let (Some(u), Some(i)) = (u, i) {
            let pu = u * self.n_factors;
            let qi = i * self.n_factors;
            for k in 0..self.n_factors {
                est += self.p[pu + k] * self.q[qi + k];
            }
        }

        est.clamp(MIN_SCORE, MAX_SCORE)
    }

    /// Mean score the model was fitted around
    pub fn global_mean(&self) -> f32 {
        self.global_mean
    }
}

impl session::Scorer for SvdModel {
    fn score(&self, user: UserId, movie: MovieId) -> f32 {
        self.predict(user, movie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Rating;

    fn rating(user_id: UserId, movie_id: MovieId, score: f32) -> Rating {
        Rating {
            user_id,
            movie_id,
            score,
        }
    }

    /// Two taste clusters: users 1-2 love movies 10-11 and pan 20-21,
    /// users 3-4 the other way around.
    fn clustered_ratings() -> Vec<Rating> {
        let mut ratings = Vec::new();
        for &u in &[1, 2] {
            ratings.push(rating(u, 10, 5.0));
            ratings.push(rating(u, 11, 4.5));
            ratings.push(rating(u, 20, 1.0));
            ratings.push(rating(u, 21, 1.5));
        }
        for &u in &[3, 4] {
            ratings.push(rating(u, 10, 1.0));
            ratings.push(rating(u, 11, 1.5));
            ratings.push(rating(u, 20, 5.0));
            ratings.push(rating(u, 21, 4.5));
        }
        ratings
    }

    fn test_params() -> SvdParams {
        SvdParams {
            n_factors: 10,
            n_epochs: 200,
            seed: Some(42),
            ..SvdParams::default()
        }
    }

    #[test]
    fn test_predictions_stay_on_scale() {
        let ratings = clustered_ratings();
        let trainset = Trainset::from_ratings(&ratings).unwrap();
        let model = SvdModel::fit(trainset, &test_params()).unwrap();

        for user in 1..=5u32 {
            for movie in [10, 11, 20, 21, 99] {
                let score = model.predict(user, movie);
                assert!((MIN_SCORE..=MAX_SCORE).contains(&score));
            }
        }
    }

    #[test]
    fn test_unknown_user_and_movie_fall_back_to_mean() {
        let ratings = clustered_ratings();
        let trainset = Trainset::from_ratings(&ratings).unwrap();
        let mu = trainset.global_mean();
        let model = SvdModel::fit(trainset, &test_params()).unwrap();

        let predicted = model.predict(999, 999);
        assert!((predicted - mu.clamp(MIN_SCORE, MAX_SCORE)).abs() < 1e-6);
    }

    #[test]
    fn test_fit_beats_global_mean_baseline() {
        let ratings = clustered_ratings();
        let trainset = Trainset::from_ratings(&ratings).unwrap();
        let mu = trainset.global_mean();
        let model = SvdModel::fit(Trainset::from_ratings(&ratings).unwrap(), &test_params())
            .unwrap();

        let rmse = |predict: &dyn Fn(&Rating) -> f32| {
            let sq: f64 = ratings
                .iter()
                .map(|r| {
                    let err = f64::from(r.score - predict(r));
                    err * err
                })
                .sum();
            (sq / ratings.len() as f64).sqrt()
        };

        let baseline = rmse(&|_: &Rating| mu);
        let fitted = rmse(&|r: &Rating| model.predict(r.user_id, r.movie_id));

        assert!(
            fitted < baseline,
            "fitted RMSE {} should beat baseline {}",
            fitted,
            baseline
        );
    }

    #[test]
    fn test_fit_separates_taste_clusters() {
        let ratings = clustered_ratings();
        let trainset = Trainset::from_ratings(&ratings).unwrap();
        let model = SvdModel::fit(trainset, &test_params()).unwrap();

        // User 1 should still prefer movie 10 over movie 20
        assert!(model.predict(1, 10) > model.predict(1, 20));
        // And user 3 the opposite
        assert!(model.predict(3, 20) > model.predict(3, 10));
    }

    #[test]
    fn test_zero_factors_rejected() {
        let ratings = clustered_ratings();
        let trainset = Trainset::from_ratings(&ratings).unwrap();
        let params = SvdParams {
            n_factors: 0,
            ..SvdParams::default()
        };

        assert!(matches!(
            SvdModel::fit(trainset, &params).unwrap_err(),
            TrainError::InvalidParameter { .. }
        ));
    }

    #[test]
    fn test_seeded_fits_are_reproducible() {
        let ratings = clustered_ratings();
        let a = SvdModel::fit(Trainset::from_ratings(&ratings).unwrap(), &test_params())
            .unwrap();
        let b = SvdModel::fit(Trainset::from_ratings(&ratings).unwrap(), &test_params())
            .unwrap();

        assert_eq!(a.predict(1, 10), b.predict(1, 10));
        assert_eq!(a.predict(4, 21), b.predict(4, 21));
    }
}
