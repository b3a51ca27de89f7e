//! Ranking of scored candidates.
//!
//! Scores every candidate movie for the synthetic user through the
//! Scorer seam, sorts descending by predicted score (stable, so ties
//! keep first-seen order), and slices off the top K.

use crate::error::{Result, SessionError};
use catalog::{MovieId, UserId};
use rayon::prelude::*;
use tracing::debug;

/// Seam between the session and the recommendation engine.
///
/// `Sync` so candidate scoring can run in parallel.
pub trait Scorer: Sync {
    /// Predicted preference score for one (user, movie) pair, on the
    /// 0.5-5.0 half-star scale.
    fn score(&self, user: UserId, movie: MovieId) -> f32;
}

/// A movie paired with its predicted score. Derived, ephemeral,
/// produced fresh each run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate {
    pub movie_id: MovieId,
    pub predicted_score: f32,
}

/// Score every candidate and sort descending by predicted score.
///
/// Sorting is stable: candidates with equal scores keep their input
/// order, so the first-seen movie wins a tie.
pub fn rank_candidates<S: Scorer + ?Sized>(
    scorer: &S,
    user: UserId,
    candidates: &[MovieId],
) -> Vec<ScoredCandidate> {
    let mut ranked: Vec<ScoredCandidate> = candidates
        .par_iter()
        .map(|&movie_id| ScoredCandidate {
            movie_id,
            predicted_score: scorer.score(user, movie_id),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.predicted_score
            .partial_cmp(&a.predicted_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    debug!("Ranked {} candidates for user {}", ranked.len(), user);
    ranked
}

/// The first `k` ranked candidates.
///
/// Fails with `InsufficientCandidates` when more recommendations are
/// requested than exist; the caller reports the available count and
/// re-prompts.
pub fn top_k(ranked: &[ScoredCandidate], k: usize) -> Result<&[ScoredCandidate]> {
    if k > ranked.len() {
        return Err(SessionError::InsufficientCandidates {
            requested: k,
            available: ranked.len(),
        });
    }
    Ok(&ranked[..k])
}

/// Map a predicted half-star score back onto the 1-10 scale shown to
/// the operator.
pub fn display_score(predicted: f32) -> f32 {
    predicted * 2.0
}
