//! Interactive rating collection.
//!
//! Gathers N valid ratings from the operator by sampling unrated movies
//! uniformly at random from an eligible pool and prompting for each one.
//!
//! ## Algorithm
//! 1. Start from the (possibly genre-filtered) eligible pool.
//! 2. While ratings are still needed and the pool is non-empty:
//!    - draw one movie uniformly at random,
//!    - prompt with its title,
//!    - classify the reply: accept (1-10), skip (`n`), quit (`q`),
//!      or invalid (re-prompt the same movie).
//! 3. Accepted and skipped movies leave the pool and are never
//!    re-presented within the session.
//!
//! Collected ratings are returned in an explicit accumulator, never
//! ambient state. An empty pool before N ratings are gathered ends the
//! collection early with `exhausted` set; it is the caller's job to hand
//! in a pool that is large enough relative to N.

use crate::console::Console;
use crate::error::{Result, SessionError};
use catalog::{Catalog, MovieId, Rating, UserId};
use rand::Rng;
use tracing::{debug, warn};

/// Reply meaning "I have not seen this movie"
pub const SKIP_SENTINEL: &str = "n";
/// Reply meaning "stop collecting ratings"
pub const QUIT_SENTINEL: &str = "q";

/// A classified operator reply to a rating prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingReply {
    /// A valid 1-10 rating
    Accepted(u8),
    /// The operator has not seen the movie
    Skip,
    /// The operator wants to stop early
    Quit,
}

/// Classify one line of operator input.
///
/// Anything that is not a sentinel or an integer in 1-10 fails with
/// `InvalidRatingInput` (recoverable, the collector re-prompts).
pub fn parse_reply(input: &str) -> Result<RatingReply> {
    match input {
        SKIP_SENTINEL => Ok(RatingReply::Skip),
        QUIT_SENTINEL => Ok(RatingReply::Quit),
        other => match other.parse::<u8>() {
            Ok(r) if (1..=10).contains(&r) => Ok(RatingReply::Accepted(r)),
            _ => Err(SessionError::InvalidRatingInput {
                input: other.to_string(),
            }),
        },
    }
}

/// Map a 1-10 operator rating onto the 0.5-5.0 half-star scale the
/// recommendation engine expects.
pub fn normalize_rating(r: u8) -> f32 {
    f32::from(r) / 2.0
}

/// Everything one collection session produced.
#[derive(Debug, Default)]
pub struct CollectedRatings {
    /// Ratings recorded for the synthetic user, in acceptance order
    pub ratings: Vec<Rating>,
    /// Total number of prompts shown, including invalid-input retries
    pub prompts_issued: usize,
    /// The operator quit before N ratings were gathered
    pub cancelled: bool,
    /// The eligible pool ran out before N ratings were gathered
    pub exhausted: bool,
}

/// Collects ratings for the synthetic session user.
pub struct RatingCollector<'a> {
    catalog: &'a Catalog,
    user_id: UserId,
}

impl<'a> RatingCollector<'a> {
    /// Create a collector recording ratings under `user_id`.
    ///
    /// The caller must pick an id that does not collide with historical
    /// users; `Catalog::max_user_id() + 1` is safe by construction.
    pub fn new(catalog: &'a Catalog, user_id: UserId) -> Self {
        Self { catalog, user_id }
    }

    /// Gather up to `n` valid ratings from the eligible pool.
    pub fn collect(
        &self,
        eligible: &[MovieId],
        n: usize,
        rng: &mut impl Rng,
        console: &mut impl Console,
    ) -> Result<CollectedRatings> {
        let mut pool: Vec<MovieId> = eligible.to_vec();
        let mut collected = CollectedRatings::default();
        let mut remaining = n;

        'sampling: while remaining > 0 {
            if pool.is_empty() {
                warn!(
                    "Eligible pool exhausted with {} rating(s) still wanted",
                    remaining
                );
                collected.exhausted = true;
                break;
            }

            let idx = rng.random_range(0..pool.len());
            let movie_id = pool[idx];
            let Some(movie) = self.catalog.get_movie(movie_id) else {
                // Catalog invariant says this cannot happen, but a stale
                // pool entry should not wedge the session.
                pool.swap_remove(idx);
                continue;
            };

            // Re-prompt the same movie until the reply is classifiable
            let reply = loop {
                let line = console.prompt(&format!(
                    "\n{}\nHow do you rate this movie on a scale of 1-10, \
                     press n if you have not seen (q to quit):",
                    movie.title
                ))?;
                collected.prompts_issued += 1;

                match parse_reply(&line) {
                    Ok(reply) => break reply,
                    Err(err) => console.say(&err.to_string()),
                }
            };

            match reply {
                RatingReply::Accepted(r) => {
                    let score = normalize_rating(r);
                    debug!("Accepted rating {} ({}) for movie {}", r, score, movie_id);
                    collected.ratings.push(Rating {
                        user_id: self.user_id,
                        movie_id,
                        score,
                    });
                    pool.swap_remove(idx);
                    remaining -= 1;
                }
                RatingReply::Skip => {
                    debug!("Skipped movie {}", movie_id);
                    pool.swap_remove(idx);
                }
                RatingReply::Quit => {
                    debug!("Collection cancelled by operator");
                    collected.cancelled = true;
                    break 'sampling;
                }
            }
        }

        Ok(collected)
    }
}
