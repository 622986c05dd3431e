//! Standard ELO with integer ratings
//!
//! Ratings are kept as whole numbers: every update rounds the underlying
//! floating-point result before it is stored. That trades a little
//! precision for stable convergence under repeated votes and a simple
//! persisted representation.

use serde::{Deserialize, Serialize};
use skillratings::elo::{elo, expected_score as elo_expected_score, EloConfig, EloRating};
use skillratings::Outcomes;

/// Baseline rating for freshly seeded communities
pub const INITIAL_ELO: i32 = 1000;

/// Maximum rating swing per duel.
///
/// Fixed for all communities; a games-played-sensitive K would converge
/// faster for new entries but is intentionally not implemented.
pub const K_FACTOR: f64 = 32.0;

/// New ratings for both sides of a decided duel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EloUpdate {
    pub new_winner_elo: i32,
    pub new_loser_elo: i32,
}

/// Probability that `rating` beats `opponent` given current ratings
pub fn expected_score(rating: i32, opponent: i32) -> f64 {
    let (expected, _) = elo_expected_score(
        &EloRating {
            rating: f64::from(rating),
        },
        &EloRating {
            rating: f64::from(opponent),
        },
    );
    expected
}

/// Compute both new ratings for a decided duel.
///
/// Pure computation: no I/O, no shared state, never fails. Negative and
/// identical inputs are fine; the expected score is defined everywhere.
pub fn compute_rating_update(winner_elo: i32, loser_elo: i32) -> EloUpdate {
    let winner = EloRating {
        rating: f64::from(winner_elo),
    };
    let loser = EloRating {
        rating: f64::from(loser_elo),
    };

    let (new_winner, new_loser) = elo(&winner, &loser, &Outcomes::WIN, &EloConfig { k: K_FACTOR });

    EloUpdate {
        new_winner_elo: new_winner.rating.round() as i32,
        new_loser_elo: new_loser.rating.round() as i32,
    }
}
