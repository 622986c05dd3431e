//! ELO rating calculation
//!
//! This module provides the pure rating computation applied after each
//! recorded vote, built on the elo module of the skillratings crate.

pub mod elo;

// Re-export commonly used items
pub use elo::{compute_rating_update, expected_score, EloUpdate, INITIAL_ELO, K_FACTOR};
