//! Utility functions for the community duel service

use crate::types::Community;
use chrono::{DateTime, Utc};

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Sort communities by rating, best first. Ties keep their relative order
/// so the leaderboard is stable across refreshes.
pub fn sort_leaderboard(communities: &mut [Community]) {
    communities.sort_by(|a, b| b.elo.cmp(&a.elo));
}
