//! Common types used throughout the community duel service

use crate::rating::INITIAL_ELO;
use serde::{Deserialize, Serialize};

/// Unique identifier for communities
pub type CommunityId = String;

/// One rankable community with its rating and win/loss counters.
///
/// Field names serialize in camelCase so the persisted collection
/// round-trips with the original blob format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub id: CommunityId,
    pub name: String,
    pub image_url: String,
    pub elo: i32,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
}

impl Community {
    /// Create a fresh community at the baseline rating with zeroed counters
    pub fn new(
        id: impl Into<CommunityId>,
        name: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_url: image_url.into(),
            elo: INITIAL_ELO,
            games_played: 0,
            wins: 0,
            losses: 0,
        }
    }

    /// Apply a won duel: set the new rating and bump the counters.
    /// `games_played` is always recomputed from the counters.
    pub fn apply_win(&mut self, new_elo: i32) {
        self.elo = new_elo;
        self.wins += 1;
        self.games_played = self.wins + self.losses;
    }

    /// Apply a lost duel: set the new rating and bump the counters.
    pub fn apply_loss(&mut self, new_elo: i32) {
        self.elo = new_elo;
        self.losses += 1;
        self.games_played = self.wins + self.losses;
    }
}

/// A recorded vote between two distinct communities
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub winner_id: CommunityId,
    pub loser_id: CommunityId,
}

/// Administrative overwrite of one community's stats, bypassing the
/// rating engine. `games_played` is stored exactly as supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsOverwrite {
    pub elo: i32,
    pub wins: u32,
    pub losses: u32,
    pub games_played: u32,
}
