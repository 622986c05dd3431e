//! Store coordinator owning the canonical community collection
//!
//! Every operation treats the full collection as the unit of read and
//! write: the backing store is a single key-value blob with no
//! partial-update primitive. Each read deserializes a fresh copy, so
//! callers can never mutate coordinator-owned state through a returned
//! value.
//!
//! There is no cross-operation locking or versioning. Two concurrent
//! `record_vote` calls can each read the collection before the other's
//! write lands, and the last write wins. This is a documented property of
//! the whole-collection store model, not an oversight; callers needing
//! stronger guarantees must serialize mutations themselves.

use crate::error::{DuelError, Result};
use crate::rating::compute_rating_update;
use crate::store::backend::{InMemoryKvStore, KvStore};
use crate::store::seed::COMMUNITIES_KEY;
use crate::types::Community;
use rand::Rng;
use std::sync::Arc;
use tracing::{info, warn};

/// Which backing store the coordinator writes through.
///
/// The durable variant keeps an in-process fallback that serves reads when
/// the configured store is unreachable, trading durability for
/// availability. Writes never go to the fallback: a failed durable write
/// surfaces as an error instead of being silently absorbed.
enum Backend {
    Durable {
        kv: Arc<dyn KvStore>,
        fallback: InMemoryKvStore,
    },
    Ephemeral(InMemoryKvStore),
}

/// Coordinator for the community collection
pub struct CommunityStore {
    backend: Backend,
    seed: Vec<Community>,
    key: String,
}

impl CommunityStore {
    /// Create a coordinator backed by a durable key-value store
    pub fn durable(kv: Arc<dyn KvStore>, seed: Vec<Community>) -> Self {
        info!(
            key = COMMUNITIES_KEY,
            communities = seed.len(),
            "Community store using durable backing store"
        );

        Self {
            backend: Backend::Durable {
                kv,
                fallback: InMemoryKvStore::new(),
            },
            seed,
            key: COMMUNITIES_KEY.to_string(),
        }
    }

    /// Create a coordinator backed only by process memory
    pub fn ephemeral(seed: Vec<Community>) -> Self {
        warn!(
            "No durable backing store configured; falling back to the \
             IN-MEMORY store. Votes will NOT persist across restarts."
        );

        Self {
            backend: Backend::Ephemeral(InMemoryKvStore::new()),
            seed,
            key: COMMUNITIES_KEY.to_string(),
        }
    }

    /// Return an independent copy of every community
    pub async fn list_all(&self) -> Result<Vec<Community>> {
        self.read_collection().await
    }

    /// Return an independent copy of one community, or `None`
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Community>> {
        let communities = self.read_collection().await?;
        Ok(communities.into_iter().find(|c| c.id == id))
    }

    /// Draw two distinct communities uniformly at random.
    ///
    /// Returns `None` when fewer than two communities exist. Selection is
    /// deliberately unweighted: an entry at 50 games is exactly as likely
    /// to be drawn as one with none.
    pub async fn pick_random_pair(&self) -> Result<Option<(Community, Community)>> {
        let communities = self.read_collection().await?;
        if communities.len() < 2 {
            return Ok(None);
        }

        let mut rng = rand::thread_rng();
        let first = rng.gen_range(0..communities.len());
        let mut second = rng.gen_range(0..communities.len());
        while second == first {
            second = rng.gen_range(0..communities.len());
        }

        Ok(Some((
            communities[first].clone(),
            communities[second].clone(),
        )))
    }

    /// Record a decided duel: update both ratings through the rating
    /// engine, bump the win/loss counters and write the whole collection
    /// back. All-or-nothing: a missing id or a failed write leaves the
    /// stored collection untouched.
    pub async fn record_vote(&self, winner_id: &str, loser_id: &str) -> Result<()> {
        if winner_id == loser_id {
            return Err(DuelError::InvalidArgument {
                reason: "winner and loser must be different communities".to_string(),
            }
            .into());
        }

        // Re-read right before mutating to shrink the staleness window.
        let mut communities = self.read_collection().await?;

        let winner_idx = communities
            .iter()
            .position(|c| c.id == winner_id)
            .ok_or_else(|| DuelError::NotFound {
                id: winner_id.to_string(),
            })?;
        let loser_idx = communities
            .iter()
            .position(|c| c.id == loser_id)
            .ok_or_else(|| DuelError::NotFound {
                id: loser_id.to_string(),
            })?;

        let update = compute_rating_update(communities[winner_idx].elo, communities[loser_idx].elo);

        communities[winner_idx].apply_win(update.new_winner_elo);
        communities[loser_idx].apply_loss(update.new_loser_elo);

        self.write_collection(&communities).await?;

        info!(
            winner = winner_id,
            loser = loser_id,
            winner_elo = update.new_winner_elo,
            loser_elo = update.new_loser_elo,
            "Vote recorded"
        );
        Ok(())
    }

    /// Administrative direct overwrite of one community's stats.
    ///
    /// Bypasses the rating engine and stores all four values exactly as
    /// supplied, including `games_played`; consistency is the admin
    /// surface's responsibility here.
    pub async fn overwrite_stats(
        &self,
        id: &str,
        elo: i32,
        wins: u32,
        losses: u32,
        games_played: u32,
    ) -> Result<()> {
        let mut communities = self.read_collection().await?;

        let community = communities
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| DuelError::NotFound { id: id.to_string() })?;

        community.elo = elo;
        community.wins = wins;
        community.losses = losses;
        community.games_played = games_played;

        self.write_collection(&communities).await?;

        info!(id, elo, wins, losses, games_played, "Stats overwritten");
        Ok(())
    }

    /// Replace the whole collection with a copy of the seed dataset,
    /// discarding all accumulated stats.
    pub async fn reset_all(&self) -> Result<()> {
        self.write_collection(&self.seed.clone()).await?;
        info!(communities = self.seed.len(), "Collection reset to seed");
        Ok(())
    }

    /// Read the current collection, seeding the store on first access.
    ///
    /// A read failure against the durable store serves the in-process
    /// fallback instead of failing the request.
    async fn read_collection(&self) -> Result<Vec<Community>> {
        match &self.backend {
            Backend::Ephemeral(mem) => self.read_or_seed(mem).await,
            Backend::Durable { kv, fallback } => match kv.get(&self.key).await {
                Ok(Some(blob)) => match decode(&blob) {
                    Ok(communities) if !communities.is_empty() => Ok(communities),
                    Ok(_) => self.seed_store(kv.as_ref()).await,
                    Err(e) => {
                        warn!(
                            error = %e,
                            "Stored collection is unreadable; serving the \
                             in-memory fallback"
                        );
                        self.read_or_seed(fallback).await
                    }
                },
                Ok(None) => self.seed_store(kv.as_ref()).await,
                Err(e) => {
                    warn!(
                        error = %e,
                        "Durable store read failed; serving the in-memory \
                         fallback. Data may be stale and will NOT persist."
                    );
                    self.read_or_seed(fallback).await
                }
            },
        }
    }

    /// Write the whole collection back in one key-value set
    async fn write_collection(&self, communities: &[Community]) -> Result<()> {
        let blob = encode(communities)?;
        match &self.backend {
            Backend::Ephemeral(mem) => mem.set(&self.key, blob).await,
            Backend::Durable { kv, .. } => kv.set(&self.key, blob).await,
        }
    }

    /// Persist the seed dataset and return a copy of it
    async fn seed_store(&self, kv: &dyn KvStore) -> Result<Vec<Community>> {
        match kv.set(&self.key, encode(&self.seed)?).await {
            Ok(()) => info!(
                communities = self.seed.len(),
                "Seeded backing store with default dataset"
            ),
            // Reads stay available even when the seed cannot be persisted;
            // the next write will surface the store failure.
            Err(e) => warn!(error = %e, "Failed to persist seed dataset"),
        }
        Ok(self.seed.clone())
    }

    /// Read from an in-memory store, seeding it on first access
    async fn read_or_seed(&self, mem: &InMemoryKvStore) -> Result<Vec<Community>> {
        match mem.get(&self.key).await? {
            Some(blob) => decode(&blob),
            None => {
                mem.set(&self.key, encode(&self.seed)?).await?;
                Ok(self.seed.clone())
            }
        }
    }
}

fn encode(communities: &[Community]) -> Result<String> {
    serde_json::to_string(communities).map_err(|e| {
        DuelError::InternalError {
            message: format!("Failed to serialize collection: {e}"),
        }
        .into()
    })
}

fn decode(blob: &str) -> Result<Vec<Community>> {
    serde_json::from_str(blob).map_err(|e| {
        DuelError::InternalError {
            message: format!("Failed to deserialize collection: {e}"),
        }
        .into()
    })
}
