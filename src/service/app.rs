//! Application state and component wiring
//!
//! `AppState` assembles the configured backing store, seed dataset and
//! coordinator; it is shared across request handlers behind an `Arc`.

use crate::config::AppConfig;
use crate::error::Result;
use crate::store::{seed, CommunityStore, FileKvStore};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

/// Shared application state
pub struct AppState {
    config: AppConfig,
    store: Arc<CommunityStore>,
    started_at: DateTime<Utc>,
}

impl AppState {
    /// Build the application state from a validated configuration.
    ///
    /// Picks the durable file-backed store when a data directory is
    /// configured, the in-memory fallback otherwise.
    pub fn new(config: AppConfig) -> Result<Self> {
        let seed_data = match &config.store.seed_file {
            Some(path) => {
                info!(path = %path.display(), "Loading seed dataset from file");
                seed::load_seed_file(path)?
            }
            None => seed::default_communities(),
        };
        seed::validate_seed(&seed_data)?;

        let store = match &config.store.data_dir {
            Some(dir) => {
                let kv = FileKvStore::new(dir);
                info!(dir = %dir.display(), "Using file-backed store");
                CommunityStore::durable(Arc::new(kv), seed_data)
            }
            None => CommunityStore::ephemeral(seed_data),
        };

        Ok(Self {
            config,
            store: Arc::new(store),
            started_at: Utc::now(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &CommunityStore {
        &self.store
    }

    /// Human-readable uptime for the health endpoint
    pub fn uptime(&self) -> String {
        let seconds = (Utc::now() - self.started_at).num_seconds().max(0);
        format!(
            "{}h {}m {}s",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        )
    }
}
