//! Community Duel - pairwise voting service with an ELO leaderboard
//!
//! This crate lets users cast head-to-head preference votes between
//! communities and maintains a continuously updated ELO ranking, persisted
//! as a single key-value blob with an in-memory fallback.

pub mod config;
pub mod error;
pub mod rating;
pub mod service;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{DuelError, Result};
pub use types::*;

// Re-export key components
pub use store::{CommunityStore, FileKvStore, InMemoryKvStore, KvStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
