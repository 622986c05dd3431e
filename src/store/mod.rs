//! Community store: backing-store abstraction, seed dataset and the
//! coordinator that owns the canonical collection.

pub mod backend;
pub mod coordinator;
pub mod seed;

// Re-export commonly used types
pub use backend::{FileKvStore, InMemoryKvStore, KvStore};
pub use coordinator::CommunityStore;
pub use seed::{default_communities, load_seed_file, COMMUNITIES_KEY};
