//! Cache Module
//!
//! Provides the typed in-memory store with token resolution, hot-key
//! eviction and snapshot encoding.

mod dirty;
mod entry;
mod resolver;
mod seed;
mod snapshot;
mod stats;
mod store;
mod variant;


// Re-export public types
pub use dirty::DirtyFlag;
pub use entry::{CacheEntry, ReadOutcome, MAX_ACCESS_COUNT};
pub use resolver::KeyResolver;
pub use seed::seed_demo_entries;
pub use snapshot::Snapshot;
pub use stats::CacheStats;
pub use store::{CachePair, CacheStore};
pub use variant::{Variant, VariantKind};

/// Store shared between request handlers and the persistence scheduler.
pub type SharedCache = std::sync::Arc<tokio::sync::Mutex<CacheStore>>;
