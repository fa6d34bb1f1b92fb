//! Cache Module
//!
//! Provides in-memory key/value storage with per-entry TTL expiration.

mod entry;
mod stats;
mod store;


// Re-export public types
pub(crate) use entry::CacheEntry;
pub use entry::MAX_TTL;
pub use stats::CacheStats;
pub use store::CacheStore;
