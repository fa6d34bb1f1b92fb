//! Memory Cache
//!
//! The public cache object: one store plus the sweeper that keeps it trimmed.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheStats, CacheStore};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::tasks::{Sweeper, SweeperStatus};

// == Memory Cache ==
/// In-process key/value cache with per-entry TTL.
///
/// Each instance owns its own map, lock and sweeper. Data operations are
/// synchronous; only the optional background sweeper needs a Tokio runtime.
/// Dropping the cache stops its sweeper.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use ttl_cache::MemoryCache;
///
/// let cache = MemoryCache::new();
/// cache.set("a", "1", Duration::from_secs(5));
/// assert_eq!(cache.get("a"), Some("1".to_string()));
/// ```
pub struct MemoryCache {
    store: Arc<CacheStore>,
    sweeper: Sweeper,
    default_ttl: Duration,
}

impl MemoryCache {
    /// Creates an empty cache with the default configuration.
    pub fn new() -> Self {
        Self::from_config(&CacheConfig::default())
    }

    /// Creates an empty cache using `config.default_ttl` for
    /// [`MemoryCache::set_default`]. The sweeper is not started.
    pub fn from_config(config: &CacheConfig) -> Self {
        let store = Arc::new(CacheStore::new());
        Self {
            sweeper: Sweeper::new(store.clone()),
            store,
            default_ttl: config.default_ttl,
        }
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>, ttl: Duration) {
        self.store.set(key, value, ttl);
    }

    /// Stores `value` under `key` with the configured default TTL.
    pub fn set_default(&self, key: impl Into<String>, value: impl Into<String>) {
        self.store.set(key, value, self.default_ttl);
    }

    /// Returns a copy of the live value under `key`, or `None` on miss or expiry.
    pub fn get(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }

    /// Remaining lifetime of the live entry under `key`.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        self.store.ttl_remaining(key)
    }

    /// Removes `key` if present. Returns whether anything was removed.
    pub fn delete(&self, key: &str) -> bool {
        self.store.delete(key)
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Runs one sweep pass immediately, returning the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        self.store.purge_expired()
    }

    /// Number of entries held, counting expired entries not yet swept.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if no entries are held.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.store.stats()
    }

    /// Starts background eviction every `interval`. See [`Sweeper::start`].
    pub fn start_sweeper(&self, interval: Duration) -> Result<()> {
        self.sweeper.start(interval)
    }

    /// Stops background eviction. Safe to call repeatedly.
    pub fn stop_sweeper(&self) -> bool {
        self.sweeper.stop()
    }

    /// Lifecycle state of the sweeper.
    pub fn sweeper_status(&self) -> SweeperStatus {
        self.sweeper.status()
    }

    /// Stops the sweeper and waits for its task to exit.
    pub async fn shutdown(&self) {
        self.sweeper.shutdown().await;
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}
