//! Cache Backend Trait
//!
//! Capability interface shared by every cache implementation, so callers can
//! swap the in-memory cache for a remote or durable one without changes.

use std::time::Duration;

use crate::error::Result;
use crate::memory::MemoryCache;

/// Data operations common to all cache backends.
///
/// Remote backends may fail with [`crate::CacheError::Backend`]. The in-memory
/// implementation never returns an error.
pub trait CacheBackend: Send + Sync {
    /// Stores `value` under `key` for `ttl`.
    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Fetches the live value under `key`; `Ok(None)` is a miss.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Removes `key`; removing an absent key succeeds.
    fn delete(&self, key: &str) -> Result<()>;

    /// Removes every entry.
    fn clear(&self) -> Result<()>;

    /// Releases backend resources.
    fn close(&self) -> Result<()>;
}

impl CacheBackend for MemoryCache {
    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        MemoryCache::set(self, key, value, ttl);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(MemoryCache::get(self, key))
    }

    fn delete(&self, key: &str) -> Result<()> {
        MemoryCache::delete(self, key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        MemoryCache::clear(self);
        Ok(())
    }

    /// Stops the sweeper. Stored data stays readable.
    fn close(&self) -> Result<()> {
        self.stop_sweeper();
        Ok(())
    }
}
