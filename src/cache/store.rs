//! Cache Store Module
//!
//! Main cache engine: a HashMap of entries behind a single reader/writer lock,
//! with expiration-aware reads.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use crate::cache::stats::StatsCounters;
use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Concurrency-safe key/value storage with per-entry TTL.
///
/// Reads take the shared lock and never remove anything: an expired entry is
/// reported as a miss and left for [`CacheStore::purge_expired`]. Every
/// mutation takes the exclusive lock for the duration of the call.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: RwLock<HashMap<String, CacheEntry>>,
    /// Activity counters
    stats: StatsCounters,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new, empty CacheStore.
    pub fn new() -> Self {
        Self::default()
    }

    // No code path panics while holding the lock, so a poisoned map is intact.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    // == Set ==
    /// Stores a key-value pair expiring `ttl` from now.
    ///
    /// If the key already exists, the entry is replaced and its TTL reset.
    /// A zero TTL is accepted; the entry is expired on the next read or sweep.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>, ttl: Duration) {
        let (key, value) = (key.into(), value.into());
        // Deadline is stamped under the lock so it orders with concurrent reads
        let mut entries = self.write();
        entries.insert(key, CacheEntry::new(value, ttl));
    }

    // == Get ==
    /// Retrieves a copy of the value stored under `key`.
    ///
    /// Returns `None` if the key is absent or its entry has reached its deadline.
    /// The clock is read only once the shared lock is held.
    pub fn get(&self, key: &str) -> Option<String> {
        let entries = self.read();
        let now = Instant::now();

        match entries.get(key) {
            Some(entry) if entry.is_expired_at(now) => {
                self.stats.record_expired_read();
                None
            }
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == TTL Remaining ==
    /// Returns how long the entry under `key` has left to live.
    ///
    /// Returns `None` if the key is absent or expired. Does not touch stats.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        let entries = self.read();
        let now = Instant::now();
        entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.ttl_remaining_at(now))
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// Removing an absent key is a no-op. Returns whether an entry was removed.
    pub fn delete(&self, key: &str) -> bool {
        self.write().remove(key).is_some()
    }

    // == Clear ==
    /// Drops every entry at once.
    pub fn clear(&self) {
        *self.write() = HashMap::new();
    }

    // == Purge Expired ==
    /// Removes all expired entries in a single exclusive-lock pass.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.write();
        let now = Instant::now();
        let before = entries.len();

        entries.retain(|_, entry| !entry.is_expired_at(now));

        let removed = before - entries.len();
        self.stats.record_sweep(removed);
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.len())
    }

    // == Length ==
    /// Returns the number of entries held, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    // == Is Empty ==
    /// Returns true if no entries are held.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
