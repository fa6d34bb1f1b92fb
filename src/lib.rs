//! TTL Cache - An in-process key/value cache
//!
//! Stores string values under string keys, each with its own expiration
//! deadline. Expired entries are hidden on read and reclaimed by an optional
//! background sweeper.

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod memory;
pub mod tasks;

pub use backend::CacheBackend;
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use memory::MemoryCache;
pub use tasks::SweeperStatus;
