//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside the cache.
//!
//! # Tasks
//! - Expiry Sweeper: removes expired cache entries at a fixed interval

mod sweeper;

pub use sweeper::{Sweeper, SweeperStatus};
