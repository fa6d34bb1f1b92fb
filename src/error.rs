//! Error types for the cache
//!
//! Provides unified error handling using thiserror. A cache miss is never an
//! error; these variants cover sweeper usage faults and failures of
//! substitutable backends.

use std::time::Duration;

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Sweep interval must be strictly positive
    #[error("Invalid sweep interval: {0:?}")]
    InvalidInterval(Duration),

    /// The sweeper was started while already running
    #[error("Sweeper is already running")]
    SweeperAlreadyRunning,

    /// The sweeper has been stopped and cannot be restarted
    #[error("Sweeper has been stopped")]
    SweeperStopped,

    /// The sweeper needs a Tokio runtime to spawn its task
    #[error("No Tokio runtime available to spawn the sweeper")]
    NoRuntime,

    /// Failure reported by an external backend (never produced in memory)
    #[error("Backend error: {0}")]
    Backend(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
