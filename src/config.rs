//! Configuration Module
//!
//! Handles loading cache settings from environment variables.

use std::env;
use std::time::Duration;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Interval between background sweep passes
    pub sweep_interval: Duration,
    /// TTL applied by `MemoryCache::set_default`
    pub default_ttl: Duration,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SWEEP_INTERVAL_MS` - Sweep frequency in milliseconds (default: 1000)
    /// - `DEFAULT_TTL_SECS` - Default TTL in seconds (default: 300)
    ///
    /// Unparsable values fall back to the default. A zero interval is kept
    /// as-is and rejected when the sweeper is started.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            sweep_interval: env::var("SWEEP_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.sweep_interval),
            default_ttl: env::var("DEFAULT_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.default_ttl),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            sweep_interval: Duration::from_millis(1000),
            default_ttl: Duration::from_secs(300),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both env cases live in one test so they never race each other.
    #[test]
    fn test_config_from_env() {
        env::remove_var("SWEEP_INTERVAL_MS");
        env::remove_var("DEFAULT_TTL_SECS");
        assert_eq!(CacheConfig::from_env(), CacheConfig::default());

        env::set_var("SWEEP_INTERVAL_MS", "250");
        env::set_var("DEFAULT_TTL_SECS", "not-a-number");
        let config = CacheConfig::from_env();
        assert_eq!(config.sweep_interval, Duration::from_millis(250));
        assert_eq!(config.default_ttl, Duration::from_secs(300));

        env::remove_var("SWEEP_INTERVAL_MS");
        env::remove_var("DEFAULT_TTL_SECS");
    }

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.sweep_interval, Duration::from_secs(1));
        assert_eq!(config.default_ttl, Duration::from_secs(300));
    }
}
