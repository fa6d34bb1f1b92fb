//! TTL Cache demo
//!
//! Walks a cache through its lifecycle: store, read back, expire, delete.
//!
//! Settings come from `SWEEP_INTERVAL_MS` and `DEFAULT_TTL_SECS`; log level from
//! `RUST_LOG`.

use std::time::Duration;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ttl_cache::{CacheConfig, MemoryCache};

/// Entry point.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache and start the sweeper
/// 4. Run the demonstration
/// 5. Stop the sweeper and wait for it to exit
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CacheConfig::from_env();
    info!(
        "Configuration loaded: sweep_interval={:?}, default_ttl={:?}",
        config.sweep_interval, config.default_ttl
    );

    let cache = MemoryCache::from_config(&config);
    cache
        .start_sweeper(config.sweep_interval)
        .context("failed to start expiry sweeper")?;

    demonstrate(&cache, config.sweep_interval).await;

    let stats = serde_json::to_string(&cache.stats()).context("failed to encode stats")?;
    info!("Cache stats: {}", stats);

    cache.shutdown().await;
    info!("Demo complete");
    Ok(())
}

async fn demonstrate(cache: &MemoryCache, sweep_interval: Duration) {
    let ttl = Duration::from_secs(2);
    cache.set("test_key", "test_value", ttl);
    info!("Set test_key=test_value (expires in {:?})", ttl);

    match cache.get("test_key") {
        Some(value) => info!("Read test_key: {}", value),
        None => info!("test_key not found"),
    }

    // Long enough for the entry to expire and a sweep pass to reclaim it
    let wait = ttl + sweep_interval + Duration::from_millis(100);
    info!("Waiting {:?}...", wait);
    tokio::time::sleep(wait).await;

    match cache.get("test_key") {
        Some(value) => info!("Read test_key: {}", value),
        None => info!("test_key expired or missing"),
    }
    info!("Entries held after sweep: {}", cache.len());

    cache.set("to_delete", "delete_me", Duration::from_secs(30));
    info!("Set to_delete=delete_me");

    cache.delete("to_delete");
    info!("Deleted to_delete");

    if cache.get("to_delete").is_none() {
        info!("to_delete is gone");
    }

    cache.set_default("default_key", "default_value");
    info!(
        "Set default_key with default ttl, remaining {:?}",
        cache.ttl_remaining("default_key")
    );
}
