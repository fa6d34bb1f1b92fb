//! Expiry Sweeper
//!
//! Background task that periodically removes expired cache entries, with a
//! one-way `Idle -> Running -> Stopped` lifecycle.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::error::{CacheError, Result};

// == Sweeper Status ==
/// Observable lifecycle state of a [`Sweeper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweeperStatus {
    /// Not started yet
    Idle,
    /// Background task is armed
    Running,
    /// Terminal; the sweeper cannot be restarted
    Stopped,
}

enum SweeperState {
    Idle,
    Running {
        shutdown_tx: watch::Sender<bool>,
        handle: JoinHandle<()>,
    },
    Stopped {
        handle: Option<JoinHandle<()>>,
    },
}

// == Sweeper ==
/// Owns the lifecycle of one background sweep task over a [`CacheStore`].
///
/// `start` may succeed at most once. `stop` may be called any number of times;
/// only the first call has an effect.
pub struct Sweeper {
    store: Arc<CacheStore>,
    state: Mutex<SweeperState>,
}

impl Sweeper {
    /// Creates an idle sweeper for `store`.
    pub fn new(store: Arc<CacheStore>) -> Self {
        Self {
            store,
            state: Mutex::new(SweeperState::Idle),
        }
    }

    fn state(&self) -> MutexGuard<'_, SweeperState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the current lifecycle state.
    pub fn status(&self) -> SweeperStatus {
        match *self.state() {
            SweeperState::Idle => SweeperStatus::Idle,
            SweeperState::Running { .. } => SweeperStatus::Running,
            SweeperState::Stopped { .. } => SweeperStatus::Stopped,
        }
    }

    // == Start ==
    /// Spawns the sweep task, waking every `interval`.
    ///
    /// # Errors
    /// - [`CacheError::InvalidInterval`] if `interval` is zero
    /// - [`CacheError::SweeperAlreadyRunning`] if a task is already running
    /// - [`CacheError::SweeperStopped`] if the sweeper was stopped before
    /// - [`CacheError::NoRuntime`] if called outside a Tokio runtime
    ///
    /// A failed call leaves any running task untouched.
    pub fn start(&self, interval: Duration) -> Result<()> {
        let mut state = self.state();

        let fault = match *state {
            SweeperState::Idle if interval.is_zero() => {
                Some(CacheError::InvalidInterval(interval))
            }
            SweeperState::Idle => None,
            SweeperState::Running { .. } => Some(CacheError::SweeperAlreadyRunning),
            SweeperState::Stopped { .. } => Some(CacheError::SweeperStopped),
        };
        if let Some(err) = fault {
            warn!("Sweeper start rejected: {}", err);
            return Err(err);
        }

        let runtime = tokio::runtime::Handle::try_current().map_err(|_| {
            warn!("Sweeper start rejected: no Tokio runtime");
            CacheError::NoRuntime
        })?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = runtime.spawn(sweep_loop(self.store.clone(), interval, shutdown_rx));

        *state = SweeperState::Running {
            shutdown_tx,
            handle,
        };
        Ok(())
    }

    // == Stop ==
    /// Signals the task to exit and moves to `Stopped`.
    ///
    /// Idempotent. Returns `true` only for the call that signalled a running
    /// task. Stopping an idle sweeper also makes it terminal.
    pub fn stop(&self) -> bool {
        let mut state = self.state();

        match std::mem::replace(&mut *state, SweeperState::Stopped { handle: None }) {
            SweeperState::Running {
                shutdown_tx,
                handle,
            } => {
                // The receiver may already be gone if the task ended; nothing to do then.
                let _ = shutdown_tx.send(true);
                *state = SweeperState::Stopped {
                    handle: Some(handle),
                };
                info!("Sweeper stop requested");
                true
            }
            previous @ SweeperState::Stopped { .. } => {
                *state = previous;
                debug!("Sweeper already stopped");
                false
            }
            SweeperState::Idle => false,
        }
    }

    // == Shutdown ==
    /// Stops the sweeper and waits for the task to exit.
    pub async fn shutdown(&self) {
        self.stop();

        let handle = {
            let mut state = self.state();
            match &mut *state {
                SweeperState::Stopped { handle } => handle.take(),
                _ => None,
            }
        };

        if let Some(handle) = handle {
            if let Err(err) = handle.await {
                warn!("Sweeper task ended abnormally: {}", err);
            }
        }
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Body of the background task.
///
/// Waits one full interval before the first pass. A stop signal wins over a
/// ready tick, and is re-checked before each pass, so no pass starts after the
/// signal is observed.
async fn sweep_loop(
    store: Arc<CacheStore>,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    info!("Starting expiry sweeper with interval of {:?}", interval);

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    ticker.tick().await;

    loop {
        tokio::select! {
            biased;

            changed = shutdown_rx.changed() => {
                // Err means the sender was dropped, which also ends the task
                if changed.is_err() || *shutdown_rx.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                if *shutdown_rx.borrow() {
                    break;
                }

                let removed = store.purge_expired();
                if removed > 0 {
                    info!("Expiry sweep: removed {} expired entries", removed);
                } else {
                    debug!("Expiry sweep: no expired entries found");
                }
            }
        }
    }

    info!("Expiry sweeper stopped");
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn sweeper_with_store() -> (Arc<CacheStore>, Sweeper) {
        let store = Arc::new(CacheStore::new());
        let sweeper = Sweeper::new(store.clone());
        (store, sweeper)
    }

    #[tokio::test]
    async fn test_sweeper_removes_expired_entries() {
        let (store, sweeper) = sweeper_with_store();
        store.set("expire_soon", "value", Duration::from_millis(10));

        sweeper.start(Duration::from_millis(5)).unwrap();
        assert_eq!(sweeper.status(), SweeperStatus::Running);

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(store.len(), 0, "Expired entry should have been swept");
        sweeper.shutdown().await;
    }

    #[tokio::test]
    async fn test_sweeper_preserves_valid_entries() {
        let (store, sweeper) = sweeper_with_store();
        store.set("long_lived", "value", Duration::from_secs(3600));

        sweeper.start(Duration::from_millis(5)).unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;

        assert_eq!(store.get("long_lived"), Some("value".to_string()));
        assert!(store.stats().sweeps > 0);
        sweeper.shutdown().await;
    }

    #[tokio::test]
    async fn test_start_twice_keeps_first_task() {
        let (store, sweeper) = sweeper_with_store();

        sweeper.start(Duration::from_millis(5)).unwrap();
        assert_eq!(
            sweeper.start(Duration::from_millis(5)),
            Err(CacheError::SweeperAlreadyRunning)
        );
        assert_eq!(sweeper.status(), SweeperStatus::Running);

        store.set("k", "v", Duration::from_millis(5));
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(store.len(), 0, "Original task should still be sweeping");

        sweeper.shutdown().await;
    }

    #[tokio::test]
    async fn test_zero_interval_rejected() {
        let (_store, sweeper) = sweeper_with_store();

        assert_eq!(
            sweeper.start(Duration::ZERO),
            Err(CacheError::InvalidInterval(Duration::ZERO))
        );
        assert_eq!(sweeper.status(), SweeperStatus::Idle);
        assert!(sweeper.start(Duration::from_millis(5)).is_ok());
        sweeper.shutdown().await;
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let (_store, sweeper) = sweeper_with_store();
        sweeper.start(Duration::from_millis(5)).unwrap();

        assert!(sweeper.stop());
        assert!(!sweeper.stop());
        assert!(!sweeper.stop());
        assert_eq!(sweeper.status(), SweeperStatus::Stopped);
        sweeper.shutdown().await;
    }

    #[tokio::test]
    async fn test_start_after_stop_rejected() {
        let (_store, sweeper) = sweeper_with_store();
        sweeper.start(Duration::from_millis(5)).unwrap();
        sweeper.stop();

        assert_eq!(
            sweeper.start(Duration::from_millis(5)),
            Err(CacheError::SweeperStopped)
        );
    }

    #[tokio::test]
    async fn test_stop_from_idle_is_terminal() {
        let (_store, sweeper) = sweeper_with_store();

        assert!(!sweeper.stop());
        assert_eq!(sweeper.status(), SweeperStatus::Stopped);
        assert_eq!(
            sweeper.start(Duration::from_millis(5)),
            Err(CacheError::SweeperStopped)
        );
    }

    #[tokio::test]
    async fn test_no_sweeps_after_stop() {
        let (store, sweeper) = sweeper_with_store();
        sweeper.start(Duration::from_millis(5)).unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        sweeper.shutdown().await;
        let sweeps = store.stats().sweeps;

        store.set("k", "v", Duration::ZERO);
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(store.stats().sweeps, sweeps);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_stop_takes_effect_before_long_interval() {
        let (_store, sweeper) = sweeper_with_store();
        sweeper.start(Duration::from_secs(3600)).unwrap();

        tokio::time::timeout(Duration::from_secs(1), sweeper.shutdown())
            .await
            .expect("Idle sweeper should exit promptly on stop");
    }

    #[test]
    fn test_start_without_runtime() {
        let (_store, sweeper) = sweeper_with_store();

        assert_eq!(
            sweeper.start(Duration::from_millis(5)),
            Err(CacheError::NoRuntime)
        );
        assert_eq!(sweeper.status(), SweeperStatus::Idle);
    }
}
