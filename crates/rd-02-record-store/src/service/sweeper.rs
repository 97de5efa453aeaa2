//! Periodic expiry sweep.
//!
//! Runs independently of request handling. Failures are logged and the
//! next tick tries again; nothing propagates to admissions.

use super::RecordStore;
use crate::domain::retention::{retention_cutoff, DEFAULT_RETENTION};
use crate::ports::outbound::EntryRepository;
use rd_01_entry_validation::TimeSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Sweep schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweeperConfig {
    /// Age past which a record is removed.
    pub retention: Duration,
    /// Time between sweeps.
    pub interval: Duration,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            retention: DEFAULT_RETENTION,
            interval: Duration::from_secs(60),
        }
    }
}

pub struct ExpirySweeper<R: EntryRepository> {
    store: Arc<RecordStore<R>>,
    clock: Arc<dyn TimeSource>,
    config: SweeperConfig,
}

impl<R: EntryRepository> ExpirySweeper<R> {
    pub fn new(store: Arc<RecordStore<R>>, clock: Arc<dyn TimeSource>, config: SweeperConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// Run one sweep; returns the number of records removed (0 on failure).
    pub async fn sweep_once(&self) -> usize {
        info!("Cleaning up old entries...");
        let cutoff = retention_cutoff(self.clock.now_millis(), self.config.retention);

        match self.store.purge_expired(cutoff).await {
            Ok(removed) => {
                info!(removed = removed, cutoff = cutoff, "Expiry sweep complete");
                removed
            }
            Err(e) => {
                warn!(error = %e, cutoff = cutoff, "Expiry sweep failed");
                0
            }
        }
    }

    /// Sweep on every tick until `shutdown` flips to `true` or its sender
    /// is dropped.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.sweep_once().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        debug!("Expiry sweeper stopping");
                        break;
                    }
                }
            }
        }
    }
}
