//! # Service Container
//!
//! Builds the service graph from a `NodeConfig`.
//!
//! ```text
//! SystemTimeSource ──┬──> EntryValidator ──┐
//!                    │                     ├──> DirectoryService ──> Router
//! StorageBackend ────┴──> RecordStore ─────┤
//!                                          └──> ExpirySweeper
//! ```
//!
//! ## Thread Safety
//!
//! - The repository is shared as `Arc<dyn EntryRepository>`
//! - Record store and directory service are shared via `Arc`

use std::sync::Arc;

use axum::Router;
use rd_01_entry_validation::{EntryValidator, SystemTimeSource, TimeSource};
use rd_02_record_store::{EntryRepository, ExpirySweeper, InMemoryEntryRepository, RecordStore};
use rd_03_directory_api::{build_router, DirectoryService};
use thiserror::Error;
use tracing::{info, instrument};

use crate::container::config::{NodeConfig, StorageBackend, StorageConfig};

/// Repository handle shared by every service.
pub type SharedRepository = Arc<dyn EntryRepository>;

/// Errors while building the service graph.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("Storage backend '{0:?}' is not compiled in (enable the `rocksdb` feature)")]
    BackendUnavailable(StorageBackend),

    #[error("Failed to open storage at {path}: {message}")]
    StorageOpen { path: String, message: String },
}

/// Central container holding the wired services.
pub struct ServiceContainer {
    /// Record store shared by the directory service and the sweeper.
    pub store: Arc<RecordStore<SharedRepository>>,

    /// Request-facing service.
    pub directory: Arc<DirectoryService<SharedRepository>>,

    /// Clock used for freshness checks and expiry cutoffs.
    pub clock: Arc<dyn TimeSource>,

    /// Node configuration (immutable after initialization).
    pub config: NodeConfig,
}

impl ServiceContainer {
    /// Build the container on the system clock.
    pub fn new(config: NodeConfig) -> Result<Self, ContainerError> {
        Self::with_clock(config, Arc::new(SystemTimeSource))
    }

    /// Build the container on a caller-supplied clock.
    #[instrument(name = "container_init", skip(config, clock))]
    pub fn with_clock(
        config: NodeConfig,
        clock: Arc<dyn TimeSource>,
    ) -> Result<Self, ContainerError> {
        let repository = open_repository(&config.storage)?;
        let store = Arc::new(RecordStore::new(repository));

        let validator = EntryValidator::new((&config.validation).into());
        let directory = Arc::new(DirectoryService::new(
            validator,
            Arc::clone(&store),
            Arc::clone(&clock),
        ));

        info!(
            freshness_window_ms = config.validation.freshness_window_ms,
            framing = %config.validation.framing,
            "Directory service initialized"
        );

        Ok(Self {
            store,
            directory,
            clock,
            config,
        })
    }

    /// HTTP router over the directory service.
    pub fn router(&self) -> Router {
        build_router(Arc::clone(&self.directory))
    }

    /// Expiry sweeper over the shared store.
    pub fn sweeper(&self) -> ExpirySweeper<SharedRepository> {
        ExpirySweeper::new(
            Arc::clone(&self.store),
            Arc::clone(&self.clock),
            (&self.config.expiry).into(),
        )
    }
}

fn open_repository(storage: &StorageConfig) -> Result<SharedRepository, ContainerError> {
    match storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory record storage");
            let repository: SharedRepository = Arc::new(InMemoryEntryRepository::in_memory());
            Ok(repository)
        }
        StorageBackend::RocksDb => open_rocksdb(storage),
    }
}

#[cfg(feature = "rocksdb")]
fn open_rocksdb(storage: &StorageConfig) -> Result<SharedRepository, ContainerError> {
    use rd_02_record_store::{KvEntryRepository, RocksDbStore};

    let path = storage.data_dir.display().to_string();
    std::fs::create_dir_all(&storage.data_dir).map_err(|e| ContainerError::StorageOpen {
        path: path.clone(),
        message: e.to_string(),
    })?;
    let db = RocksDbStore::open_default(&storage.data_dir).map_err(|e| {
        ContainerError::StorageOpen {
            path: path.clone(),
            message: e.to_string(),
        }
    })?;

    info!(path = %path, "Using RocksDB record storage");
    let repository: SharedRepository = Arc::new(KvEntryRepository::new(db));
    Ok(repository)
}

#[cfg(not(feature = "rocksdb"))]
fn open_rocksdb(storage: &StorageConfig) -> Result<SharedRepository, ContainerError> {
    Err(ContainerError::BackendUnavailable(storage.backend))
}
