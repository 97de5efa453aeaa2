//! # Record Store (rd-02)
//!
//! Owns the authoritative set of live directory records.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | One Live Record | At most one record per `(authorityKey, member.key)` |
//! | 2 | No Regression | A record is never replaced by one with an older body timestamp |
//! | 3 | Atomic Replace | Delete and insert of a pair apply together or not at all |
//! | 4 | Bounded Age | Records older than the retention window (30 min) are swept |
//!
//! The body timestamp is the single timestamp used both for conflict
//! resolution and for expiry.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Errors, key layout, retention
//! - `ports/` - `EntryRepository` and `KeyValueStore` traits
//! - `adapters/` - KV-backed repository, in-memory and RocksDB stores
//! - `service/` - `RecordStore` and `ExpirySweeper`
//!
//! ## Usage
//!
//! ```ignore
//! use rd_02_record_store::{InMemoryEntryRepository, RecordStore};
//!
//! let store = RecordStore::new(InMemoryEntryRepository::in_memory());
//! store.admit(&entry).await?;
//! let siblings = store.list_siblings(&entry.authority_key, &entry.member.key).await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;
pub mod test_utils;

pub use adapters::{InMemoryEntryRepository, InMemoryKVStore, KvEntryRepository};
#[cfg(feature = "rocksdb")]
pub use adapters::{RocksDbConfig, RocksDbStore};
pub use domain::errors::{AdmitError, KVStoreError, StoreError};
pub use domain::retention::{retention_cutoff, DEFAULT_RETENTION};
pub use ports::outbound::{BatchOperation, EntryRepository, KeyValueStore, ReplaceOutcome};
pub use service::{ExpirySweeper, RecordStore, SweeperConfig};
