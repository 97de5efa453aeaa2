//! Storage Adapters
//!
//! - `kv_repository`: `EntryRepository` over any `KeyValueStore`
//! - `memory_kv`: in-memory `KeyValueStore`
//! - `rocksdb_kv`: RocksDB `KeyValueStore` (feature `rocksdb`)

mod kv_repository;
mod memory_kv;
#[cfg(feature = "rocksdb")]
mod rocksdb_kv;

pub use kv_repository::{InMemoryEntryRepository, KvEntryRepository};
pub use memory_kv::InMemoryKVStore;
#[cfg(feature = "rocksdb")]
pub use rocksdb_kv::{RocksDbConfig, RocksDbStore};
