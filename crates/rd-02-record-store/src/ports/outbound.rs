//! # Outbound Ports (Driven Ports)
//!
//! Persistence the Record Store requires from its host.
//!
//! - `EntryRepository`: record-level operations, one per persistence need
//! - `KeyValueStore`: byte-level store that `KvEntryRepository` builds on

use crate::domain::errors::{KVStoreError, StoreError};
use async_trait::async_trait;
use rd_01_entry_validation::{Entry, EntryKey, TimestampMs};
use std::sync::Arc;

/// Persistence collaborator for live records.
///
/// Production: `KvEntryRepository<RocksDbStore>`
/// Testing: `KvEntryRepository<InMemoryKVStore>`
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Is there a live record for `key` with a body timestamp strictly
    /// greater than `timestamp`?
    async fn newer_exists(&self, key: &EntryKey, timestamp: TimestampMs)
        -> Result<bool, StoreError>;

    /// Delete any live record for the entry's pair and insert the entry,
    /// unless the live record has a strictly newer body timestamp.
    ///
    /// ## Atomicity Guarantee
    ///
    /// The timestamp check, the delete and the insert form one unit. No
    /// reader observes the pair with zero records mid-replace or with two
    /// records at any time, and a concurrent replace for the same pair
    /// cannot slip between the check and the write.
    async fn replace(&self, entry: &Entry) -> Result<ReplaceOutcome, StoreError>;

    /// All live records under `authority_key` except `exclude_member_key`.
    async fn list_by_authority_excluding(
        &self,
        authority_key: &str,
        exclude_member_key: &str,
    ) -> Result<Vec<Entry>, StoreError>;

    /// Delete every live record with body timestamp below `cutoff`.
    /// Returns the number removed.
    async fn delete_older_than(&self, cutoff: TimestampMs) -> Result<usize, StoreError>;
}

#[async_trait]
impl<R: EntryRepository + ?Sized> EntryRepository for Arc<R> {
    async fn newer_exists(
        &self,
        key: &EntryKey,
        timestamp: TimestampMs,
    ) -> Result<bool, StoreError> {
        (**self).newer_exists(key, timestamp).await
    }

    async fn replace(&self, entry: &Entry) -> Result<ReplaceOutcome, StoreError> {
        (**self).replace(entry).await
    }

    async fn list_by_authority_excluding(
        &self,
        authority_key: &str,
        exclude_member_key: &str,
    ) -> Result<Vec<Entry>, StoreError> {
        (**self)
            .list_by_authority_excluding(authority_key, exclude_member_key)
            .await
    }

    async fn delete_older_than(&self, cutoff: TimestampMs) -> Result<usize, StoreError> {
        (**self).delete_older_than(cutoff).await
    }
}

/// What a conditional replace did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceOutcome {
    /// The entry is now the live record for its pair.
    Replaced,
    /// A strictly newer record was already live; nothing changed.
    NewerEntryExists,
}

/// Result of a prefix scan: `(key, value)` pairs.
pub type ScanResult = Vec<(Vec<u8>, Vec<u8>)>;

/// Abstract interface for key-value database operations.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Execute an atomic batch write.
    ///
    /// Either ALL operations in the batch succeed, or NONE are applied.
    fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    /// Read `key` and apply `operations` only if `condition` accepts the
    /// value read. Returns whether the batch was applied.
    ///
    /// The read and the batch form one unit with respect to every other
    /// conditional write on `key`. Writes to other keys are not held up.
    fn conditional_batch_write(
        &self,
        key: &[u8],
        condition: &dyn Fn(Option<&[u8]>) -> bool,
        operations: Vec<BatchOperation>,
    ) -> Result<bool, KVStoreError>;

    /// Iterate over keys with a prefix.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError>;
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put { key: Vec<u8>, value: Vec<u8> },
    /// Delete a key.
    Delete { key: Vec<u8> },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a Delete operation.
    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}
