//! # Key-Value Entry Repository
//!
//! Implements `EntryRepository` on any `KeyValueStore`.
//!
//! - Records are bincode-encoded `Entry` values under `record_key`
//! - Replace is one conditional batch `[Delete, Put]` on the pair's key,
//!   applied only if the live record is not strictly newer
//! - Sibling listing is a prefix scan on the authority prefix
//! - Expiry scans without holding any lock, then deletes each candidate
//!   with a conditional write that re-checks its timestamp
//!
//! The repository itself holds no lock. Isolation comes from the store's
//! batch and conditional-write guarantees, so a long sweep never stalls
//! admissions for unrelated pairs.

use crate::adapters::memory_kv::InMemoryKVStore;
use crate::domain::errors::StoreError;
use crate::domain::keys::{authority_prefix, record_key, ENTRY_PREFIX};
use crate::ports::outbound::{BatchOperation, EntryRepository, KeyValueStore, ReplaceOutcome};
use async_trait::async_trait;
use rd_01_entry_validation::{Entry, EntryKey, TimestampMs};

/// Entry repository backed by a key-value store.
pub struct KvEntryRepository<S: KeyValueStore> {
    store: S,
}

/// Repository for tests and memory-only nodes.
pub type InMemoryEntryRepository = KvEntryRepository<InMemoryKVStore>;

impl InMemoryEntryRepository {
    pub fn in_memory() -> Self {
        Self::new(InMemoryKVStore::new())
    }
}

impl<S: KeyValueStore> KvEntryRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The live record for a pair, if any.
    pub fn get(&self, key: &EntryKey) -> Result<Option<Entry>, StoreError> {
        self.store
            .get(&record_key(key))?
            .map(|bytes| decode(&bytes))
            .transpose()
    }

    /// Number of live records.
    pub fn count(&self) -> Result<usize, StoreError> {
        Ok(self.store.prefix_scan(ENTRY_PREFIX)?.len())
    }
}

fn decode(bytes: &[u8]) -> Result<Entry, StoreError> {
    Ok(bincode::deserialize(bytes)?)
}

/// Body timestamp of a stored record; `None` if it does not decode.
fn stored_timestamp(bytes: &[u8]) -> Option<TimestampMs> {
    decode(bytes).ok().map(|entry| entry.body.timestamp)
}

#[async_trait]
impl<S: KeyValueStore> EntryRepository for KvEntryRepository<S> {
    async fn newer_exists(
        &self,
        key: &EntryKey,
        timestamp: TimestampMs,
    ) -> Result<bool, StoreError> {
        Ok(self
            .get(key)?
            .is_some_and(|existing| existing.body.timestamp > timestamp))
    }

    async fn replace(&self, entry: &Entry) -> Result<ReplaceOutcome, StoreError> {
        let key = record_key(&entry.key());
        let value = bincode::serialize(entry)?;
        let timestamp = entry.body.timestamp;

        // an undecodable record never blocks its own repair
        let applied = self.store.conditional_batch_write(
            &key,
            &|current| current.and_then(stored_timestamp).map_or(true, |ts| ts <= timestamp),
            vec![
                BatchOperation::delete(key.clone()),
                BatchOperation::put(key.clone(), value),
            ],
        )?;

        Ok(if applied {
            ReplaceOutcome::Replaced
        } else {
            ReplaceOutcome::NewerEntryExists
        })
    }

    async fn list_by_authority_excluding(
        &self,
        authority_key: &str,
        exclude_member_key: &str,
    ) -> Result<Vec<Entry>, StoreError> {
        let rows = self.store.prefix_scan(&authority_prefix(authority_key))?;

        let mut entries = Vec::with_capacity(rows.len());
        for (_, value) in rows {
            let entry = decode(&value)?;
            if entry.member.key != exclude_member_key {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    async fn delete_older_than(&self, cutoff: TimestampMs) -> Result<usize, StoreError> {
        let mut candidates = Vec::new();
        for (key, value) in self.store.prefix_scan(ENTRY_PREFIX)? {
            if decode(&value)?.body.timestamp < cutoff {
                candidates.push(key);
            }
        }

        // records re-admitted since the scan carry a newer timestamp and stay
        let mut removed = 0;
        for key in candidates {
            let applied = self.store.conditional_batch_write(
                &key,
                &|current| current.and_then(stored_timestamp).is_some_and(|ts| ts < cutoff),
                vec![BatchOperation::delete(key.clone())],
            )?;
            if applied {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
