//! # Record Store Service
//!
//! Application service over the `EntryRepository` port.
//!
//! ## Operations
//!
//! - `admit`: last-writer-wins conditional replace
//! - `list_siblings`: other live records under one authority
//! - `purge_expired`: delete records older than a supplied cutoff
//!
//! The store holds no in-process locks; mutual exclusion for the
//! one-record-per-pair invariant comes from the repository's conditional
//! replace, which re-checks the timestamp inside the write.

mod sweeper;

pub use sweeper::{ExpirySweeper, SweeperConfig};

use crate::domain::errors::{AdmitError, StoreError};
use crate::ports::outbound::{EntryRepository, ReplaceOutcome};
use rd_01_entry_validation::{Entry, SiblingEntry, TimestampMs};
use tracing::{debug, info, warn};

/// Authoritative set of live records.
pub struct RecordStore<R: EntryRepository> {
    repository: R,
}

impl<R: EntryRepository> RecordStore<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Admit an already-validated entry.
    ///
    /// Rejected with [`AdmitError::NewerEntryExists`] when the live record
    /// for the pair has a strictly newer body timestamp; the store is left
    /// untouched. Otherwise the prior record (if any) is replaced in one
    /// atomic unit.
    pub async fn admit(&self, entry: &Entry) -> Result<(), AdmitError> {
        let key = entry.key();

        let newer = self
            .repository
            .newer_exists(&key, entry.body.timestamp)
            .await
            .inspect_err(|e| warn!(error = %e, "Newer-entry check failed"))?;
        if newer {
            debug!(
                member_key = %key.member_key,
                timestamp = entry.body.timestamp,
                "Newer entry already exists"
            );
            return Err(AdmitError::NewerEntryExists);
        }

        let outcome = self
            .repository
            .replace(entry)
            .await
            .inspect_err(|e| warn!(error = %e, member_key = %key.member_key, "Replace failed"))?;
        if outcome == ReplaceOutcome::NewerEntryExists {
            debug!(
                member_key = %key.member_key,
                timestamp = entry.body.timestamp,
                "Newer entry admitted concurrently"
            );
            return Err(AdmitError::NewerEntryExists);
        }

        info!(
            member_key = %key.member_key,
            timestamp = entry.body.timestamp,
            "Entry admitted"
        );
        Ok(())
    }

    /// Live records under `authority_key` other than `exclude_member_key`,
    /// ordered by member key.
    pub async fn list_siblings(
        &self,
        authority_key: &str,
        exclude_member_key: &str,
    ) -> Result<Vec<SiblingEntry>, StoreError> {
        let mut entries = self
            .repository
            .list_by_authority_excluding(authority_key, exclude_member_key)
            .await
            .inspect_err(|e| warn!(error = %e, "Sibling query failed"))?;

        entries.sort_by(|a, b| a.member.key.cmp(&b.member.key));
        Ok(entries.into_iter().map(Entry::into_sibling).collect())
    }

    /// Delete every record whose body timestamp is below `cutoff`.
    ///
    /// Idempotent. A record re-admitted while the sweep runs carries a
    /// later timestamp and is never removed by this call. Admissions for
    /// other pairs are not held up by a sweep.
    pub async fn purge_expired(&self, cutoff: TimestampMs) -> Result<usize, StoreError> {
        let removed = self.repository.delete_older_than(cutoff).await?;
        debug!(cutoff = cutoff, removed = removed, "Purged expired entries");
        Ok(removed)
    }
}
