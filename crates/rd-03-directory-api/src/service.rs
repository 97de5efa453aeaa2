//! Directory service - composes validation, admission and sibling listing.

use crate::domain::error::DirectoryError;
use rd_01_entry_validation::{Entry, EntryValidator, SiblingEntry, TimeSource};
use rd_02_record_store::{EntryRepository, RecordStore};
use std::sync::Arc;
use tracing::{debug, warn};

/// One request flow: validate, admit, then list the other members.
pub struct DirectoryService<R: EntryRepository> {
    validator: EntryValidator,
    store: Arc<RecordStore<R>>,
    clock: Arc<dyn TimeSource>,
}

impl<R: EntryRepository> DirectoryService<R> {
    pub fn new(
        validator: EntryValidator,
        store: Arc<RecordStore<R>>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            validator,
            store,
            clock,
        }
    }

    pub fn store(&self) -> &Arc<RecordStore<R>> {
        &self.store
    }

    /// Submit an entry; on success returns its siblings under the same
    /// authority.
    pub async fn submit(&self, entry: Entry) -> Result<Vec<SiblingEntry>, DirectoryError> {
        let now = self.clock.now_millis();
        self.validator.validate(&entry, now).await?;

        self.store.admit(&entry).await?;

        let siblings = self
            .store
            .list_siblings(&entry.authority_key, &entry.member.key)
            .await
            .map_err(|e| {
                warn!(error = %e, "Sibling listing failed after admission");
                DirectoryError::QueryFailed(e)
            })?;

        debug!(
            member_key = %entry.member.key,
            siblings = siblings.len(),
            "Submission complete"
        );
        Ok(siblings)
    }
}
