//! Content item controller
//!
//! Orchestrates every editor-facing operation on a content item:
//!
//! ```text
//! AttachmentSource ─▶ VersionExtractor ─▶ AttachmentRecord
//!                                              │
//!              PolicyConfig (read now) ─▶ DuplicationPolicy ─▶ RevisionLog ─▶ ContentStore
//! ```
//!
//! Operations on one item run under that item's lock for the whole
//! load → mutate → persist sequence. A failed operation stores nothing.

use crate::config::{Settings, SettingsHandle};
use crate::error::{ApiRefError, ApiRefResult, StoreError};
use crate::form::{AttachmentSource, EditForm};
use crate::snapshot::ItemSnapshot;
use crate::store::{ContentItem, ContentItemId, ContentStore, InMemoryStore};
use apiref_artifact::types::UploadContent;
use apiref_parser::VersionExtractor;
use apiref_revision::{
    AttachmentRecord, DuplicationPolicy, RevisionEntry, RevisionError, RevisionLog, SequenceNumber,
};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;

/// Orchestrator for content item operations
#[derive(Debug)]
pub struct ContentItemController<S: ContentStore = InMemoryStore> {
    store: S,
    extractor: VersionExtractor,
    settings: SettingsHandle,
    locks: DashMap<ContentItemId, Arc<Mutex<()>>>,
}

impl ContentItemController<InMemoryStore> {
    /// Controller over a fresh in-memory store
    #[must_use]
    pub fn in_memory(settings: &Settings) -> Self {
        Self::new(
            InMemoryStore::new(),
            VersionExtractor::new(settings.parser.clone()),
            SettingsHandle::from(settings),
        )
    }
}

impl<S: ContentStore> ContentItemController<S> {
    /// Create controller
    #[must_use]
    pub fn new(store: S, extractor: VersionExtractor, settings: SettingsHandle) -> Self {
        Self {
            store,
            extractor,
            settings,
            locks: DashMap::new(),
        }
    }

    /// Shared policy settings
    #[inline]
    #[must_use]
    pub fn settings(&self) -> &SettingsHandle {
        &self.settings
    }

    /// Extractor used for uploads
    #[inline]
    #[must_use]
    pub fn extractor(&self) -> &VersionExtractor {
        &self.extractor
    }

    /// Backing store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create an item from its first attachment
    ///
    /// # Errors
    /// Returns [`ApiRefError`] if the attachment is invalid or the store
    /// fails; no item is created then
    pub fn create(&self, source: AttachmentSource) -> ApiRefResult<ItemSnapshot> {
        let candidate = self.candidate(source)?;
        let version = candidate.version().clone();

        let mut revisions = RevisionLog::new();
        revisions.append(candidate);
        let item = self.store.create(revisions)?;

        tracing::info!(item = %item.id(), revision = 1, %version, "content item created");
        Ok(ItemSnapshot::capture(&item)?)
    }

    /// Save a new attachment on an existing item
    ///
    /// # Errors
    /// - [`ApiRefError::Parse`] if the upload is not a specification document
    /// - [`ApiRefError::InvalidAttachment`] for a blank manual title or version
    /// - [`ApiRefError::DuplicateVersion`] if the policy rejects the version
    /// - [`ApiRefError::ItemNotFound`] for an unknown item
    pub fn save(&self, id: ContentItemId, source: AttachmentSource) -> ApiRefResult<ItemSnapshot> {
        let candidate = self.candidate(source)?;

        let lock = self.item_lock(id)?;
        let _guard = lock.lock();
        let mut item = self.load(id)?;

        let policy = DuplicationPolicy::new(self.settings.policy());
        let (sequence, version) = match item.revisions_mut().try_append(candidate, &policy) {
            Ok(entry) => (entry.sequence(), entry.attachment().version().clone()),
            Err(RevisionError::PolicyRejected {
                version,
                duplicate_of,
            }) => {
                tracing::warn!(
                    item = %id,
                    %version,
                    duplicate_of = %duplicate_of,
                    policy = policy.name(),
                    "attachment rejected"
                );
                return Err(ApiRefError::DuplicateVersion {
                    version,
                    existing: duplicate_of,
                });
            }
            Err(other) => return Err(ApiRefError::from_revision(id, other)),
        };

        self.store.update(&item)?;
        tracing::info!(
            item = %id,
            revision = %sequence,
            %version,
            policy = policy.name(),
            "attachment saved"
        );
        Ok(ItemSnapshot::capture(&item)?)
    }

    /// Make an earlier revision current
    ///
    /// # Errors
    /// Returns [`ApiRefError::RevisionNotFound`] if the revision is not retained
    pub fn revert(&self, id: ContentItemId, sequence: SequenceNumber) -> ApiRefResult<ItemSnapshot> {
        let snapshot = self.mutate(id, |revisions| revisions.revert_to(sequence).map(|_| ()))?;
        tracing::info!(item = %id, revision = %sequence, "reverted");
        Ok(snapshot)
    }

    /// Delete a non-current revision permanently
    ///
    /// # Errors
    /// - [`ApiRefError::RevisionNotFound`] if the revision is not retained
    /// - [`ApiRefError::InvalidOperation`] if it is the current revision
    pub fn delete_revision(
        &self,
        id: ContentItemId,
        sequence: SequenceNumber,
    ) -> ApiRefResult<ItemSnapshot> {
        let snapshot = self.mutate(id, |revisions| revisions.delete_revision(sequence).map(|_| ()))?;
        tracing::info!(item = %id, revision = %sequence, "revision deleted");
        Ok(snapshot)
    }

    /// Current state of an item
    ///
    /// # Errors
    /// Returns [`ApiRefError::ItemNotFound`] for an unknown item
    pub fn view(&self, id: ContentItemId) -> ApiRefResult<ItemSnapshot> {
        let item = self.load(id)?;
        Ok(ItemSnapshot::capture(&item)?)
    }

    /// Retained revisions of an item, oldest first
    ///
    /// # Errors
    /// Returns [`ApiRefError::ItemNotFound`] for an unknown item
    pub fn revisions(&self, id: ContentItemId) -> ApiRefResult<Vec<RevisionEntry>> {
        Ok(self.load(id)?.revisions().entries().to_vec())
    }

    /// Ids of all items
    ///
    /// # Errors
    /// Returns [`ApiRefError::Storage`] if the store cannot be listed
    pub fn items(&self) -> ApiRefResult<Vec<ContentItemId>> {
        Ok(self.store.list()?)
    }

    /// Edit form prefilled with the item's current attachment
    ///
    /// # Errors
    /// Returns [`ApiRefError::ItemNotFound`] for an unknown item
    pub fn edit_form(&self, id: ContentItemId) -> ApiRefResult<EditForm> {
        Ok(EditForm::prefilled(self.view(id)?.attachment()))
    }

    /// Submit an edit form: creates an item when `id` is `None`
    ///
    /// # Errors
    /// Returns [`ApiRefError::Form`] for an incomplete form, otherwise as
    /// [`Self::create`] / [`Self::save`]
    pub fn submit(&self, id: Option<ContentItemId>, form: EditForm) -> ApiRefResult<ItemSnapshot> {
        let source = form.into_source()?;
        match id {
            Some(id) => self.save(id, source),
            None => self.create(source),
        }
    }

    fn candidate(&self, source: AttachmentSource) -> ApiRefResult<AttachmentRecord> {
        match source {
            AttachmentSource::Manual { title, version } => {
                Ok(AttachmentRecord::manual(title, version)?)
            }
            AttachmentSource::Uploaded { filename, bytes } => {
                let upload = UploadContent::new(filename, bytes);
                let metadata = self.extractor.extract(&upload)?;
                Ok(AttachmentRecord::uploaded(
                    upload.filename(),
                    metadata.title,
                    metadata.version,
                    metadata.checksum,
                    metadata.format,
                )?)
            }
        }
    }

    /// Run a history mutation under the item lock and persist on success
    fn mutate<F>(&self, id: ContentItemId, op: F) -> ApiRefResult<ItemSnapshot>
    where
        F: FnOnce(&mut RevisionLog) -> Result<(), RevisionError>,
    {
        let lock = self.item_lock(id)?;
        let _guard = lock.lock();
        let mut item = self.load(id)?;

        if let Err(err) = op(item.revisions_mut()) {
            tracing::debug!(item = %id, error = %err, "revision operation refused");
            return Err(ApiRefError::from_revision(id, err));
        }
        self.store.update(&item)?;
        Ok(ItemSnapshot::capture(&item)?)
    }

    fn load(&self, id: ContentItemId) -> ApiRefResult<ContentItem> {
        let item = self.store.load(id).map_err(|err| match err {
            StoreError::NotFound(id) => ApiRefError::ItemNotFound(id),
            other => ApiRefError::Storage(other),
        })?;
        item.revisions()
            .verify_integrity()
            .map_err(|err| ApiRefError::from_revision(id, err))?;
        Ok(item)
    }

    /// Lock for an existing item; unknown ids never get an entry
    fn item_lock(&self, id: ContentItemId) -> ApiRefResult<Arc<Mutex<()>>> {
        if let Some(lock) = self.locks.get(&id) {
            return Ok(Arc::clone(lock.value()));
        }
        self.load(id)?;
        Ok(Arc::clone(self.locks.entry(id).or_default().value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_items_leave_no_lock_behind() {
        let controller = ContentItemController::in_memory(&Settings::default());
        let missing = ContentItemId::new(99);

        for _ in 0..3 {
            let err = controller
                .save(missing, AttachmentSource::manual("Pets", "0.1"))
                .unwrap_err();
            assert!(matches!(err, ApiRefError::ItemNotFound(id) if id == missing));
        }
        assert!(controller.revert(missing, SequenceNumber::new(1)).is_err());
        assert!(controller.delete_revision(missing, SequenceNumber::new(1)).is_err());
        assert!(controller.locks.is_empty());
    }

    #[test]
    fn existing_item_reuses_its_lock() {
        let controller = ContentItemController::in_memory(&Settings::default());
        let id = controller
            .create(AttachmentSource::manual("Pets", "0.1"))
            .unwrap()
            .id();

        let first = controller.item_lock(id).unwrap();
        let second = controller.item_lock(id).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(controller.locks.len(), 1);
    }
}
