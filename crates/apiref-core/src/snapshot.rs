//! Post-operation view of a content item

use crate::error::StoreError;
use crate::store::{ContentItem, ContentItemId};
use apiref_revision::{AttachmentRecord, RevisionEntry, SequenceNumber, SpecVersion};
use serde::Serialize;

/// State of one content item right after an operation
///
/// Owned copy; later operations do not change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSnapshot {
    id: ContentItemId,
    current: RevisionEntry,
    revisions: Vec<RevisionEntry>,
}

impl ItemSnapshot {
    /// Capture an item
    ///
    /// # Errors
    /// Returns [`StoreError::Corrupt`] if the item has no current revision
    pub fn capture(item: &ContentItem) -> Result<Self, StoreError> {
        let current = item
            .revisions()
            .current()
            .ok_or_else(|| StoreError::Corrupt {
                item: item.id(),
                reason: "no current revision".to_string(),
            })?
            .clone();
        Ok(Self {
            id: item.id(),
            current,
            revisions: item.revisions().entries().to_vec(),
        })
    }

    /// Item id
    #[inline]
    #[must_use]
    pub fn id(&self) -> ContentItemId {
        self.id
    }

    /// Sequence number of the current revision
    #[inline]
    #[must_use]
    pub fn current_sequence(&self) -> SequenceNumber {
        self.current.sequence()
    }

    /// Current revision
    #[inline]
    #[must_use]
    pub fn current(&self) -> &RevisionEntry {
        &self.current
    }

    /// Current attachment
    #[inline]
    #[must_use]
    pub fn attachment(&self) -> &AttachmentRecord {
        self.current().attachment()
    }

    /// Current title
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        self.attachment().title()
    }

    /// Current version
    #[inline]
    #[must_use]
    pub fn version(&self) -> &SpecVersion {
        self.attachment().version()
    }

    /// Retained revisions, oldest first
    #[inline]
    #[must_use]
    pub fn revisions(&self) -> &[RevisionEntry] {
        &self.revisions
    }

    /// Number of retained revisions
    #[inline]
    #[must_use]
    pub fn revision_count(&self) -> usize {
        self.revisions.len()
    }

    /// Look up a retained revision
    #[must_use]
    pub fn revision(&self, sequence: SequenceNumber) -> Option<&RevisionEntry> {
        self.revisions.iter().find(|entry| entry.sequence() == sequence)
    }

    /// `(filename, version)` of every retained uploaded revision, oldest first
    pub fn uploaded_attachments(&self) -> impl Iterator<Item = (&str, &SpecVersion)> {
        self.revisions.iter().filter_map(|entry| {
            entry
                .attachment()
                .source_filename()
                .map(|name| (name, entry.attachment().version()))
        })
    }
}
