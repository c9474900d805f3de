//! Content item storage
//!
//! The controller only needs create / load / update / list. [`InMemoryStore`]
//! keeps items in a [`DashMap`]; other backends implement [`ContentStore`].

use crate::error::StoreError;
use apiref_revision::RevisionLog;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Content item identifier, assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentItemId(u64);

impl ContentItemId {
    /// Wrap a raw id
    #[inline]
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw id
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContentItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A content item and its attachment history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    id: ContentItemId,
    revisions: RevisionLog,
}

impl ContentItem {
    /// Item with an existing history
    #[must_use]
    pub fn new(id: ContentItemId, revisions: RevisionLog) -> Self {
        Self { id, revisions }
    }

    /// Identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> ContentItemId {
        self.id
    }

    /// Attachment history
    #[inline]
    #[must_use]
    pub fn revisions(&self) -> &RevisionLog {
        &self.revisions
    }

    #[inline]
    pub(crate) fn revisions_mut(&mut self) -> &mut RevisionLog {
        &mut self.revisions
    }
}

/// Persistence for content items
///
/// # Contract
/// - `update` returns only after the item is durably stored
/// - `load` returns what the last successful `create`/`update` stored
pub trait ContentStore: Send + Sync {
    /// Store a new item and assign its id
    ///
    /// # Errors
    /// Returns [`StoreError`] if the backend cannot store the item
    fn create(&self, revisions: RevisionLog) -> Result<ContentItem, StoreError>;

    /// Load an item
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] for unknown ids
    fn load(&self, id: ContentItemId) -> Result<ContentItem, StoreError>;

    /// Replace a stored item
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the item was never created
    fn update(&self, item: &ContentItem) -> Result<(), StoreError>;

    /// Ids of all stored items, ascending
    ///
    /// # Errors
    /// Returns [`StoreError`] if the backend cannot be listed
    fn list(&self) -> Result<Vec<ContentItemId>, StoreError>;
}

/// Process-local store
#[derive(Debug)]
pub struct InMemoryStore {
    items: DashMap<ContentItemId, ContentItem>,
    next_id: AtomicU64,
}

impl InMemoryStore {
    /// Empty store; ids start at 1
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of stored items
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if nothing is stored
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStore for InMemoryStore {
    fn create(&self, revisions: RevisionLog) -> Result<ContentItem, StoreError> {
        let id = ContentItemId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let item = ContentItem::new(id, revisions);
        self.items.insert(id, item.clone());
        Ok(item)
    }

    fn load(&self, id: ContentItemId) -> Result<ContentItem, StoreError> {
        self.items
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(StoreError::NotFound(id))
    }

    fn update(&self, item: &ContentItem) -> Result<(), StoreError> {
        match self.items.get_mut(&item.id) {
            Some(mut stored) => {
                *stored = item.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(item.id)),
        }
    }

    fn list(&self) -> Result<Vec<ContentItemId>, StoreError> {
        let mut ids: Vec<ContentItemId> = self.items.iter().map(|entry| *entry.key()).collect();
        ids.sort_unstable();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apiref_revision::AttachmentRecord;

    fn log(version: &str) -> RevisionLog {
        let mut log = RevisionLog::new();
        log.append(AttachmentRecord::manual("Pets", version).unwrap());
        log
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let store = InMemoryStore::new();
        let a = store.create(log("1")).unwrap();
        let b = store.create(log("2")).unwrap();
        assert_eq!(a.id(), ContentItemId::new(1));
        assert_eq!(b.id(), ContentItemId::new(2));
        assert_eq!(store.list().unwrap(), vec![a.id(), b.id()]);
    }

    #[test]
    fn update_replaces_history() {
        let store = InMemoryStore::new();
        let mut item = store.create(log("1")).unwrap();
        item.revisions_mut()
            .append(AttachmentRecord::manual("Pets", "2").unwrap());
        store.update(&item).unwrap();
        assert_eq!(store.load(item.id()).unwrap().revisions().len(), 2);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let store = InMemoryStore::new();
        let ghost = ContentItem::new(ContentItemId::new(9), log("1"));
        assert!(matches!(store.load(ghost.id()), Err(StoreError::NotFound(_))));
        assert!(matches!(store.update(&ghost), Err(StoreError::NotFound(_))));
        assert!(store.is_empty());
    }
}
