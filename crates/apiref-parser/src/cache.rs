//! Parse cache using moka
//!
//! Extraction results keyed by the upload's content hash and extension.
//! Re-uploading byte-identical content skips parsing and yields the same
//! metadata.

use crate::extractor::ExtractedMetadata;
use apiref_artifact::ContentHash;
use moka::sync::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Cache lookup counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that required parsing
    pub misses: u64,
    /// Entries currently held (approximate)
    pub entry_count: u64,
}

/// Key: upload bytes hash plus the extension that selected the parser
pub type CacheKey = (ContentHash, String);

/// Bounded cache of successful extractions
///
/// Failures are never cached, so a corrected parser registry takes effect
/// on the next upload.
#[derive(Debug, Clone)]
pub struct ParseCache {
    inner: Cache<CacheKey, ExtractedMetadata>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl ParseCache {
    /// Create cache holding at most `max_capacity` entries
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Look up a previous extraction
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<ExtractedMetadata> {
        let found = self.inner.get(key);
        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// Remember an extraction
    #[inline]
    pub fn insert(&self, key: CacheKey, metadata: ExtractedMetadata) {
        self.inner.insert(key, metadata);
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.inner.invalidate_all();
        self.inner.run_pending_tasks();
    }

    /// Current counters
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.inner.run_pending_tasks();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entry_count: self.inner.entry_count(),
        }
    }
}

impl Default for ParseCache {
    fn default() -> Self {
        Self::new(256)
    }
}
