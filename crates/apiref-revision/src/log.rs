//! Revision history of one content item
//!
//! An ordered list of [`RevisionEntry`] plus a pointer to the current one.
//!
//! # Invariants
//! - Sequence numbers strictly increase and are never reused, even after the
//!   newest entry is deleted
//! - Once the first entry is appended the log is never empty and the current
//!   pointer always names a retained entry
//! - Revert moves the pointer only; it neither adds nor removes entries

use crate::error::RevisionError;
use crate::policy::{DuplicationPolicy, PolicyDecision};
use crate::record::{AttachmentRecord, SpecVersion};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Revision number within one content item, starting at 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceNumber(u64);

impl SequenceNumber {
    /// Wrap a raw number
    #[inline]
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw number
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One addressable state of a content item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionEntry {
    sequence: SequenceNumber,
    attachment: AttachmentRecord,
    created_at: DateTime<Utc>,
}

impl RevisionEntry {
    /// Sequence number
    #[inline]
    #[must_use]
    pub fn sequence(&self) -> SequenceNumber {
        self.sequence
    }

    /// Attachment recorded by this revision
    #[inline]
    #[must_use]
    pub fn attachment(&self) -> &AttachmentRecord {
        &self.attachment
    }

    /// Creation time
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Revision history with a current pointer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionLog {
    entries: Vec<RevisionEntry>,
    current: Option<SequenceNumber>,
    /// Highest sequence number ever issued
    high_water: u64,
}

impl RevisionLog {
    /// Empty history
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a revision unconditionally and make it current
    pub fn append(&mut self, attachment: AttachmentRecord) -> &RevisionEntry {
        self.append_at(attachment, Utc::now())
    }

    /// Append with an explicit timestamp
    pub fn append_at(
        &mut self,
        attachment: AttachmentRecord,
        created_at: DateTime<Utc>,
    ) -> &RevisionEntry {
        self.high_water += 1;
        let sequence = SequenceNumber(self.high_water);
        tracing::trace!(%sequence, version = %attachment.version(), "revision appended");
        self.entries.push(RevisionEntry {
            sequence,
            attachment,
            created_at,
        });
        self.current = Some(sequence);
        &self.entries[self.entries.len() - 1]
    }

    /// Append after consulting the duplicate-version policy
    ///
    /// # Errors
    /// Returns [`RevisionError::PolicyRejected`] and leaves the log untouched
    /// when the policy refuses the candidate's version
    pub fn try_append(
        &mut self,
        attachment: AttachmentRecord,
        policy: &DuplicationPolicy,
    ) -> Result<&RevisionEntry, RevisionError> {
        match policy.evaluate(&self.entries, attachment.version()) {
            PolicyDecision::Accept => Ok(self.append(attachment)),
            PolicyDecision::Reject {
                version,
                duplicate_of,
            } => Err(RevisionError::PolicyRejected {
                version,
                duplicate_of,
            }),
        }
    }

    /// Make an existing revision current
    ///
    /// # Errors
    /// Returns [`RevisionError::NotFound`] if no such revision is retained
    pub fn revert_to(&mut self, sequence: SequenceNumber) -> Result<&RevisionEntry, RevisionError> {
        let index = self.index_of(sequence)?;
        self.current = Some(sequence);
        Ok(&self.entries[index])
    }

    /// Remove a non-current revision permanently
    ///
    /// # Errors
    /// - [`RevisionError::NotFound`] if no such revision is retained
    /// - [`RevisionError::InvalidOperation`] if it is the current revision
    pub fn delete_revision(&mut self, sequence: SequenceNumber) -> Result<RevisionEntry, RevisionError> {
        let index = self.index_of(sequence)?;
        if self.current == Some(sequence) {
            return Err(RevisionError::current_revision(sequence));
        }
        Ok(self.entries.remove(index))
    }

    /// Current revision, `None` only before the first append
    #[must_use]
    pub fn current(&self) -> Option<&RevisionEntry> {
        self.current.and_then(|seq| self.get(seq))
    }

    /// Sequence number of the current revision
    #[inline]
    #[must_use]
    pub fn current_sequence(&self) -> Option<SequenceNumber> {
        self.current
    }

    /// Look up a retained revision
    #[must_use]
    pub fn get(&self, sequence: SequenceNumber) -> Option<&RevisionEntry> {
        self.index_of(sequence).ok().map(|i| &self.entries[i])
    }

    /// Retained revisions, oldest first
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[RevisionEntry] {
        &self.entries
    }

    /// Versions of all retained revisions, oldest first
    pub fn versions(&self) -> impl Iterator<Item = &SpecVersion> {
        self.entries.iter().map(|e| e.attachment.version())
    }

    /// Number of retained revisions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True before the first append
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check invariants of a log loaded from storage
    ///
    /// # Errors
    /// Returns [`RevisionError::Corrupt`] describing the first violation
    pub fn verify_integrity(&self) -> Result<(), RevisionError> {
        let mut previous = 0;
        for entry in &self.entries {
            if entry.sequence.0 <= previous {
                return Err(RevisionError::Corrupt(format!(
                    "sequence {} does not increase after {previous}",
                    entry.sequence
                )));
            }
            previous = entry.sequence.0;
        }
        if previous > self.high_water {
            return Err(RevisionError::Corrupt(format!(
                "sequence {previous} exceeds issued maximum {}",
                self.high_water
            )));
        }
        match (self.current, self.entries.is_empty()) {
            (None, true) => Ok(()),
            (Some(seq), false) if self.get(seq).is_some() => Ok(()),
            (Some(seq), _) => Err(RevisionError::Corrupt(format!(
                "current revision {seq} is not retained"
            ))),
            (None, false) => Err(RevisionError::Corrupt(
                "entries present but no current revision".to_string(),
            )),
        }
    }

    fn index_of(&self, sequence: SequenceNumber) -> Result<usize, RevisionError> {
        self.entries
            .binary_search_by_key(&sequence, |e| e.sequence)
            .map_err(|_| RevisionError::NotFound(sequence))
    }
}
