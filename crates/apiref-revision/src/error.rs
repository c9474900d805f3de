//! Error types for records and revision history

use crate::log::SequenceNumber;
use crate::record::SpecVersion;

/// Invalid attachment data
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// Title missing or blank
    #[error("title must not be empty")]
    EmptyTitle,

    /// Version missing or blank
    #[error("version must not be empty")]
    EmptyVersion,

    /// Uploaded attachment without a filename
    #[error("uploaded attachment needs a filename")]
    EmptyFilename,
}

/// Errors from revision history operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RevisionError {
    /// No revision with this sequence number
    #[error("revision {0} not found")]
    NotFound(SequenceNumber),

    /// Operation not allowed on this revision
    #[error("invalid operation on revision {sequence}: {reason}")]
    InvalidOperation {
        sequence: SequenceNumber,
        reason: &'static str,
    },

    /// Duplicate-version policy refused the candidate
    #[error("version {version} is already used by revision {duplicate_of}")]
    PolicyRejected {
        version: SpecVersion,
        duplicate_of: SequenceNumber,
    },

    /// Stored history violates its invariants
    #[error("revision history is corrupt: {0}")]
    Corrupt(String),
}

impl RevisionError {
    /// Refusal to delete the revision currently displayed
    #[inline]
    #[must_use]
    pub fn current_revision(sequence: SequenceNumber) -> Self {
        Self::InvalidOperation {
            sequence,
            reason: "the current revision cannot be deleted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        assert_eq!(
            RevisionError::NotFound(SequenceNumber::new(2)).to_string(),
            "revision 2 not found"
        );
    }

    #[test]
    fn policy_rejected_display() {
        let err = RevisionError::PolicyRejected {
            version: SpecVersion::new("1.0.0").unwrap(),
            duplicate_of: SequenceNumber::new(1),
        };
        assert_eq!(err.to_string(), "version 1.0.0 is already used by revision 1");
    }

    #[test]
    fn current_revision_helper() {
        let err = RevisionError::current_revision(SequenceNumber::new(3));
        assert!(err.to_string().contains("cannot be deleted"));
    }
}
