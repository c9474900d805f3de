//! Error types for apiref Core
//!
//! Every failure is local to one operation and leaves stored state as it
//! was:
//! - Upload parsing failures
//! - Duplicate-version rejections
//! - Missing items or revisions
//! - Forbidden revision operations
//! - Storage and settings failures

use crate::store::ContentItemId;
use apiref_parser::ParseError;
use apiref_revision::{RecordError, RevisionError, SequenceNumber, SpecVersion};
use std::path::PathBuf;

/// Main apiref error type
#[derive(Debug, thiserror::Error)]
pub enum ApiRefError {
    /// Uploaded document could not be read as a specification
    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),

    /// Duplicate-version policy refused the attachment
    #[error("version {version} is already used by revision {existing}")]
    DuplicateVersion {
        /// Rejected version
        version: SpecVersion,
        /// Revision already holding it
        existing: SequenceNumber,
    },

    /// No such content item
    #[error("content item {0} not found")]
    ItemNotFound(ContentItemId),

    /// No such revision on the item
    #[error("revision {sequence} of content item {item} not found")]
    RevisionNotFound {
        /// Item searched
        item: ContentItemId,
        /// Missing revision
        sequence: SequenceNumber,
    },

    /// Operation not allowed on this revision
    #[error("invalid operation on revision {sequence} of content item {item}: {reason}")]
    InvalidOperation {
        /// Item addressed
        item: ContentItemId,
        /// Revision addressed
        sequence: SequenceNumber,
        /// Why it was refused
        reason: &'static str,
    },

    /// Manual title or version missing
    #[error("invalid attachment: {0}")]
    InvalidAttachment(#[from] RecordError),

    /// Edit form incomplete for its selected mode
    #[error("invalid form: {0}")]
    Form(#[from] FormError),

    /// Store failure
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl ApiRefError {
    /// Map a revision-history error onto the item it happened on
    #[must_use]
    pub fn from_revision(item: ContentItemId, error: RevisionError) -> Self {
        match error {
            RevisionError::NotFound(sequence) => Self::RevisionNotFound { item, sequence },
            RevisionError::InvalidOperation { sequence, reason } => Self::InvalidOperation {
                item,
                sequence,
                reason,
            },
            RevisionError::PolicyRejected {
                version,
                duplicate_of,
            } => Self::DuplicateVersion {
                version,
                existing: duplicate_of,
            },
            RevisionError::Corrupt(reason) => Self::Storage(StoreError::Corrupt { item, reason }),
        }
    }

    /// Check if error is shown to the editor as a validation message
    #[inline]
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Parse(_) | Self::DuplicateVersion { .. } | Self::InvalidAttachment(_) | Self::Form(_)
        )
    }

    /// Check if error is retryable without changing the input
    ///
    /// Only a failed read of the upload file qualifies; the content itself
    /// was never looked at.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Parse(ParseError::Io { .. }))
    }

    /// Check if error names a missing item or revision
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ItemNotFound(_)
                | Self::RevisionNotFound { .. }
                | Self::Storage(StoreError::NotFound(_))
        )
    }

    /// Message for the editor
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Parse(ParseError::NoParserForExtension(ext)) if ext.is_empty() => {
                "Only files with the following extensions are allowed: yaml yml json.".to_string()
            }
            Self::Parse(ParseError::NoParserForExtension(ext)) => format!(
                "Files with the extension '{ext}' are not allowed. Allowed extensions: yaml yml json."
            ),
            Self::Parse(ParseError::TooLarge { filename, limit, .. }) => {
                format!("The file {filename} exceeds the maximum upload size of {limit} bytes.")
            }
            Self::Parse(err) => format!("The uploaded file is not a valid OpenAPI document: {err}"),
            Self::DuplicateVersion { version, existing } => format!(
                "Version {version} is already attached to this item (revision {existing}). \
                 Upload a document with a new version or allow version duplication."
            ),
            Self::InvalidAttachment(RecordError::EmptyTitle) | Self::Form(FormError::MissingField { field: "title" }) => {
                "Title field is required.".to_string()
            }
            Self::InvalidAttachment(RecordError::EmptyVersion) | Self::Form(FormError::MissingField { field: "version" }) => {
                "Version field is required.".to_string()
            }
            Self::InvalidAttachment(err) => format!("The attachment is invalid: {err}"),
            Self::Form(err) => format!("The form is incomplete: {err}"),
            Self::ItemNotFound(_) | Self::RevisionNotFound { .. } => format!("Not found: {self}"),
            Self::InvalidOperation { reason, .. } => format!("The operation was refused: {reason}."),
            Self::Storage(_) => "The content item could not be saved. Try again later.".to_string(),
        }
    }
}

/// Store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Item id unknown to the store
    #[error("content item {0} not stored")]
    NotFound(ContentItemId),

    /// Stored history violates its invariants
    #[error("content item {item} is corrupt: {reason}")]
    Corrupt {
        /// Affected item
        item: ContentItemId,
        /// First violation found
        reason: String,
    },
}

/// Settings file errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// File could not be read
    #[error("failed to read settings from {path}: {source}")]
    Read {
        /// Settings file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid settings TOML
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// Settings could not be encoded
    #[error("failed to encode settings: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Edit form errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// Manual mode field left blank
    #[error("{field} is required in manual mode")]
    MissingField {
        /// `title` or `version`
        field: &'static str,
    },

    /// Upload mode without a file
    #[error("no file selected for upload")]
    MissingUpload,
}

/// Result alias for controller operations
pub type ApiRefResult<T> = Result<T, ApiRefError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> ContentItemId {
        ContentItemId::new(7)
    }

    #[test]
    fn revision_errors_keep_their_meaning() {
        let seq = SequenceNumber::new(2);
        assert!(matches!(
            ApiRefError::from_revision(item(), RevisionError::NotFound(seq)),
            ApiRefError::RevisionNotFound { sequence, .. } if sequence == seq
        ));
        assert!(matches!(
            ApiRefError::from_revision(item(), RevisionError::current_revision(seq)),
            ApiRefError::InvalidOperation { .. }
        ));
        assert!(matches!(
            ApiRefError::from_revision(item(), RevisionError::Corrupt("x".into())),
            ApiRefError::Storage(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn classification() {
        let duplicate = ApiRefError::DuplicateVersion {
            version: SpecVersion::new("1.0.0").unwrap(),
            existing: SequenceNumber::new(1),
        };
        assert!(duplicate.is_user_facing());
        assert!(!duplicate.is_retryable());

        let unreadable = ApiRefError::Parse(ParseError::io_error(
            "/uploads/petstore.yaml",
            std::io::Error::new(std::io::ErrorKind::Interrupted, "interrupted"),
        ));
        assert!(unreadable.is_retryable());

        let corrupt = ApiRefError::Storage(StoreError::Corrupt {
            item: item(),
            reason: "no current revision".into(),
        });
        assert!(!corrupt.is_retryable());
        assert!(!corrupt.is_user_facing());

        assert!(ApiRefError::ItemNotFound(item()).is_not_found());
    }

    #[test]
    fn duplicate_message_names_version_and_revision() {
        let err = ApiRefError::DuplicateVersion {
            version: SpecVersion::new("1.0.0").unwrap(),
            existing: SequenceNumber::new(1),
        };
        let message = err.user_message();
        assert!(message.contains("Version 1.0.0"));
        assert!(message.contains("revision 1"));
    }

    #[test]
    fn required_field_messages() {
        assert_eq!(
            ApiRefError::InvalidAttachment(RecordError::EmptyVersion).user_message(),
            "Version field is required."
        );
        assert_eq!(
            ApiRefError::Form(FormError::MissingField { field: "title" }).user_message(),
            "Title field is required."
        );
    }

    #[test]
    fn unsupported_extension_message() {
        let err = ApiRefError::Parse(ParseError::NoParserForExtension("txt".into()));
        assert!(err.user_message().contains("'txt'"));
    }
}
