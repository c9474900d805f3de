//! Attachment records
//!
//! One record is the specification attached to a content item at one
//! revision: either typed in by hand or extracted from an uploaded file.

use crate::error::RecordError;
use apiref_artifact::types::SpecFormat;
use apiref_artifact::ContentHash;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty version string, compared verbatim
///
/// No semantic-version parsing: `"0.1"`, `"1.0.0"` and `"2024-01"` are all
/// valid and only equal to themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SpecVersion(String);

impl SpecVersion {
    /// Wrap a version string as given
    ///
    /// # Errors
    /// Returns [`RecordError::EmptyVersion`] for blank input
    pub fn new(version: impl Into<String>) -> Result<Self, RecordError> {
        let version = version.into();
        if version.trim().is_empty() {
            return Err(RecordError::EmptyVersion);
        }
        Ok(Self(version))
    }

    /// Version text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SpecVersion {
    type Error = RecordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SpecVersion> for String {
    fn from(value: SpecVersion) -> Self {
        value.0
    }
}

impl PartialEq<str> for SpecVersion {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SpecVersion {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Where a record's title and version came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AttachmentOrigin {
    /// Entered on the form in manual mode
    Manual,
    /// Extracted from an uploaded document
    Uploaded {
        /// Name the file was uploaded under
        filename: String,
        /// Hash of the uploaded bytes
        checksum: ContentHash,
        /// Detected dialect
        format: SpecFormat,
    },
}

/// Specification attached to one revision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRecord {
    title: String,
    version: SpecVersion,
    origin: AttachmentOrigin,
}

impl AttachmentRecord {
    /// Record entered in manual mode
    ///
    /// # Errors
    /// Returns [`RecordError`] if title or version is blank
    pub fn manual(title: impl Into<String>, version: impl Into<String>) -> Result<Self, RecordError> {
        Ok(Self {
            title: non_empty_title(title.into())?,
            version: SpecVersion::new(version)?,
            origin: AttachmentOrigin::Manual,
        })
    }

    /// Record extracted from an uploaded document
    ///
    /// # Errors
    /// Returns [`RecordError`] if filename, title or version is blank
    pub fn uploaded(
        filename: impl Into<String>,
        title: impl Into<String>,
        version: impl Into<String>,
        checksum: ContentHash,
        format: SpecFormat,
    ) -> Result<Self, RecordError> {
        let filename = filename.into();
        if filename.trim().is_empty() {
            return Err(RecordError::EmptyFilename);
        }
        Ok(Self {
            title: non_empty_title(title.into())?,
            version: SpecVersion::new(version)?,
            origin: AttachmentOrigin::Uploaded {
                filename,
                checksum,
                format,
            },
        })
    }

    /// Title shown for the content item
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Version string
    #[inline]
    #[must_use]
    pub fn version(&self) -> &SpecVersion {
        &self.version
    }

    /// Provenance
    #[inline]
    #[must_use]
    pub fn origin(&self) -> &AttachmentOrigin {
        &self.origin
    }

    /// Uploaded filename, `None` for manual records
    #[must_use]
    pub fn source_filename(&self) -> Option<&str> {
        match &self.origin {
            AttachmentOrigin::Uploaded { filename, .. } => Some(filename),
            AttachmentOrigin::Manual => None,
        }
    }

    /// True for records entered in manual mode
    #[inline]
    #[must_use]
    pub fn is_manual(&self) -> bool {
        matches!(self.origin, AttachmentOrigin::Manual)
    }
}

fn non_empty_title(title: String) -> Result<String, RecordError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        Err(RecordError::EmptyTitle)
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_compare_verbatim() {
        let a = SpecVersion::new("1.0").unwrap();
        let b = SpecVersion::new("1.0.0").unwrap();
        assert_ne!(a, b);
        assert_ne!(SpecVersion::new("1.0.0 ").unwrap(), SpecVersion::new("1.0.0").unwrap());
        assert_eq!(SpecVersion::new(" 0.1 ").unwrap(), " 0.1 ");
    }

    #[test]
    fn blank_version_rejected() {
        assert_eq!(SpecVersion::new("   "), Err(RecordError::EmptyVersion));
        assert_eq!(
            AttachmentRecord::manual("Title", ""),
            Err(RecordError::EmptyVersion)
        );
    }

    #[test]
    fn manual_record_has_no_filename() {
        let record = AttachmentRecord::manual("Pets", "0.1").unwrap();
        assert!(record.is_manual());
        assert_eq!(record.source_filename(), None);
        assert_eq!(record.title(), "Pets");
    }

    #[test]
    fn uploaded_record_keeps_filename() {
        let record = AttachmentRecord::uploaded(
            "petstore-openapi.yaml",
            "Swagger Petstore",
            "1.0.0",
            ContentHash::compute(b"petstore"),
            SpecFormat::OpenApi3("3.0.0".to_string()),
        )
        .unwrap();
        assert!(!record.is_manual());
        assert_eq!(record.source_filename(), Some("petstore-openapi.yaml"));
        assert_eq!(record.version(), &"1.0.0");
    }

    #[test]
    fn uploaded_record_needs_filename() {
        let result = AttachmentRecord::uploaded(
            "",
            "Swagger Petstore",
            "1.0.0",
            ContentHash::compute(b"x"),
            SpecFormat::Swagger2,
        );
        assert_eq!(result, Err(RecordError::EmptyFilename));
    }

    #[test]
    fn version_deserialization_rejects_blank() {
        let result: Result<SpecVersion, _> = serde_json::from_str("\"  \"");
        assert!(result.is_err());
    }
}
