//! Upload Artifact Kind
//!
//! Raw bytes of an attached file. The hash covers the bytes only, so a file
//! uploaded twice under different names is recognised as the same content.

use crate::artifact::{private, ArtifactError, ArtifactKind};
use crate::hash::ContentHash;
use std::path::Path;

/// Upload artifact marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadArtifact;

impl private::Sealed for UploadArtifact {}

impl ArtifactKind for UploadArtifact {
    type Content = UploadContent;

    const KIND_ID: &'static str = "upload";

    #[inline]
    fn hash(content: &Self::Content) -> ContentHash {
        ContentHash::compute(&content.bytes)
    }

    fn validate_content(content: &Self::Content) -> Result<(), ArtifactError> {
        if content.filename.trim().is_empty() {
            return Err(ArtifactError::InvariantViolation(
                "upload filename must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// An uploaded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadContent {
    filename: String,
    bytes: Vec<u8>,
}

impl UploadContent {
    /// Create from filename and raw bytes
    #[inline]
    #[must_use]
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Name the file was uploaded under
    #[inline]
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Lowercased extension, if the filename has one
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
    }

    /// Raw bytes
    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bytes as UTF-8 text
    ///
    /// # Errors
    /// Returns error if the bytes are not valid UTF-8
    #[inline]
    pub fn text(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.bytes)
    }

    /// Size in bytes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True for a zero-byte upload
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Artifact;

    #[test]
    fn same_bytes_different_name_share_hash() {
        let a = Artifact::<UploadArtifact>::new(UploadContent::new("a.yaml", b"x: 1".to_vec()))
            .unwrap();
        let b = Artifact::<UploadArtifact>::new(UploadContent::new("b.yml", b"x: 1".to_vec()))
            .unwrap();
        assert_eq!(a.hash(), b.hash());
    }

    #[test]
    fn extension_is_lowercased() {
        let content = UploadContent::new("Petstore.YAML", Vec::new());
        assert_eq!(content.extension().as_deref(), Some("yaml"));
        assert!(content.is_empty());

        let bare = UploadContent::new("README", Vec::new());
        assert_eq!(bare.extension(), None);
    }

    #[test]
    fn text_rejects_invalid_utf8() {
        let content = UploadContent::new("bin.json", vec![0xff, 0xfe]);
        assert!(content.text().is_err());
        assert_eq!(content.len(), 2);
    }

    #[test]
    fn blank_filename_is_invalid() {
        let result = Artifact::<UploadArtifact>::new(UploadContent::new("  ", b"{}".to_vec()));
        assert!(result.is_err());
    }
}
