//! Spec Document Artifact Kind
//!
//! An OpenAPI 3.x or Swagger 2.0 document reduced to what the rest of the
//! system needs: its format, `info.title`, `info.version` and the parsed tree.

use crate::artifact::{private, ArtifactError, ArtifactKind};
use crate::hash::ContentHash;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Spec document artifact marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecDocumentArtifact;

impl private::Sealed for SpecDocumentArtifact {}

impl ArtifactKind for SpecDocumentArtifact {
    type Content = SpecDocument;

    const KIND_ID: &'static str = "spec_document";

    /// Hash of the compact JSON form of the tree. Map keys are sorted, so a
    /// YAML file and its JSON conversion hash the same.
    #[inline]
    fn hash(content: &Self::Content) -> ContentHash {
        ContentHash::compute(content.root.to_string().as_bytes())
    }

    fn validate_content(content: &Self::Content) -> Result<(), ArtifactError> {
        if content.title.trim().is_empty() {
            return Err(ArtifactError::InvariantViolation(
                "info.title must not be empty".to_string(),
            ));
        }
        if content.version.trim().is_empty() {
            return Err(ArtifactError::InvariantViolation(
                "info.version must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Specification dialect
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "declared", rename_all = "snake_case")]
pub enum SpecFormat {
    /// `openapi: 3.x`, keeps the declared value
    OpenApi3(String),
    /// `swagger: "2.0"`
    Swagger2,
}

impl fmt::Display for SpecFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenApi3(declared) => write!(f, "OpenAPI {declared}"),
            Self::Swagger2 => f.write_str("Swagger 2.0"),
        }
    }
}

/// Parsed specification document
#[derive(Debug, Clone, PartialEq)]
pub struct SpecDocument {
    format: SpecFormat,
    title: String,
    version: String,
    root: Value,
}

impl SpecDocument {
    /// Assemble a document from already-extracted parts
    #[inline]
    #[must_use]
    pub fn new(
        format: SpecFormat,
        title: impl Into<String>,
        version: impl Into<String>,
        root: Value,
    ) -> Self {
        Self {
            format,
            title: title.into(),
            version: version.into(),
            root,
        }
    }

    /// Detected dialect
    #[inline]
    #[must_use]
    pub fn format(&self) -> &SpecFormat {
        &self.format
    }

    /// `info.title`
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// `info.version`, verbatim
    #[inline]
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Whole parsed tree
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Number of entries under `paths`
    #[must_use]
    pub fn path_count(&self) -> usize {
        self.root
            .get("paths")
            .and_then(Value::as_object)
            .map_or(0, serde_json::Map::len)
    }
}
