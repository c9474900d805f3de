//! Typed, content-addressed artifacts
//!
//! An [`Artifact<K>`] pairs validated content with the hash it was created
//! from. The [`ArtifactKind`] trait is sealed: the only kinds are the raw
//! upload and the parsed specification document defined in [`crate::types`].

use crate::hash::ContentHash;
use std::fmt::Debug;
use std::marker::PhantomData;

/// Kind of content an artifact carries
///
/// # Contract
/// - `hash` is deterministic: equal content gives an equal hash
/// - `KIND_ID` is stable and unique across kinds
pub trait ArtifactKind: Send + Sync + 'static + Debug + private::Sealed {
    /// Content stored by artifacts of this kind
    type Content: Send + Sync + 'static + Debug + Clone + PartialEq;

    /// Stable identifier, used in logs and persisted records
    const KIND_ID: &'static str;

    /// Compute content hash
    fn hash(content: &Self::Content) -> ContentHash;

    /// Check kind-specific invariants
    ///
    /// # Errors
    /// Returns error if content violates invariants
    fn validate_content(_content: &Self::Content) -> Result<(), ArtifactError> {
        Ok(())
    }
}

pub(crate) mod private {
    pub trait Sealed {}
}

/// Errors related to artifact construction
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// Content invariant violation
    #[error("content invariant violated: {0}")]
    InvariantViolation(String),

    /// Stored hash no longer matches content
    #[error("hash mismatch: expected {expected}, got {actual}")]
    HashMismatch {
        expected: ContentHash,
        actual: ContentHash,
    },
}

/// Validated content plus its hash
///
/// # Invariants
/// - `hash == K::hash(&content)`
/// - Immutable after construction
#[derive(Debug, PartialEq, Eq)]
pub struct Artifact<K: ArtifactKind> {
    hash: ContentHash,
    content: K::Content,
    _kind: PhantomData<K>,
}

impl<K: ArtifactKind> Clone for Artifact<K> {
    fn clone(&self) -> Self {
        Self {
            hash: self.hash,
            content: self.content.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: ArtifactKind> Artifact<K> {
    /// Validate content and compute its hash
    ///
    /// # Errors
    /// Returns error if content validation fails
    pub fn new(content: K::Content) -> Result<Self, ArtifactError> {
        K::validate_content(&content)?;
        let hash = K::hash(&content);
        Ok(Self {
            hash,
            content,
            _kind: PhantomData,
        })
    }

    /// Content hash
    #[inline]
    #[must_use]
    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }

    /// Reference to content
    #[inline]
    #[must_use]
    pub fn content(&self) -> &K::Content {
        &self.content
    }

    /// Move content out of the artifact
    #[inline]
    #[must_use]
    pub fn into_content(self) -> K::Content {
        self.content
    }

    /// Recompute the hash and compare with the stored one
    ///
    /// # Errors
    /// Returns [`ArtifactError::HashMismatch`] if content and hash diverged
    pub fn verify(&self) -> Result<(), ArtifactError> {
        let actual = K::hash(&self.content);
        if actual == self.hash {
            Ok(())
        } else {
            Err(ArtifactError::HashMismatch {
                expected: self.hash,
                actual,
            })
        }
    }

    /// Kind identifier
    #[inline]
    #[must_use]
    pub fn kind_id() -> &'static str {
        K::KIND_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{UploadArtifact, UploadContent};

    fn upload(name: &str, body: &str) -> Result<Artifact<UploadArtifact>, ArtifactError> {
        Artifact::new(UploadContent::new(name, body.as_bytes().to_vec()))
    }

    #[test]
    fn hash_matches_kind_hash() {
        let artifact = upload("petstore.yaml", "openapi: 3.0.0").unwrap();
        assert_eq!(
            artifact.hash(),
            &UploadArtifact::hash(artifact.content())
        );
        assert!(artifact.verify().is_ok());
    }

    #[test]
    fn clone_preserves_hash() {
        let artifact = upload("a.yaml", "x: 1").unwrap();
        let cloned = artifact.clone();
        assert_eq!(cloned.hash(), artifact.hash());
        assert_eq!(cloned.into_content().filename(), "a.yaml");
    }

    #[test]
    fn validation_failure_is_reported() {
        let result = upload("", "x: 1");
        assert!(matches!(result, Err(ArtifactError::InvariantViolation(_))));
    }

    #[test]
    fn kind_id_is_static() {
        assert_eq!(Artifact::<UploadArtifact>::kind_id(), "upload");
    }
}
