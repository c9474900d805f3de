//! Content hashing primitives
//!
//! [`ContentHash`] identifies uploaded bytes and parsed documents. Two uploads
//! with identical bytes share a hash regardless of their filename.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A 32-byte Blake3 content hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Wrap raw hash bytes
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw hash bytes
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Build from a byte slice
    ///
    /// # Errors
    /// Returns error if the slice is not exactly 32 bytes long
    pub fn from_slice(bytes: &[u8]) -> Result<Self, HashError> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| HashError::InvalidLength {
            expected: 32,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    /// Hash arbitrary bytes
    #[inline]
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Hash the JSON encoding of a value
    ///
    /// `serde_json` maps keep sorted keys, so logically equal documents hash
    /// the same no matter how their source ordered the keys.
    ///
    /// # Errors
    /// Returns error if the value cannot be serialized
    pub fn compute_json<T: serde::Serialize>(value: &T) -> Result<Self, HashError> {
        let encoded = serde_json::to_vec(value)?;
        Ok(Self::compute(&encoded))
    }

    /// First 16 hex characters, for logs and tables
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for ContentHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for ContentHash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        Self::from_slice(&bytes)
    }
}

// Stored as a hex string so persisted revisions stay readable.
impl serde::Serialize for ContentHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for ContentHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::Deserialize as _;

        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when working with content hashes
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    /// Wrong number of bytes
    #[error("invalid hash length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Not a hex string
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    /// Value could not be encoded for hashing
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn identical_bytes_hash_identically() {
        let a = ContentHash::compute(b"openapi: 3.0.0");
        let b = ContentHash::compute(b"openapi: 3.0.0");
        assert_eq!(a, b);
        assert_ne!(a, ContentHash::compute(b"openapi: 3.0.1"));
    }

    #[test]
    fn from_slice_rejects_short_input() {
        let result = ContentHash::from_slice(&[0u8; 12]);
        assert!(matches!(
            result,
            Err(HashError::InvalidLength { expected: 32, actual: 12 })
        ));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let hash = ContentHash::compute(b"petstore");
        let parsed: ContentHash = hash.to_string().parse().unwrap();
        assert_eq!(parsed, hash);
        assert!(hash.to_string().starts_with(&hash.short()));
        assert_eq!(hash.short().len(), 16);
    }

    #[test]
    fn json_hash_ignores_key_order() {
        let a: serde_json::Value = serde_json::from_str(r#"{"a":1,"b":2}"#).unwrap();
        let b: serde_json::Value = serde_json::from_str(r#"{"b":2,"a":1}"#).unwrap();
        assert_eq!(
            ContentHash::compute_json(&a).unwrap(),
            ContentHash::compute_json(&b).unwrap()
        );
    }

    #[test]
    fn serde_uses_hex_string() {
        let hash = ContentHash::compute(b"stored");
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{hash}\""));
        let back: ContentHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }

    #[test]
    fn bad_hex_is_rejected() {
        assert!(matches!(
            "not-hex".parse::<ContentHash>(),
            Err(HashError::HexDecode(_))
        ));
    }

    proptest! {
        #[test]
        fn hex_form_parses_back(data in proptest::collection::vec(any::<u8>(), 0..256)) {
            let hash = ContentHash::compute(&data);
            let parsed: ContentHash = hash.to_string().parse().unwrap();
            prop_assert_eq!(parsed, hash);
            prop_assert!(hash.to_string().starts_with(&hash.short()));
        }
    }
}
