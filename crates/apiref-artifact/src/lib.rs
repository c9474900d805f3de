//! apiref Artifact System
//!
//! Typed, content-addressed artifacts for API reference attachments.
//!
//! # Core Concepts
//!
//! - [`Artifact<K>`]: validated content paired with its [`ContentHash`]
//! - [`ArtifactKind`]: sealed trait implemented by the two kinds below
//! - [`types::UploadArtifact`]: raw bytes of an uploaded file
//! - [`types::SpecDocumentArtifact`]: a parsed OpenAPI / Swagger document
//!
//! # Example
//!
//! ```rust
//! use apiref_artifact::types::{UploadArtifact, UploadContent};
//! use apiref_artifact::Artifact;
//!
//! let upload = UploadContent::new("petstore-openapi.yaml", b"openapi: 3.0.0".to_vec());
//! let artifact = Artifact::<UploadArtifact>::new(upload).unwrap();
//! println!("hash: {}", artifact.hash().short());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod artifact;
mod hash;

pub mod types;

pub use artifact::{Artifact, ArtifactError, ArtifactKind};
pub use hash::{ContentHash, HashError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
