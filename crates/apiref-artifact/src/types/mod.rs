//! Artifact kinds
//!
//! - Upload: the raw bytes of a file attached on the edit form
//! - Spec document: an OpenAPI/Swagger document after parsing

pub mod document;
pub mod upload;

pub use document::{SpecDocument, SpecDocumentArtifact, SpecFormat};
pub use upload::{UploadArtifact, UploadContent};
