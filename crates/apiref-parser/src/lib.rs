//! apiref Parser
//!
//! Turns uploaded OpenAPI 3 / Swagger 2 documents into the title and version
//! recorded on a content item.
//!
//! # Pipeline
//!
//! ```text
//! UploadContent → ParserRegistry (by extension) → JSON tree → recognize → SpecDocument
//!                        ↑_____________________________________________↓
//!                              ParseCache (keyed by content hash)
//! ```
//!
//! # Example
//!
//! ```rust
//! use apiref_artifact::types::UploadContent;
//! use apiref_parser::VersionExtractor;
//!
//! let extractor = VersionExtractor::default();
//! let upload = UploadContent::new(
//!     "petstore-openapi.yaml",
//!     b"openapi: 3.0.0\ninfo:\n  title: Swagger Petstore\n  version: 1.0.0\n".to_vec(),
//! );
//! let metadata = extractor.extract(&upload).unwrap();
//! assert_eq!(metadata.version, "1.0.0");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cache;
pub mod error;
pub mod extractor;
pub mod parsers;

pub use cache::{CacheStats, ParseCache};
pub use error::{ParseError, ParseResult};
pub use extractor::{read_upload, ExtractedMetadata, ParserSettings, VersionExtractor};
pub use parsers::{default_parsers, DocumentParser, JsonParser, ParserRegistry, YamlParser};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
