//! Testing utilities for the apiref workspace
//!
//! Petstore fixture documents, record builders and controller setup.

#![allow(missing_docs)]
#![allow(clippy::missing_panics_doc)]

use apiref_artifact::types::{SpecFormat, UploadContent};
use apiref_artifact::ContentHash;
use apiref_core::{AttachmentSource, ContentItemController, Settings};
use apiref_revision::AttachmentRecord;
use std::path::PathBuf;

/// A fixture document: upload name plus contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixture {
    pub filename: &'static str,
    pub contents: &'static str,
}

impl Fixture {
    pub fn bytes(&self) -> Vec<u8> {
        self.contents.as_bytes().to_vec()
    }

    pub fn upload(&self) -> UploadContent {
        UploadContent::new(self.filename, self.bytes())
    }

    pub fn source(&self) -> AttachmentSource {
        AttachmentSource::upload(self.filename, self.bytes())
    }

    /// Same contents under another name
    pub fn renamed(&self, filename: &str) -> AttachmentSource {
        AttachmentSource::upload(filename, self.bytes())
    }

    /// Same document with `info.version` replaced by an unquoted literal
    pub fn with_version(&self, filename: &str, literal: &str) -> UploadContent {
        let contents = self
            .contents
            .replacen("version: 1.0.0", &format!("version: {literal}"), 1);
        assert_ne!(contents, self.contents, "fixture has no version line");
        UploadContent::new(filename, contents.into_bytes())
    }
}

/// "Swagger Petstore" 1.0.0, OpenAPI 3.0.0, two paths
pub const PETSTORE: Fixture = Fixture {
    filename: "petstore-openapi.yaml",
    contents: include_str!("../fixtures/petstore-openapi.yaml"),
};

/// "Swagger Petstore" 1.0.1, three paths
pub const PETSTORE_V2: Fixture = Fixture {
    filename: "petstore-openapi2.yaml",
    contents: include_str!("../fixtures/petstore-openapi2.yaml"),
};

/// Different document declaring the same version as [`PETSTORE`]
pub const PETSTORE_DUPLICATE: Fixture = Fixture {
    filename: "petstore-openapi-duplicate.yaml",
    contents: include_str!("../fixtures/petstore-openapi-duplicate.yaml"),
};

/// Swagger 2.0 JSON, "Swagger Petstore (legacy)" 1.0.0
pub const PETSTORE_SWAGGER: Fixture = Fixture {
    filename: "petstore-swagger.json",
    contents: include_str!("../fixtures/petstore-swagger.json"),
};

/// YAML syntax error
pub const MALFORMED: Fixture = Fixture {
    filename: "malformed.yaml",
    contents: include_str!("../fixtures/malformed.yaml"),
};

/// Valid YAML that is not an OpenAPI document
pub const NOT_OPENAPI: Fixture = Fixture {
    filename: "not-openapi.yaml",
    contents: include_str!("../fixtures/not-openapi.yaml"),
};

/// Directory holding the fixture files
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Write a fixture into `dir` and return its path
pub fn write_fixture(dir: &tempfile::TempDir, fixture: &Fixture) -> PathBuf {
    let path = dir.path().join(fixture.filename);
    std::fs::write(&path, fixture.contents).unwrap();
    path
}

pub fn manual_record(title: &str, version: &str) -> AttachmentRecord {
    AttachmentRecord::manual(title, version).unwrap()
}

/// Uploaded record without going through the parser
pub fn uploaded_record(filename: &str, title: &str, version: &str) -> AttachmentRecord {
    AttachmentRecord::uploaded(
        filename,
        title,
        version,
        ContentHash::compute(filename.as_bytes()),
        SpecFormat::OpenApi3("3.0.0".to_string()),
    )
    .unwrap()
}

/// Controller over an in-memory store with default settings
pub fn setup_controller() -> ContentItemController {
    ContentItemController::in_memory(&Settings::default())
}

pub fn setup_controller_allowing_duplicates() -> ContentItemController {
    ContentItemController::in_memory(&Settings::default().with_allow_version_duplication(true))
}
