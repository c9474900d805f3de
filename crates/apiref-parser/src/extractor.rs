//! Version extraction
//!
//! [`VersionExtractor`] is the single entry point the rest of the system uses
//! to turn an uploaded file into a title and version.

use crate::cache::{CacheStats, ParseCache};
use crate::error::ParseError;
use crate::parsers::{default_parsers, recognize, ParserRegistry};
use apiref_artifact::types::{SpecDocumentArtifact, SpecFormat, UploadArtifact, UploadContent};
use apiref_artifact::{Artifact, ArtifactKind, ContentHash};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parser limits, read from the `[parser]` settings section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Largest accepted upload
    pub max_document_bytes: usize,
    /// Parse cache capacity (entries)
    pub cache_capacity: u64,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            max_document_bytes: 4 * 1024 * 1024,
            cache_capacity: 256,
        }
    }
}

/// Metadata extracted from one specification document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedMetadata {
    /// `info.title`
    pub title: String,
    /// `info.version`, verbatim
    pub version: String,
    /// Detected dialect
    pub format: SpecFormat,
    /// Hash of the uploaded bytes
    pub checksum: ContentHash,
    /// Hash of the normalised document tree
    pub document_hash: ContentHash,
    /// Number of entries under `paths`
    pub path_count: usize,
}

/// Extracts title and version from uploaded specification documents
///
/// Deterministic: the same bytes under the same extension always produce
/// the same metadata.
#[derive(Debug)]
pub struct VersionExtractor {
    registry: ParserRegistry,
    cache: ParseCache,
    settings: ParserSettings,
}

impl Default for VersionExtractor {
    fn default() -> Self {
        Self::new(ParserSettings::default())
    }
}

impl VersionExtractor {
    /// Create extractor with the default JSON and YAML parsers
    #[must_use]
    pub fn new(settings: ParserSettings) -> Self {
        Self::with_registry(default_parsers(), settings)
    }

    /// Create extractor with a custom parser registry
    #[must_use]
    pub fn with_registry(registry: ParserRegistry, settings: ParserSettings) -> Self {
        Self {
            registry,
            cache: ParseCache::new(settings.cache_capacity),
            settings,
        }
    }

    /// Active limits
    #[inline]
    #[must_use]
    pub fn settings(&self) -> &ParserSettings {
        &self.settings
    }

    /// Extract title and version, using the cache
    ///
    /// # Errors
    /// Returns [`ParseError`] when the upload cannot be decoded as a
    /// specification document
    pub fn extract(&self, upload: &UploadContent) -> Result<ExtractedMetadata, ParseError> {
        self.check_size(upload)?;
        let extension = self.extension_of(upload)?;
        let checksum = UploadArtifact::hash(upload);
        let key = (checksum, extension);

        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(
                filename = upload.filename(),
                checksum = %checksum.short(),
                "parse cache hit"
            );
            return Ok(cached);
        }

        let document = self.parse_checked(upload, &key.1)?;
        let metadata = ExtractedMetadata {
            title: document.content().title().to_string(),
            version: document.content().version().to_string(),
            format: document.content().format().clone(),
            checksum,
            document_hash: *document.hash(),
            path_count: document.content().path_count(),
        };

        tracing::debug!(
            filename = upload.filename(),
            title = %metadata.title,
            version = %metadata.version,
            format = %metadata.format,
            "extracted specification metadata"
        );
        self.cache.insert(key, metadata.clone());
        Ok(metadata)
    }

    /// Parse an upload into a document artifact, bypassing the cache
    ///
    /// # Errors
    /// Returns [`ParseError`] on unsupported extension, bad encoding, syntax
    /// errors or a tree that is not a specification document
    pub fn parse_document(
        &self,
        upload: &UploadContent,
    ) -> Result<Artifact<SpecDocumentArtifact>, ParseError> {
        self.check_size(upload)?;
        let extension = self.extension_of(upload)?;
        self.parse_checked(upload, &extension)
    }

    /// Parse an upload whose size and extension were already checked
    fn parse_checked(
        &self,
        upload: &UploadContent,
        extension: &str,
    ) -> Result<Artifact<SpecDocumentArtifact>, ParseError> {
        let parser = self
            .registry
            .find_for_extension(extension)
            .ok_or_else(|| ParseError::NoParserForExtension(extension.to_string()))?;

        let text = upload.text().map_err(|_| ParseError::InvalidEncoding {
            filename: upload.filename().to_string(),
        })?;

        let tree = parser.parse_tree(upload.filename(), text)?;
        let document = recognize(upload.filename(), tree)?;
        Ok(Artifact::new(document)?)
    }

    /// Read a file from disk and extract its metadata
    ///
    /// # Errors
    /// Returns [`ParseError::Io`] if the file cannot be read, otherwise as
    /// [`Self::extract`]
    pub fn extract_file(
        &self,
        path: &Path,
    ) -> Result<(UploadContent, ExtractedMetadata), ParseError> {
        let upload = read_upload(path)?;
        let metadata = self.extract(&upload)?;
        Ok((upload, metadata))
    }

    /// Parse cache counters
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn check_size(&self, upload: &UploadContent) -> Result<(), ParseError> {
        if upload.len() > self.settings.max_document_bytes {
            return Err(ParseError::TooLarge {
                filename: upload.filename().to_string(),
                size: upload.len(),
                limit: self.settings.max_document_bytes,
            });
        }
        Ok(())
    }

    fn extension_of(&self, upload: &UploadContent) -> Result<String, ParseError> {
        let extension = upload.extension().unwrap_or_default();
        if self.registry.find_for_extension(&extension).is_none() {
            return Err(ParseError::NoParserForExtension(extension));
        }
        Ok(extension)
    }
}

/// Load a file as an upload named after its final path component
///
/// # Errors
/// Returns [`ParseError::Io`] if the file cannot be read
pub fn read_upload(path: &Path) -> Result<UploadContent, ParseError> {
    let bytes = std::fs::read(path).map_err(|e| ParseError::io_error(path, e))?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    Ok(UploadContent::new(filename, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PETSTORE: &str = "openapi: 3.0.0\ninfo:\n  title: Swagger Petstore\n  version: 1.0.0\npaths:\n  /pets: {}\n";

    fn upload(name: &str, body: &str) -> UploadContent {
        UploadContent::new(name, body.as_bytes().to_vec())
    }

    #[test]
    fn extracts_title_and_version() {
        let extractor = VersionExtractor::default();
        let metadata = extractor.extract(&upload("petstore-openapi.yaml", PETSTORE)).unwrap();
        assert_eq!(metadata.title, "Swagger Petstore");
        assert_eq!(metadata.version, "1.0.0");
        assert_eq!(metadata.path_count, 1);
    }

    #[test]
    fn repeated_extraction_is_identical_and_cached() {
        let extractor = VersionExtractor::default();
        let first = extractor.extract(&upload("a.yaml", PETSTORE)).unwrap();
        let second = extractor.extract(&upload("copy-of-a.yaml", PETSTORE)).unwrap();
        assert_eq!(first, second);

        let stats = extractor.cache_stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn checksum_is_the_hash_of_the_uploaded_bytes() {
        let extractor = VersionExtractor::default();
        let metadata = extractor.extract(&upload("petstore.yaml", PETSTORE)).unwrap();
        assert_eq!(metadata.checksum, ContentHash::compute(PETSTORE.as_bytes()));
    }

    #[test]
    fn parse_document_checks_limits_itself() {
        let extractor = VersionExtractor::new(ParserSettings {
            max_document_bytes: 16,
            ..ParserSettings::default()
        });
        assert!(matches!(
            extractor.parse_document(&upload("petstore.yaml", PETSTORE)),
            Err(ParseError::TooLarge { .. })
        ));
        assert!(matches!(
            VersionExtractor::default().parse_document(&upload("petstore.txt", PETSTORE)),
            Err(ParseError::NoParserForExtension(_))
        ));
    }

    #[test]
    fn failures_are_not_cached() {
        let extractor = VersionExtractor::default();
        let bad = upload("bad.yaml", "openapi: 3.0.0\n");
        assert!(extractor.extract(&bad).is_err());
        assert!(extractor.extract(&bad).is_err());
        assert_eq!(extractor.cache_stats().entry_count, 0);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let extractor = VersionExtractor::default();
        let err = extractor.extract(&upload("petstore.txt", PETSTORE)).unwrap_err();
        assert!(matches!(err, ParseError::NoParserForExtension(ref ext) if ext == "txt"));
    }

    #[test]
    fn oversized_upload_is_rejected() {
        let extractor = VersionExtractor::new(ParserSettings {
            max_document_bytes: 16,
            ..ParserSettings::default()
        });
        let err = extractor.extract(&upload("petstore.yaml", PETSTORE)).unwrap_err();
        assert!(matches!(err, ParseError::TooLarge { limit: 16, .. }));
    }

    #[test]
    fn non_utf8_upload_is_rejected() {
        let extractor = VersionExtractor::default();
        let err = extractor
            .extract(&UploadContent::new("bin.json", vec![0xff, 0x00]))
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidEncoding { .. }));
    }

    #[test]
    fn json_and_yaml_of_same_document_share_document_hash() {
        let extractor = VersionExtractor::default();
        let yaml = extractor.extract(&upload("p.yaml", PETSTORE)).unwrap();
        let json = extractor
            .extract(&upload(
                "p.json",
                r#"{"openapi":"3.0.0","info":{"title":"Swagger Petstore","version":"1.0.0"},"paths":{"/pets":{}}}"#,
            ))
            .unwrap();
        assert_ne!(yaml.checksum, json.checksum);
        assert_eq!(yaml.document_hash, json.document_hash);
    }

    #[test]
    fn extract_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("petstore-openapi.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(PETSTORE.as_bytes()).unwrap();

        let extractor = VersionExtractor::default();
        let (upload, metadata) = extractor.extract_file(&path).unwrap();
        assert_eq!(upload.filename(), "petstore-openapi.yaml");
        assert_eq!(metadata.version, "1.0.0");
    }

    #[test]
    fn missing_file_is_io_error() {
        let extractor = VersionExtractor::default();
        let err = extractor
            .extract_file(Path::new("/nonexistent/petstore.yaml"))
            .unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }
}
