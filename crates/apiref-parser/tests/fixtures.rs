//! Extraction over the petstore fixture documents.

use apiref_artifact::types::SpecFormat;
use apiref_parser::{ParseError, ParserSettings, VersionExtractor};
use apiref_test_utils::{
    fixtures_dir, MALFORMED, NOT_OPENAPI, PETSTORE, PETSTORE_DUPLICATE, PETSTORE_SWAGGER, PETSTORE_V2,
};

#[test]
fn petstore_documents() {
    let extractor = VersionExtractor::default();

    let v1 = extractor.extract(&PETSTORE.upload()).unwrap();
    assert_eq!(v1.title, "Swagger Petstore");
    assert_eq!(v1.version, "1.0.0");
    assert_eq!(v1.format, SpecFormat::OpenApi3("3.0.0".to_string()));
    assert_eq!(v1.path_count, 2);

    let v2 = extractor.extract(&PETSTORE_V2.upload()).unwrap();
    assert_eq!(v2.version, "1.0.1");
    assert_eq!(v2.path_count, 3);

    let swagger = extractor.extract(&PETSTORE_SWAGGER.upload()).unwrap();
    assert_eq!(swagger.format, SpecFormat::Swagger2);
}

#[test]
fn duplicate_fixture_shares_version_but_not_content() {
    let extractor = VersionExtractor::default();
    let original = extractor.extract(&PETSTORE.upload()).unwrap();
    let duplicate = extractor.extract(&PETSTORE_DUPLICATE.upload()).unwrap();

    assert_eq!(original.version, duplicate.version);
    assert_ne!(original.checksum, duplicate.checksum);
    assert_ne!(original.document_hash, duplicate.document_hash);
}

#[test]
fn parse_is_idempotent_across_extractors() {
    let first = VersionExtractor::default().extract(&PETSTORE.upload()).unwrap();
    let second = VersionExtractor::default().extract(&PETSTORE.upload()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn reupload_is_served_from_cache() {
    let extractor = VersionExtractor::default();
    extractor.extract(&PETSTORE.upload()).unwrap();
    extractor.extract(&PETSTORE.upload()).unwrap();
    assert_eq!(extractor.cache_stats().hits, 1);
}

#[test]
fn bad_fixtures_fail() {
    let extractor = VersionExtractor::default();
    assert!(matches!(
        extractor.extract(&MALFORMED.upload()),
        Err(ParseError::SyntaxError { .. })
    ));
    assert!(matches!(
        extractor.extract(&NOT_OPENAPI.upload()),
        Err(ParseError::UnrecognizedDocument { .. })
    ));
}

#[test]
fn size_limit_applies_to_fixtures() {
    let extractor = VersionExtractor::new(ParserSettings {
        max_document_bytes: 64,
        ..ParserSettings::default()
    });
    assert!(matches!(
        extractor.extract(&PETSTORE.upload()),
        Err(ParseError::TooLarge { .. })
    ));
}

#[test]
fn fixture_files_on_disk() {
    let extractor = VersionExtractor::default();
    let (upload, metadata) = extractor
        .extract_file(&fixtures_dir().join(PETSTORE.filename))
        .unwrap();
    assert_eq!(upload.filename(), "petstore-openapi.yaml");
    assert_eq!(metadata.version, "1.0.0");
}

#[test]
fn unquoted_numeric_versions_keep_their_text() {
    let extractor = VersionExtractor::default();
    for literal in ["1.10", "0.10", "2.50", "1.0"] {
        let upload = PETSTORE.with_version("petstore-numeric.yaml", literal);
        let metadata = extractor.extract(&upload).unwrap();
        assert_eq!(metadata.version, literal);
    }
}

#[test]
fn versions_differing_only_in_trailing_zero_are_distinct() {
    let extractor = VersionExtractor::default();
    let short = extractor
        .extract(&PETSTORE.with_version("petstore-1.1.yaml", "1.1"))
        .unwrap();
    let long = extractor
        .extract(&PETSTORE.with_version("petstore-1.10.yaml", "1.10"))
        .unwrap();
    assert_eq!(short.version, "1.1");
    assert_eq!(long.version, "1.10");
    assert_ne!(short.document_hash, long.document_hash);
}
