//! OpenAPI / Swagger recognition
//!
//! A tree is a specification document when its root is an object declaring
//! `openapi: 3.x` or `swagger: "2.0"` and carrying `info.title` and
//! `info.version`.

use crate::error::ParseError;
use apiref_artifact::types::{SpecDocument, SpecFormat};
use serde_json::Value;

/// Check a parsed tree and extract its metadata
///
/// # Errors
/// - [`ParseError::UnrecognizedDocument`] when the dialect marker is absent or unsupported
/// - [`ParseError::MissingField`] when `info`, `info.title` or `info.version` is unusable
pub fn recognize(filename: &str, root: Value) -> Result<SpecDocument, ParseError> {
    if !root.is_object() {
        return Err(ParseError::unrecognized(filename, "document root is not a mapping"));
    }

    let format = detect_format(filename, &root)?;

    let info = root
        .get("info")
        .filter(|v| v.is_object())
        .ok_or(ParseError::MissingField {
            filename: filename.to_string(),
            field: "info",
        })?;

    let title = info
        .get("title")
        .and_then(scalar_text)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(ParseError::MissingField {
            filename: filename.to_string(),
            field: "info.title",
        })?;

    let version = info
        .get("version")
        .and_then(scalar_text)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ParseError::MissingField {
            filename: filename.to_string(),
            field: "info.version",
        })?;

    Ok(SpecDocument::new(format, title, version, root))
}

fn detect_format(filename: &str, root: &Value) -> Result<SpecFormat, ParseError> {
    if let Some(declared) = root.get("openapi") {
        let declared = scalar_text(declared).unwrap_or_default();
        return if declared.starts_with("3.") {
            Ok(SpecFormat::OpenApi3(declared))
        } else {
            Err(ParseError::unrecognized(
                filename,
                format!("unsupported openapi version '{declared}'"),
            ))
        };
    }

    if let Some(declared) = root.get("swagger") {
        let declared = scalar_text(declared).unwrap_or_default();
        return if declared == "2.0" {
            Ok(SpecFormat::Swagger2)
        } else {
            Err(ParseError::unrecognized(
                filename,
                format!("unsupported swagger version '{declared}'"),
            ))
        };
    }

    Err(ParseError::unrecognized(
        filename,
        "missing 'openapi' or 'swagger' field",
    ))
}

/// Text of a string or number scalar
///
/// The parsers hand numeric `info` fields over as their literal text, so a
/// number only reaches here from a tree built some other way.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn openapi3_document() {
        let doc = recognize(
            "petstore.json",
            json!({"openapi": "3.0.0", "info": {"title": "Swagger Petstore", "version": "1.0.0"}}),
        )
        .unwrap();
        assert_eq!(doc.format(), &SpecFormat::OpenApi3("3.0.0".to_string()));
        assert_eq!(doc.title(), "Swagger Petstore");
        assert_eq!(doc.version(), "1.0.0");
    }

    #[test]
    fn swagger2_with_numeric_marker_and_version() {
        let doc = recognize(
            "legacy.yaml",
            json!({"swagger": 2.0, "info": {"title": "Legacy", "version": 1.5}}),
        )
        .unwrap();
        assert_eq!(doc.format(), &SpecFormat::Swagger2);
        assert_eq!(doc.version(), "1.5");
    }

    #[test]
    fn numeric_title_is_accepted() {
        let doc = recognize(
            "x.json",
            json!({"openapi": "3.0.3", "info": {"title": 2024, "version": "1"}}),
        )
        .unwrap();
        assert_eq!(doc.title(), "2024");
    }

    #[test]
    fn version_text_is_kept_verbatim() {
        let doc = recognize(
            "x.json",
            json!({"openapi": "3.0.3", "info": {"title": "t", "version": "1.0.0 "}}),
        )
        .unwrap();
        assert_eq!(doc.version(), "1.0.0 ");
    }

    #[test]
    fn missing_marker_is_unrecognized() {
        let err = recognize("x.json", json!({"info": {"title": "t", "version": "1"}})).unwrap_err();
        assert!(matches!(err, ParseError::UnrecognizedDocument { .. }));
    }

    #[test]
    fn openapi2_marker_is_unrecognized() {
        let err = recognize(
            "x.json",
            json!({"openapi": "2.0", "info": {"title": "t", "version": "1"}}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("unsupported openapi version"));
    }

    #[test]
    fn blank_title_is_missing() {
        let err = recognize(
            "x.json",
            json!({"openapi": "3.1.0", "info": {"title": "  ", "version": "1"}}),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingField { field: "info.title", .. }
        ));
    }

    #[test]
    fn absent_version_is_missing() {
        let err = recognize("x.json", json!({"openapi": "3.1.0", "info": {"title": "t"}}))
            .unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingField { field: "info.version", .. }
        ));
    }

    #[test]
    fn array_root_is_unrecognized() {
        let err = recognize("x.json", json!([1, 2])).unwrap_err();
        assert!(matches!(err, ParseError::UnrecognizedDocument { .. }));
    }
}
