//! JSON document parser

use crate::error::ParseError;
use crate::parsers::{DocumentParser, InfoLiterals};
use serde::Deserialize;
use serde_json::value::RawValue;
use serde_json::Value;

/// JSON parser
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl DocumentParser for JsonParser {
    fn parse_tree(&self, filename: &str, text: &str) -> Result<Value, ParseError> {
        let mut tree: Value = serde_json::from_str(text).map_err(|e| {
            ParseError::syntax_error(filename, format!("JSON parse error: {e}"))
        })?;
        info_literals(text).restore(&mut tree);
        Ok(tree)
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

#[derive(Deserialize)]
struct Header {
    #[serde(default)]
    info: Option<HeaderInfo>,
}

#[derive(Deserialize)]
struct HeaderInfo {
    #[serde(default)]
    title: Option<Box<RawValue>>,
    #[serde(default)]
    version: Option<Box<RawValue>>,
}

fn info_literals(text: &str) -> InfoLiterals {
    let literal = |raw: Option<Box<RawValue>>| raw.map(|raw| raw.get().trim().to_string());
    match serde_json::from_str::<Header>(text) {
        Ok(Header { info: Some(info) }) => InfoLiterals {
            title: literal(info.title),
            version: literal(info.version),
        },
        _ => InfoLiterals::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_object() {
        let tree = JsonParser
            .parse_tree("a.json", r#"{"openapi": "3.0.0", "info": {}}"#)
            .unwrap();
        assert_eq!(tree["openapi"], "3.0.0");
    }

    #[test]
    fn numeric_version_keeps_its_spelling() {
        let tree = JsonParser
            .parse_tree("v.json", r#"{"info": {"title": "Pets", "version": 1.10}}"#)
            .unwrap();
        assert_eq!(tree["info"]["version"], "1.10");
        assert_eq!(tree["info"]["title"], "Pets");
    }

    #[test]
    fn reports_syntax_error_with_filename() {
        let err = JsonParser.parse_tree("broken.json", "{ not json").unwrap_err();
        assert!(matches!(
            err,
            ParseError::SyntaxError { ref filename, .. } if filename == "broken.json"
        ));
    }
}
