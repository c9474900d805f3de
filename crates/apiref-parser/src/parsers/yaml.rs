//! YAML document parser
//!
//! Parses with `serde_yaml` into its own value type first, then converts to a
//! JSON tree. OpenAPI YAML routinely uses bare integer keys (`200:` under
//! `responses`), which JSON objects cannot hold, so scalar keys are
//! stringified during conversion.
//!
//! Plain scalars such as `version: 1.10` resolve to floats. A second, typed
//! read of the `info` header asks for strings, which `serde_yaml` answers
//! with the scalar's source text, and that text replaces the number.

use crate::error::ParseError;
use crate::parsers::{DocumentParser, InfoLiterals};
use serde::Deserialize;
use serde_json::{Map, Number, Value as JsonValue};
use serde_yaml::Value as YamlValue;

/// YAML parser
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl YamlParser {
    /// Create new YAML parser
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DocumentParser for YamlParser {
    fn parse_tree(&self, filename: &str, text: &str) -> Result<JsonValue, ParseError> {
        let mut documents = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(text) {
            let value = YamlValue::deserialize(doc).map_err(|e| {
                ParseError::syntax_error(filename, format!("YAML parse error: {e}"))
            })?;
            if !matches!(value, YamlValue::Null) {
                documents.push(value);
            }
        }

        match documents.len() {
            0 => Err(ParseError::syntax_error(filename, "empty YAML document")),
            1 => {
                let doc = documents.remove(0);
                let mut tree = to_json(filename, doc)?;
                info_literals(text).restore(&mut tree);
                Ok(tree)
            }
            n => Err(ParseError::unrecognized(
                filename,
                format!("expected a single YAML document, found {n}"),
            )),
        }
    }

    fn extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }

    fn name(&self) -> &'static str {
        "yaml"
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
    title: Option<String>,
    #[serde(default)]
    version: Option<String>,
}

/// Source text of the `info` scalars; empty when the header is not plain
/// scalars
fn info_literals(text: &str) -> InfoLiterals {
    match serde_yaml::from_str::<Header>(text) {
        Ok(Header { info: Some(info) }) => InfoLiterals {
            title: info.title,
            version: info.version,
        },
        _ => InfoLiterals::default(),
    }
}

fn to_json(filename: &str, value: YamlValue) -> Result<JsonValue, ParseError> {
    Ok(match value {
        YamlValue::Null => JsonValue::Null,
        YamlValue::Bool(b) => JsonValue::Bool(b),
        YamlValue::Number(n) => JsonValue::Number(number_to_json(filename, &n)?),
        YamlValue::String(s) => JsonValue::String(s),
        YamlValue::Sequence(items) => JsonValue::Array(
            items
                .into_iter()
                .map(|item| to_json(filename, item))
                .collect::<Result<_, _>>()?,
        ),
        YamlValue::Mapping(mapping) => {
            let mut object = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                object.insert(key_to_string(filename, key)?, to_json(filename, value)?);
            }
            JsonValue::Object(object)
        }
        YamlValue::Tagged(tagged) => to_json(filename, tagged.value)?,
    })
}

fn number_to_json(filename: &str, n: &serde_yaml::Number) -> Result<Number, ParseError> {
    if let Some(i) = n.as_i64() {
        return Ok(Number::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Number::from(u));
    }
    n.as_f64()
        .and_then(Number::from_f64)
        .ok_or_else(|| ParseError::syntax_error(filename, format!("unsupported number: {n}")))
}

fn key_to_string(filename: &str, key: YamlValue) -> Result<String, ParseError> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Null => Ok("null".to_string()),
        YamlValue::Tagged(tagged) => key_to_string(filename, tagged.value),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => Err(ParseError::syntax_error(
            filename,
            "mapping keys must be scalars",
        )),
    }
}
