//! Document parsers
//!
//! Each parser turns the text of an upload into a `serde_json::Value` tree;
//! [`recognize`] then checks the tree is an OpenAPI 3 / Swagger 2 document
//! and pulls out its metadata. JSON and YAML are supported.

use crate::error::ParseError;
use serde_json::Value;
use std::path::Path;

mod json;
mod openapi;
mod yaml;

pub use json::JsonParser;
pub use openapi::recognize;
pub use yaml::YamlParser;

/// Parser for one serialization format
///
/// Implement this trait to accept another upload format.
pub trait DocumentParser: Send + Sync + 'static {
    /// Parse upload text into a tree
    ///
    /// # Errors
    /// Returns [`ParseError::SyntaxError`] for malformed input
    fn parse_tree(&self, filename: &str, text: &str) -> Result<Value, ParseError>;

    /// Supported file extensions (lowercase, without dot)
    fn extensions(&self) -> &[&str];

    /// Short format name for logs
    fn name(&self) -> &'static str;

    /// Check if this parser handles the given path
    fn can_parse(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.handles_extension(ext))
    }

    /// Check if this parser handles an extension (case-insensitive)
    fn handles_extension(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|known| known.eq_ignore_ascii_case(extension))
    }
}

/// Parsers keyed by file extension
pub struct ParserRegistry {
    parsers: Vec<Box<dyn DocumentParser>>,
}

impl Default for ParserRegistry {
    fn default() -> Self {
        default_parsers()
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("parser_count", &self.parsers.len())
            .field("extensions", &self.all_extensions())
            .finish()
    }
}

impl ParserRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Register a parser; later registrations win on shared extensions
    pub fn register<P: DocumentParser>(&mut self, parser: P) {
        self.parsers.insert(0, Box::new(parser));
    }

    /// Find parser for an extension
    #[must_use]
    pub fn find_for_extension(&self, extension: &str) -> Option<&dyn DocumentParser> {
        self.parsers
            .iter()
            .find(|p| p.handles_extension(extension))
            .map(|p| &**p)
    }

    /// Find parser for a path
    #[must_use]
    pub fn find_for_path(&self, path: &Path) -> Option<&dyn DocumentParser> {
        self.parsers.iter().find(|p| p.can_parse(path)).map(|p| &**p)
    }

    /// All registered extensions
    #[must_use]
    pub fn all_extensions(&self) -> Vec<&str> {
        self.parsers
            .iter()
            .flat_map(|p| p.extensions())
            .copied()
            .collect()
    }
}

/// `info.title` and `info.version` as written in the source text
///
/// Numbers lose their spelling on the way into a tree (`1.10` reads back as
/// `1.1`), so parsers recover the literal text and put it back.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct InfoLiterals {
    pub(crate) title: Option<String>,
    pub(crate) version: Option<String>,
}

impl InfoLiterals {
    /// Replace numeric `info.title` / `info.version` with their literal text
    pub(crate) fn restore(self, tree: &mut Value) {
        let Some(info) = tree.get_mut("info").and_then(Value::as_object_mut) else {
            return;
        };
        for (field, literal) in [("title", self.title), ("version", self.version)] {
            if let (Some(slot), Some(literal)) = (info.get_mut(field), literal) {
                if slot.is_number() {
                    *slot = Value::String(literal);
                }
            }
        }
    }
}

/// Registry with the JSON and YAML parsers
#[must_use]
pub fn default_parsers() -> ParserRegistry {
    let mut registry = ParserRegistry::new();
    registry.register(JsonParser);
    registry.register(YamlParser);
    registry
}
