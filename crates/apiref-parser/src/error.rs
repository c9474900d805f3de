//! Error types for document parsing
//!
//! Every failure here is surfaced to the editor as a validation message on
//! the upload field; none of them mutate state.

use apiref_artifact::ArtifactError;
use std::path::PathBuf;

/// Errors while turning an uploaded file into title/version metadata
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// No parser registered for the file extension
    #[error("no parser registered for extension: '{0}'")]
    NoParserForExtension(String),

    /// Upload exceeds the configured size limit
    #[error("{filename} is {size} bytes, the limit is {limit}")]
    TooLarge {
        filename: String,
        size: usize,
        limit: usize,
    },

    /// Upload is not UTF-8 text
    #[error("{filename} is not valid UTF-8")]
    InvalidEncoding { filename: String },

    /// JSON / YAML syntax error
    #[error("syntax error in {filename}: {message}")]
    SyntaxError { filename: String, message: String },

    /// Well-formed data that is not an OpenAPI 3 / Swagger 2 document
    #[error("{filename} is not a specification document: {reason}")]
    UnrecognizedDocument { filename: String, reason: String },

    /// Required metadata field missing or empty
    #[error("{filename} has no usable {field}")]
    MissingField {
        filename: String,
        field: &'static str,
    },

    /// Reading an upload from disk failed
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Artifact invariant rejected the parsed content
    #[error("artifact error: {0}")]
    Artifact(#[from] ArtifactError),
}

impl ParseError {
    /// Create syntax error for a file
    pub fn syntax_error(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SyntaxError {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create "not a specification" error for a file
    pub fn unrecognized(filename: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnrecognizedDocument {
            filename: filename.into(),
            reason: reason.into(),
        }
    }

    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
