//! Error types for XPT file operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading XPT files.
#[derive(Debug, Error)]
pub enum XptError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("invalid XPT file: {message}")]
    InvalidFormat { message: String },

    #[error("missing header: expected {expected}")]
    MissingHeader { expected: &'static str },

    #[error("invalid NAMESTR at index {index}: {message}")]
    InvalidNamestr { index: usize, message: String },

    #[error("duplicate variable name: {name}")]
    DuplicateVariable { name: String },

    #[error("record out of bounds at offset {offset}")]
    RecordOutOfBounds { offset: usize },

    #[error("failed to parse numeric field: {field}")]
    NumericParse { field: String },

    #[error("observation length overflow")]
    ObservationOverflow,

    #[error("unexpected trailing bytes in observations")]
    TrailingBytes,

    /// Transport files written with the V8 extensions are not supported.
    #[error("unsupported transport version: {0}")]
    UnsupportedVersion(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "polars")]
    #[error("failed to build data frame: {0}")]
    DataFrame(#[from] polars::error::PolarsError),
}

/// Result type alias for XPT operations.
pub type Result<T> = std::result::Result<T, XptError>;

impl XptError {
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    pub fn missing_header(expected: &'static str) -> Self {
        Self::MissingHeader { expected }
    }

    pub fn duplicate_variable(name: impl Into<String>) -> Self {
        Self::DuplicateVariable { name: name.into() }
    }
}
