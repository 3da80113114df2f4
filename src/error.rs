//! Error types for schema translation and instance checking.

use std::path::PathBuf;
use thiserror::Error;

/// Errors during schema translation.
#[derive(Debug, Error)]
pub enum TranslateError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    // Schema errors (exit code 2)
    #[error("invalid configuration: {message}")]
    Configuration { message: String },

    #[error("{keyword} at \"{path}\" must be an array")]
    Shape {
        keyword: &'static str,
        path: String,
    },

    #[error("unable to resolve schema reference \"{uri}\"")]
    Reference { uri: String },

    #[error("unknown type \"{name}\": not a built-in type and no custom type registered")]
    UnresolvedType { name: String },

    #[error("cannot merge allOf at \"{path}\": {message}")]
    MergeType { path: String, message: String },
}

impl TranslateError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            TranslateError::FileNotFound { .. } | TranslateError::Read { .. } => 3,
            #[cfg(feature = "remote")]
            TranslateError::Network { .. } => 3,
            _ => 2,
        }
    }
}

/// Errors during instance checking.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Translate(#[from] TranslateError),

    #[error("check failed with {} violation(s)", violations.len())]
    Invalid { violations: Vec<Violation> },
}

impl CheckError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            CheckError::Translate(e) => e.exit_code(),
            CheckError::Invalid { .. } => 1,
        }
    }
}

/// Single check violation with path context.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Violation {
    /// JSON Pointer (RFC 6901) to the offending value.
    pub path: String,
    /// Human-readable violation message.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
