//! Error types for loading, selecting and writing documents.
//!
//! The dependency closure itself never fails; everything here belongs to
//! the layers around it.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while filtering an OpenAPI document.
#[derive(Debug, Error)]
pub enum FilterError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
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

    #[error("invalid YAML: {source}")]
    InvalidYaml {
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid path pattern \"{pattern}\": {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to serialize output: {message}")]
    Serialize { message: String },
}

impl FilterError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            FilterError::FileNotFound { .. }
            | FilterError::ReadError { .. }
            | FilterError::WriteError { .. } => 3,
            #[cfg(feature = "remote")]
            FilterError::NetworkError { .. } => 3,
            _ => 2,
        }
    }
}
