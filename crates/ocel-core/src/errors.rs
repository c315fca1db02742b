//! Error types for reading OCEL documents and resolving volume paths.
//!
//! Storage and network failures are defined in their own crates
//! (`LakeError`, `FetchError`). The binary converges them with `anyhow`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by `ocel-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The document is not valid JSON or lacks a required key.
    #[error("Schema error: {0}")]
    Schema(String),

    /// A volume path does not have the `<root>/<catalog>/<schema>/<volume>/<file_name>` shape.
    #[error("Invalid volume path '{path}': {reason}. Expected format: '{root}/<catalog>/<schema>/<volume>/<file_name>'")]
    InvalidPath {
        path: String,
        root: String,
        reason: String,
    },

    /// One or more volume path components were not provided.
    #[error("All volume path components are required. Missing: {}", .missing.join(", "))]
    MissingComponents { missing: Vec<&'static str> },

    /// The document file could not be read.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<serde_json::Error> for CoreError {
    fn from(error: serde_json::Error) -> Self {
        Self::Schema(error.to_string())
    }
}
