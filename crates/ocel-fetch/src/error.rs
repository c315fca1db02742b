//! Fetch error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while downloading a document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP transport error (connection, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("HTTP status {status}: {message}")]
    Status {
        /// HTTP status code returned by the server.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// The destination could not be created or written.
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }

    /// Whether the failure happened on the network side rather than on disk.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Status { .. })
    }
}
