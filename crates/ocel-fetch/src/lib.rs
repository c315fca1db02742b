//! # ocel-fetch
//!
//! Streaming download of a remote document to a local path.
//!
//! One [`Fetcher`] serves every entry point; the caller describes each
//! download with an immutable [`FetchRequest`] (URL, destination, chunk size).
//! The body is streamed chunk by chunk, so the document is never held in
//! memory. A failure mid-stream leaves a partial file at the destination;
//! rerunning overwrites it.

mod error;
mod http;

pub use error::FetchError;

use std::path::{Path, PathBuf};

use tokio::io::{AsyncWriteExt, BufWriter};

/// Default size of the write buffer, in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

// ── Types ──────────────────────────────────────────────────────────

/// What to download and where to put it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub destination: PathBuf,
    /// Write buffer size; the destination is written in blocks of this size.
    pub chunk_size: usize,
}

impl FetchRequest {
    #[must_use]
    pub fn new(url: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            destination: destination.into(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    #[must_use]
    pub const fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

/// Result of a completed download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    /// Final path of the written file.
    pub path: PathBuf,
    /// Number of body bytes written.
    pub bytes_written: u64,
    /// `Content-Length` announced by the server, if any.
    pub content_length: Option<u64>,
}

/// Receives download progress. All methods default to no-ops.
pub trait FetchProgress {
    /// Called once the response headers are in; `total` is the content length if known.
    fn started(&mut self, _total: Option<u64>) {}

    /// Called after every chunk with the running byte count.
    fn advanced(&mut self, _downloaded: u64, _total: Option<u64>) {}

    /// Called after the file has been flushed.
    fn finished(&mut self, _bytes_written: u64) {}
}

/// Progress sink that ignores every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl FetchProgress for NoProgress {}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for streaming documents to disk.
#[derive(Debug, Clone)]
pub struct Fetcher {
    http: reqwest::Client,
}

impl Fetcher {
    /// Create a fetcher with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client` fails to build.
    pub fn new() -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("ocel-import/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    /// Create a fetcher on top of an existing client.
    #[must_use]
    pub const fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Download `request.url` to `request.destination`.
    ///
    /// Missing parent directories are created first. The file is only
    /// created once the server has answered with a success status.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] or [`FetchError::Status`] when the request
    /// fails, and [`FetchError::Io`] when the destination cannot be created or
    /// written.
    pub async fn fetch(
        &self,
        request: &FetchRequest,
        progress: &mut dyn FetchProgress,
    ) -> Result<FetchOutcome, FetchError> {
        tracing::info!(url = %request.url, destination = %request.destination.display(), "starting download");
        self.fetch_inner(request, progress).await.inspect_err(|error| {
            tracing::error!(url = %request.url, %error, "download failed");
        })
    }

    async fn fetch_inner(
        &self,
        request: &FetchRequest,
        progress: &mut dyn FetchProgress,
    ) -> Result<FetchOutcome, FetchError> {
        create_parent_dirs(&request.destination).await?;

        let resp = self.http.get(&request.url).send().await?;
        let mut resp = http::check_response(resp).await?;
        let total = resp.content_length();
        tracing::debug!(status = resp.status().as_u16(), ?total, "response received");
        progress.started(total);

        let file = tokio::fs::File::create(&request.destination)
            .await
            .map_err(FetchError::io(&request.destination))?;
        let mut writer = BufWriter::with_capacity(request.chunk_size.max(1), file);

        let mut downloaded: u64 = 0;
        while let Some(chunk) = resp.chunk().await? {
            writer
                .write_all(&chunk)
                .await
                .map_err(FetchError::io(&request.destination))?;
            downloaded += chunk.len() as u64;
            progress.advanced(downloaded, total);
        }
        writer
            .flush()
            .await
            .map_err(FetchError::io(&request.destination))?;
        progress.finished(downloaded);

        tracing::info!(
            path = %request.destination.display(),
            size = %format_megabytes(downloaded),
            "download complete"
        );

        Ok(FetchOutcome {
            path: request.destination.clone(),
            bytes_written: downloaded,
            content_length: total,
        })
    }
}

async fn create_parent_dirs(destination: &Path) -> Result<(), FetchError> {
    match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => tokio::fs::create_dir_all(parent)
            .await
            .map_err(FetchError::io(parent)),
        _ => Ok(()),
    }
}

/// Human-readable size in megabytes, e.g. `1.25 MB`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}
