use std::path::Path;

use anyhow::Context;
use ocel_config::OcelConfig;
use ocel_fetch::{FetchOutcome, FetchRequest, Fetcher};

use crate::progress::DownloadProgress;

/// Stream `url` to `destination` with the configured chunk size.
pub async fn download(
    url: &str,
    destination: &Path,
    config: &OcelConfig,
) -> anyhow::Result<FetchOutcome> {
    let request = FetchRequest::new(url, destination).with_chunk_size(config.source.chunk_size);
    let fetcher = Fetcher::new().context("failed to build HTTP client")?;

    let mut progress = DownloadProgress::new(format!("downloading {url}"));
    let result = fetcher.fetch(&request, &mut progress).await;
    if result.is_err() {
        progress.fail();
    }
    result.with_context(|| format!("failed to download {url} to {}", destination.display()))
}
