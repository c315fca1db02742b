//! Download source configuration.

use serde::{Deserialize, Serialize};

pub use ocel_fetch::DEFAULT_CHUNK_SIZE;

const fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Public URL the OCEL 2.0 JSON document is downloaded from.
    #[serde(default)]
    pub url: String,

    /// Size of the write buffer used while streaming the download.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl SourceConfig {
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        !self.url.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = SourceConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.chunk_size, 8192);
    }

    #[test]
    fn default_chunk_size_matches_fetch_request() {
        let request = ocel_fetch::FetchRequest::new("https://example.org/ocel.json", "ocel.json");
        assert_eq!(SourceConfig::default().chunk_size, request.chunk_size);
    }
}
