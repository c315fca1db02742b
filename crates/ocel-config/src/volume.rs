//! Volume layout configuration.

use ocel_core::volume::DEFAULT_VOLUME_ROOT;
use serde::{Deserialize, Serialize};

fn default_root() -> String {
    String::from(DEFAULT_VOLUME_ROOT)
}

fn default_file_name() -> String {
    String::from("ocel.json")
}

/// Where downloaded documents are placed: `<root>/<catalog>/<schema>/<volume>/<file_name>`.
///
/// Empty strings mean "not configured"; the CLI fills them from flags.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VolumeConfig {
    #[serde(default = "default_root")]
    pub root: String,

    #[serde(default)]
    pub catalog: String,

    #[serde(default)]
    pub schema: String,

    #[serde(default)]
    pub volume: String,

    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            catalog: String::new(),
            schema: String::new(),
            volume: String::new(),
            file_name: default_file_name(),
        }
    }
}

impl VolumeConfig {
    /// Check if every component of a volume path is set.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        !self.catalog.is_empty() && !self.schema.is_empty() && !self.volume.is_empty()
    }
}
