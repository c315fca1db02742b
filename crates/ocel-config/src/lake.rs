//! Table storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_dir() -> PathBuf {
    PathBuf::from(".ocel/lake")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LakeConfig {
    /// Directory holding one `DuckDB` file per catalog (`<dir>/<catalog>.duckdb`).
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

impl Default for LakeConfig {
    fn default() -> Self {
        Self { dir: default_dir() }
    }
}
