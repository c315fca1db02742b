use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use ocel_config::OcelConfig;
use ocel_core::{TableNamespace, VolumePath};
use ocel_lake::TableWrite;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::WriteArgs;
use crate::commands::shared::flatten::flatten_into_lake;
use crate::output::output;

#[derive(Debug, Serialize)]
struct WriteResponse {
    source: String,
    namespace: String,
    tables: Vec<TableWrite>,
    total_rows: usize,
    completed_at: DateTime<Utc>,
}

/// Handle `ocel-import write`.
pub fn handle(args: &WriteArgs, config: &OcelConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let catalog = ocel_config::require(
        "volume.catalog",
        args.catalog.as_deref(),
        &config.volume.catalog,
    )?;
    let schema = ocel_config::require("volume.schema", args.schema.as_deref(), &config.volume.schema)?;
    let json_path = json_path(args, &catalog, &schema, config)?;
    let namespace = TableNamespace::new(catalog, schema);

    let summary = flatten_into_lake(&json_path, &namespace, &config.lake.dir)?;

    output(
        &WriteResponse {
            source: json_path.display().to_string(),
            namespace: summary.namespace.to_string(),
            total_rows: summary.total_rows(),
            tables: summary.tables,
            completed_at: Utc::now(),
        },
        flags.format,
    )
}

/// `--json-path`, else the configured volume file of `catalog.schema`.
fn json_path(
    args: &WriteArgs,
    catalog: &str,
    schema: &str,
    config: &OcelConfig,
) -> anyhow::Result<PathBuf> {
    if let Some(path) = &args.json_path {
        return Ok(path.clone());
    }
    let volume = &config.volume;
    let path = VolumePath::from_parts(
        &volume.root,
        Some(catalog),
        Some(schema),
        Some(&volume.volume),
        Some(&volume.file_name),
    )
    .context("no --json-path given and no configured volume file to read")?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use ocel_config::VolumeConfig;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn explicit_json_path_wins() {
        let args = WriteArgs {
            catalog: None,
            schema: None,
            json_path: Some(PathBuf::from("log.json")),
        };
        assert_eq!(
            json_path(&args, "main", "s", &OcelConfig::default()).unwrap(),
            PathBuf::from("log.json")
        );
    }

    #[test]
    fn json_path_defaults_to_volume_file() {
        let args = WriteArgs {
            catalog: None,
            schema: None,
            json_path: None,
        };
        let config = OcelConfig {
            volume: VolumeConfig {
                volume: "raw".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            json_path(&args, "main", "sales", &config).unwrap(),
            PathBuf::from("/Volumes/main/sales/raw/ocel.json")
        );
        assert!(json_path(&args, "main", "sales", &OcelConfig::default()).is_err());
    }
}
