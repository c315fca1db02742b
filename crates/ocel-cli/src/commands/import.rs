use chrono::{DateTime, Utc};
use ocel_config::OcelConfig;
use ocel_fetch::format_megabytes;
use ocel_lake::TableWrite;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::commands::shared::flatten::flatten_into_lake;
use crate::commands::shared::{fetch, resolve};
use crate::output::output;

#[derive(Debug, Serialize)]
struct ImportResponse {
    url: String,
    volume_path: String,
    bytes_written: u64,
    size: String,
    namespace: String,
    tables: Vec<TableWrite>,
    total_rows: usize,
    completed_at: DateTime<Utc>,
}

/// Handle `ocel-import import`: download into the volume, then flatten the
/// file into the volume's `catalog.schema`.
pub async fn handle(
    args: &ImportArgs,
    config: &OcelConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let url = resolve::source_url(args.url.as_deref(), config)?;
    let volume = resolve::volume_path(
        args.file_path.as_deref(),
        resolve::VolumeFlags {
            catalog: args.catalog.as_deref(),
            schema: args.schema.as_deref(),
            volume: args.volume.as_deref(),
            file_name: args.file_name.as_deref(),
        },
        config,
    )?;
    let destination = volume.to_path_buf();
    tracing::info!(%volume, "importing into volume");

    let outcome = fetch::download(&url, &destination, config).await?;
    let summary = flatten_into_lake(&outcome.path, &volume.namespace(), &config.lake.dir)?;

    output(
        &ImportResponse {
            url,
            volume_path: volume.to_string(),
            bytes_written: outcome.bytes_written,
            size: format_megabytes(outcome.bytes_written),
            namespace: summary.namespace.to_string(),
            total_rows: summary.total_rows(),
            tables: summary.tables,
            completed_at: Utc::now(),
        },
        flags.format,
    )
}
