use std::path::PathBuf;

use chrono::{DateTime, Utc};
use ocel_config::OcelConfig;
use ocel_fetch::format_megabytes;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DownloadArgs;
use crate::commands::shared::{fetch, resolve};
use crate::output::output;

#[derive(Debug, Serialize)]
struct DownloadResponse {
    url: String,
    destination: String,
    bytes_written: u64,
    size: String,
    content_length: Option<u64>,
    completed_at: DateTime<Utc>,
}

/// Handle `ocel-import download`.
pub async fn handle(
    args: &DownloadArgs,
    config: &OcelConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let url = resolve::source_url(args.url.as_deref(), config)?;
    let destination = destination(args, config)?;

    let outcome = fetch::download(&url, &destination, config).await?;

    output(
        &DownloadResponse {
            url,
            destination: outcome.path.display().to_string(),
            bytes_written: outcome.bytes_written,
            size: format_megabytes(outcome.bytes_written),
            content_length: outcome.content_length,
            completed_at: Utc::now(),
        },
        flags.format,
    )
}

/// `--folder-path` joined with the file name, else the volume path.
///
/// A plain folder is taken as is; only volume paths are validated.
fn destination(args: &DownloadArgs, config: &OcelConfig) -> anyhow::Result<PathBuf> {
    if let Some(folder) = &args.folder_path {
        let file_name = ocel_config::require(
            "volume.file_name",
            args.file_name.as_deref(),
            &config.volume.file_name,
        )?;
        return Ok(folder.join(file_name));
    }

    let volume = resolve::volume_path(
        args.file_path.as_deref(),
        resolve::VolumeFlags {
            file_name: args.file_name.as_deref(),
            ..Default::default()
        },
        config,
    )?;
    Ok(volume.to_path_buf())
}

#[cfg(test)]
mod tests {
    use ocel_config::VolumeConfig;
    use pretty_assertions::assert_eq;

    use super::*;

    fn args() -> DownloadArgs {
        DownloadArgs {
            url: None,
            folder_path: None,
            file_name: None,
            file_path: None,
        }
    }

    #[test]
    fn folder_and_file_name() {
        let args = DownloadArgs {
            folder_path: Some(PathBuf::from("/tmp/ocel")),
            file_name: Some("orders.json".to_string()),
            ..args()
        };
        assert_eq!(
            destination(&args, &OcelConfig::default()).unwrap(),
            PathBuf::from("/tmp/ocel/orders.json")
        );
    }

    #[test]
    fn folder_uses_configured_file_name() {
        let args = DownloadArgs {
            folder_path: Some(PathBuf::from("downloads")),
            ..args()
        };
        assert_eq!(
            destination(&args, &OcelConfig::default()).unwrap(),
            PathBuf::from("downloads/ocel.json")
        );
    }

    #[test]
    fn file_path_is_a_volume_path() {
        let args = DownloadArgs {
            file_path: Some("/Volumes/main/logistics/raw/orders.json".to_string()),
            ..args()
        };
        assert_eq!(
            destination(&args, &OcelConfig::default()).unwrap(),
            PathBuf::from("/Volumes/main/logistics/raw/orders.json")
        );
    }

    #[test]
    fn falls_back_to_configured_volume() {
        let config = OcelConfig {
            volume: VolumeConfig {
                root: "/data/volumes".to_string(),
                catalog: "main".to_string(),
                schema: "logistics".to_string(),
                volume: "raw".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            destination(&args(), &config).unwrap(),
            PathBuf::from("/data/volumes/main/logistics/raw/ocel.json")
        );
    }

    #[test]
    fn nothing_configured_is_an_error() {
        assert!(destination(&args(), &OcelConfig::default()).is_err());
    }
}
