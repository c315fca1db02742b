use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Download a document into a folder or a volume path.
    Download(DownloadArgs),
    /// Flatten a local OCEL 2.0 document into the tables of a catalog schema.
    Write(WriteArgs),
    /// Download a document into a volume, then flatten it into that volume's schema.
    Import(ImportArgs),
    /// List the tables and columns every import writes.
    Tables,
}

/// Arguments for `ocel-import download`.
///
/// The destination is `--file-path`, or `--folder-path` joined with
/// `--file-name`, or else the configured volume.
#[derive(Clone, Debug, Args)]
pub struct DownloadArgs {
    /// URL of the document.
    #[arg(long)]
    pub url: Option<String>,
    /// Destination directory, created if missing.
    #[arg(long, alias = "folder_path", conflicts_with = "file_path")]
    pub folder_path: Option<PathBuf>,
    /// Destination file name.
    #[arg(long, alias = "file_name", conflicts_with = "file_path")]
    pub file_name: Option<String>,
    /// Full volume path, `<root>/<catalog>/<schema>/<volume>/<file_name>`.
    #[arg(long, alias = "file_path")]
    pub file_path: Option<String>,
}

/// Arguments for `ocel-import write`.
#[derive(Clone, Debug, Args)]
pub struct WriteArgs {
    /// Catalog the tables are written into.
    #[arg(long)]
    pub catalog: Option<String>,
    /// Schema the tables are written into.
    #[arg(long)]
    pub schema: Option<String>,
    /// Local OCEL 2.0 JSON document. Defaults to the configured volume file.
    #[arg(long, alias = "json_path")]
    pub json_path: Option<PathBuf>,
}

/// Arguments for `ocel-import import`.
#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// URL of the document.
    #[arg(long)]
    pub url: Option<String>,
    /// Full volume path, `<root>/<catalog>/<schema>/<volume>/<file_name>`.
    #[arg(
        long,
        alias = "file_path",
        conflicts_with_all = ["catalog", "schema", "volume", "file_name"]
    )]
    pub file_path: Option<String>,
    #[arg(long)]
    pub catalog: Option<String>,
    #[arg(long)]
    pub schema: Option<String>,
    #[arg(long)]
    pub volume: Option<String>,
    #[arg(long, alias = "file_name")]
    pub file_name: Option<String>,
}
