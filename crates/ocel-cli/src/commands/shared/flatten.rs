use std::path::Path;

use anyhow::Context;
use ocel_core::{OcelDocument, OcelTables, TableNamespace};
use ocel_lake::{OcelLake, WriteSummary};

use crate::progress::Progress;

/// Read the document at `json_path` and replace the eight tables of `namespace`.
///
/// Every table is derived before the catalog is opened, so a malformed
/// document never touches storage.
pub fn flatten_into_lake(
    json_path: &Path,
    namespace: &TableNamespace,
    lake_dir: &Path,
) -> anyhow::Result<WriteSummary> {
    let spinner = Progress::spinner(&format!("writing tables into {namespace}"));
    let result = flatten(json_path, namespace, lake_dir);
    match &result {
        Ok(summary) => spinner.finish_ok(&format!(
            "wrote {} rows into {namespace}",
            summary.total_rows()
        )),
        Err(_) => spinner.finish_err("table write failed"),
    }
    result
}

fn flatten(
    json_path: &Path,
    namespace: &TableNamespace,
    lake_dir: &Path,
) -> anyhow::Result<WriteSummary> {
    tracing::info!(path = %json_path.display(), "reading OCEL document");
    let document = OcelDocument::from_path(json_path)
        .inspect_err(|error| tracing::error!(path = %json_path.display(), %error, "failed to read OCEL document"))
        .with_context(|| format!("failed to read OCEL document {}", json_path.display()))?;

    let tables = OcelTables::from_document(&document);
    tracing::debug!(counts = ?tables.row_counts(), "flattened document");

    let mut lake = OcelLake::open(lake_dir, &namespace.catalog)
        .inspect_err(|error| tracing::error!(catalog = %namespace.catalog, %error, "failed to open catalog"))
        .with_context(|| format!("failed to open catalog '{}'", namespace.catalog))?;

    lake.replace_tables(&namespace.schema, &tables)
        .with_context(|| format!("failed to write tables into {namespace}"))
}
