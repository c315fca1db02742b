use ocel_core::{ColumnSpec, TABLES, TableSpec};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
struct TablesResponse {
    /// In the order every import writes them.
    tables: Vec<TableEntry>,
}

#[derive(Debug, Serialize)]
struct TableEntry {
    name: &'static str,
    /// Ready to paste into a `SELECT`.
    column_list: String,
    columns: &'static [ColumnSpec],
}

impl From<&TableSpec> for TableEntry {
    fn from(spec: &TableSpec) -> Self {
        Self {
            name: spec.name,
            column_list: spec.column_list(),
            columns: spec.columns,
        }
    }
}

fn response() -> TablesResponse {
    TablesResponse {
        tables: TABLES.iter().map(TableEntry::from).collect(),
    }
}

/// Handle `ocel-import tables`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&response(), flags.format)
}
