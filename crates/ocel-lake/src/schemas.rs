//! DDL for the flattened tables and identifier handling.
//!
//! Every column is `TEXT`; only `object_attributes.attribute_time` may be NULL.
//! Tables are always created with `CREATE OR REPLACE` so a run fully replaces
//! the previous contents.

use ocel_core::TableSpec;

use crate::LakeError;

/// Quote an identifier for `DuckDB`, doubling embedded quotes.
#[must_use]
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Reject names that are empty or contain anything beyond `[A-Za-z0-9_-]`.
///
/// # Errors
///
/// Returns [`LakeError::InvalidIdentifier`] for a rejected name.
pub fn validate_identifier(kind: &'static str, value: &str) -> Result<(), LakeError> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(LakeError::InvalidIdentifier {
            kind,
            value: value.to_string(),
        })
    }
}

/// `CREATE SCHEMA IF NOT EXISTS "<schema>"`.
#[must_use]
pub fn create_schema_sql(schema: &str) -> String {
    format!("CREATE SCHEMA IF NOT EXISTS {};", quote_ident(schema))
}

/// `CREATE OR REPLACE TABLE "<schema>"."<table>" (...)` for one table spec.
#[must_use]
pub fn create_table_sql(schema: &str, spec: &TableSpec) -> String {
    let columns = spec
        .columns
        .iter()
        .map(|column| {
            let null = if column.nullable { "" } else { " NOT NULL" };
            format!("    {} TEXT{null}", quote_ident(column.name))
        })
        .collect::<Vec<_>>()
        .join(",\n");
    format!(
        "CREATE OR REPLACE TABLE {}.{} (\n{columns}\n);",
        quote_ident(schema),
        quote_ident(spec.name)
    )
}
