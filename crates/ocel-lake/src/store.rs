//! Bulk writes of the eight flattened tables.
//!
//! Rows go in through the `DuckDB` Appender. The whole import runs in one
//! transaction: either all eight tables are replaced or none is.

use duckdb::{Appender, Connection, params};
use ocel_core::tables::{
    EVENT_ATTRIBUTES, EVENT_OBJECT_RELATIONSHIPS, EVENT_TYPES, EVENTS, EventAttributeRow,
    EventObjectRelationshipRow, EventRow, EventTypeRow, OBJECT_ATTRIBUTES, OBJECT_RELATIONSHIPS,
    OBJECT_TYPES, OBJECTS, ObjectAttributeRow, ObjectRelationshipRow, ObjectRow, ObjectTypeRow,
};
use ocel_core::{OcelTables, TableNamespace, TableSpec};
use serde::Serialize;

use crate::schemas::{create_schema_sql, create_table_sql, validate_identifier};
use crate::{LakeError, OcelLake};

/// One row type that can be appended to its table.
trait AppendRow {
    fn append(&self, appender: &mut Appender<'_>) -> duckdb::Result<()>;
}

impl AppendRow for ObjectTypeRow {
    fn append(&self, appender: &mut Appender<'_>) -> duckdb::Result<()> {
        appender.append_row(params![
            self.object_type_name,
            self.attribute_name,
            self.attribute_type
        ])
    }
}

impl AppendRow for EventTypeRow {
    fn append(&self, appender: &mut Appender<'_>) -> duckdb::Result<()> {
        appender.append_row(params![
            self.event_type_name,
            self.attribute_name,
            self.attribute_type
        ])
    }
}

impl AppendRow for ObjectRow {
    fn append(&self, appender: &mut Appender<'_>) -> duckdb::Result<()> {
        appender.append_row(params![self.object_id, self.object_type])
    }
}

impl AppendRow for ObjectAttributeRow {
    fn append(&self, appender: &mut Appender<'_>) -> duckdb::Result<()> {
        appender.append_row(params![
            self.object_id,
            self.attribute_name,
            self.attribute_value,
            self.attribute_time
        ])
    }
}

impl AppendRow for ObjectRelationshipRow {
    fn append(&self, appender: &mut Appender<'_>) -> duckdb::Result<()> {
        appender.append_row(params![
            self.source_object_id,
            self.target_object_id,
            self.qualifier
        ])
    }
}

impl AppendRow for EventRow {
    fn append(&self, appender: &mut Appender<'_>) -> duckdb::Result<()> {
        appender.append_row(params![self.event_id, self.event_type, self.event_time])
    }
}

impl AppendRow for EventAttributeRow {
    fn append(&self, appender: &mut Appender<'_>) -> duckdb::Result<()> {
        appender.append_row(params![
            self.event_id,
            self.attribute_name,
            self.attribute_value
        ])
    }
}

impl AppendRow for EventObjectRelationshipRow {
    fn append(&self, appender: &mut Appender<'_>) -> duckdb::Result<()> {
        appender.append_row(params![self.event_id, self.object_id, self.qualifier])
    }
}

/// Rows written to one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableWrite {
    /// Fully qualified name, `catalog.schema.table`.
    pub table: String,
    pub rows: usize,
}

/// Outcome of [`OcelLake::replace_tables`], tables in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteSummary {
    pub namespace: TableNamespace,
    pub tables: Vec<TableWrite>,
}

impl WriteSummary {
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|t| t.rows).sum()
    }
}

impl OcelLake {
    /// Replace all eight tables in `schema` with the given rows.
    ///
    /// The schema is created if missing. Tables are written in processing
    /// order inside a single transaction; on any failure the transaction is
    /// rolled back and the previous tables stay untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::InvalidIdentifier`] for a bad schema name and
    /// [`LakeError::DuckDb`] if any statement or append fails.
    pub fn replace_tables(
        &mut self,
        schema: &str,
        tables: &OcelTables,
    ) -> Result<WriteSummary, LakeError> {
        validate_identifier("schema", schema)?;
        let namespace = TableNamespace::new(self.catalog.clone(), schema);
        tracing::info!(%namespace, "creating tables");

        let counts = self
            .write_all(schema, tables)
            .inspect_err(|error| tracing::error!(%namespace, %error, "table write failed, rolled back"))?;

        let summary = WriteSummary {
            tables: counts
                .iter()
                .map(|(name, rows)| TableWrite {
                    table: namespace.qualified(name),
                    rows: *rows,
                })
                .collect(),
            namespace,
        };
        for write in &summary.tables {
            tracing::info!(table = %write.table, rows = write.rows, "created table");
        }
        Ok(summary)
    }

    fn write_all(
        &mut self,
        schema: &str,
        tables: &OcelTables,
    ) -> Result<Vec<(&'static str, usize)>, LakeError> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(&create_schema_sql(schema))?;

        let counts = vec![
            write_table(&tx, schema, &OBJECT_TYPES, &tables.object_types)?,
            write_table(&tx, schema, &EVENT_TYPES, &tables.event_types)?,
            write_table(&tx, schema, &OBJECTS, &tables.objects)?,
            write_table(&tx, schema, &OBJECT_ATTRIBUTES, &tables.object_attributes)?,
            write_table(&tx, schema, &OBJECT_RELATIONSHIPS, &tables.object_relationships)?,
            write_table(&tx, schema, &EVENTS, &tables.events)?,
            write_table(&tx, schema, &EVENT_ATTRIBUTES, &tables.event_attributes)?,
            write_table(
                &tx,
                schema,
                &EVENT_OBJECT_RELATIONSHIPS,
                &tables.event_object_relationships,
            )?,
        ];

        tx.commit()?;
        Ok(counts)
    }
}

fn write_table<R: AppendRow>(
    conn: &Connection,
    schema: &str,
    spec: &TableSpec,
    rows: &[R],
) -> Result<(&'static str, usize), LakeError> {
    conn.execute_batch(&create_table_sql(schema, spec))?;
    let mut appender = conn.appender_to_db(spec.name, schema)?;
    for row in rows {
        row.append(&mut appender)?;
    }
    appender.flush()?;
    tracing::debug!(schema, table = spec.name, rows = rows.len(), "staged table");
    Ok((spec.name, rows.len()))
}
