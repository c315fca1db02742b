//! # ocel-lake
//!
//! `DuckDB` storage for flattened OCEL tables.
//!
//! ## Storage layout
//!
//! Each catalog is one `DuckDB` file, `<lake_dir>/<catalog>.duckdb`. Schemas
//! are `DuckDB` schemas inside that file and hold the eight tables:
//! `object_types`, `event_types`, `objects`, `object_attributes`,
//! `object_relationships`, `events`, `event_attributes`,
//! `event_object_relationships`.
//!
//! Every import replaces all eight tables of its schema; there is no
//! incremental merge.

pub mod error;
pub mod schemas;
pub mod store;

pub use error::LakeError;
pub use store::{TableWrite, WriteSummary};

use std::path::{Path, PathBuf};

use duckdb::{Connection, params};

use crate::schemas::{quote_ident, validate_identifier};

/// Catalog name `DuckDB` gives an in-memory database.
const IN_MEMORY_CATALOG: &str = "memory";

/// One catalog of flattened OCEL tables.
pub struct OcelLake {
    conn: Connection,
    catalog: String,
}

impl OcelLake {
    /// Open or create the catalog file `<dir>/<catalog>.duckdb`.
    ///
    /// Creates `dir` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::InvalidIdentifier`] for a bad catalog name,
    /// [`LakeError::Io`] if the directory cannot be created, and
    /// [`LakeError::DuckDb`] if the file cannot be opened.
    pub fn open(dir: &Path, catalog: &str) -> Result<Self, LakeError> {
        validate_identifier("catalog", catalog)?;
        std::fs::create_dir_all(dir)?;
        let path = Self::catalog_path(dir, catalog);
        tracing::debug!(path = %path.display(), "opening catalog");
        let conn = Connection::open(&path)?;
        Ok(Self {
            conn,
            catalog: catalog.to_string(),
        })
    }

    /// Open an in-memory catalog (for testing).
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::DuckDb`] if the database cannot be created.
    pub fn open_in_memory() -> Result<Self, LakeError> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
            catalog: IN_MEMORY_CATALOG.to_string(),
        })
    }

    /// File backing `catalog` inside `dir`.
    #[must_use]
    pub fn catalog_path(dir: &Path, catalog: &str) -> PathBuf {
        dir.join(format!("{catalog}.duckdb"))
    }

    /// Catalog name this lake writes into.
    #[must_use]
    pub fn catalog(&self) -> &str {
        &self.catalog
    }

    /// Access the underlying `DuckDB` connection.
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Number of rows in `schema.table`.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::DuckDb`] if the table does not exist.
    pub fn count_rows(&self, schema: &str, table: &str) -> Result<u64, LakeError> {
        validate_identifier("schema", schema)?;
        let count: i64 = self.conn.query_row(
            &format!(
                "SELECT count(*) FROM {}.{}",
                quote_ident(schema),
                quote_ident(table)
            ),
            [],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// Names of the base tables in `schema`, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::DuckDb`] if the catalog query fails.
    pub fn list_tables(&self, schema: &str) -> Result<Vec<String>, LakeError> {
        let mut stmt = self.conn.prepare(
            "SELECT table_name FROM information_schema.tables
             WHERE table_catalog = current_database()
               AND table_schema = ?
               AND table_type = 'BASE TABLE'
             ORDER BY table_name",
        )?;
        let names = stmt
            .query_map(params![schema], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }
}
