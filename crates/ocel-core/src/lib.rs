//! # ocel-core
//!
//! Core types and the relational flattening of OCEL 2.0 documents.
//!
//! This crate is shared by every other crate in the workspace:
//! - [`document`]: the OCEL 2.0 JSON object model (object/event types, objects, events)
//! - [`tables`]: the eight flat row sets and the table catalogue they are written with
//! - [`volume`]: `<root>/<catalog>/<schema>/<volume>/<file_name>` paths and table namespaces
//! - [`errors`]: schema, path, and I/O errors raised while reading a document
//!
//! Flattening is pure: it never touches storage. Persisting the rows is the job
//! of `ocel-lake`.

pub mod document;
pub mod errors;
pub mod tables;
pub mod volume;

pub use document::OcelDocument;
pub use errors::CoreError;
pub use tables::{ColumnSpec, OcelTables, TABLES, TableSpec, stringify_value};
pub use volume::{TableNamespace, VolumePath};
