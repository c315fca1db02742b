//! Lake error types.

/// Errors that can occur in the table storage layer.
#[derive(Debug, thiserror::Error)]
pub enum LakeError {
    /// `DuckDB` operation failed.
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    /// A catalog or schema name cannot be used as an identifier.
    #[error("Invalid {kind} name '{value}': use letters, digits, '_' or '-'")]
    InvalidIdentifier {
        /// What the name was for (`catalog`, `schema`).
        kind: &'static str,
        /// The rejected name.
        value: String,
    },

    /// I/O error (creating the lake directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
