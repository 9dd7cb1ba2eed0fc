use std::path::PathBuf;
use thiserror::Error;

/// All errors coming from the query layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Any SQL driver error, including a lost connection.
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),

    /// The source handle was already released.
    #[error("Source connection is closed")]
    Closed,
}

/// Errors happening while opening the source store.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// SQLx failed to open the database file.
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: sqlx::Error,
    },

    /// The database opened but does not contain the log table.
    #[error("Table '{table}' not found in {}", .path.display())]
    MissingTable { path: PathBuf, table: String },
}
