use crate::sql::{
    base::{
        error::{ConnectorError, DbError},
        source::LogSource,
    },
    sqlite::row::decode_log_row,
};
use async_trait::async_trait;
use model::records::log_entry::RawLogRow;
use sqlx::{
    ConnectOptions, Connection, Row,
    sqlite::{SqliteConnectOptions, SqliteConnection},
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const LOG_TABLE: &str = "Log";

const QUERY_FETCH_AFTER_SQL: &str = include_str!("sql/fetch_after.sql");
const QUERY_TABLE_EXISTS_SQL: &str = include_str!("sql/table_exists.sql");

/// Read-only handle on a HomeSeer log database.
pub struct SqliteAdapter {
    conn: Option<SqliteConnection>,
    path: PathBuf,
}

impl SqliteAdapter {
    /// Opens the database at `path` read-only and checks for the log table.
    ///
    /// The file is never created.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, ConnectorError> {
        let path = path.as_ref().to_path_buf();
        info!(path = %path.display(), "Opening log database");

        let open_err = |source| ConnectorError::Open {
            path: path.clone(),
            source,
        };

        let mut conn = SqliteConnectOptions::new()
            .filename(&path)
            .read_only(true)
            .create_if_missing(false)
            .connect()
            .await
            .map_err(open_err)?;

        let exists: i64 = sqlx::query(QUERY_TABLE_EXISTS_SQL)
            .bind(LOG_TABLE)
            .fetch_one(&mut conn)
            .await
            .and_then(|row| row.try_get(0))
            .map_err(open_err)?;

        if exists == 0 {
            // Best effort; the open already failed from the caller's view.
            let _ = conn.close().await;
            return Err(ConnectorError::MissingTable {
                path,
                table: LOG_TABLE.to_string(),
            });
        }

        Ok(SqliteAdapter {
            conn: Some(conn),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }
}

#[async_trait]
impl LogSource for SqliteAdapter {
    async fn fetch_after(&mut self, last_id: i64, limit: u32) -> Result<Vec<RawLogRow>, DbError> {
        let conn = self.conn.as_mut().ok_or(DbError::Closed)?;

        let rows = sqlx::query(QUERY_FETCH_AFTER_SQL)
            .bind(last_id)
            .bind(i64::from(limit))
            .fetch_all(conn)
            .await?;

        debug!(last_id, limit, fetched = rows.len(), "Fetched log rows");

        let entries = rows
            .iter()
            .map(decode_log_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    async fn close(&mut self) -> Result<(), DbError> {
        if let Some(conn) = self.conn.take() {
            info!(path = %self.path.display(), "Closing log database");
            conn.close().await?;
        }
        Ok(())
    }
}
