use crate::error::FetchError;
use config::FetchContext;
use connectors::sql::{
    base::{error::DbError, source::LogSource},
    sqlite::adapter::SqliteAdapter,
};
use model::records::log_entry::LogEntry;
use std::path::Path;
use tracing::{info, warn};

pub mod config;
mod correction;

/// Tails the source log table, one bounded batch per call.
///
/// A cycle loads the cursor, reads rows after it, corrects their timestamps
/// and, when at least one row was read, saves the new cursor before the rows
/// are returned. An error at any step before saving leaves the cursor as it
/// was. A `StatePersist` error means the rows were read but may be delivered
/// again on the next cycle.
pub struct LogFetcher {
    source: Option<Box<dyn LogSource>>,
    ctx: FetchContext,
}

impl LogFetcher {
    /// Opens the SQLite log database at `source_path`. Not retried.
    pub async fn init(source_path: impl AsRef<Path>, ctx: FetchContext) -> Result<Self, FetchError> {
        let adapter = SqliteAdapter::open(source_path)
            .await
            .map_err(|err| FetchError::SourceUnavailable {
                source: Box::new(err),
            })?;
        Ok(Self::with_source(Box::new(adapter), ctx))
    }

    /// Wraps an already opened source.
    pub fn with_source(source: Box<dyn LogSource>, ctx: FetchContext) -> Self {
        Self {
            source: Some(source),
            ctx,
        }
    }

    pub fn is_open(&self) -> bool {
        self.source.is_some()
    }

    /// Runs one fetch cycle for the stream stored under `identity`.
    pub async fn fetch_batch(
        &mut self,
        identity: &str,
        batch_size: u32,
    ) -> Result<Vec<LogEntry>, FetchError> {
        if batch_size == 0 {
            return Err(FetchError::InvalidBatchSize);
        }

        let source = self
            .source
            .as_mut()
            .ok_or_else(|| FetchError::SourceUnavailable {
                source: Box::new(DbError::Closed),
            })?;

        info!(identity, "Starting log read operation");

        let path = self
            .ctx
            .resolver
            .resolve(identity)
            .map_err(|source| FetchError::StateCorrupt { source })?;
        let cursor = self
            .ctx
            .store
            .load(&path)
            .await
            .map_err(|source| FetchError::StateCorrupt { source })?;

        info!(
            last_id = cursor.last_id,
            batch_size, "Retrieving logs after cursor"
        );

        let rows = source
            .fetch_after(cursor.last_id, batch_size)
            .await
            .map_err(|source| FetchError::Query {
                last_id: cursor.last_id,
                source,
            })?;

        let Some(last_row_id) = rows.last().map(|row| row.id) else {
            info!(last_id = cursor.last_id, "No new log entries");
            return Ok(Vec::new());
        };

        let entries = correction::correct_rows(&self.ctx.corrector, self.ctx.policy, rows)?;

        let next = cursor.advance_to(last_row_id);
        self.ctx
            .store
            .save(&path, &next)
            .await
            .map_err(|source| FetchError::StatePersist {
                last_id: next.last_id,
                source,
            })?;

        info!(
            count = entries.len(),
            last_id = next.last_id,
            "Finished reading log entries"
        );
        Ok(entries)
    }

    /// Releases the source handle. Safe to call more than once.
    pub async fn close(&mut self) {
        let Some(mut source) = self.source.take() else {
            return;
        };

        info!("Shutting down log reader");
        if let Err(err) = source.close().await {
            warn!(error = %err, "Failed to close log source cleanly");
        }
    }
}
