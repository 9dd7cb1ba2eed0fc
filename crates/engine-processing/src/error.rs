use connectors::sql::base::error::DbError;
use engine_core::error::{StateError, TimestampError};
use thiserror::Error;

/// Failures of a fetch cycle.
///
/// Only `StatePersist` is ambiguous: rows were read, but whether the cursor
/// moved past them is unknown, so they may be delivered again.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Log source unavailable: {source}")]
    SourceUnavailable {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Cursor state could not be loaded: {source}")]
    StateCorrupt {
        #[source]
        source: StateError,
    },

    #[error("Query for rows after id {last_id} failed: {source}")]
    Query {
        last_id: i64,
        #[source]
        source: DbError,
    },

    #[error("Timestamp of row {id} could not be corrected: {source}")]
    TimestampFormat {
        id: i64,
        #[source]
        source: TimestampError,
    },

    #[error("Rows up to id {last_id} were read but the cursor was not saved: {source}")]
    StatePersist {
        last_id: i64,
        #[source]
        source: StateError,
    },

    #[error("Batch size must be at least 1")]
    InvalidBatchSize,
}

impl FetchError {
    /// True when rows may have reached the caller without the cursor moving
    /// past them.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, FetchError::StatePersist { .. })
    }
}
