use crate::sql::base::error::DbError;
use async_trait::async_trait;
use model::records::log_entry::RawLogRow;

/// Read side of an append-only, id-ordered log table.
///
/// Implementations hold a single long-lived handle. `&mut self` keeps at most
/// one query in flight per source.
#[async_trait]
pub trait LogSource: Send {
    /// Rows with `id > last_id`, ascending by id, at most `limit` of them.
    async fn fetch_after(&mut self, last_id: i64, limit: u32) -> Result<Vec<RawLogRow>, DbError>;

    /// Releases the handle. Calling it again is a no-op.
    async fn close(&mut self) -> Result<(), DbError>;
}
