use chrono::NaiveDateTime;
use model::records::log_entry::RawLogRow;
use sqlx::{Row, sqlite::SqliteRow};

const COL_ID: &str = "id";
const COL_LOGGED_AT: &str = "logged_at";
const COL_FRACTION: &str = "fractional_seconds";
const COL_CATEGORY: &str = "category";
const COL_MESSAGE: &str = "message";
const COL_ORIGIN: &str = "origin";
const COL_PRIORITY: &str = "priority";
const COL_ERROR_CODE: &str = "error_code";
const COL_CLASS_COLOR: &str = "class_color";

/// Decodes one row of the fetch query.
///
/// The stored datetime has no zone information; like the source driver, it is
/// read as UTC.
pub(crate) fn decode_log_row(row: &SqliteRow) -> Result<RawLogRow, sqlx::Error> {
    let logged_at: NaiveDateTime = row.try_get(COL_LOGGED_AT)?;

    Ok(RawLogRow {
        id: row.try_get(COL_ID)?,
        logged_at: logged_at.and_utc(),
        fractional_seconds: row.try_get(COL_FRACTION)?,
        category: row.try_get(COL_CATEGORY)?,
        message: row.try_get(COL_MESSAGE)?,
        origin: row.try_get(COL_ORIGIN)?,
        priority: row.try_get(COL_PRIORITY)?,
        error_code: row.try_get(COL_ERROR_CODE)?,
        class_color: row.try_get(COL_CLASS_COLOR)?,
    })
}
