use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// A log row exactly as decoded from the source table.
///
/// `logged_at` carries the source's UTC label even though the wall-clock
/// digits are in the operator's zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLogRow {
    pub id: i64,
    pub logged_at: DateTime<Utc>,
    pub fractional_seconds: i64,
    pub category: String,
    pub message: String,
    pub origin: String,
    pub priority: i64,
    pub error_code: i64,
    pub class_color: String,
}

/// One log row after timestamp correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub timestamp: DateTime<FixedOffset>,
    pub fractional_seconds: i64,
    pub category: String,
    pub message: String,
    pub origin: String,
    pub priority: i64,
    pub error_code: i64,
    pub class_color: String,
    /// False when the raw timestamp was kept because correction failed.
    pub timestamp_corrected: bool,
}

impl LogEntry {
    /// Builds an entry from a raw row and the timestamp to expose.
    pub fn from_raw(raw: RawLogRow, timestamp: DateTime<FixedOffset>, corrected: bool) -> Self {
        LogEntry {
            id: raw.id,
            timestamp,
            fractional_seconds: raw.fractional_seconds,
            category: raw.category,
            message: raw.message,
            origin: raw.origin,
            priority: raw.priority,
            error_code: raw.error_code,
            class_color: raw.class_color,
            timestamp_corrected: corrected,
        }
    }

    /// Builds an entry that keeps the source's UTC-labelled timestamp.
    pub fn uncorrected(raw: RawLogRow) -> Self {
        let timestamp = raw.logged_at.fixed_offset();
        Self::from_raw(raw, timestamp, false)
    }
}
