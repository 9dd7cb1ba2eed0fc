use crate::records::log_entry::LogEntry;
use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use std::fmt::Debug;

/// A trait for events handed to an event sink.
pub trait Event: Send + Sync + Debug + 'static {
    /// Returns a unique identifier for this event type.
    fn event_type(&self) -> &'static str;
}

/// Normalized, transport-neutral event built from one log entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEvent {
    #[serde(rename = "@timestamp")]
    pub timestamp: DateTime<FixedOffset>,
    pub event: EventFields,
    pub message: String,
    pub log: LogFields,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventFields {
    pub id: i64,
    pub module: String,
    pub created: DateTime<Utc>,
    pub severity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogFields {
    pub origin: String,
    pub error_code: i64,
    pub class_color: String,
    pub fractional_seconds: i64,
    pub timestamp_corrected: bool,
}

impl LogEvent {
    /// Maps an entry onto the event layout; `created` is the publish time.
    pub fn from_entry(entry: &LogEntry, created: DateTime<Utc>) -> Self {
        LogEvent {
            timestamp: entry.timestamp,
            event: EventFields {
                id: entry.id,
                module: entry.category.clone(),
                created,
                severity: entry.priority,
            },
            message: entry.message.clone(),
            log: LogFields {
                origin: entry.origin.clone(),
                error_code: entry.error_code,
                class_color: entry.class_color.clone(),
                fractional_seconds: entry.fractional_seconds,
                timestamp_corrected: entry.timestamp_corrected,
            },
        }
    }
}

impl Event for LogEvent {
    fn event_type(&self) -> &'static str {
        "log.entry"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry() -> LogEntry {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        LogEntry {
            id: 7,
            timestamp: offset.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap(),
            fractional_seconds: 250,
            category: "Z-Wave".into(),
            message: "Device Front Door set to Locked".into(),
            origin: "Z-Wave Plugin".into(),
            priority: 2,
            error_code: 0,
            class_color: "#000000".into(),
            timestamp_corrected: true,
        }
    }

    #[test]
    fn maps_entry_fields_onto_event_layout() {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let event = LogEvent::from_entry(&entry(), created);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["@timestamp"], "2006-01-02T15:04:05-05:00");
        assert_eq!(json["event"]["id"], 7);
        assert_eq!(json["event"]["module"], "Z-Wave");
        assert_eq!(json["event"]["severity"], 2);
        assert_eq!(json["message"], "Device Front Door set to Locked");
        assert_eq!(json["log"]["origin"], "Z-Wave Plugin");
        assert_eq!(event.event_type(), "log.entry");
    }
}
