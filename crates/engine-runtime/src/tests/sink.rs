use crate::sink::{EventSink, JsonLinesSink};
use chrono::{FixedOffset, TimeZone, Utc};
use model::{events::LogEvent, records::log_entry::LogEntry};

fn event(id: i64) -> LogEvent {
    let offset = FixedOffset::west_opt(5 * 3600).unwrap();
    let entry = LogEntry {
        id,
        timestamp: offset.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap(),
        fractional_seconds: 0,
        category: "Z-Wave".into(),
        message: "Device Front Door set to Locked".into(),
        origin: "".into(),
        priority: 2,
        error_code: 0,
        class_color: "0".into(),
        timestamp_corrected: true,
    };
    LogEvent::from_entry(&entry, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
}

#[tokio::test]
async fn writes_one_document_per_line() {
    let mut sink = JsonLinesSink::new(Vec::new());

    sink.publish(&event(1)).await.unwrap();
    sink.publish(&event(2)).await.unwrap();
    sink.flush().await.unwrap();

    let out = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);

    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["event"]["id"], 1);
    assert_eq!(first["event"]["module"], "Z-Wave");
    assert_eq!(first["event"]["severity"], 2);
    assert_eq!(first["@timestamp"], "2006-01-02T15:04:05-05:00");
    assert_eq!(first["message"], "Device Front Door set to Locked");
    assert!(out.ends_with('\n'));
}
