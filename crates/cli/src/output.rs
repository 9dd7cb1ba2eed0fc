use crate::error::CliError;
use chrono::Utc;
use engine_runtime::sink::{EventSink, JsonLinesSink};
use model::{events::LogEvent, pagination::cursor::CursorState, records::log_entry::LogEntry};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct CursorReport<'a> {
    path: &'a Path,
    exists: bool,
    #[serde(flatten)]
    cursor: &'a CursorState,
}

/// Prints one JSON event per line on stdout.
pub async fn print_events(entries: &[LogEntry]) -> Result<(), CliError> {
    let mut sink = JsonLinesSink::stdout();
    let created = Utc::now();
    for entry in entries {
        sink.publish(&LogEvent::from_entry(entry, created)).await?;
    }
    sink.flush().await?;
    Ok(())
}

pub fn print_cursor(
    path: &Path,
    exists: bool,
    cursor: &CursorState,
    as_json: bool,
) -> Result<(), CliError> {
    if as_json {
        let report = CursorReport {
            path,
            exists,
            cursor,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Cursor at {}:", path.display());
    println!("-----------------------------");
    println!("{:<16} {}", "State file", if exists { "present" } else { "missing" });
    let last_id = if cursor.is_unset() {
        "none (next cycle starts at the first row)".to_string()
    } else {
        cursor.last_id.to_string()
    };
    println!("{:<16} {}", "Last id", last_id);
    Ok(())
}
