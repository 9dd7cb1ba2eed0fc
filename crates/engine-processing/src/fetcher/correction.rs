use crate::{error::FetchError, fetcher::config::CorrectionPolicy};
use engine_core::time::corrector::TimestampCorrector;
use model::records::log_entry::{LogEntry, RawLogRow};
use tracing::warn;

/// Corrects every row of a batch, applying `policy` to rows that fail.
pub(crate) fn correct_rows(
    corrector: &TimestampCorrector,
    policy: CorrectionPolicy,
    rows: Vec<RawLogRow>,
) -> Result<Vec<LogEntry>, FetchError> {
    let mut entries = Vec::with_capacity(rows.len());

    for raw in rows {
        let err = match corrector.correct(&raw.logged_at) {
            Ok(timestamp) => {
                entries.push(LogEntry::from_raw(raw, timestamp, true));
                continue;
            }
            Err(err) => err,
        };

        match policy {
            CorrectionPolicy::KeepRaw => {
                warn!(id = raw.id, error = %err, "Keeping uncorrected timestamp");
                entries.push(LogEntry::uncorrected(raw));
            }
            CorrectionPolicy::DropRow => {
                warn!(id = raw.id, error = %err, "Dropping row with uncorrectable timestamp");
            }
            CorrectionPolicy::FailBatch => {
                return Err(FetchError::TimestampFormat {
                    id: raw.id,
                    source: err,
                });
            }
        }
    }

    Ok(entries)
}
