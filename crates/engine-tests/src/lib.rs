#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use engine_core::{
    state::{file_store::JsonFileStore, paths::DataDirResolver},
    time::{clock::FixedZoneClock, corrector::TimestampCorrector},
};
use engine_processing::fetcher::{LogFetcher, config::FetchContext};
use std::{path::PathBuf, sync::Arc};
use tempfile::TempDir;

pub mod engine;
pub mod utils;

use utils::LogDb;

const STATE_FILE: &str = "logtail_state.json";

/// A seeded log database plus an empty data directory for cursor files.
pub struct Harness {
    pub db: LogDb,
    pub data_dir: TempDir,
}

impl Harness {
    pub async fn with_ids(ids: impl IntoIterator<Item = i64>) -> Self {
        let db = LogDb::create().await;
        db.insert_ids(ids).await;
        Self {
            db,
            data_dir: tempfile::tempdir().expect("create data dir"),
        }
    }

    pub fn state_path(&self) -> PathBuf {
        self.data_dir.path().join(STATE_FILE)
    }

    /// Fetch context pinned to New York in winter, so corrections are EST.
    pub fn context(&self) -> FetchContext {
        let now: DateTime<Utc> = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        FetchContext::new(
            Arc::new(JsonFileStore::new()),
            Arc::new(DataDirResolver::new(self.data_dir.path())),
            TimestampCorrector::new(Arc::new(FixedZoneClock::pinned(
                chrono_tz::America::New_York,
                now,
            ))),
        )
    }

    pub async fn fetcher(&self) -> LogFetcher {
        LogFetcher::init(self.db.path(), self.context())
            .await
            .expect("open log database")
    }

    pub fn write_state(&self, contents: &str) {
        std::fs::write(self.state_path(), contents).expect("write state file");
    }

    pub fn read_state(&self) -> String {
        std::fs::read_to_string(self.state_path()).expect("read state file")
    }
}
