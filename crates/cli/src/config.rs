use crate::error::CliError;
use chrono_tz::Tz;
use engine_processing::fetcher::config::CorrectionPolicy;
use serde::Deserialize;
use std::{
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};
use tracing::info;

const DEFAULT_SOURCE_PATH: &str = "/usr/local/HomeSeer/Data/HomeSeerLog.hsd";
const DEFAULT_STATE_FILE: &str = "logtail_state.json";
const DEFAULT_DATA_DIR: &str = ".logtail/data";

/// Settings read from the TOML config file. Every key is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Seconds between fetch cycles.
    pub poll_seconds: u64,
    /// Cursor file name, resolved inside `data_dir`.
    pub state_file: String,
    pub source_path: PathBuf,
    pub log_batch_size: u32,
    /// Defaults to `~/.logtail/data`.
    pub data_dir: Option<PathBuf>,
    /// IANA zone name. When unset the host zone is detected.
    pub timezone: Option<String>,
    pub on_timestamp_error: CorrectionPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            poll_seconds: 5,
            state_file: DEFAULT_STATE_FILE.to_string(),
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            log_batch_size: 1000,
            data_dir: None,
            timezone: None,
            on_timestamp_error: CorrectionPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Reads and validates `path`, or returns the defaults when no path is given.
    pub async fn load(path: Option<&str>) -> Result<Self, CliError> {
        let config = match path {
            Some(path) => {
                info!(path, "Loading configuration");
                let source = tokio::fs::read_to_string(path).await?;
                Self::parse(&source)?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn parse(source: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(source)?)
    }

    pub fn validate(&self) -> Result<(), CliError> {
        if self.poll_seconds == 0 {
            return Err(CliError::InvalidConfig(
                "poll_seconds must be at least 1".into(),
            ));
        }
        if self.log_batch_size == 0 {
            return Err(CliError::InvalidConfig(
                "log_batch_size must be at least 1".into(),
            ));
        }
        if self.state_file.trim().is_empty() {
            return Err(CliError::InvalidConfig("state_file must not be empty".into()));
        }
        self.zone()?;
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_seconds)
    }

    /// The configured zone, if any.
    pub fn zone(&self) -> Result<Option<Tz>, CliError> {
        self.timezone
            .as_deref()
            .map(|name| {
                Tz::from_str(name)
                    .map_err(|_| CliError::InvalidConfig(format!("unknown timezone '{name}'")))
            })
            .transpose()
    }

    pub fn data_dir(&self) -> Result<PathBuf, CliError> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Unexpected("Could not determine home directory".into()))?;
        Ok(home.join(DEFAULT_DATA_DIR))
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }
}
