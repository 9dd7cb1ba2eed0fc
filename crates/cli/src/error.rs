use engine_core::error::StateError;
use engine_processing::error::FetchError;
use engine_runtime::error::{RuntimeError, SinkError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read the configuration file: {0}")]
    ConfigFileRead(#[from] std::io::Error),

    #[error("Failed to parse the configuration file as TOML: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("State error: {0}")]
    State(#[from] StateError),

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Failed to write events: {0}")]
    Sink(#[from] SinkError),

    #[error("Polling stopped: {0}")]
    Runtime(#[from] RuntimeError),

    #[error("Invalid cursor value {0}: must be -1 or a row id")]
    InvalidCursor(i64),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}
