use engine_processing::error::FetchError;
use thiserror::Error;

/// Errors that stop the polling loop.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Fetch cycle failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write event: {0}")]
    Io(#[from] std::io::Error),
}
