use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StateError {
    #[error("I/O error on state file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed state file {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize cursor state: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Invalid state file identity '{0}'")]
    InvalidIdentity(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("expected '{rendered}' to end in ' UTC'")]
    MissingUtcMarker { rendered: String },

    #[error("failed to reparse '{text}': {reason}")]
    Reparse { text: String, reason: String },

    #[error("zone '{found}' in '{text}' is not the local zone '{expected}'")]
    ZoneMismatch {
        text: String,
        found: String,
        expected: String,
    },
}
