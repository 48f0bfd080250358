use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Fetch failed for key {key}: {reason}")]
    Fetch { key: String, reason: String },

    #[error("Search endpoint returned {status} for key {key}")]
    Status {
        key: String,
        status: reqwest::StatusCode,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed record #{index}: {record:?}")]
    MalformedRecord { index: usize, record: String },

    #[error("Failed to append to sink {}: {source}", .path.display())]
    SinkWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read key source {}: {source}", .path.display())]
    KeySource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Errors scoped to a single key. The pipeline logs these and moves on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Fetch { .. }
                | Error::Status { .. }
                | Error::Network(_)
                | Error::MalformedRecord { .. }
        )
    }
}
