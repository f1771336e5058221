//! Error types for reddit_migrate

use std::path::PathBuf;

use thiserror::Error;

/// Result type for reddit_migrate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for reddit_migrate
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to read {}: {source}", path.display())]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{message}")]
    ApiError { status: u16, message: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Output error: {0}")]
    OutputError(#[from] std::io::Error),

    #[error("Logging error: {0}")]
    LoggingError(String),
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::SerializationError(error.to_string())
    }
}
