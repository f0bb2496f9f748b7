//! Error types for the bmi_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for bmi_core operations
///
/// Only configuration, export and storage writes surface errors. Unreadable
/// history is recovered inside [`crate::HistoryStore::open`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV export error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration could not be serialized or is unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// A storage backend rejected an operation on `key`
    #[error("Storage error for key '{key}': {message}")]
    Storage { key: String, message: String },
}

impl Error {
    pub(crate) fn storage(key: &str, message: impl Into<String>) -> Self {
        Error::Storage {
            key: key.to_string(),
            message: message.into(),
        }
    }
}
