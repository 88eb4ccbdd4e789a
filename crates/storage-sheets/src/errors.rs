//! Storage-specific error types for Google Sheets operations.
//!
//! These errors are internal to the storage layer and are converted to
//! `dollar_sheets_core::Error` before being returned to callers.

use thiserror::Error;
use dollar_sheets_core::errors::Error;

/// Storage-specific errors that wrap HTTP, JWT and API failures.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheets API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to sign service account token: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StorageError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Error::Ledger(err.to_string())
    }
}
