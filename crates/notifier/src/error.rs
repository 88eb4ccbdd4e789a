//! Error types for the notifier crate.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NotifierError>;

#[derive(Debug, Error)]
pub enum NotifierError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success answer from the notification service
    #[error("Notification service error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl NotifierError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

impl From<NotifierError> for dollar_sheets_core::Error {
    fn from(err: NotifierError) -> Self {
        dollar_sheets_core::Error::Notification(err.to_string())
    }
}
