//! Error types for the market data crate.
//!
//! Every variant is terminal for the current run: the job is scheduled, so the
//! retry unit is the next invocation rather than an in-process loop.

use thiserror::Error;

use crate::models::Instrument;

/// Errors that can occur while fetching quote series.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider answered with a non-success HTTP status.
    #[error("Provider error: {provider} - {instrument} returned HTTP {status}")]
    HttpStatus {
        provider: String,
        instrument: Instrument,
        status: u16,
    },

    /// A provider-specific error occurred (transport, body read, etc.).
    #[error("Provider error: {provider} - {message}")]
    ProviderError { provider: String, message: String },

    /// The provider answered but the payload did not have the expected shape.
    #[error("Malformed response from {provider} for {instrument}: {message}")]
    MalformedResponse {
        provider: String,
        instrument: Instrument,
        message: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout { provider: String },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    pub fn malformed(
        provider: impl Into<String>,
        instrument: Instrument,
        message: impl Into<String>,
    ) -> Self {
        Self::MalformedResponse {
            provider: provider.into(),
            instrument,
            message: message.into(),
        }
    }

    /// Maps a `reqwest` failure, keeping timeouts distinguishable.
    pub fn from_transport(provider: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                provider: provider.to_string(),
            }
        } else {
            Self::ProviderError {
                provider: provider.to_string(),
                message: error.to_string(),
            }
        }
    }
}
