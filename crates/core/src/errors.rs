//! Core error types for the dollar ledger job.
//!
//! Storage and notification crates convert their own errors into these
//! variants so that the job runner deals with a single taxonomy.

use std::time::Duration;

use thiserror::Error;

use dollar_sheets_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for a ledger run.
///
/// None of these are retried within a run; the next scheduled invocation is
/// the retry unit.
#[derive(Error, Debug)]
pub enum Error {
    /// The ledger is in a state the job cannot append to: last date in the
    /// future, unparsable cells, missing header columns, too few rows.
    #[error("Invalid ledger state: {0}")]
    InvalidLedgerState(String),

    /// The quote source was unreachable or answered with malformed data.
    #[error("Upstream fetch failed: {0}")]
    UpstreamFetch(#[from] MarketDataError),

    /// The ledger backend failed (transport, auth, API error).
    #[error("Ledger store error: {0}")]
    Ledger(String),

    #[error("Notification delivery failed: {0}")]
    Notification(String),

    #[error("Run exceeded its time budget of {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Missing configuration key: {0}")]
    MissingConfigKey(String),
}

impl Error {
    pub fn invalid_ledger_state(message: impl Into<String>) -> Self {
        Self::InvalidLedgerState(message.into())
    }
}

/// Renders an error and its chain of sources, one per line.
///
/// Used as the "stacktrace" of failure notifications.
pub fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut lines = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        lines.push(format!("caused by: {}", cause));
        source = cause.source();
    }
    lines.join("\n")
}
