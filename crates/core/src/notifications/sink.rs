//! Notification sink trait.

use async_trait::async_trait;

use super::model::RunOutcome;
use crate::errors::Result;

/// Delivers a run outcome to an external channel.
///
/// Sinks own formatting. Delivery errors are reported to the caller, which
/// logs them without changing the outcome of the run.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, outcome: &RunOutcome) -> Result<()>;
}
