//! Single-run job wrapper.
//!
//! Applies the wall-clock budget, maps the sync result to a [`RunOutcome`]
//! and sends exactly one notification per run.

use chrono_tz::Tz;
use log::{error, info, warn};
use std::sync::Arc;
use std::time::Duration;

use super::service::{AppendOutcome, LedgerSyncServiceTrait};
use crate::errors::{error_chain, Error};
use crate::notifications::{NotificationSink, RunOutcome};
use crate::utils::time_utils::ledger_today;

pub struct JobRunner {
    service: Arc<dyn LedgerSyncServiceTrait>,
    sink: Arc<dyn NotificationSink>,
    budget: Duration,
    timezone: Tz,
}

impl JobRunner {
    pub fn new(
        service: Arc<dyn LedgerSyncServiceTrait>,
        sink: Arc<dyn NotificationSink>,
        budget: Duration,
        timezone: Tz,
    ) -> Self {
        Self {
            service,
            sink,
            budget,
            timezone,
        }
    }

    /// Runs one sync for the current ledger day.
    pub async fn run(&self) -> RunOutcome {
        let today = ledger_today(self.timezone);
        self.run_for(today).await
    }

    /// Runs one sync as if `today` were the current ledger day.
    pub async fn run_for(&self, today: chrono::NaiveDate) -> RunOutcome {
        info!(
            "Starting ledger run for {} ({}), budget {}ms",
            today,
            self.timezone,
            self.budget.as_millis()
        );

        let outcome =
            match tokio::time::timeout(self.budget, self.service.append_missing_days(today)).await {
                Ok(Ok(AppendOutcome::Appended {
                    rows_appended,
                    today,
                    yesterday,
                })) => RunOutcome::Success {
                    rows_appended,
                    today,
                    yesterday,
                },
                Ok(Ok(AppendOutcome::NothingToAppend)) => RunOutcome::NoRowsToAppend,
                Ok(Err(e)) => {
                    error!("Ledger run failed: {}", e);
                    RunOutcome::Failed {
                        message: e.to_string(),
                        trace: error_chain(&e),
                    }
                }
                Err(_) => {
                    error!("{}", Error::Timeout(self.budget));
                    RunOutcome::TimedOut {
                        budget: self.budget,
                    }
                }
            };

        if let Err(e) = self.sink.notify(&outcome).await {
            warn!("Failed to send {} notification: {}", outcome.label(), e);
        }

        info!("Ledger run finished: {}", outcome.label());
        outcome
    }
}
