//! Ledger synchronization service.
//!
//! ```text
//! LedgerSyncService
//!       │
//!       ├─► LedgerStore (last row, append, last two rows)
//!       ├─► QuoteProvider (five concurrent chart fetches)
//!       └─► gap_fill (missing days + carry-forward rows)
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::future::try_join;
use log::{debug, info};
use std::sync::Arc;

use dollar_sheets_market_data::{fetch_quote_series, QuoteProvider};

use crate::errors::{Error, Result};
use crate::ledger::{compute_missing_dates, generate_rows, DailySnapshot, LedgerStore};

/// What a sync pass did to the ledger.
#[derive(Debug, Clone, PartialEq)]
pub enum AppendOutcome {
    /// The ledger already ended at `today`.
    NothingToAppend,
    /// Rows were appended; `today`/`yesterday` are the last two ledger days
    /// as read back after the append.
    Appended {
        rows_appended: usize,
        today: DailySnapshot,
        yesterday: DailySnapshot,
    },
}

#[async_trait]
pub trait LedgerSyncServiceTrait: Send + Sync {
    /// Fills every day after the last ledger row up to and including `today`.
    async fn append_missing_days(&self, today: NaiveDate) -> Result<AppendOutcome>;
}

pub struct LedgerSyncService {
    store: Arc<dyn LedgerStore>,
    provider: Arc<dyn QuoteProvider>,
}

impl LedgerSyncService {
    pub fn new(store: Arc<dyn LedgerStore>, provider: Arc<dyn QuoteProvider>) -> Self {
        Self { store, provider }
    }
}

#[async_trait]
impl LedgerSyncServiceTrait for LedgerSyncService {
    async fn append_missing_days(&self, today: NaiveDate) -> Result<AppendOutcome> {
        // Independent reads: the ledger tail and the quote charts
        let (last_loaded, quotes) = try_join(self.store.last_row(), async {
            fetch_quote_series(self.provider.as_ref())
                .await
                .map_err(Error::from)
        })
        .await?;

        let missing_dates = compute_missing_dates(last_loaded.date, today)?;
        info!(
            "Last loaded day is {}, {} day(s) to append up to {}",
            last_loaded.formatted_date(),
            missing_dates.len(),
            today
        );

        if missing_dates.is_empty() {
            info!("No dates to append");
            return Ok(AppendOutcome::NothingToAppend);
        }

        let rows = generate_rows(&quotes, &missing_dates, &last_loaded);
        debug!("Rows generated: {:?}", rows);

        let rows_appended = self.store.append_rows(&rows).await?;
        info!("Appended {} row(s) to the ledger", rows_appended);

        let (yesterday, latest) = self.store.last_two_rows().await?;
        Ok(AppendOutcome::Appended {
            rows_appended,
            today: latest.to_snapshot()?,
            yesterday: yesterday.to_snapshot()?,
        })
    }
}
