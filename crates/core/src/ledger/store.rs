//! Ledger storage trait.
//!
//! The ledger is append-only: rows are never edited or deleted by this job.

use async_trait::async_trait;

use super::model::LedgerRow;
use crate::errors::Result;

/// Storage interface for the daily ledger.
///
/// Implementations must not cache row positions between calls; the last row
/// is located afresh every time so repeated calls within a run stay correct
/// after an append.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Returns the most recently persisted row.
    ///
    /// Fails with `InvalidLedgerState` when the ledger has no data rows.
    async fn last_row(&self) -> Result<LedgerRow>;

    /// Returns the two most recent rows as `(previous, latest)`.
    async fn last_two_rows(&self) -> Result<(LedgerRow, LedgerRow)>;

    /// Appends rows in the given order and returns how many were written.
    ///
    /// Not atomic: if the run is aborted mid-call, some rows may be persisted.
    async fn append_rows(&self, rows: &[LedgerRow]) -> Result<usize>;
}
