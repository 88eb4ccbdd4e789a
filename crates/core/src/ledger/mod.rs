//! Ledger module.
//!
//! - [`model`] - Ledger rows, daily snapshots and the ledger's date formats
//! - [`numbers`] - Comma-decimal conversion at the ledger boundary
//! - [`store`] - Storage trait implemented by the spreadsheet backend
//! - [`gap_fill`] - Missing-day detection and carry-forward row synthesis

pub mod gap_fill;
pub mod model;
pub mod numbers;
pub mod store;

pub use gap_fill::{compute_missing_dates, generate_rows, synthesize_row};
pub use model::{
    format_ledger_date, month_bucket, parse_ledger_date, DailySnapshot, LedgerRow,
    DATE_COLUMN, LEDGER_DATE_FORMAT, MONTH_BUCKET_COLUMN, MONTH_BUCKET_FORMAT,
};
pub use numbers::{from_ledger_number, to_ledger_number};
pub use store::LedgerStore;
