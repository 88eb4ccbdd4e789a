//! Google Sheets storage for the dollar quotes ledger.
//!
//! Implements `LedgerStore` from `dollar-sheets-core` on top of the Sheets
//! v4 values API, authenticated with a service account.

pub mod auth;
pub mod client;
pub mod errors;
pub mod ledger;

pub use errors::StorageError;
pub use ledger::{SheetsConfig, SheetsLedgerStore, DEFAULT_SHEET_TITLE};
