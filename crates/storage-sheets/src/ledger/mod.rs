//! Ledger worksheet storage.

mod model;
mod repository;

pub use model::{data_rows, SheetLayout};
pub use repository::{SheetsConfig, SheetsLedgerStore, DEFAULT_SHEET_TITLE};
