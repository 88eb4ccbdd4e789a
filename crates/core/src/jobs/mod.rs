//! Ledger job orchestration.
//!
//! - [`service`] - One sync pass: fetch, fill gaps, append, read back
//! - [`runner`] - Time budget, outcome mapping and notification

pub mod runner;
pub mod service;


pub use runner::JobRunner;
pub use service::{AppendOutcome, LedgerSyncService, LedgerSyncServiceTrait};
