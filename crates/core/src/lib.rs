//! Dollar Sheets Core - Ledger domain, gap filling and job orchestration.
//!
//! This crate contains the business logic of the daily dollar ledger job.
//! It is storage-agnostic and defines the traits implemented by the
//! `storage-sheets` and `notifier` crates.

pub mod constants;
pub mod errors;
pub mod jobs;
pub mod ledger;
pub mod notifications;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
