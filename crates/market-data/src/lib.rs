//! Dollar Sheets Market Data Crate
//!
//! This crate fetches daily dollar quotes for the ledger job.
//!
//! # Overview
//!
//! - A closed set of five [`Instrument`]s, with [`PerInstrument`] as the
//!   total container used everywhere a value per instrument is needed
//! - Provider-agnostic fetching through the [`QuoteProvider`] trait
//! - [`fetch_quote_series`] fans out one request per instrument concurrently
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |   Ledger job     | --> | fetch_quote_series|  (5 concurrent fetches)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  QuoteProvider   |  (Ámbito, fakes in tests)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   QuoteSeries    |  (date -> price per instrument)
//!                          +------------------+
//! ```

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{DailySeries, Instrument, PerInstrument, QuoteSeries};
pub use provider::ambito::{AmbitoConfig, AmbitoProvider};
pub use provider::{fetch_quote_series, QuoteProvider};
