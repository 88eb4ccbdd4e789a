//! Market data models
//!
//! - `instrument` - The closed set of tracked instruments and the `PerInstrument` container
//! - `series` - Daily price series (DailySeries, QuoteSeries)

mod instrument;
mod series;

pub use instrument::{Instrument, PerInstrument};
pub use series::{DailySeries, QuoteSeries};
