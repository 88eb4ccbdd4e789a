use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::instrument::{Instrument, PerInstrument};

/// Daily closing prices for one instrument, keyed by calendar day.
///
/// Days are not guaranteed to be contiguous: providers skip weekends,
/// holidays and outages.
pub type DailySeries = BTreeMap<NaiveDate, Decimal>;

/// Freshly fetched daily prices for every instrument.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuoteSeries {
    series: PerInstrument<DailySeries>,
}

impl QuoteSeries {
    pub fn new(series: PerInstrument<DailySeries>) -> Self {
        Self { series }
    }

    /// Price for `instrument` on exactly `date`, if the provider published one.
    pub fn price_on(&self, instrument: Instrument, date: NaiveDate) -> Option<Decimal> {
        self.series.get(instrument).get(&date).copied()
    }

    /// Adds or replaces a single price. Mostly useful for building fixtures.
    pub fn insert(&mut self, instrument: Instrument, date: NaiveDate, price: Decimal) {
        self.series.get_mut(instrument).insert(date, price);
    }

    /// Number of priced days per instrument, for logging.
    pub fn day_counts(&self) -> PerInstrument<usize> {
        self.series.map(|_, s| s.len())
    }
}
