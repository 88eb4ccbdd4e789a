//! Quote provider abstractions and implementations.
//!
//! This module contains:
//! - The `QuoteProvider` trait that all providers implement
//! - `fetch_quote_series`, which fans out one request per instrument
//! - The Ámbito Financiero provider

mod traits;

pub mod ambito;

use futures::future::try_join_all;
use log::{debug, info};

use crate::errors::MarketDataError;
use crate::models::{Instrument, PerInstrument, QuoteSeries};

// Re-exports
pub use traits::QuoteProvider;

/// Fetches the daily series of every instrument concurrently.
///
/// The five requests are independent; the first failure aborts the whole
/// fetch since a partial series would silently degrade into carry-forward.
pub async fn fetch_quote_series(
    provider: &dyn QuoteProvider,
) -> Result<QuoteSeries, MarketDataError> {
    debug!("Fetching quote series from {}", provider.id());

    let fetches = Instrument::ALL
        .iter()
        .map(|instrument| provider.fetch_daily_series(*instrument));
    let mut fetched = try_join_all(fetches).await?.into_iter();

    let series = PerInstrument::from_fn(|_| fetched.next().unwrap_or_default());
    let quotes = QuoteSeries::new(series);

    info!(
        "Fetched all quote series from {}: {:?}",
        provider.id(),
        quotes.day_counts()
    );
    Ok(quotes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DailySeries;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    struct RecordingProvider {
        requested: Mutex<Vec<Instrument>>,
        failing: Option<Instrument>,
    }

    impl RecordingProvider {
        fn new(failing: Option<Instrument>) -> Self {
            Self {
                requested: Mutex::new(Vec::new()),
                failing,
            }
        }
    }

    #[async_trait]
    impl QuoteProvider for RecordingProvider {
        fn id(&self) -> &'static str {
            "RECORDING"
        }

        async fn fetch_daily_series(
            &self,
            instrument: Instrument,
        ) -> Result<DailySeries, MarketDataError> {
            self.requested.lock().unwrap().push(instrument);
            if self.failing == Some(instrument) {
                return Err(MarketDataError::malformed("RECORDING", instrument, "bad"));
            }
            let mut series = DailySeries::new();
            let price = match instrument {
                Instrument::Oficial => dec!(900),
                Instrument::Blue => dec!(1200),
                Instrument::Mep => dec!(1100),
                Instrument::Ccl => dec!(1150),
                Instrument::Cripto => dec!(1180),
            };
            series.insert(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(), price);
            Ok(series)
        }
    }

    #[tokio::test]
    async fn test_fetch_quote_series_assigns_each_instrument() {
        let provider = RecordingProvider::new(None);
        let quotes = fetch_quote_series(&provider).await.unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();

        assert_eq!(quotes.price_on(Instrument::Oficial, day), Some(dec!(900)));
        assert_eq!(quotes.price_on(Instrument::Blue, day), Some(dec!(1200)));
        assert_eq!(quotes.price_on(Instrument::Mep, day), Some(dec!(1100)));
        assert_eq!(quotes.price_on(Instrument::Ccl, day), Some(dec!(1150)));
        assert_eq!(quotes.price_on(Instrument::Cripto, day), Some(dec!(1180)));

        let mut requested = provider.requested.lock().unwrap().clone();
        requested.sort();
        assert_eq!(requested, Instrument::ALL.to_vec());
    }

    #[tokio::test]
    async fn test_fetch_quote_series_fails_when_one_instrument_fails() {
        let provider = RecordingProvider::new(Some(Instrument::Ccl));
        let err = fetch_quote_series(&provider).await.unwrap_err();

        assert!(matches!(
            err,
            MarketDataError::MalformedResponse {
                instrument: Instrument::Ccl,
                ..
            }
        ));
    }
}
