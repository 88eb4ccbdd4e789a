//! Quote provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{DailySeries, Instrument};

/// Trait for daily quote providers.
///
/// Implement this trait to add support for a new quote source. Providers are
/// stateless with respect to a run: every call fetches the full trailing
/// series for one instrument.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use dollar_sheets_market_data::{DailySeries, Instrument, MarketDataError, QuoteProvider};
///
/// struct FixedProvider;
///
/// #[async_trait]
/// impl QuoteProvider for FixedProvider {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn fetch_daily_series(
///         &self,
///         _instrument: Instrument,
///     ) -> Result<DailySeries, MarketDataError> {
///         Ok(DailySeries::new())
///     }
/// }
/// ```
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Fetch the daily price series for one instrument.
    ///
    /// Returned days need not be contiguous nor include today.
    async fn fetch_daily_series(
        &self,
        instrument: Instrument,
    ) -> Result<DailySeries, MarketDataError>;
}
