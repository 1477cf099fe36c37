//! Market data provider interface
//!
//! Providers own every I/O concern: fetching, caching, credentials and
//! connection state. The engine only sees the series they return.

mod synthetic;

use crate::allocation::MarketInputs;
use crate::market_data::{ContextSignal, ForecastPoint, ProductionGapPoint, WeatherPoint};
use std::future::Future;

pub use synthetic::{SYNTHETIC_HORIZON_HOURS, SyntheticMarketData};

/// Source of forecast and context series
pub trait MarketDataProvider: Send + Sync {
    /// Forecast prices, nearest hour first
    fn forecast_series(&self) -> impl Future<Output = crate::Result<Vec<ForecastPoint>>> + Send;

    fn weather_series(&self) -> impl Future<Output = crate::Result<Vec<WeatherPoint>>> + Send;

    fn production_gap_series(
        &self,
    ) -> impl Future<Output = crate::Result<Vec<ProductionGapPoint>>> + Send;

    /// Most recent context reading, if the source has one
    fn latest_context_signal(
        &self,
    ) -> impl Future<Output = crate::Result<Option<ContextSignal>>> + Send;

    /// Short label identifying the source
    fn source_label(&self) -> &str;
}

/// Fetch all series concurrently
///
/// Fails with the first provider error; the engine never sees partial inputs.
pub async fn load_market_inputs<P: MarketDataProvider>(
    provider: &P,
) -> crate::Result<MarketInputs> {
    let (forecast, weather, production_gap, context) = tokio::try_join!(
        provider.forecast_series(),
        provider.weather_series(),
        provider.production_gap_series(),
        provider.latest_context_signal(),
    )?;

    log::debug!(
        "Loaded {} forecast hours from {} source",
        forecast.len(),
        provider.source_label()
    );

    Ok(MarketInputs {
        forecast,
        weather,
        production_gap,
        context,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    struct OfflineProvider;

    impl MarketDataProvider for OfflineProvider {
        async fn forecast_series(&self) -> crate::Result<Vec<ForecastPoint>> {
            Err(crate::Error::DataSource("store unreachable".to_string()))
        }

        async fn weather_series(&self) -> crate::Result<Vec<WeatherPoint>> {
            Ok(Vec::new())
        }

        async fn production_gap_series(&self) -> crate::Result<Vec<ProductionGapPoint>> {
            Ok(Vec::new())
        }

        async fn latest_context_signal(&self) -> crate::Result<Option<ContextSignal>> {
            Ok(None)
        }

        fn source_label(&self) -> &str {
            "offline"
        }
    }

    #[tokio::test]
    async fn test_load_synthetic_inputs() {
        let anchor = Utc.with_ymd_and_hms(2025, 1, 15, 6, 0, 0).unwrap();
        let provider = SyntheticMarketData::new(anchor);

        let inputs = load_market_inputs(&provider).await.unwrap();

        assert_eq!(inputs.forecast.len(), SYNTHETIC_HORIZON_HOURS);
        assert_eq!(inputs.weather.len(), SYNTHETIC_HORIZON_HOURS);
        assert!(inputs.context.is_some());
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let result = load_market_inputs(&OfflineProvider).await;
        assert!(matches!(result, Err(crate::Error::DataSource(_))));
    }
}
