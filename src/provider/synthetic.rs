//! Deterministic synthetic market data
//!
//! Reproduces the demo series: a sinusoidal day cycle, a slow multi-day
//! drift and an evening (17:00-20:00) price spike.

use crate::allocation::MarketInputs;
use crate::market_data::{ContextSignal, ForecastPoint, ProductionGapPoint, WeatherPoint};
use crate::provider::MarketDataProvider;
use chrono::{DateTime, Datelike, Duration, DurationRound, Timelike, Utc};
use std::f64::consts::PI;

/// Hours generated by default
pub const SYNTHETIC_HORIZON_HOURS: usize = 48;

/// Day-of-month shift applied to the forecast drift
const FORECAST_DRIFT_SHIFT: f64 = 4.0;

fn round_to(value: f64, precision: i32) -> f64 {
    let p = 10f64.powi(precision);
    (value * p).round() / p
}

/// Synthetic data source anchored at a fixed hour
#[derive(Debug, Clone)]
pub struct SyntheticMarketData {
    anchor: DateTime<Utc>,
    hours: usize,
}

impl SyntheticMarketData {
    /// Series start one hour after `anchor` (truncated to the hour)
    pub fn new(anchor: DateTime<Utc>) -> Self {
        let anchor = anchor.duration_trunc(Duration::hours(1)).unwrap_or(anchor);
        Self {
            anchor,
            hours: SYNTHETIC_HORIZON_HOURS,
        }
    }

    /// Anchored at the current hour
    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    pub fn with_hours(mut self, hours: usize) -> Self {
        self.hours = hours;
        self
    }

    fn hour(&self, offset: usize) -> DateTime<Utc> {
        self.anchor + Duration::hours(offset as i64 + 1)
    }

    /// Forecast prices for one hour
    pub fn price_point(timestamp: DateTime<Utc>, drift_shift: f64) -> ForecastPoint {
        let hour = timestamp.hour();
        let day_cycle = (hour as f64 / 24.0 * PI * 2.0).sin();
        let drift = ((timestamp.day() as f64 + drift_shift) / 3.2).sin();
        let evening_spike = if (17..=20).contains(&hour) { 8.5 } else { 0.0 };

        let fcr_n = 15.0 + day_cycle * 2.0 + drift * 1.6;
        let fcr_d_up = 23.0 + day_cycle * 3.0 + drift * 2.2 + evening_spike;
        let fcr_d_down = 12.0 + day_cycle * 1.4 + drift * 1.2 + evening_spike * 0.35;
        let mfrr = 27.0 + day_cycle * 4.5 + drift * 2.5 + evening_spike * 0.75;
        let spot = 33.0 + day_cycle * 5.0 + drift * 2.1 + evening_spike * 0.25;

        ForecastPoint::new(
            timestamp,
            round_to(fcr_n, 2),
            round_to(fcr_d_up, 2),
            round_to(fcr_d_down, 2),
            round_to(mfrr, 2),
            round_to(spot, 2),
        )
    }

    pub fn forecast(&self) -> Vec<ForecastPoint> {
        (0..self.hours)
            .map(|i| Self::price_point(self.hour(i), FORECAST_DRIFT_SHIFT))
            .collect()
    }

    pub fn weather(&self) -> Vec<WeatherPoint> {
        (0..self.hours)
            .map(|i| {
                let x = i as f64;
                let lull = if i > 17 && i < 30 { 1.1 } else { 0.0 };
                let cold = if i > 20 && i < 33 { 2.3 } else { 0.0 };

                WeatherPoint::new(
                    self.hour(i),
                    round_to(3.5 + (x / 5.0).sin() * 1.6 - lull, 1),
                    round_to(-1.8 + (x / 8.0).cos() * 4.0 - cold, 1),
                )
            })
            .collect()
    }

    pub fn production_gap(&self) -> Vec<ProductionGapPoint> {
        (0..self.hours)
            .map(|i| {
                let x = i as f64;
                let stressed = i > 17 && i < 31;
                let (drop, surge) = if stressed { (540.0, 700.0) } else { (0.0, 0.0) };
                let production = 8_350.0 + (x / 5.0).cos() * 600.0 - drop;
                let consumption = 8_720.0 + (x / 4.0).sin() * 560.0 + surge;

                let mut point =
                    ProductionGapPoint::new(self.hour(i), production.round(), consumption.round());
                // Gap is rounded from the raw difference, not from the rounded sides
                point.gap_mw = (production - consumption).round();
                point
            })
            .collect()
    }

    /// Context reading for the first generated hour
    pub fn context_signal(&self) -> Option<ContextSignal> {
        let weather = self.weather();
        let gap = self.production_gap();

        match (weather.first(), gap.first()) {
            (Some(w), Some(g)) => Some(ContextSignal {
                timestamp: w.timestamp,
                prod_cons_gap: g.gap_mw,
                temp: w.temperature_c,
                wind_speed: w.wind_ms,
            }),
            _ => None,
        }
    }

    /// All series in one bundle
    pub fn market_inputs(&self) -> MarketInputs {
        MarketInputs {
            forecast: self.forecast(),
            weather: self.weather(),
            production_gap: self.production_gap(),
            context: self.context_signal(),
        }
    }
}

impl MarketDataProvider for SyntheticMarketData {
    async fn forecast_series(&self) -> crate::Result<Vec<ForecastPoint>> {
        Ok(self.forecast())
    }

    async fn weather_series(&self) -> crate::Result<Vec<WeatherPoint>> {
        Ok(self.weather())
    }

    async fn production_gap_series(&self) -> crate::Result<Vec<ProductionGapPoint>> {
        Ok(self.production_gap())
    }

    async fn latest_context_signal(&self) -> crate::Result<Option<ContextSignal>> {
        Ok(self.context_signal())
    }

    fn source_label(&self) -> &str {
        "synthetic"
    }
}
