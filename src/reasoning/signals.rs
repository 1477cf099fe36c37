use crate::market_data::{ForecastPoint, ProductionGapPoint, WeatherPoint};
use crate::utils::{mean, window};

/// Hours of each series the reasoning looks at
pub const REASONING_WINDOW_HOURS: usize = 24;

/// Average wind below which disturbance risk rises (m/s)
pub const LOW_WIND_MS: f64 = 3.5;

/// Average temperature below which a cold front is assumed (°C)
pub const COLD_FRONT_C: f64 = -2.0;

/// Average production gap below which reserves get scarce (MW)
pub const NEGATIVE_GAP_MW: f64 = -450.0;

/// Average FCR-D (up + down) price that counts as a spike
pub const FCR_D_SPIKE_SIGNAL: f64 = 34.0;

const CONFIDENCE_BASE: f64 = 58.0;
const CONFIDENCE_DIVISOR: f64 = 35.0;
const TEMPERATURE_WEIGHT: f64 = 75.0;
const WIND_WEIGHT: f64 = 120.0;
const MIN_CONFIDENCE_SCORE: f64 = 40.0;
const MAX_CONFIDENCE_SCORE: f64 = 98.0;

/// Window averages the positioning rules evaluate
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct MarketSignals {
    pub avg_wind: f64,
    pub avg_temp: f64,
    pub avg_gap: f64,
    pub avg_fcr_d_signal: f64,
    pub avg_mfrr_signal: f64,
}

impl MarketSignals {
    /// Averages over the first 24 entries of each series (fewer if shorter)
    pub fn from_series(
        forecast: &[ForecastPoint],
        weather: &[WeatherPoint],
        production_gap: &[ProductionGapPoint],
    ) -> Self {
        let weather = window(weather, REASONING_WINDOW_HOURS);
        let gaps = window(production_gap, REASONING_WINDOW_HOURS);
        let forecast = window(forecast, REASONING_WINDOW_HOURS);

        let wind: Vec<f64> = weather.iter().map(|w| w.wind_ms).collect();
        let temp: Vec<f64> = weather.iter().map(|w| w.temperature_c).collect();
        let gap: Vec<f64> = gaps.iter().map(|g| g.gap_mw).collect();
        let fcr_d: Vec<f64> = forecast.iter().map(|p| p.fcr_d_total()).collect();
        let mfrr: Vec<f64> = forecast.iter().map(|p| p.mfrr).collect();

        Self {
            avg_wind: mean(&wind),
            avg_temp: mean(&temp),
            avg_gap: mean(&gap),
            avg_fcr_d_signal: mean(&fcr_d),
            avg_mfrr_signal: mean(&mfrr),
        }
    }

    #[inline]
    pub fn low_wind(&self) -> bool {
        self.avg_wind < LOW_WIND_MS
    }

    #[inline]
    pub fn cold_front(&self) -> bool {
        self.avg_temp < COLD_FRONT_C
    }

    #[inline]
    pub fn negative_gap(&self) -> bool {
        self.avg_gap < NEGATIVE_GAP_MW
    }

    #[inline]
    pub fn fcr_d_spike(&self) -> bool {
        self.avg_fcr_d_signal > FCR_D_SPIKE_SIGNAL
    }

    /// Composite volatility signal
    ///
    /// ```text
    /// |gap| + |temp × 75| + |(3.5 − wind) × 120|
    /// ```
    pub fn delta_magnitude(&self) -> f64 {
        self.avg_gap.abs()
            + (self.avg_temp * TEMPERATURE_WEIGHT).abs()
            + ((LOW_WIND_MS - self.avg_wind) * WIND_WEIGHT).abs()
    }

    /// `round(58 + delta / 35)` clamped to 40..=98
    pub fn confidence_score(&self) -> u8 {
        (CONFIDENCE_BASE + self.delta_magnitude() / CONFIDENCE_DIVISOR)
            .round()
            .clamp(MIN_CONFIDENCE_SCORE, MAX_CONFIDENCE_SCORE) as u8
    }
}
