use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bidding area every series in this crate refers to
pub const DEFAULT_AREA: &str = "SE3";

/// One forecast hour of clearing prices (€/MW or €/MWh, per market)
///
/// An ordered `Vec<ForecastPoint>` is a forecast series; index 0 is the
/// nearest future hour.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    /// Start of the delivery hour
    pub timestamp: DateTime<Utc>,

    /// Short `HH:MM` label for display
    pub hour_label: String,

    /// FCR-N capacity price
    pub fcr_n: f64,

    /// FCR-D upward capacity price
    pub fcr_d_up: f64,

    /// FCR-D downward capacity price
    pub fcr_d_down: f64,

    /// mFRR price
    pub mfrr: f64,

    /// Day-ahead spot price
    pub spot: f64,
}

impl ForecastPoint {
    /// Create a forecast point, deriving the hour label from the timestamp
    pub fn new(
        timestamp: DateTime<Utc>,
        fcr_n: f64,
        fcr_d_up: f64,
        fcr_d_down: f64,
        mfrr: f64,
        spot: f64,
    ) -> Self {
        Self {
            timestamp,
            hour_label: timestamp.format("%H:%M").to_string(),
            fcr_n,
            fcr_d_up,
            fcr_d_down,
            mfrr,
            spot,
        }
    }

    /// Combined FCR-D signal (up + down)
    #[inline(always)]
    pub fn fcr_d_total(&self) -> f64 {
        self.fcr_d_up + self.fcr_d_down
    }
}

impl fmt::Debug for ForecastPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForecastPoint")
            .field("timestamp", &self.timestamp.to_rfc3339())
            .field("fcr_n", &self.fcr_n)
            .field("fcr_d", &(self.fcr_d_up, self.fcr_d_down))
            .field("mfrr", &self.mfrr)
            .field("spot", &self.spot)
            .finish()
    }
}

/// Hourly weather observation or forecast for a bidding area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPoint {
    pub timestamp: DateTime<Utc>,
    pub area: String,
    /// Average wind speed (m/s)
    pub wind_ms: f64,
    /// Air temperature (°C)
    pub temperature_c: f64,
}

impl WeatherPoint {
    pub fn new(timestamp: DateTime<Utc>, wind_ms: f64, temperature_c: f64) -> Self {
        Self {
            timestamp,
            area: DEFAULT_AREA.to_string(),
            wind_ms,
            temperature_c,
        }
    }
}

/// Hourly production/consumption balance for a bidding area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionGapPoint {
    pub timestamp: DateTime<Utc>,
    pub area: String,
    pub production_mw: f64,
    pub consumption_mw: f64,
    /// `production_mw - consumption_mw`; negative means import pressure
    pub gap_mw: f64,
}

impl ProductionGapPoint {
    /// Create a point, deriving the gap from production and consumption
    pub fn new(timestamp: DateTime<Utc>, production_mw: f64, consumption_mw: f64) -> Self {
        Self {
            timestamp,
            area: DEFAULT_AREA.to_string(),
            production_mw,
            consumption_mw,
            gap_mw: production_mw - consumption_mw,
        }
    }
}

/// Latest single-point market context reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSignal {
    pub timestamp: DateTime<Utc>,
    pub prod_cons_gap: f64,
    pub temp: f64,
    pub wind_speed: f64,
}
