use crate::market_data::{ForecastPoint, Market, MarketValues, SiteConfig};
use crate::pricing::PricingPolicy;
use crate::utils::{ratio_or_zero, window};
use serde::{Deserialize, Serialize};

/// Ratio to the best market at or above which a market is `high`
pub const HIGH_TREND_RATIO: f64 = 0.8;

/// Ratio to the best market at or above which a market is `mid`
pub const MID_TREND_RATIO: f64 = 0.55;

/// Relative strength of a market versus the best market in the same window
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    High,
    Mid,
    Low,
}

impl Trend {
    /// Classify `value` against `max`; a zero `max` classifies everything `low`
    pub fn classify(value: f64, max: f64) -> Self {
        let ratio = ratio_or_zero(value, max);
        if ratio >= HIGH_TREND_RATIO {
            Trend::High
        } else if ratio >= MID_TREND_RATIO {
            Trend::Mid
        } else {
            Trend::Low
        }
    }
}

/// Expected turnover of one market over the evaluated horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketTurnoverEstimate {
    pub market: Market,
    pub turnover_sek: f64,
    pub trend: Trend,
}

/// Horizon turnover per market for a site of `capacity` MW
///
/// Reserve markets sum their hourly turnover. Spot only counts upward price
/// moves between consecutive hours (discharge on rise); hour 0 has no
/// predecessor and contributes nothing.
pub fn market_totals(
    policy: &PricingPolicy,
    forecast: &[ForecastPoint],
    capacity: f64,
) -> MarketValues {
    let hours = window(forecast, policy.horizon_hours);

    let fcr_n: f64 = hours
        .iter()
        .map(|p| policy.fcr_n_turnover(p.fcr_n) * capacity)
        .sum();
    let fcr_d: f64 = hours
        .iter()
        .map(|p| policy.fcr_d_turnover(p.fcr_d_up, p.fcr_d_down) * capacity)
        .sum();
    let mfrr: f64 = hours
        .iter()
        .map(|p| policy.mfrr_turnover(p.mfrr) * capacity)
        .sum();
    let spot: f64 = hours
        .windows(2)
        .map(|pair| (pair[1].spot - pair[0].spot).max(0.0) * policy.eur_to_local_rate * capacity)
        .sum();

    MarketValues::new(fcr_n, fcr_d, mfrr, spot)
}

/// Turnover estimate and trend for every market, in [`Market::ALL`] order
pub fn derive_turnovers(
    policy: &PricingPolicy,
    forecast: &[ForecastPoint],
    site: &SiteConfig,
) -> Vec<MarketTurnoverEstimate> {
    let totals = market_totals(policy, forecast, site.capacity);
    let max_value = totals.max_value();

    totals
        .iter()
        .map(|(market, turnover_sek)| MarketTurnoverEstimate {
            market,
            turnover_sek,
            trend: Trend::classify(turnover_sek, max_value),
        })
        .collect()
}
