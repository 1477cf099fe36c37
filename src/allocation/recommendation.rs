use crate::allocation::turnover::market_totals;
use crate::market_data::{ForecastPoint, Market, SiteConfig};
use crate::pricing::PricingPolicy;
use crate::utils::{mean, window};
use serde::{Serialize, Serializer};
use std::fmt;

/// Label used when the spot spread beats the reserve markets
pub const SPOT_MARKET_LABEL: &str = "SPOT MARKET";

/// Single market recommended for the horizon
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TopRecommendation {
    /// Intraday spot spread outperforms FCR over the comparison window
    SpotMarket,
    /// Market with the highest horizon turnover
    Market(Market),
}

impl fmt::Display for TopRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopRecommendation::SpotMarket => f.write_str(SPOT_MARKET_LABEL),
            TopRecommendation::Market(market) => f.write_str(market.label()),
        }
    }
}

impl Serialize for TopRecommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Best 24h-average FCR turnover per MW (FCR-N vs FCR-D only, no capacity)
pub fn fcr_window_profit(policy: &PricingPolicy, forecast: &[ForecastPoint]) -> f64 {
    let hours = window(forecast, policy.comparison_window_hours);

    let fcr_n: Vec<f64> = hours
        .iter()
        .map(|p| policy.fcr_n_turnover(p.fcr_n))
        .collect();
    let fcr_d: Vec<f64> = hours
        .iter()
        .map(|p| policy.fcr_d_turnover(p.fcr_d_up, p.fcr_d_down))
        .collect();

    mean(&fcr_n).max(mean(&fcr_d))
}

/// Spot max-min spread over the comparison window, converted to SEK
///
/// An empty forecast has no spread.
pub fn spot_spread_sek(policy: &PricingPolicy, forecast: &[ForecastPoint]) -> f64 {
    let hours = window(forecast, policy.comparison_window_hours);
    if hours.is_empty() {
        return 0.0;
    }

    let (min, max) = hours
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.spot), hi.max(p.spot))
        });

    policy.spot_spread_profit(min, max) * policy.eur_to_local_rate
}

/// Market with the strictly greatest horizon turnover (leftmost on ties)
pub fn best_turnover_market(
    policy: &PricingPolicy,
    forecast: &[ForecastPoint],
    site: &SiteConfig,
) -> Market {
    market_totals(policy, forecast, site.capacity).arg_max().0
}

/// Top market for the horizon
///
/// Returns [`TopRecommendation::SpotMarket`] when the spot spread exceeds
/// the best 24h-average FCR profit; otherwise the turnover-maximizing market.
pub fn top_market_recommendation(
    policy: &PricingPolicy,
    forecast: &[ForecastPoint],
    site: &SiteConfig,
) -> TopRecommendation {
    let best = best_turnover_market(policy, forecast, site);
    let spread = spot_spread_sek(policy, forecast);
    let fcr_profit = fcr_window_profit(policy, forecast);

    log::debug!(
        "Top market: best={} spot_spread={:.1} fcr_24h={:.1}",
        best,
        spread,
        fcr_profit
    );

    if spread > fcr_profit {
        TopRecommendation::SpotMarket
    } else {
        TopRecommendation::Market(best)
    }
}
