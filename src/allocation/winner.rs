use crate::allocation::turnover::{Trend, market_totals};
use crate::market_data::{ForecastPoint, Market, MarketValues, SiteConfig};
use crate::pricing::PricingPolicy;
use crate::utils::{share_pct, window};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Best market for a single forecast hour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyWinner {
    pub timestamp: DateTime<Utc>,
    pub hour_label: String,
    pub market: Market,
    /// Winning market's turnover for this hour (SEK)
    pub turnover_sek: f64,
}

/// How often and how strongly a market wins over the horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketDominance {
    pub market: Market,
    pub winner_hours: usize,
    pub winner_share_pct: f64,
    /// Horizon aggregate turnover (SEK)
    pub turnover_sek: f64,
    /// First-hour turnover (SEK)
    pub current_optimized_sek: f64,
    pub trend: Trend,
}

/// Arg-max market for every forecast hour, preserving input order
///
/// Per-hour spot is valued at its absolute price. Ties go to the earliest
/// market in [`Market::ALL`].
pub fn hourly_winning_path(
    policy: &PricingPolicy,
    forecast: &[ForecastPoint],
    site: &SiteConfig,
) -> Vec<HourlyWinner> {
    window(forecast, policy.horizon_hours)
        .iter()
        .map(|point| {
            let (market, turnover_sek) = policy.hourly_values(point, site.capacity).arg_max();
            HourlyWinner {
                timestamp: point.timestamp,
                hour_label: point.hour_label.clone(),
                market,
                turnover_sek,
            }
        })
        .collect()
}

/// Hours won per market, indexed in [`Market::ALL`] order
pub fn winner_counts(winners: &[HourlyWinner]) -> [usize; 4] {
    winners.iter().fold([0; 4], |mut counts, w| {
        counts[w.market.index()] += 1;
        counts
    })
}

/// Win statistics per market, in [`Market::DOMINANCE_ORDER`]
pub fn market_dominance(
    policy: &PricingPolicy,
    forecast: &[ForecastPoint],
    site: &SiteConfig,
) -> Vec<MarketDominance> {
    let winners = hourly_winning_path(policy, forecast, site);
    let totals = market_totals(policy, forecast, site.capacity);
    let first_hour = forecast
        .first()
        .map(|point| policy.hourly_values(point, site.capacity))
        .unwrap_or(MarketValues::ZERO);

    let counts = winner_counts(&winners);
    let max_total = totals.max_value();

    Market::DOMINANCE_ORDER
        .iter()
        .map(|&market| MarketDominance {
            market,
            winner_hours: counts[market.index()],
            winner_share_pct: share_pct(counts[market.index()], winners.len()),
            turnover_sek: totals.get(market),
            current_optimized_sek: first_hour.get(market),
            trend: Trend::classify(totals.get(market), max_total),
        })
        .collect()
}
