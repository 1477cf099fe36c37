use crate::allocation::winner::{HourlyWinner, hourly_winning_path};
use crate::market_data::{ForecastPoint, SiteConfig};
use crate::pricing::PricingPolicy;
use crate::utils::window;
use serde::{Deserialize, Serialize};

/// Optimized per-hour strategy versus an always-FCR-N baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyComparison {
    /// Revenue from always taking the hourly winner (SEK)
    pub total_ai_strategy_revenue: f64,

    /// Revenue from committing everything to FCR-N (SEK)
    pub static_fcrn_revenue: f64,

    /// Uplift of the optimized strategy over the baseline (%), 0 when the
    /// baseline is not positive
    pub revenue_alpha_pct: f64,
}

impl StrategyComparison {
    pub fn new(total_ai_strategy_revenue: f64, static_fcrn_revenue: f64) -> Self {
        let revenue_alpha_pct = if static_fcrn_revenue > 0.0 {
            (total_ai_strategy_revenue - static_fcrn_revenue) / static_fcrn_revenue * 100.0
        } else {
            0.0
        };

        Self {
            total_ai_strategy_revenue,
            static_fcrn_revenue,
            revenue_alpha_pct,
        }
    }
}

/// Sum of the hourly winner turnovers
pub fn optimized_potential(winners: &[HourlyWinner]) -> f64 {
    winners.iter().map(|w| w.turnover_sek).sum()
}

/// Static FCR-N revenue over the horizon
pub fn static_fcrn_revenue(
    policy: &PricingPolicy,
    forecast: &[ForecastPoint],
    capacity: f64,
) -> f64 {
    window(forecast, policy.horizon_hours)
        .iter()
        .map(|p| policy.fcr_n_turnover(p.fcr_n) * capacity)
        .sum()
}

/// Compare the hourly-winner strategy with the FCR-N baseline
pub fn simulate_strategy_performance(
    policy: &PricingPolicy,
    forecast: &[ForecastPoint],
    site: &SiteConfig,
) -> StrategyComparison {
    let winners = hourly_winning_path(policy, forecast, site);

    StrategyComparison::new(
        optimized_potential(&winners),
        static_fcrn_revenue(policy, forecast, site.capacity),
    )
}
