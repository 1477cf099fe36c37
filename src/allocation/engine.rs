use crate::allocation::{
    AllocationRecommendation, HourlyWinner, MarketDominance, MarketTurnoverEstimate,
    StrategyComparison, TopRecommendation, allocation_recommendation, derive_turnovers,
    hourly_winning_path, market_dominance, optimized_potential, static_fcrn_revenue,
    top_market_recommendation,
};
use crate::market_data::{
    ContextSignal, ForecastPoint, ProductionGapPoint, SiteConfig, WeatherPoint,
};
use crate::pricing::PricingPolicy;
use crate::reasoning::{ReasoningInputs, ReasoningInsight, generate_insight};
use crate::utils::Metrics;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::time::Instant;

/// Series an evaluation runs over
#[derive(Debug, Clone, Default)]
pub struct MarketInputs {
    pub forecast: Vec<ForecastPoint>,
    pub weather: Vec<WeatherPoint>,
    pub production_gap: Vec<ProductionGapPoint>,
    pub context: Option<ContextSignal>,
}

/// Everything the dashboard shows for one site
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub site_id: String,
    pub horizon_hours: usize,
    pub turnovers: Vec<MarketTurnoverEstimate>,
    /// Sum of all market turnovers over the horizon (SEK)
    pub turnover_48h_sek: f64,
    pub hourly_winners: Vec<HourlyWinner>,
    pub dominance: Vec<MarketDominance>,
    pub top_recommendation: TopRecommendation,
    pub strategy_comparison: StrategyComparison,
    pub reasoning: ReasoningInsight,
    pub allocation: AllocationRecommendation,
}

/// Allocation engine
///
/// Every computation reads a snapshot of the current pricing policy and
/// allocates fresh output, so one engine can serve concurrent callers.
pub struct AllocationEngine {
    policy: RwLock<PricingPolicy>,

    /// Evaluation metrics
    metrics: RwLock<Metrics>,
}

impl AllocationEngine {
    /// Create a new engine
    pub fn new(policy: PricingPolicy) -> crate::Result<Self> {
        policy.validate()?;

        Ok(Self {
            policy: RwLock::new(policy),
            metrics: RwLock::new(Metrics::new()),
        })
    }

    /// Current pricing policy
    pub fn policy(&self) -> PricingPolicy {
        self.policy.read().clone()
    }

    /// Replace the pricing policy; an invalid policy leaves the current one in place
    pub fn recalibrate(&self, policy: PricingPolicy) -> crate::Result<()> {
        policy.validate()?;

        log::info!(
            "Recalibrating pricing policy: rate={} fcr_d={} fcr_n={} mfrr_bonus={} horizon={}h",
            policy.eur_to_local_rate,
            policy.fcr_d_capacity_factor,
            policy.fcr_n_capacity_factor,
            policy.mfrr_activation_bonus,
            policy.horizon_hours
        );

        *self.policy.write() = policy;
        self.metrics.write().record_recalibration();
        Ok(())
    }

    pub fn derive_turnovers(
        &self,
        forecast: &[ForecastPoint],
        site: &SiteConfig,
    ) -> Vec<MarketTurnoverEstimate> {
        derive_turnovers(&self.policy(), forecast, site)
    }

    pub fn hourly_winning_path(
        &self,
        forecast: &[ForecastPoint],
        site: &SiteConfig,
    ) -> Vec<HourlyWinner> {
        hourly_winning_path(&self.policy(), forecast, site)
    }

    pub fn market_dominance(
        &self,
        forecast: &[ForecastPoint],
        site: &SiteConfig,
    ) -> Vec<MarketDominance> {
        market_dominance(&self.policy(), forecast, site)
    }

    pub fn top_market_recommendation(
        &self,
        forecast: &[ForecastPoint],
        site: &SiteConfig,
    ) -> TopRecommendation {
        top_market_recommendation(&self.policy(), forecast, site)
    }

    pub fn simulate_strategy_performance(
        &self,
        forecast: &[ForecastPoint],
        site: &SiteConfig,
    ) -> StrategyComparison {
        crate::allocation::simulate_strategy_performance(&self.policy(), forecast, site)
    }

    pub fn generate_insight(
        &self,
        inputs: &ReasoningInputs<'_>,
        site: &SiteConfig,
    ) -> ReasoningInsight {
        generate_insight(inputs, site)
    }

    /// Assemble a snapshot stamped with the current time
    pub fn snapshot(&self, inputs: &MarketInputs, site: &SiteConfig) -> DashboardSnapshot {
        self.snapshot_at(inputs, site, Utc::now())
    }

    /// Assemble a snapshot stamped with `generated_at`
    pub fn snapshot_at(
        &self,
        inputs: &MarketInputs,
        site: &SiteConfig,
        generated_at: DateTime<Utc>,
    ) -> DashboardSnapshot {
        let start = Instant::now();
        let policy = self.policy();
        let forecast = inputs.forecast.as_slice();

        if forecast.is_empty() {
            log::warn!("Empty forecast for site {}", site.id);
        }

        let turnovers = derive_turnovers(&policy, forecast, site);
        let winners = hourly_winning_path(&policy, forecast, site);
        let dominance = market_dominance(&policy, forecast, site);
        let top = top_market_recommendation(&policy, forecast, site);
        let strategy_comparison = StrategyComparison::new(
            optimized_potential(&winners),
            static_fcrn_revenue(&policy, forecast, site.capacity),
        );

        let reasoning_inputs = ReasoningInputs {
            context: inputs.context.as_ref(),
            winners: Some(&winners),
            ..ReasoningInputs::new(forecast, &inputs.weather, &inputs.production_gap)
        };
        let reasoning = generate_insight(&reasoning_inputs, site);
        let allocation = allocation_recommendation(forecast, &winners, top, generated_at);

        let turnover_48h_sek = turnovers.iter().map(|t| t.turnover_sek).sum();

        log::debug!(
            "Snapshot for site {}: top={} alpha={:.1}% confidence={:?}",
            site.id,
            top,
            strategy_comparison.revenue_alpha_pct,
            reasoning.confidence
        );

        self.metrics
            .write()
            .record_evaluation(winners.len(), start.elapsed().as_micros() as u64);

        DashboardSnapshot {
            generated_at,
            site_id: site.id.clone(),
            horizon_hours: policy.horizon_hours,
            turnovers,
            turnover_48h_sek,
            hourly_winners: winners,
            dominance,
            top_recommendation: top,
            strategy_comparison,
            reasoning,
            allocation,
        }
    }

    /// Evaluate several sites concurrently over the same inputs
    ///
    /// Output order follows `sites`.
    pub fn evaluate_portfolio(
        &self,
        inputs: &MarketInputs,
        sites: &[SiteConfig],
    ) -> crate::Result<Vec<DashboardSnapshot>> {
        let generated_at = Utc::now();
        log::info!("Evaluating portfolio of {} sites", sites.len());

        let result = crossbeam::thread::scope(|scope| {
            let handles: Vec<_> = sites
                .iter()
                .map(|site| scope.spawn(move |_| self.snapshot_at(inputs, site, generated_at)))
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join())
                .collect::<Result<Vec<_>, _>>()
        });

        match result {
            Ok(Ok(snapshots)) => Ok(snapshots),
            _ => Err(crate::Error::InvalidState(
                "Portfolio evaluation thread panicked".to_string(),
            )),
        }
    }

    /// Get metrics
    pub fn get_metrics(&self) -> Metrics {
        self.metrics.read().clone()
    }
}
