//! # Balancing Allocator
//!
//! Turnover and allocation engine for battery storage across the Nordic
//! balancing markets (FCR-N, FCR-D, mFRR) and the day-ahead spot market.
//!
//! ## Features
//!
//! - Per-market turnover estimates with high/mid/low trend
//! - Hourly winning-market path and market dominance
//! - Top-market recommendation with a spot-spread override
//! - Optimized vs. static FCR-N strategy comparison
//! - Rule-based reasoning from wind, temperature and production gap
//!
//! All computations are pure functions of their inputs. Pricing constants
//! live in [`PricingPolicy`] and can be recalibrated at runtime.
//!
//! ## Quick Start
//!
//! ```
//! use balancing_allocator::*;
//!
//! let engine = AllocationEngine::new(PricingPolicy::default())?;
//! let inputs = SyntheticMarketData::now().market_inputs();
//! let site = SiteRegistry::builtin().default_site().clone();
//!
//! let snapshot = engine.snapshot(&inputs, &site);
//! println!("Top market: {}", snapshot.top_recommendation);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Preconditions
//!
//! Site capacity must be positive and prices finite. Neither is validated;
//! violating them yields meaningless (but non-panicking) output.

pub mod allocation;
pub mod market_data;
pub mod pricing;
pub mod provider;
pub mod reasoning;
pub mod utils;

// Re-exports
pub use allocation::{
    AllocationEngine, AllocationRecommendation, AllocationSplit, DashboardSnapshot, HourlyWinner,
    MarketDominance, MarketInputs, MarketTurnoverEstimate, StrategyComparison, TopRecommendation,
    Trend,
};
pub use market_data::{
    ContextSignal, ForecastPoint, Market, ProductionGapPoint, SiteConfig, SiteRegistry,
    SiteStatus, WeatherPoint,
};
pub use pricing::PricingPolicy;
pub use provider::{MarketDataProvider, SyntheticMarketData, load_market_inputs};
pub use reasoning::{Confidence, ReasoningInputs, ReasoningInsight, RuleSet, generate_insight};
pub use utils::{Metrics, MetricsSummary};

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data source error: {0}")]
    DataSource(String),

    #[error("Unknown site: {0}")]
    UnknownSite(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}
