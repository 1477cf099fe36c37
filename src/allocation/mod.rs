//! Turnover aggregation, hourly winners, recommendation and strategy comparison

mod engine;
mod recommendation;
mod split;
mod strategy;
mod turnover;
mod winner;

pub use engine::{AllocationEngine, DashboardSnapshot, MarketInputs};
pub use recommendation::{
    SPOT_MARKET_LABEL, TopRecommendation, best_turnover_market, fcr_window_profit,
    spot_spread_sek, top_market_recommendation,
};
pub use split::{
    AllocationRecommendation, AllocationSplit, MAX_MFRR_CM_SPLIT, allocation_recommendation,
    derive_allocation_split,
};
pub use strategy::{
    StrategyComparison, optimized_potential, simulate_strategy_performance, static_fcrn_revenue,
};
pub use turnover::{
    HIGH_TREND_RATIO, MID_TREND_RATIO, MarketTurnoverEstimate, Trend, derive_turnovers,
    market_totals,
};
pub use winner::{
    HourlyWinner, MarketDominance, hourly_winning_path, market_dominance, winner_counts,
};
