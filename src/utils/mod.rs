//! Utility functions and helpers

mod metrics;
mod stats;

pub use metrics::{Metrics, MetricsSummary};
pub use stats::{mean, ratio_or_zero, share_pct, window};
