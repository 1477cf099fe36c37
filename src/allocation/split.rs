use crate::allocation::recommendation::TopRecommendation;
use crate::allocation::winner::{HourlyWinner, winner_counts};
use crate::market_data::{ForecastPoint, Market};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ceiling for the mFRR capacity-market share
pub const MAX_MFRR_CM_SPLIT: f64 = 0.2;

/// Share of capacity bid into each product (fractions, not percent)
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSplit {
    pub fcr_split: f64,
    pub mfrr_split: f64,
    pub mfrr_cm_split: f64,
    pub spot_split: f64,
}

impl AllocationSplit {
    pub const fn new(fcr_split: f64, mfrr_split: f64, mfrr_cm_split: f64, spot_split: f64) -> Self {
        Self {
            fcr_split,
            mfrr_split,
            mfrr_cm_split,
            spot_split,
        }
    }

    /// Fixed split for a top recommendation
    pub fn fallback(top: TopRecommendation) -> Self {
        match top {
            TopRecommendation::Market(Market::FcrD) => Self::new(0.58, 0.24, 0.10, 0.08),
            TopRecommendation::Market(Market::Mfrr) => Self::new(0.37, 0.43, 0.12, 0.08),
            TopRecommendation::Market(Market::FcrN) => Self::new(0.62, 0.18, 0.08, 0.12),
            TopRecommendation::Market(Market::Spot) | TopRecommendation::SpotMarket => {
                Self::new(0.24, 0.20, 0.08, 0.48)
            }
        }
    }
}

/// Bid split document for the coming horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRecommendation {
    pub timestamp: DateTime<Utc>,
    /// Last hour the split covers
    pub bid_time_48h: DateTime<Utc>,
    #[serde(flatten)]
    pub split: AllocationSplit,
}

/// Split derived from the hourly winner path
///
/// Only FCR-D, mFRR and Spot wins count; FCR-N hours are left unallocated.
/// When none of those three markets wins an hour the fixed split for `top`
/// is used instead.
pub fn derive_allocation_split(
    winners: &[HourlyWinner],
    top: TopRecommendation,
) -> AllocationSplit {
    let counts = winner_counts(winners);
    let fcr = counts[Market::FcrD.index()];
    let mfrr = counts[Market::Mfrr.index()];
    let spot = counts[Market::Spot.index()];

    if fcr + mfrr + spot == 0 {
        return AllocationSplit::fallback(top);
    }

    let total = winners.len().max(1) as f64;
    let mfrr_share = mfrr as f64 / total;

    AllocationSplit::new(
        fcr as f64 / total,
        mfrr_share,
        (mfrr_share / 2.0).min(MAX_MFRR_CM_SPLIT),
        spot as f64 / total,
    )
}

/// Allocation document stamped at `generated_at`
pub fn allocation_recommendation(
    forecast: &[ForecastPoint],
    winners: &[HourlyWinner],
    top: TopRecommendation,
    generated_at: DateTime<Utc>,
) -> AllocationRecommendation {
    AllocationRecommendation {
        timestamp: generated_at,
        bid_time_48h: forecast.last().map(|p| p.timestamp).unwrap_or(generated_at),
        split: derive_allocation_split(winners, top),
    }
}
