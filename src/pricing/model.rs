//! Per-hour turnover for one MW of committed capacity
//!
//! # Formulas
//! ```text
//! FCR-D = (price_up + price_down) × fcr_d_factor × rate
//! FCR-N = price × fcr_n_factor × rate
//! mFRR  = price × fcr_d_factor × rate × activation_bonus
//! Spot spread = daily_max − daily_min
//! ```
//!
//! Negative prices propagate: a negative turnover is a loss scenario and is
//! never clamped.
//!
//! # Example
//! ```
//! use balancing_allocator::pricing::PricingPolicy;
//!
//! let policy = PricingPolicy::default();
//! let sek = policy.fcr_d_turnover(20.0, 10.0);
//! assert!((sek - 273.9).abs() < 1e-9);
//! ```

use crate::market_data::{ForecastPoint, MarketValues};
use crate::pricing::PricingPolicy;

impl PricingPolicy {
    /// FCR-D turnover (SEK per MW-hour)
    #[inline(always)]
    pub fn fcr_d_turnover(&self, price_up: f64, price_down: f64) -> f64 {
        (price_up + price_down) * self.fcr_d_capacity_factor * self.eur_to_local_rate
    }

    /// FCR-N turnover (SEK per MW-hour)
    #[inline(always)]
    pub fn fcr_n_turnover(&self, price: f64) -> f64 {
        price * self.fcr_n_capacity_factor * self.eur_to_local_rate
    }

    /// mFRR turnover (SEK per MW-hour)
    #[inline(always)]
    pub fn mfrr_turnover(&self, price: f64) -> f64 {
        price * self.fcr_d_capacity_factor * self.eur_to_local_rate * self.mfrr_activation_bonus
    }

    /// Spot spread in the price currency (not converted)
    #[inline(always)]
    pub fn spot_spread_profit(&self, daily_min: f64, daily_max: f64) -> f64 {
        daily_max - daily_min
    }

    /// Absolute per-hour spot valuation (SEK per MW-hour)
    #[inline(always)]
    pub fn spot_hourly_value(&self, price: f64) -> f64 {
        price * self.eur_to_local_rate
    }

    /// Per-hour turnover of every market for a site of `capacity` MW
    ///
    /// Spot is valued at its absolute price here, unlike the horizon
    /// aggregate which only counts upward moves.
    pub fn hourly_values(&self, point: &ForecastPoint, capacity: f64) -> MarketValues {
        MarketValues::new(
            self.fcr_n_turnover(point.fcr_n) * capacity,
            self.fcr_d_turnover(point.fcr_d_up, point.fcr_d_down) * capacity,
            self.mfrr_turnover(point.mfrr) * capacity,
            self.spot_hourly_value(point.spot) * capacity,
        )
    }
}
