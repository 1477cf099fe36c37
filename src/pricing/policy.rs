use serde::{Deserialize, Serialize};

/// EUR to SEK conversion rate
pub const DEFAULT_EUR_TO_LOCAL_RATE: f64 = 11.0;

/// Share of committed capacity FCR-D (and mFRR) actually remunerates
pub const DEFAULT_FCR_D_CAPACITY_FACTOR: f64 = 0.83;

/// Share of committed capacity FCR-N actually remunerates
pub const DEFAULT_FCR_N_CAPACITY_FACTOR: f64 = 0.45;

/// Uplift applied to mFRR for expected activation revenue
pub const DEFAULT_MFRR_ACTIVATION_BONUS: f64 = 1.2;

/// Dashboard horizon (hours)
pub const DEFAULT_HORIZON_HOURS: usize = 48;

/// Window for the spot-spread vs. FCR comparison (hours)
pub const DEFAULT_COMPARISON_WINDOW_HOURS: usize = 24;

/// Pricing policy parameters
///
/// Capacity and activation factors encode market-specific utilization
/// assumptions. Recalibrate them here rather than at call sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Currency conversion (local per EUR)
    pub eur_to_local_rate: f64,

    /// FCR-D capacity factor, also used as the mFRR base factor
    pub fcr_d_capacity_factor: f64,

    /// FCR-N capacity factor
    pub fcr_n_capacity_factor: f64,

    /// mFRR activation multiplier
    pub mfrr_activation_bonus: f64,

    /// Maximum number of forecast hours evaluated
    pub horizon_hours: usize,

    /// Hours used by the spot-spread override
    pub comparison_window_hours: usize,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            eur_to_local_rate: DEFAULT_EUR_TO_LOCAL_RATE,
            fcr_d_capacity_factor: DEFAULT_FCR_D_CAPACITY_FACTOR,
            fcr_n_capacity_factor: DEFAULT_FCR_N_CAPACITY_FACTOR,
            mfrr_activation_bonus: DEFAULT_MFRR_ACTIVATION_BONUS,
            horizon_hours: DEFAULT_HORIZON_HOURS,
            comparison_window_hours: DEFAULT_COMPARISON_WINDOW_HOURS,
        }
    }
}

impl PricingPolicy {
    /// Default policy with a different conversion rate
    pub fn with_rate(eur_to_local_rate: f64) -> Self {
        Self {
            eur_to_local_rate,
            ..Default::default()
        }
    }

    /// Default policy overlaid with `ALLOCATOR_*` environment variables
    ///
    /// Unset variables keep their defaults; unparsable values are errors.
    pub fn from_env() -> crate::Result<Self> {
        let mut policy = Self::default();

        if let Some(v) = env_f64("ALLOCATOR_EUR_TO_LOCAL")? {
            policy.eur_to_local_rate = v;
        }
        if let Some(v) = env_f64("ALLOCATOR_FCR_D_FACTOR")? {
            policy.fcr_d_capacity_factor = v;
        }
        if let Some(v) = env_f64("ALLOCATOR_FCR_N_FACTOR")? {
            policy.fcr_n_capacity_factor = v;
        }
        if let Some(v) = env_f64("ALLOCATOR_MFRR_BONUS")? {
            policy.mfrr_activation_bonus = v;
        }
        if let Ok(raw) = std::env::var("ALLOCATOR_HORIZON_HOURS") {
            policy.horizon_hours = raw.trim().parse().map_err(|_| {
                crate::Error::Config(format!("ALLOCATOR_HORIZON_HOURS is not an integer: {raw}"))
            })?;
        }

        policy.validate()?;
        Ok(policy)
    }

    /// Validate configuration
    pub fn validate(&self) -> crate::Result<()> {
        let factors = [
            ("EUR to local rate", self.eur_to_local_rate),
            ("FCR-D capacity factor", self.fcr_d_capacity_factor),
            ("FCR-N capacity factor", self.fcr_n_capacity_factor),
            ("mFRR activation bonus", self.mfrr_activation_bonus),
        ];

        for (name, value) in factors {
            if !value.is_finite() || value <= 0.0 {
                return Err(crate::Error::Config(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }

        if self.horizon_hours == 0 {
            return Err(crate::Error::Config(
                "Horizon must cover at least one hour".to_string(),
            ));
        }

        if self.comparison_window_hours == 0 {
            return Err(crate::Error::Config(
                "Comparison window must cover at least one hour".to_string(),
            ));
        }

        Ok(())
    }
}

fn env_f64(key: &str) -> crate::Result<Option<f64>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| crate::Error::Config(format!("{key} is not a number: {raw}"))),
        Err(_) => Ok(None),
    }
}
