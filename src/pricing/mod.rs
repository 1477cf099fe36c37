//! Pricing model and policy parameters

mod model;
mod policy;

pub use policy::{
    DEFAULT_COMPARISON_WINDOW_HOURS, DEFAULT_EUR_TO_LOCAL_RATE, DEFAULT_FCR_D_CAPACITY_FACTOR,
    DEFAULT_FCR_N_CAPACITY_FACTOR, DEFAULT_HORIZON_HOURS, DEFAULT_MFRR_ACTIVATION_BONUS,
    PricingPolicy,
};
