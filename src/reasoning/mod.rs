//! Rule-based reasoning over wind, temperature, production gap and price signals

mod insight;
mod rules;
mod signals;

pub use insight::{ReasoningInputs, ReasoningInsight, generate_insight, generate_insight_with};
pub use rules::{
    Confidence, DisturbanceSpikeRule, DiversifiedRule, MfrrActivationRule, PositioningRule,
    RuleOutcome, RuleSet, RuleSetBuilder, fcr_d_contingency_mw, fcr_d_reserve_mw,
};
pub use signals::{
    COLD_FRONT_C, FCR_D_SPIKE_SIGNAL, LOW_WIND_MS, MarketSignals, NEGATIVE_GAP_MW,
    REASONING_WINDOW_HOURS,
};
