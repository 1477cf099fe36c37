//! Positioning rules, evaluated in order, first match wins

use crate::market_data::SiteConfig;
use crate::reasoning::signals::MarketSignals;
use serde::{Deserialize, Serialize};

/// Discrete confidence level, ordered `Low < Medium < High`
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Narrative produced by a matching rule
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub confidence: Confidence,
    pub summary: String,
    pub strategy: String,
}

/// Trait for positioning rules
///
/// A rule is a predicate over the window signals plus the narrative it
/// produces when it fires.
pub trait PositioningRule: Send + Sync {
    /// Whether this rule fires for the given signals
    fn matches(&self, signals: &MarketSignals) -> bool;

    /// Narrative for a site when this rule fires
    fn outcome(&self, signals: &MarketSignals, site: &SiteConfig) -> RuleOutcome;

    /// Get a rule name
    fn name(&self) -> &str;
}

/// Capacity reserved for FCR-D (MW)
pub fn fcr_d_reserve_mw(capacity: f64) -> f64 {
    (capacity * 0.84).max(0.4)
}

/// Capacity kept as FCR-D contingency when tilting to mFRR (MW)
pub fn fcr_d_contingency_mw(capacity: f64) -> f64 {
    (capacity * 0.65).max(0.35)
}

/// One-decimal MW figure with ties rounded up (3.25 reads 3.3)
fn mw_label(mw: f64) -> f64 {
    (mw * 10.0).round() / 10.0
}

fn site_status(site: &SiteConfig) -> String {
    format!(
        "{} (#{}) is currently at {}% SOC.",
        site.name, site.id, site.soc
    )
}

/// Low wind, cold front, negative gap and an FCR-D spike all at once
#[derive(Debug, Default)]
pub struct DisturbanceSpikeRule;

impl PositioningRule for DisturbanceSpikeRule {
    fn matches(&self, s: &MarketSignals) -> bool {
        s.low_wind() && s.cold_front() && s.negative_gap() && s.fcr_d_spike()
    }

    fn outcome(&self, _signals: &MarketSignals, site: &SiteConfig) -> RuleOutcome {
        RuleOutcome {
            confidence: Confidence::High,
            summary: format!(
                "{} Low wind in SE3 + cold front detected, disturbance risk is high.",
                site_status(site)
            ),
            strategy: format!(
                "Based on the 48h FCR-D spike prediction, we recommend reserving {:.1}MW \
                 for the 18:00 auction with secondary mFRR coverage.",
                mw_label(fcr_d_reserve_mw(site.capacity))
            ),
        }
    }

    fn name(&self) -> &str {
        "disturbance-spike"
    }
}

/// mFRR prices outrun the combined FCR-D signal
#[derive(Debug, Default)]
pub struct MfrrActivationRule;

impl PositioningRule for MfrrActivationRule {
    fn matches(&self, s: &MarketSignals) -> bool {
        s.avg_mfrr_signal > s.avg_fcr_d_signal
    }

    fn outcome(&self, _signals: &MarketSignals, site: &SiteConfig) -> RuleOutcome {
        RuleOutcome {
            confidence: Confidence::Medium,
            summary: format!(
                "{} (#{}) at {}% SOC shows activation dynamics favoring mFRR \
                 over static reserve products.",
                site.name, site.id, site.soc
            ),
            strategy: format!(
                "Tilt allocation toward mFRR and keep {:.1}MW in FCR-D contingency.",
                mw_label(fcr_d_contingency_mw(site.capacity))
            ),
        }
    }

    fn name(&self) -> &str {
        "mfrr-activation"
    }
}

/// Catch-all: spread across FCR-D and mFRR with a Spot hedge
#[derive(Debug, Default)]
pub struct DiversifiedRule;

impl PositioningRule for DiversifiedRule {
    fn matches(&self, _signals: &MarketSignals) -> bool {
        true
    }

    fn outcome(&self, _signals: &MarketSignals, site: &SiteConfig) -> RuleOutcome {
        RuleOutcome {
            confidence: Confidence::Medium,
            summary: site_status(site),
            strategy: format!(
                "Diversify across FCR-D and mFRR with a moderate Spot hedge. \
                 Reserve {:.1}MW for the 18:00 auction window.",
                mw_label(fcr_d_reserve_mw(site.capacity))
            ),
        }
    }

    fn name(&self) -> &str {
        "diversified"
    }
}

/// Builder for an ordered rule list
pub struct RuleSetBuilder {
    rules: Vec<Box<dyn PositioningRule>>,
}

impl RuleSetBuilder {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule; earlier rules take precedence
    pub fn add_rule(mut self, rule: Box<dyn PositioningRule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn build(self) -> RuleSet {
        RuleSet { rules: self.rules }
    }
}

impl Default for RuleSetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered positioning rules
///
/// When no rule matches, [`DiversifiedRule`] supplies the outcome so every
/// evaluation is populated.
pub struct RuleSet {
    rules: Vec<Box<dyn PositioningRule>>,
}

impl RuleSet {
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::new()
    }

    /// Disturbance spike, then mFRR tilt, then diversified default
    pub fn standard() -> Self {
        Self::builder()
            .add_rule(Box::new(DisturbanceSpikeRule))
            .add_rule(Box::new(MfrrActivationRule))
            .add_rule(Box::new(DiversifiedRule))
            .build()
    }

    /// Name and outcome of the first matching rule
    pub fn evaluate(&self, signals: &MarketSignals, site: &SiteConfig) -> (String, RuleOutcome) {
        match self.rules.iter().find(|rule| rule.matches(signals)) {
            Some(rule) => (rule.name().to_string(), rule.outcome(signals, site)),
            None => {
                let fallback = DiversifiedRule;
                (fallback.name().to_string(), fallback.outcome(signals, site))
            }
        }
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}
