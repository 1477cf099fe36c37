use crate::allocation::{HourlyWinner, winner_counts};
use crate::market_data::{
    ContextSignal, ForecastPoint, Market, ProductionGapPoint, SiteConfig, WeatherPoint,
};
use crate::reasoning::rules::{Confidence, RuleSet};
use crate::reasoning::signals::MarketSignals;
use serde::{Deserialize, Serialize};

/// Human-readable rationale for the current positioning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasoningInsight {
    pub summary: String,
    pub strategy: String,
    pub confidence: Confidence,
    /// 40..=98
    pub confidence_score: u8,
    /// Wind, temperature and gap explanations, in that order
    pub drivers: Vec<String>,
}

/// Series and optional refinements the reasoning reads
#[derive(Debug, Clone, Copy, Default)]
pub struct ReasoningInputs<'a> {
    pub forecast: &'a [ForecastPoint],
    pub weather: &'a [WeatherPoint],
    pub production_gap: &'a [ProductionGapPoint],
    /// Latest single-point reading, appended to each driver
    pub context: Option<&'a ContextSignal>,
    /// Hourly winner path, appended to the gap driver
    pub winners: Option<&'a [HourlyWinner]>,
}

impl<'a> ReasoningInputs<'a> {
    pub fn new(
        forecast: &'a [ForecastPoint],
        weather: &'a [WeatherPoint],
        production_gap: &'a [ProductionGapPoint],
    ) -> Self {
        Self {
            forecast,
            weather,
            production_gap,
            context: None,
            winners: None,
        }
    }

    pub fn with_context(mut self, context: Option<&'a ContextSignal>) -> Self {
        self.context = context;
        self
    }

    pub fn with_winners(mut self, winners: &'a [HourlyWinner]) -> Self {
        self.winners = Some(winners);
        self
    }
}

/// Generate an insight with the standard rule set
pub fn generate_insight(inputs: &ReasoningInputs<'_>, site: &SiteConfig) -> ReasoningInsight {
    generate_insight_with(&RuleSet::standard(), inputs, site)
}

/// Generate an insight with a caller-supplied rule set
pub fn generate_insight_with(
    rules: &RuleSet,
    inputs: &ReasoningInputs<'_>,
    site: &SiteConfig,
) -> ReasoningInsight {
    let signals =
        MarketSignals::from_series(inputs.forecast, inputs.weather, inputs.production_gap);
    let (rule, outcome) = rules.evaluate(&signals, site);

    log::debug!(
        "Reasoning for site {}: rule={} wind={:.2} temp={:.2} gap={:.0}",
        site.id,
        rule,
        signals.avg_wind,
        signals.avg_temp,
        signals.avg_gap
    );

    ReasoningInsight {
        summary: outcome.summary,
        strategy: outcome.strategy,
        confidence: outcome.confidence,
        confidence_score: signals.confidence_score(),
        drivers: drivers(&signals, inputs),
    }
}

fn drivers(signals: &MarketSignals, inputs: &ReasoningInputs<'_>) -> Vec<String> {
    let mut wind = if signals.low_wind() {
        "Low wind output in SE3 is likely to increase balancing disturbances.".to_string()
    } else {
        "Wind profile remains supportive for short-term balancing stability.".to_string()
    };

    let mut temp = if signals.cold_front() {
        "Cold front load pressure indicates elevated reserve demand.".to_string()
    } else {
        "Temperature outlook is moderate with controlled demand pressure.".to_string()
    };

    let mut gap = if signals.negative_gap() {
        "Negative production gap suggests import stress and reserve scarcity.".to_string()
    } else {
        "Production-consumption gap remains within manageable boundaries.".to_string()
    };

    if let Some(ctx) = inputs.context {
        wind.push_str(&format!(" Latest reading: {:.1} m/s.", ctx.wind_speed));
        temp.push_str(&format!(" Latest reading: {:.1} °C.", ctx.temp));
        gap.push_str(&format!(" Latest reading: {:.0} MW.", ctx.prod_cons_gap));
    }

    if let Some((market, hours, total)) = inputs.winners.and_then(leading_market) {
        gap.push_str(&format!(
            " Hourly winner path favors {} in {} of {} hours.",
            market, hours, total
        ));
    }

    vec![wind, temp, gap]
}

/// Market winning the most hours (earliest market on ties)
fn leading_market(winners: &[HourlyWinner]) -> Option<(Market, usize, usize)> {
    if winners.is_empty() {
        return None;
    }

    let counts = winner_counts(winners);
    let (market, hours) = Market::ALL
        .iter()
        .map(|&m| (m, counts[m.index()]))
        .fold((Market::ALL[0], counts[0]), |best, current| {
            if current.1 > best.1 { current } else { best }
        });

    Some((market, hours, winners.len()))
}
