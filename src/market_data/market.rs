use serde::{Deserialize, Serialize};
use std::fmt;

/// Balancing and energy markets a storage site can commit capacity to
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    /// Frequency Containment Reserve, Normal operation
    #[serde(rename = "FCR-N")]
    FcrN,
    /// Frequency Containment Reserve, Disturbance (two-sided up/down product)
    #[serde(rename = "FCR-D")]
    FcrD,
    /// manual Frequency Restoration Reserve
    #[serde(rename = "mFRR")]
    Mfrr,
    /// Day-ahead energy market
    #[serde(rename = "Spot")]
    Spot,
}

impl Market {
    /// Fixed evaluation order. Ties are always resolved in favor of the earlier entry.
    pub const ALL: [Market; 4] = [Market::FcrN, Market::FcrD, Market::Mfrr, Market::Spot];

    /// Order used when presenting market dominance
    pub const DOMINANCE_ORDER: [Market; 4] =
        [Market::FcrD, Market::Mfrr, Market::FcrN, Market::Spot];

    /// Position of this market in [`Market::ALL`]
    #[inline(always)]
    pub const fn index(self) -> usize {
        match self {
            Market::FcrN => 0,
            Market::FcrD => 1,
            Market::Mfrr => 2,
            Market::Spot => 3,
        }
    }

    /// Display label as used on the dashboard
    pub const fn label(self) -> &'static str {
        match self {
            Market::FcrN => "FCR-N",
            Market::FcrD => "FCR-D",
            Market::Mfrr => "mFRR",
            Market::Spot => "Spot",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One value per market, indexed in [`Market::ALL`] order
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketValues([f64; 4]);

impl MarketValues {
    pub const ZERO: MarketValues = MarketValues([0.0; 4]);

    pub fn new(fcr_n: f64, fcr_d: f64, mfrr: f64, spot: f64) -> Self {
        Self([fcr_n, fcr_d, mfrr, spot])
    }

    #[inline(always)]
    pub fn get(&self, market: Market) -> f64 {
        self.0[market.index()]
    }

    /// Iterate `(market, value)` pairs in [`Market::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (Market, f64)> + '_ {
        Market::ALL.iter().map(move |&m| (m, self.get(m)))
    }

    /// Market with the strictly greatest value; the leftmost market wins ties
    pub fn arg_max(&self) -> (Market, f64) {
        self.iter()
            .skip(1)
            .fold((Market::ALL[0], self.0[0]), |best, current| {
                if current.1 > best.1 { current } else { best }
            })
    }

    /// Largest value across the four markets
    pub fn max_value(&self) -> f64 {
        self.arg_max().1
    }
}
