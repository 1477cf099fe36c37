//! Market data: markets, forecast series, context series and sites

mod forecast;
mod market;
mod site;

pub use forecast::{ContextSignal, DEFAULT_AREA, ForecastPoint, ProductionGapPoint, WeatherPoint};
pub use market::{Market, MarketValues};
pub use site::{SiteConfig, SiteRegistry, SiteStatus};
