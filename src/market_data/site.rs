use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Operating state of a storage site
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteStatus {
    Charging,
    Discharging,
    Idle,
}

/// Physical storage asset
///
/// `capacity` must be positive and finite; the engine does not validate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub id: String,
    pub name: String,

    /// Power capacity (MW)
    pub capacity: f64,

    /// Asset type tag, e.g. "BESS + Solar"
    #[serde(rename = "type")]
    pub site_type: String,

    /// State of charge (%)
    pub soc: f64,

    pub status: SiteStatus,

    /// Live power draw (MW)
    pub live_power_mw: f64,
}

impl SiteConfig {
    /// Create an idle site with the given capacity
    pub fn new(id: impl Into<String>, name: impl Into<String>, capacity: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capacity,
            site_type: "BESS".to_string(),
            soc: 50.0,
            status: SiteStatus::Idle,
            live_power_mw: 0.0,
        }
    }

    /// Set the operating state reported by the dashboard
    pub fn with_state(
        mut self,
        site_type: impl Into<String>,
        soc: f64,
        status: SiteStatus,
        live_power_mw: f64,
    ) -> Self {
        self.site_type = site_type.into();
        self.soc = soc;
        self.status = status;
        self.live_power_mw = live_power_mw;
        self
    }
}

/// Read-only registry of known sites
///
/// Keeps insertion order for listing; the first site is the default.
#[derive(Debug, Clone)]
pub struct SiteRegistry {
    sites: Vec<SiteConfig>,
    by_id: AHashMap<String, usize>,
}

impl SiteRegistry {
    /// Build a registry; later duplicates of an id are ignored for lookup
    pub fn new(sites: Vec<SiteConfig>) -> crate::Result<Self> {
        if sites.is_empty() {
            return Err(crate::Error::Config(
                "Site registry needs at least one site".to_string(),
            ));
        }

        let mut by_id = AHashMap::with_capacity(sites.len());
        for (i, site) in sites.iter().enumerate() {
            by_id.entry(site.id.clone()).or_insert(i);
        }

        Ok(Self { sites, by_id })
    }

    /// Registry with the SE3 portfolio shipped with the dashboard
    pub fn builtin() -> Self {
        use SiteStatus::*;

        let sites = vec![
            SiteConfig::new("1011", "Uddevalla Halleröd", 5.0)
                .with_state("BESS + Solar", 62.0, Discharging, 0.079),
            SiteConfig::new("1012", "Västerås Hamn", 4.2).with_state("BESS", 54.0, Charging, 0.061),
            SiteConfig::new("1013", "Enköping Gridpoint", 6.0)
                .with_state("BESS + Solar", 71.0, Idle, 0.0),
            SiteConfig::new("1014", "Uppsala Sävja", 3.5).with_state("BESS", 47.0, Charging, 0.043),
            SiteConfig::new("1015", "Norrköping Bråviken", 7.0)
                .with_state("BESS + Wind", 66.0, Discharging, 0.11),
            SiteConfig::new("1016", "Eskilstuna Park", 2.8).with_state("BESS", 58.0, Idle, 0.0),
            SiteConfig::new("1017", "Örebro North", 5.7)
                .with_state("BESS + Solar", 63.0, Discharging, 0.086),
            SiteConfig::new("1018", "Södertälje Port", 4.9)
                .with_state("BESS", 52.0, Charging, 0.057),
        ];

        let by_id = sites
            .iter()
            .enumerate()
            .map(|(i, site)| (site.id.clone(), i))
            .collect();

        Self { sites, by_id }
    }

    /// Strict lookup
    pub fn get(&self, id: &str) -> crate::Result<&SiteConfig> {
        self.by_id
            .get(id)
            .map(|&i| &self.sites[i])
            .ok_or_else(|| crate::Error::UnknownSite(id.to_string()))
    }

    /// Lookup falling back to the default site for a missing or unknown id
    pub fn get_or_default(&self, id: Option<&str>) -> &SiteConfig {
        id.and_then(|id| self.by_id.get(id))
            .map(|&i| &self.sites[i])
            .unwrap_or_else(|| self.default_site())
    }

    pub fn default_site(&self) -> &SiteConfig {
        &self.sites[0]
    }

    pub fn sites(&self) -> &[SiteConfig] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

impl Default for SiteRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry() {
        let registry = SiteRegistry::builtin();

        assert_eq!(registry.len(), 8);
        assert_eq!(registry.default_site().id, "1011");
        assert_eq!(registry.get("1015").unwrap().capacity, 7.0);

        let default_site = registry.default_site();
        assert_eq!(default_site.site_type, "BESS + Solar");
        assert_eq!(default_site.soc, 62.0);
        assert_eq!(default_site.status, SiteStatus::Discharging);
        assert_eq!(default_site.live_power_mw, 0.079);
    }

    #[test]
    fn test_lookup_fallback() {
        let registry = SiteRegistry::builtin();

        assert_eq!(registry.get_or_default(None).id, "1011");
        assert_eq!(registry.get_or_default(Some("9999")).id, "1011");
        let named = registry.get_or_default(Some("1013"));
        assert_eq!(named.name, "Enköping Gridpoint");
    }

    #[test]
    fn test_strict_lookup_unknown() {
        let registry = SiteRegistry::builtin();
        assert!(matches!(
            registry.get("9999"),
            Err(crate::Error::UnknownSite(id)) if id == "9999"
        ));
    }

    #[test]
    fn test_empty_registry_rejected() {
        assert!(SiteRegistry::new(Vec::new()).is_err());
    }

    #[test]
    fn test_duplicate_id_first_wins() {
        let registry = SiteRegistry::new(vec![
            SiteConfig::new("a", "First", 1.0),
            SiteConfig::new("a", "Second", 2.0),
        ])
        .unwrap();

        assert_eq!(registry.get("a").unwrap().name, "First");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_site_json_shape() {
        let registry = SiteRegistry::builtin();
        let json = serde_json::to_value(registry.default_site()).unwrap();

        assert_eq!(json["type"], "BESS + Solar");
        assert_eq!(json["status"], "discharging");
        assert_eq!(json["livePowerMw"], 0.079);
    }
}
