//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_market() -> String {
    "uk".to_string()
}

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

/// How many triggers the summary shows.
const fn default_top_triggers() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Market used when `--market` is not given.
    #[serde(default = "default_market")]
    pub default_market: String,

    /// Default result limit for list/search commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Number of entries in the summary's top-trigger list.
    #[serde(default = "default_top_triggers")]
    pub top_triggers: u32,

    /// Subject brand looked up in each record's ranking list.
    #[serde(default)]
    pub brand: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_market: default_market(),
            default_limit: default_limit(),
            top_triggers: default_top_triggers(),
            brand: String::new(),
        }
    }
}

impl GeneralConfig {
    /// The configured brand, if one is set.
    #[must_use]
    pub fn brand(&self) -> Option<&str> {
        let brand = self.brand.trim();
        (!brand.is_empty()).then_some(brand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.default_market, "uk");
        assert_eq!(config.default_limit, 20);
        assert_eq!(config.top_triggers, 10);
        assert!(config.brand().is_none());
    }

    #[test]
    fn blank_brand_is_unset() {
        let config = GeneralConfig {
            brand: "  ".into(),
            ..GeneralConfig::default()
        };
        assert!(config.brand().is_none());

        let config = GeneralConfig {
            brand: " Betfair ".into(),
            ..GeneralConfig::default()
        };
        assert_eq!(config.brand(), Some("Betfair"));
    }
}
