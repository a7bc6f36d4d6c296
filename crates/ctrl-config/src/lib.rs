//! # ctrl-config
//!
//! Layered configuration loading for llmctrl using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LLMCTRL_*` prefix, `__` as separator)
//! 2. Project-level `.llmctrl/config.toml`
//! 3. User-level `~/.config/llmctrl/config.toml`
//! 4. Built-in defaults (`uk` and `spain` markets)
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LLMCTRL_GENERAL__DEFAULT_MARKET` -> `general.default_market`,
//! `LLMCTRL_MARKETS__UK__DATA_PATH` -> `markets.uk.data_path`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use ctrl_config::CtrlConfig;
//!
//! let config = CtrlConfig::load_with_dotenv().expect("config");
//! let market = config.market(None).expect("default market");
//! println!("{}", market.data_path.display());
//! ```

mod error;
mod general;
mod market;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use market::{CategorySet, MarketConfig};

use std::collections::BTreeMap;
use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CtrlConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub markets: BTreeMap<String, MarketConfig>,
}

impl Default for CtrlConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            markets: BTreeMap::from([
                ("uk".to_string(), MarketConfig::uk()),
                ("spain".to_string(), MarketConfig::spain()),
            ]),
        }
    }
}

impl CtrlConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`CtrlConfig::load_with_dotenv`] for
    /// `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source fails to parse or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` from the working directory.
    ///
    /// # Errors
    ///
    /// See [`CtrlConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env is normal.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Project-local config

        let local_path = PathBuf::from(".llmctrl/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Environment variables (highest priority)
        figment.merge(Env::prefixed("LLMCTRL_").split("__"))
    }

    /// Resolve a market by id, falling back to `general.default_market`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownMarket`] if no such section exists.
    pub fn market(&self, id: Option<&str>) -> Result<&MarketConfig, ConfigError> {
        let id = id.unwrap_or(&self.general.default_market);
        self.markets
            .get(id)
            .ok_or_else(|| ConfigError::UnknownMarket {
                market: id.to_string(),
                known: self.markets.keys().cloned().collect::<Vec<_>>().join(", "),
            })
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("llmctrl").join("config.toml"))
    }
}
