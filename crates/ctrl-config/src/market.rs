//! Per-market dataset configuration.

use std::collections::BTreeMap;
use std::path::PathBuf;

use ctrl_core::category::CategoryTable;
use ctrl_core::enums::Language;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which built-in category table a market uses when `categories` is unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategorySet {
    /// The five-category table of the market's `language`.
    #[default]
    Language,
    /// Spanish table with the sixth "Transaccionales" category.
    EsExtended,
}

/// One `[markets.<id>]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MarketConfig {
    /// Display name, e.g. "United Kingdom".
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub language: Language,

    /// JSON array of audit records.
    pub data_path: PathBuf,

    /// Optional `id -> analysis` JSON object overlaid at load time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyses_path: Option<PathBuf>,

    #[serde(default)]
    pub category_set: CategorySet,

    /// Category names keyed by id; replaces any built-in table.
    ///
    /// Keys are strings because TOML and env keys always are.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<BTreeMap<String, String>>,
}

impl MarketConfig {
    pub(crate) fn uk() -> Self {
        Self {
            name: "United Kingdom".to_string(),
            language: Language::En,
            data_path: PathBuf::from("data/uk/betfair_enriched.json"),
            analyses_path: None,
            category_set: CategorySet::Language,
            categories: None,
        }
    }

    pub(crate) fn spain() -> Self {
        Self {
            name: "Spain".to_string(),
            language: Language::Es,
            data_path: PathBuf::from("data/spain/betfair_es_enriched.json"),
            analyses_path: None,
            category_set: CategorySet::Language,
            categories: None,
        }
    }

    /// The category table records in this market are validated against.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a key of the `categories`
    /// override is not a positive integer, or the resulting table is empty.
    pub fn category_table(&self) -> Result<CategoryTable, ConfigError> {
        let Some(overrides) = &self.categories else {
            return Ok(match self.category_set {
                CategorySet::Language => CategoryTable::for_language(self.language),
                CategorySet::EsExtended => CategoryTable::spanish_extended(),
            });
        };

        let mut map = BTreeMap::new();
        for (key, name) in overrides {
            let id: u8 = key.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: format!("categories.{key}"),
                reason: "category keys must be integers between 1 and 255".to_string(),
            })?;
            map.insert(id, name.clone());
        }

        CategoryTable::from_map(&map).map_err(|e| ConfigError::InvalidValue {
            field: "categories".to_string(),
            reason: e.to_string(),
        })
    }
}
