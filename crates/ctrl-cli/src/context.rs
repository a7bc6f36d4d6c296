use std::path::{Path, PathBuf};

use anyhow::Context;
use ctrl_config::{CtrlConfig, MarketConfig};
use ctrl_core::category::CategoryTable;
use ctrl_query::loader::load_analyses;
use ctrl_query::{DatasetLoader, QueryEngine};

use crate::cli::GlobalFlags;

/// The resolved market and its frozen snapshot.
pub struct AppContext {
    pub config: CtrlConfig,
    pub market_id: String,
    pub market: MarketConfig,
    pub data_path: PathBuf,
    pub engine: QueryEngine,
}

impl AppContext {
    /// Resolve `--market`/`--data` against the config and load the snapshot.
    pub fn init(config: CtrlConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let market_id = flags
            .market
            .clone()
            .unwrap_or_else(|| config.general.default_market.clone());
        let market = config.market(Some(&market_id))?.clone();
        let data_path = flags
            .data
            .clone()
            .unwrap_or_else(|| market.data_path.clone());

        let engine = load_engine(&market, &data_path)
            .with_context(|| format!("failed to load market '{market_id}'"))?;

        Ok(Self {
            config,
            market_id,
            market,
            data_path,
            engine,
        })
    }
}

/// Load one market's dataset (plus its analyses overlay) into an engine.
pub fn load_engine(market: &MarketConfig, data_path: &Path) -> anyhow::Result<QueryEngine> {
    let categories = market.category_table()?;
    let records = loader_for(market, &categories)?
        .load_file(data_path)
        .with_context(|| format!("invalid dataset {}", data_path.display()))?;
    Ok(QueryEngine::new(records, categories)?)
}

/// A loader for `market`, with its analyses overlay when the file exists.
pub fn loader_for<'a>(
    market: &MarketConfig,
    categories: &'a CategoryTable,
) -> anyhow::Result<DatasetLoader<'a>> {
    let loader = DatasetLoader::new(categories);
    let Some(path) = &market.analyses_path else {
        return Ok(loader);
    };
    if !path.exists() {
        tracing::warn!(path = %path.display(), "analyses file not found; skipping overlay");
        return Ok(loader);
    }
    let analyses = load_analyses(path)
        .with_context(|| format!("invalid analyses file {}", path.display()))?;
    Ok(loader.with_analyses(analyses))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctrl_config::CategorySet;
    use ctrl_core::category::CategoryId;
    use pretty_assertions::assert_eq;

    const SIXTH_CATEGORY: &str = r#"[
        {"id": 1, "question_text": "¿Cómo retiro mis ganancias?", "answer": "Desde la cuenta.",
         "category": 6, "classification": "OPPORTUNITY"}
    ]"#;

    fn spain() -> MarketConfig {
        CtrlConfig::default().markets["spain"].clone()
    }

    #[test]
    fn extended_spanish_market_loads_sixth_category() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("es6.json");
        std::fs::write(&path, SIXTH_CATEGORY).unwrap();

        let market = MarketConfig {
            category_set: CategorySet::EsExtended,
            ..spain()
        };
        let engine = load_engine(&market, &path).unwrap();
        let record = engine.find_by_id("1").unwrap();
        assert_eq!(record.category, CategoryId::new(6).unwrap());
        assert_eq!(record.category_name, "Transaccionales");
    }

    #[test]
    fn default_spanish_market_rejects_sixth_category() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("es6.json");
        std::fs::write(&path, SIXTH_CATEGORY).unwrap();

        let err = load_engine(&spain(), &path).unwrap_err();
        assert!(format!("{err:#}").contains("unknown category 6"));
    }
}
