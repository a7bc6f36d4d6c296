use ctrl_config::CtrlConfig;
use ctrl_core::enums::Language;
use ctrl_query::Catalog;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::load_engine;
use crate::output::output;

#[derive(Debug, Serialize)]
struct MarketsResponse<'a> {
    default_market: &'a str,
    markets: Vec<MarketRow<'a>>,
}

#[derive(Debug, Serialize)]
struct MarketRow<'a> {
    market: &'a str,
    name: &'a str,
    language: Language,
    status: &'static str,
    records: Option<usize>,
    critical: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Handle `llmctrl markets`.
///
/// A market that fails to load is reported in its row; the command itself
/// only fails on output errors.
pub fn handle(config: &CtrlConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (catalog, failures) = load_catalog(config);
    output(&build(config, &catalog, failures), flags.format)
}

fn load_catalog(config: &CtrlConfig) -> (Catalog, Vec<(String, String)>) {
    let mut catalog = Catalog::new();
    let mut failures = Vec::new();
    for (id, market) in &config.markets {
        match load_engine(market, &market.data_path) {
            Ok(engine) => {
                catalog.insert(id.clone(), engine);
            }
            Err(error) => {
                tracing::warn!(market = %id, %error, "market failed to load");
                failures.push((id.clone(), format!("{error:#}")));
            }
        }
    }
    (catalog, failures)
}

fn build<'a>(
    config: &'a CtrlConfig,
    catalog: &Catalog,
    failures: Vec<(String, String)>,
) -> MarketsResponse<'a> {
    let markets = config
        .markets
        .iter()
        .map(|(id, market)| {
            let engine = catalog.get(id);
            let error = failures
                .iter()
                .find(|(failed, _)| failed == id)
                .map(|(_, message)| message.clone());
            MarketRow {
                market: id,
                name: &market.name,
                language: market.language,
                status: if engine.is_some() { "ok" } else { "error" },
                records: engine.map(ctrl_query::QueryEngine::len),
                critical: engine.map(|e| e.aggregate().by_classification.critical),
                error,
            }
        })
        .collect();

    MarketsResponse {
        default_market: &config.general.default_market,
        markets,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn loads_each_market_independently() {
        let dir = tempfile::tempdir().unwrap();
        let uk = dir.path().join("uk.json");
        std::fs::write(
            &uk,
            r#"[{"id": 1, "question_text": "q", "answer": "a", "category": 1, "classification": "CRITICAL"}]"#,
        )
        .unwrap();

        let mut config = CtrlConfig::default();
        let market = config.markets.get_mut("uk").unwrap();
        market.data_path = uk;
        market.analyses_path = None;
        config.markets.get_mut("spain").unwrap().data_path = PathBuf::from("/nonexistent.json");

        let (catalog, failures) = load_catalog(&config);
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["uk"]);

        let response = build(&config, &catalog, failures);
        let spain = &response.markets[0];
        assert_eq!(spain.market, "spain");
        assert_eq!(spain.status, "error");
        assert!(spain.error.as_deref().is_some_and(|e| e.contains("nonexistent.json")));

        let uk = &response.markets[1];
        assert_eq!(uk.status, "ok");
        assert_eq!(uk.records, Some(1));
        assert_eq!(uk.critical, Some(1));
    }
}
