use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use ctrl_config::MarketConfig;
use ctrl_query::DatasetLoader;
use ctrl_query::loader::load_analyses;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ValidateArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ValidateResponse<'a> {
    path: &'a Path,
    market: &'a str,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duplicate_ids: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    with_analysis: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Handle `llmctrl validate`.
///
/// The report is printed either way; an invalid dataset also fails the
/// command so scripts can gate on the exit code.
pub fn handle(
    args: &ValidateArgs,
    market_id: &str,
    market: &MarketConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let response = build(args, market_id, market);
    output(&response, flags.format)?;
    if let Some(error) = response.error {
        anyhow::bail!("{} failed validation: {error}", args.path.display());
    }
    Ok(())
}

fn build<'a>(args: &'a ValidateArgs, market_id: &'a str, market: &MarketConfig) -> ValidateResponse<'a> {
    match check(&args.path, args.analyses.as_deref(), market) {
        Ok((records, duplicate_ids, with_analysis)) => ValidateResponse {
            path: &args.path,
            market: market_id,
            valid: true,
            records: Some(records),
            duplicate_ids: Some(duplicate_ids),
            with_analysis: Some(with_analysis),
            error: None,
        },
        Err(error) => ValidateResponse {
            path: &args.path,
            market: market_id,
            valid: false,
            records: None,
            duplicate_ids: None,
            with_analysis: None,
            error: Some(format!("{error:#}")),
        },
    }
}

/// Returns `(records, duplicate ids, records with analysis)`.
fn check(
    path: &Path,
    analyses: Option<&Path>,
    market: &MarketConfig,
) -> anyhow::Result<(usize, usize, usize)> {
    let categories = market.category_table()?;
    let mut loader = DatasetLoader::new(&categories);
    if let Some(analyses) = analyses {
        let overlay = load_analyses(analyses)
            .with_context(|| format!("invalid analyses file {}", analyses.display()))?;
        loader = loader.with_analyses(overlay);
    }
    let records = loader.load_file(path)?;

    let mut seen = HashSet::new();
    let duplicates = records.iter().filter(|r| !seen.insert(r.id.as_str())).count();
    let with_analysis = records.iter().filter(|r| r.has_analysis()).count();
    Ok((records.len(), duplicates, with_analysis))
}
