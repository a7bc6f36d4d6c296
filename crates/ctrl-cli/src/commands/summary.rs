use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use ctrl_core::category::{CategoryId, CategoryTable};
use ctrl_query::{CategoryStats, ClassificationCounts, QueryEngine, TriggerCount};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::rate::percent;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SummaryResponse<'a> {
    market: &'a str,
    total: usize,
    by_classification: ClassificationCounts,
    critical_rate: usize,
    mention_rate: usize,
    by_category: Vec<CategoryTotal<'a>>,
    top_triggers: Vec<TriggerCount>,
    loaded_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct CategoryTotal<'a> {
    id: u8,
    name: &'a str,
    total: usize,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let top = effective_limit(None, flags.limit, ctx.config.general.top_triggers);
    output(&build(&ctx.market_id, &ctx.engine, top), flags.format)
}

fn build<'a>(market: &'a str, engine: &'a QueryEngine, top: u32) -> SummaryResponse<'a> {
    let summary = engine.aggregate();
    let mentions = engine.records().iter().filter(|r| r.mention).count();
    let top = usize::try_from(top).unwrap_or(usize::MAX);

    SummaryResponse {
        market,
        total: summary.total,
        by_classification: summary.by_classification,
        critical_rate: percent(summary.by_classification.critical, summary.total),
        mention_rate: percent(mentions, summary.total),
        by_category: category_totals(engine.categories(), &summary.by_category),
        top_triggers: summary.top(top).to_vec(),
        loaded_at: engine.loaded_at(),
    }
}

fn category_totals<'a>(
    table: &'a CategoryTable,
    stats: &BTreeMap<CategoryId, CategoryStats>,
) -> Vec<CategoryTotal<'a>> {
    table
        .iter()
        .map(|category| CategoryTotal {
            id: category.id.get(),
            name: &category.name,
            total: stats.get(&category.id).map_or(0, |s| s.total),
        })
        .collect()
}
