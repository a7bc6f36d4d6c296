use ctrl_query::QueryEngine;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::rate::percent;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct CategoriesResponse<'a> {
    market: &'a str,
    categories: Vec<CategoryRow<'a>>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct CategoryRow<'a> {
    id: u8,
    name: &'a str,
    total: usize,
    critical: usize,
    warning: usize,
    opportunity: usize,
    /// Whole percent of `total` classified CRITICAL; 0 for empty categories.
    critical_rate: usize,
    /// `100 - critical_rate`; 100 for empty categories.
    health_score: usize,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = CategoriesResponse {
        market: &ctx.market_id,
        categories: rows(&ctx.engine),
    };
    output(&response, flags.format)
}

fn rows(engine: &QueryEngine) -> Vec<CategoryRow<'_>> {
    let summary = engine.aggregate();
    engine
        .categories()
        .iter()
        .map(|category| {
            let stats = summary
                .by_category
                .get(&category.id)
                .copied()
                .unwrap_or_default();
            let critical_rate = percent(stats.critical, stats.total);
            CategoryRow {
                id: category.id.get(),
                name: &category.name,
                total: stats.total,
                critical: stats.critical,
                warning: stats.warning,
                opportunity: stats.opportunity,
                critical_rate,
                health_score: 100 - critical_rate,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::shared::fixtures;

    #[test]
    fn every_category_gets_a_row() {
        let engine = fixtures::engine();
        let rows = rows(&engine);
        assert_eq!(rows.len(), 5);
        assert_eq!(
            rows[1],
            CategoryRow {
                id: 2,
                name: "General Comparison",
                total: 2,
                critical: 1,
                warning: 1,
                opportunity: 0,
                critical_rate: 50,
                health_score: 50,
            }
        );
    }

    #[test]
    fn empty_category_rate_is_guarded() {
        let engine = fixtures::engine();
        let rows = rows(&engine);
        let transactional = &rows[4];
        assert_eq!(transactional.total, 0);
        assert_eq!(transactional.critical_rate, 0);
        assert_eq!(transactional.health_score, 100);
    }
}
