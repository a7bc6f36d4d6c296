use ctrl_core::category::CategoryId;
use ctrl_query::{Filter, QueryEngine, TriggerCount};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TriggersArgs;
use crate::commands::shared::limit::{effective_limit, truncate};
use crate::commands::shared::parse::category_filter;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct TriggersResponse {
    category: String,
    /// Distinct trigger names before truncation.
    distinct: usize,
    triggers: Vec<TriggerCount>,
}

pub fn handle(args: &TriggersArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let category = category_filter(&args.category)?;
    if let Filter::Only(id) = category {
        anyhow::ensure!(
            ctx.engine.categories().contains(id),
            "category {id} is not defined for market '{}'",
            ctx.market_id
        );
    }
    let top = effective_limit(args.top, flags.limit, ctx.config.general.top_triggers);
    output(&build(&ctx.engine, category, top), flags.format)
}

fn build(engine: &QueryEngine, category: Filter<CategoryId>, top: u32) -> TriggersResponse {
    let scope = match category {
        Filter::All => None,
        Filter::Only(id) => Some(id),
    };
    let mut triggers = engine.trigger_ranking(scope);
    let distinct = triggers.len();
    truncate(&mut triggers, top);

    TriggersResponse {
        category: category.to_string(),
        distinct,
        triggers,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::shared::fixtures;

    fn names(response: &TriggersResponse) -> Vec<&str> {
        response.triggers.iter().map(|t| t.trigger.as_str()).collect()
    }

    #[test]
    fn ranking_ties_keep_first_seen_order() {
        let engine = fixtures::engine();
        let response = build(&engine, Filter::All, 10);
        assert_eq!(names(&response), vec!["ranking", "absence"]);
        assert_eq!(response.triggers[1].count, 2);
    }

    #[test]
    fn category_scope_narrows_ranking() {
        let engine = fixtures::engine();
        let response = build(&engine, Filter::Only(CategoryId::new(4).unwrap()), 10);
        assert_eq!(response.category, "4");
        assert_eq!(names(&response), vec!["absence"]);
    }

    #[test]
    fn top_limits_output_not_distinct_count() {
        let engine = fixtures::engine();
        let response = build(&engine, Filter::All, 1);
        assert_eq!(response.distinct, 2);
        assert_eq!(response.triggers.len(), 1);
    }
}
