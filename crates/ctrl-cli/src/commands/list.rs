use ctrl_core::entities::AuditRecord;
use ctrl_core::enums::Classification;
use ctrl_query::{QueryEngine, SearchFilters};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ListArgs;
use crate::commands::shared::limit::{effective_limit, truncate};
use crate::commands::shared::parse::{category_filter, classification_filter};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ListResponse<'a> {
    query: &'a str,
    classification: String,
    category: String,
    /// Matches before `--limit` was applied.
    matches: usize,
    records: Vec<RecordRow<'a>>,
}

/// Compact row; `get` shows the full record.
#[derive(Debug, Serialize)]
struct RecordRow<'a> {
    id: &'a str,
    classification: Classification,
    category: &'a str,
    question: &'a str,
    preview: &'a str,
}

impl<'a> From<&'a AuditRecord> for RecordRow<'a> {
    fn from(record: &'a AuditRecord) -> Self {
        Self {
            id: &record.id,
            classification: record.classification,
            category: &record.category_name,
            question: &record.question_text,
            preview: &record.answer_preview,
        }
    }
}

pub fn handle(args: &ListArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filters = SearchFilters {
        classification: classification_filter(&args.classification)?,
        category: category_filter(&args.category)?,
    };
    let limit = effective_limit(None, flags.limit, ctx.config.general.default_limit);
    let query = args.query.as_deref().unwrap_or_default();
    output(&build(&ctx.engine, query, &filters, limit), flags.format)
}

fn build<'a>(
    engine: &'a QueryEngine,
    query: &'a str,
    filters: &SearchFilters,
    limit: u32,
) -> ListResponse<'a> {
    let mut records: Vec<RecordRow<'a>> = engine
        .search(query, filters)
        .into_iter()
        .map(RecordRow::from)
        .collect();
    let matches = records.len();
    truncate(&mut records, limit);

    ListResponse {
        query,
        classification: filters.classification.to_string(),
        category: filters.category.to_string(),
        matches,
        records,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::shared::fixtures;

    fn ids(response: &ListResponse<'_>) -> Vec<String> {
        response.records.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn unfiltered_list_keeps_canonical_order() {
        let engine = fixtures::engine();
        let response = build(&engine, "", &SearchFilters::default(), 20);
        assert_eq!(ids(&response), vec!["1", "2", "3", "4"]);
        assert_eq!(response.classification, "ALL");
        assert_eq!(response.category, "ALL");
    }

    #[test]
    fn filters_parsed_from_cli_strings() {
        let engine = fixtures::engine();
        let filters = SearchFilters {
            classification: classification_filter("critical").unwrap(),
            category: category_filter("all").unwrap(),
        };
        let response = build(&engine, "", &filters, 20);
        assert_eq!(ids(&response), vec!["3", "4"]);
        assert_eq!(response.classification, "CRITICAL");
    }

    #[test]
    fn text_query_matches_triggers() {
        let engine = fixtures::engine();
        let response = build(&engine, "ABSENCE", &SearchFilters::default(), 20);
        assert_eq!(ids(&response), vec!["3", "4"]);
    }

    #[test]
    fn limit_truncates_but_reports_all_matches() {
        let engine = fixtures::engine();
        let response = build(&engine, "betfair", &SearchFilters::default(), 1);
        assert_eq!(response.matches, 2);
        assert_eq!(ids(&response), vec!["1"]);
    }

    #[test]
    fn no_matches_is_an_empty_list() {
        let engine = fixtures::engine();
        let response = build(&engine, "paddy power", &SearchFilters::default(), 20);
        assert_eq!(response.matches, 0);
        assert!(response.records.is_empty());
    }
}
