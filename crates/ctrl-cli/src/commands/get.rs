use ctrl_core::entities::AuditRecord;
use ctrl_core::enums::{ImpactLevel, Language};
use ctrl_query::{Navigation, QueryEngine};
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::{key_value_options, output, table};

#[derive(Debug, Serialize)]
struct RecordDetailResponse<'a> {
    id: &'a str,
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    impact_level: Option<ImpactLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    brand_rank: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    navigation: Option<Navigation<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<&'a AuditRecord>,
}

pub fn handle(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = build(&ctx.engine, id, ctx.market.language, ctx.config.general.brand());
    if !response.found {
        tracing::debug!(id, market = %ctx.market_id, "record not found");
    }
    match (flags.format, response.record) {
        (OutputFormat::Table, Some(record)) => {
            println!("{}", detail_table(&response, record, key_value_options()));
            Ok(())
        }
        _ => output(&response, flags.format),
    }
}

/// Table form of a found record.
///
/// Short fields go into a key/value table that may shrink to the terminal.
/// The answer, trigger contexts and analysis follow as plain sections and are
/// never truncated.
fn detail_table(
    response: &RecordDetailResponse<'_>,
    record: &AuditRecord,
    options: table::TableOptions,
) -> String {
    let or_dash = |value: Option<String>| value.unwrap_or_else(|| String::from("-"));
    let navigation = response.navigation.unwrap_or_default();

    let mut rows = vec![
        vec!["id".to_string(), record.id.clone()],
        vec!["classification".to_string(), record.classification.to_string()],
        vec!["label".to_string(), or_dash(response.label.map(str::to_string))],
        vec![
            "impact_level".to_string(),
            or_dash(response.impact_level.map(|level| level.to_string())),
        ],
        vec![
            "category".to_string(),
            format!("{} {}", record.category, record.category_name),
        ],
        vec!["mention".to_string(), record.mention.to_string()],
        vec!["position".to_string(), or_dash(record.position.map(|p| p.to_string()))],
        vec!["brand_rank".to_string(), or_dash(response.brand_rank.map(|r| r.to_string()))],
        vec!["prev".to_string(), or_dash(navigation.prev.map(str::to_string))],
        vec!["next".to_string(), or_dash(navigation.next.map(str::to_string))],
        vec!["question".to_string(), record.question_text.clone()],
    ];
    if let Some(question_en) = &record.question_text_en {
        rows.push(vec!["question_en".to_string(), question_en.clone()]);
    }
    rows.push(vec!["ranking_list".to_string(), record.ranking_list.join(", ")]);
    rows.push(vec!["citations".to_string(), record.citations.join(", ")]);
    rows.push(vec![
        "classification_reason".to_string(),
        record.classification_reason.clone(),
    ]);

    let mut out = table::render_entity_table(&["field", "value"], &rows, options);
    out.push_str("\n\nanswer:\n");
    out.push_str(&record.answer);

    if !record.triggers_detail.is_empty() {
        out.push_str("\n\ntriggers:");
        for detail in &record.triggers_detail {
            out.push_str(&format!(
                "\n- {} [{}]\n  context: {}\n  reason: {}",
                detail.trigger, detail.severity, detail.context, detail.reason
            ));
        }
    }

    if record.has_analysis() {
        out.push_str("\n\nanalysis:\n");
        out.push_str(&record.psychological_impact);
    }
    out
}

fn build<'a>(
    engine: &'a QueryEngine,
    id: &'a str,
    language: Language,
    brand: Option<&str>,
) -> RecordDetailResponse<'a> {
    let Some(record) = engine.find_by_id(id) else {
        return RecordDetailResponse {
            id,
            found: false,
            label: None,
            impact_level: None,
            brand_rank: None,
            navigation: None,
            record: None,
        };
    };

    RecordDetailResponse {
        id,
        found: true,
        label: Some(language.classification_label(record.classification)),
        impact_level: Some(record.classification.impact_level()),
        brand_rank: brand.and_then(|brand| record.brand_rank(brand)),
        navigation: Some(engine.navigate(id)),
        record: Some(record),
    }
}
