use ctrl_core::category::CategoryId;
use ctrl_core::enums::Classification;
use ctrl_query::Filter;
use serde::de::DeserializeOwned;

/// Parse an upper-snake-case enum value, accepting any case and hyphens.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().replace('-', "_").to_uppercase();
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// `ALL` (any case) or a classification name (any case).
pub fn classification_filter(raw: &str) -> anyhow::Result<Filter<Classification>> {
    if is_all(raw) {
        return Ok(Filter::All);
    }
    parse_enum(raw, "classification").map(Filter::Only)
}

/// `ALL` (any case) or a category id.
pub fn category_filter(raw: &str) -> anyhow::Result<Filter<CategoryId>> {
    raw.parse::<Filter<CategoryId>>()
        .map_err(|error| anyhow::anyhow!("invalid category '{raw}': {error}"))
}

fn is_all(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("all")
}
