use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
        right_align_numbers: true,
    }
}

/// Options for two-column `key`/`value` tables, where values stay next to
/// their keys.
pub(crate) fn key_value_options() -> table::TableOptions {
    table::TableOptions {
        right_align_numbers: false,
        ..table_options()
    }
}

/// Responses are objects; when one carries a single array of rows
/// (`records`, `triggers`, `categories`, `markets`) the rows become the
/// table and the remaining scalar fields are printed above it.
fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Object(map) => {
            let mut arrays = map.iter().filter(|(_, v)| v.is_array());
            if let (Some((key, Value::Array(items))), None) = (arrays.next(), arrays.next()) {
                let header = map
                    .iter()
                    .filter(|(k, v)| *k != key && !v.is_array() && !v.is_object())
                    .map(|(k, v)| format!("{k}: {}", value_to_cell(v)))
                    .collect::<Vec<_>>();
                let body = render_array_table(items);
                if header.is_empty() {
                    return Ok(body);
                }
                return Ok(format!("{}\n\n{body}", header.join("\n")));
            }

            let headers = ["key", "value"];
            let mut entries = map.into_iter().collect::<Vec<_>>();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let rows = entries
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, key_value_options()))
        }
        scalar => {
            let headers = ["value"];
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(table::render_entity_table(&headers, &rows, table_options()))
        }
    }
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let headers = ["value"];
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&headers, &rows, table_options());
    }

    // `serde_json::Map` is a BTreeMap, so keys arrive sorted.
    let mut headers = Vec::<String>::new();
    for item in items {
        if let Some(map) = item.as_object() {
            for key in map.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }
    }

    if headers.is_empty() {
        return String::from("(no columns)");
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, table_options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::{render, table::render_entity_table};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        value: u32,
    }

    #[derive(Serialize)]
    struct Rows {
        market: &'static str,
        records: Vec<Example>,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example { id: "x", value: 7 };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "x");
        assert_eq!(parsed["value"], 7);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Example { id: "x", value: 7 };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_for_object_is_key_value() {
        let value = Example { id: "x", value: 7 };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("key")));
        assert!(out.contains("value"));
    }

    #[test]
    fn key_value_values_stay_next_to_their_keys() {
        #[derive(Serialize)]
        struct Detail {
            id: u32,
            question: &'static str,
        }
        let value = Detail {
            id: 12,
            question: "Which bookmaker has the best odds this weekend?",
        };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        let id_row = out.lines().find(|line| line.starts_with("id")).unwrap();
        assert_eq!(id_row, "id        12");
    }

    #[test]
    fn table_render_lifts_single_row_array() {
        let value = Rows {
            market: "uk",
            records: vec![Example { id: "a", value: 1 }, Example { id: "b", value: 2 }],
        };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "market: uk");
        assert!(lines[2].contains("id") && lines[2].contains("value"));
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn empty_rows_render_placeholder() {
        let value = Rows {
            market: "uk",
            records: Vec::new(),
        };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        assert!(out.ends_with("(no rows)"));
    }

    #[test]
    fn table_alignment_handles_mixed_widths() {
        let headers = ["id", "classification", "question"];
        let rows = vec![
            vec!["1".to_string(), "CRITICAL".to_string(), "short".to_string()],
            vec![
                "200".to_string(),
                "OPPORTUNITY".to_string(),
                "a much longer question".to_string(),
            ],
        ];

        let table = render_entity_table(
            &headers,
            &rows,
            super::table::TableOptions {
                max_width: None,
                color: false,
                right_align_numbers: true,
            },
        );
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("classification"));
        assert!(lines[1].chars().all(|c| c == '-'));
    }
}
