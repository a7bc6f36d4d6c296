//! Dataset loading and load-time validation.
//!
//! The upstream pipeline writes a JSON array of record objects. Two trigger
//! shapes exist in the wild:
//!
//! - `triggers_detected` holds full trigger objects and `triggers_detail` is absent
//! - `triggers_detail` holds the objects and `triggers_detected` their names
//!
//! Both normalize to the same [`AuditRecord`]. Cached views
//! (`answer_preview`, `triggers_detected`) are always recomputed from their
//! sources; a stored value that disagrees is logged and replaced.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use ctrl_core::category::{CategoryId, CategoryTable};
use ctrl_core::entities::{AuditRecord, TriggerDetail, trigger_names};
use ctrl_core::enums::Classification;
use ctrl_core::preview::answer_preview;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::LoadError;

/// Builds validated record lists from raw JSON.
#[derive(Debug, Clone)]
pub struct DatasetLoader<'a> {
    categories: &'a CategoryTable,
    analyses: HashMap<String, String>,
}

impl<'a> DatasetLoader<'a> {
    #[must_use]
    pub fn new(categories: &'a CategoryTable) -> Self {
        Self {
            categories,
            analyses: HashMap::new(),
        }
    }

    /// Fill empty `psychological_impact` values from an `id -> text` map.
    #[must_use]
    pub fn with_analyses(mut self, analyses: HashMap<String, String>) -> Self {
        self.analyses = analyses;
        self
    }

    /// Read and validate a dataset file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be read, otherwise the
    /// errors of [`DatasetLoader::parse_str`].
    pub fn load_file(&self, path: &Path) -> Result<Vec<AuditRecord>, LoadError> {
        tracing::debug!(path = %path.display(), "loading dataset");
        let json = read_to_string(path)?;
        let records = self.parse_str(&json)?;
        tracing::info!(path = %path.display(), records = records.len(), "dataset loaded");
        Ok(records)
    }

    /// Parse and validate a dataset held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Json`] for malformed JSON, [`LoadError::NotAnArray`]
    /// if the top level is not an array, and [`LoadError::InvalidRecord`] for
    /// the first record that fails validation.
    pub fn parse_str(&self, json: &str) -> Result<Vec<AuditRecord>, LoadError> {
        let items = match serde_json::from_str::<Value>(json)? {
            Value::Array(items) => items,
            other => {
                return Err(LoadError::NotAnArray {
                    found: json_kind(&other),
                });
            }
        };

        let mut seen = HashSet::with_capacity(items.len());
        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let mut record = self.parse_record(index, item)?;
            if !seen.insert(record.id.clone()) {
                tracing::warn!(id = %record.id, index, "duplicate record id; lookups resolve to the first");
            }
            if record.psychological_impact.is_empty() {
                if let Some(text) = self.analyses.get(&record.id) {
                    record.psychological_impact.clone_from(text);
                }
            }
            records.push(record);
        }
        Ok(records)
    }

    fn parse_record(&self, index: usize, item: &Value) -> Result<AuditRecord, LoadError> {
        let Value::Object(obj) = item else {
            return Err(LoadError::InvalidRecord {
                index,
                id: None,
                field: "record".to_string(),
                reason: format!("expected an object, found {}", json_kind(item)),
            });
        };

        let mut reader = FieldReader {
            index,
            id: None,
            obj,
        };
        let id = reader.id()?;
        reader.id = Some(id.clone());

        let question_text = reader.required_str("question_text")?;
        let question_text_en = reader.optional_str("question_text_en")?.filter(|s| !s.is_empty());
        let answer = reader.required_str("answer")?;
        let category = reader.category(self.categories)?;
        let classification = reader.classification()?;

        let category_name = match reader.optional_str("category_name")? {
            Some(name) if !name.is_empty() => name,
            _ => self
                .categories
                .name(category)
                .unwrap_or_default()
                .to_string(),
        };

        let triggers_detail = reader.triggers()?;
        let triggers_detected = trigger_names(&triggers_detail);

        let preview = answer_preview(&answer);
        if let Some(stored) = reader.optional_str("answer_preview")? {
            if stored != preview {
                tracing::warn!(id = %id, "stored answer_preview differs from answer; recomputed");
            }
        }

        Ok(AuditRecord {
            question_text,
            question_text_en,
            answer_preview: preview,
            answer,
            category,
            category_name,
            mention: reader.bool_or("mention", false)?,
            position: reader.position()?,
            ranking_list: reader.string_list("ranking_list")?,
            triggers_detected,
            triggers_detail,
            citations: reader.string_list("citations")?,
            classification,
            classification_reason: reader.optional_str("classification_reason")?.unwrap_or_default(),
            psychological_impact: reader.optional_str("psychological_impact")?.unwrap_or_default(),
            id,
        })
    }
}

/// Parse an analyses overlay: a JSON object mapping record id to text.
///
/// # Errors
///
/// Returns [`LoadError::Json`] for malformed JSON and
/// [`LoadError::InvalidAnalyses`] if the value is not an object of strings.
pub fn parse_analyses(json: &str) -> Result<HashMap<String, String>, LoadError> {
    let map = match serde_json::from_str::<Value>(json)? {
        Value::Object(map) => map,
        other => {
            return Err(LoadError::InvalidAnalyses(format!(
                "expected an object, found {}",
                json_kind(&other)
            )));
        }
    };
    map.into_iter()
        .map(|(id, text)| match text {
            Value::String(text) => Ok((id, text)),
            other => Err(LoadError::InvalidAnalyses(format!(
                "value for {id} is {}, expected a string",
                json_kind(&other)
            ))),
        })
        .collect()
}

/// Read an analyses overlay file.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, otherwise the errors
/// of [`parse_analyses`].
pub fn load_analyses(path: &Path) -> Result<HashMap<String, String>, LoadError> {
    let json = read_to_string(path)?;
    let analyses = parse_analyses(&json)?;
    tracing::debug!(path = %path.display(), entries = analyses.len(), "analyses overlay loaded");
    Ok(analyses)
}

fn read_to_string(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Typed field access over one raw record, producing field-level errors.
struct FieldReader<'r> {
    index: usize,
    id: Option<String>,
    obj: &'r Map<String, Value>,
}

impl FieldReader<'_> {
    fn invalid(&self, field: &str, reason: impl Into<String>) -> LoadError {
        LoadError::InvalidRecord {
            index: self.index,
            id: self.id.clone(),
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Present and non-null.
    fn get(&self, field: &str) -> Option<&Value> {
        self.obj.get(field).filter(|v| !v.is_null())
    }

    fn id(&self) -> Result<String, LoadError> {
        match self.get("id") {
            Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
            Some(Value::Number(n)) if n.is_u64() || n.is_i64() => Ok(n.to_string()),
            Some(Value::String(_)) => Err(self.invalid("id", "must not be empty")),
            Some(other) => Err(self.invalid(
                "id",
                format!("expected a string or integer, found {}", json_kind(other)),
            )),
            None => Err(self.invalid("id", "missing required field")),
        }
    }

    fn required_str(&self, field: &str) -> Result<String, LoadError> {
        self.optional_str(field)?
            .ok_or_else(|| self.invalid(field, "missing required field"))
    }

    fn optional_str(&self, field: &str) -> Result<Option<String>, LoadError> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.invalid(
                field,
                format!("expected a string, found {}", json_kind(other)),
            )),
        }
    }

    fn bool_or(&self, field: &str, default: bool) -> Result<bool, LoadError> {
        match self.get(field) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(self.invalid(
                field,
                format!("expected a boolean, found {}", json_kind(other)),
            )),
        }
    }

    fn string_list(&self, field: &str) -> Result<Vec<String>, LoadError> {
        match self.get(field) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(self.invalid(
                        field,
                        format!("expected string entries, found {}", json_kind(other)),
                    )),
                })
                .collect(),
            Some(other) => Err(self.invalid(
                field,
                format!("expected an array, found {}", json_kind(other)),
            )),
        }
    }

    fn category(&self, table: &CategoryTable) -> Result<CategoryId, LoadError> {
        let raw = match self.get("category") {
            None => return Err(self.invalid("category", "missing required field")),
            Some(value) => value.as_u64().ok_or_else(|| {
                self.invalid(
                    "category",
                    format!("expected a positive integer, found {value}"),
                )
            })?,
        };
        let id = CategoryId::try_from(raw).map_err(|e| self.invalid("category", e.to_string()))?;
        if !table.contains(id) {
            return Err(self.invalid(
                "category",
                format!("unknown category {id} (known: {})", known_ids(table)),
            ));
        }
        Ok(id)
    }

    fn classification(&self) -> Result<Classification, LoadError> {
        let raw = self.required_str("classification")?;
        raw.parse::<Classification>()
            .map_err(|e| self.invalid("classification", e.to_string()))
    }

    fn position(&self) -> Result<Option<u32>, LoadError> {
        let Some(value) = self.get("position") else {
            return Ok(None);
        };
        value
            .as_u64()
            .filter(|p| *p >= 1)
            .and_then(|p| u32::try_from(p).ok())
            .map(Some)
            .ok_or_else(|| {
                self.invalid(
                    "position",
                    format!("expected a 1-based rank or null, found {value}"),
                )
            })
    }

    fn triggers(&self) -> Result<Vec<TriggerDetail>, LoadError> {
        let detected = self.get("triggers_detected");
        let detail = self.get("triggers_detail");

        if let Some(detail) = detail {
            let details = self.trigger_objects("triggers_detail", detail)?;
            if let Some(Value::Array(items)) = detected {
                let stored: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
                let derived: Vec<&str> = details.iter().map(|d| d.trigger.as_str()).collect();
                if stored.len() == items.len() && stored != derived {
                    tracing::warn!(
                        id = self.id.as_deref().unwrap_or_default(),
                        "triggers_detected disagrees with triggers_detail; derived from details"
                    );
                }
            }
            return Ok(details);
        }

        let Some(value) = detected else {
            return Ok(Vec::new());
        };
        match value {
            Value::Array(items) if items.is_empty() => Ok(Vec::new()),
            Value::Array(items) if items.iter().all(Value::is_object) => {
                self.trigger_objects("triggers_detected", value)
            }
            Value::Array(_) => Err(self.invalid(
                "triggers_detected",
                "trigger names without triggers_detail cannot be expanded into details",
            )),
            other => Err(self.invalid(
                "triggers_detected",
                format!("expected an array, found {}", json_kind(other)),
            )),
        }
    }

    fn trigger_objects(&self, field: &str, value: &Value) -> Result<Vec<TriggerDetail>, LoadError> {
        Vec::<TriggerDetail>::deserialize(value).map_err(|e| self.invalid(field, e.to_string()))
    }
}

fn known_ids(table: &CategoryTable) -> String {
    table
        .ids()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctrl_core::enums::{Language, TriggerSeverity};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn table() -> CategoryTable {
        CategoryTable::for_language(Language::En)
    }

    fn parse(value: &Value) -> Result<Vec<AuditRecord>, LoadError> {
        let categories = table();
        DatasetLoader::new(&categories).parse_str(&value.to_string())
    }

    fn minimal(id: Value) -> Value {
        json!({
            "id": id,
            "question_text": "Which bookmaker is best?",
            "answer": "It depends.",
            "category": 2,
            "classification": "WARNING"
        })
    }

    #[test]
    fn minimal_record_fills_defaults() {
        let records = parse(&json!([minimal(json!(12))])).unwrap();
        let r = &records[0];
        assert_eq!(r.id, "12");
        assert_eq!(r.category_name, "General Comparison");
        assert_eq!(r.answer_preview, "It depends....");
        assert!(!r.mention);
        assert_eq!(r.position, None);
        assert!(r.triggers_detail.is_empty());
        assert!(r.citations.is_empty());
        assert!(r.verify_derived().is_ok());
    }

    #[test]
    fn trigger_objects_in_detected_become_details() {
        let mut raw = minimal(json!("a"));
        raw["triggers_detected"] = json!([
            {"trigger": "fines", "type": "CRITICAL", "context": "fined", "reason": "sanction"},
            {"trigger": "odds", "type": "WARNING", "context": "odds", "reason": "price"}
        ]);
        let records = parse(&json!([raw])).unwrap();
        assert_eq!(records[0].triggers_detected, vec!["fines", "odds"]);
        assert_eq!(records[0].triggers_detail[0].severity, TriggerSeverity::Critical);
    }

    #[test]
    fn names_are_rederived_from_detail() {
        let mut raw = minimal(json!("a"));
        raw["triggers_detected"] = json!(["stale"]);
        raw["triggers_detail"] = json!([
            {"trigger": "fines", "type": "CRITICAL", "context": "", "reason": ""}
        ]);
        let records = parse(&json!([raw])).unwrap();
        assert_eq!(records[0].triggers_detected, vec!["fines"]);
    }

    #[test]
    fn names_without_detail_are_rejected() {
        let mut raw = minimal(json!("a"));
        raw["triggers_detected"] = json!(["fines"]);
        let err = parse(&json!([raw])).unwrap_err();
        assert!(err.to_string().contains("triggers_detected"));
    }

    #[test]
    fn unknown_classification_is_rejected() {
        let mut raw = minimal(json!("x1"));
        raw["classification"] = json!("INFO");
        let err = parse(&json!([minimal(json!("ok")), raw])).unwrap_err();
        match err {
            LoadError::InvalidRecord {
                index, id, field, ..
            } => {
                assert_eq!(index, 1);
                assert_eq!(id.as_deref(), Some("x1"));
                assert_eq!(field, "classification");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        let mut raw = minimal(json!("x"));
        raw["category"] = json!(6);
        let err = parse(&json!([raw])).unwrap_err();
        assert!(err.to_string().contains("unknown category 6"));
    }

    #[test]
    fn missing_required_fields_are_named() {
        for field in ["id", "question_text", "answer", "category", "classification"] {
            let mut raw = minimal(json!("x"));
            raw.as_object_mut().unwrap().remove(field);
            let err = parse(&json!([raw])).unwrap_err();
            assert!(
                err.to_string().contains(&format!("`{field}`")),
                "error for {field} was: {err}"
            );
        }
    }

    #[test]
    fn zero_position_is_rejected() {
        let mut raw = minimal(json!("x"));
        raw["position"] = json!(0);
        assert!(parse(&json!([raw])).is_err());
    }

    #[test]
    fn top_level_must_be_an_array() {
        let err = parse(&json!({"id": 1})).unwrap_err();
        assert!(matches!(err, LoadError::NotAnArray { found: "an object" }));
    }

    #[test]
    fn analyses_fill_only_empty_impact() {
        let mut with_own = minimal(json!("1"));
        with_own["psychological_impact"] = json!("own text");
        let records_json = json!([with_own, minimal(json!("2"))]).to_string();
        let analyses = parse_analyses(r#"{"1": "overlay 1", "2": "overlay 2"}"#).unwrap();

        let categories = table();
        let records = DatasetLoader::new(&categories)
            .with_analyses(analyses)
            .parse_str(&records_json)
            .unwrap();
        assert_eq!(records[0].psychological_impact, "own text");
        assert_eq!(records[1].psychological_impact, "overlay 2");
    }

    #[test]
    fn analyses_must_be_string_values() {
        assert!(matches!(
            parse_analyses(r#"{"1": 3}"#),
            Err(LoadError::InvalidAnalyses(_))
        ));
        assert!(matches!(
            parse_analyses("[]"),
            Err(LoadError::InvalidAnalyses(_))
        ));
    }

    #[test]
    fn duplicate_ids_are_kept_in_order() {
        let records = parse(&json!([minimal(json!("d")), minimal(json!("d"))])).unwrap();
        assert_eq!(records.len(), 2);
    }
}
