//! The query engine: read-only operations over one frozen snapshot.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use ctrl_core::category::{CategoryId, CategoryTable};
use ctrl_core::entities::AuditRecord;
use ctrl_core::enums::Classification;
use serde::Serialize;

use crate::aggregate::{Summary, TriggerCount, rank_triggers};
use crate::error::LoadError;
use crate::filter::SearchFilters;
use crate::loader::DatasetLoader;

/// Neighbours of a record in canonical order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Navigation<'a> {
    pub prev: Option<&'a str>,
    pub next: Option<&'a str>,
}

/// Lower-cased copies of the searchable fields of one record.
///
/// Built once at construction; the snapshot is immutable so these can
/// never go stale.
#[derive(Debug)]
struct Haystack {
    question: String,
    question_en: Option<String>,
    answer: String,
    triggers: Vec<String>,
}

impl Haystack {
    fn new(record: &AuditRecord) -> Self {
        Self {
            question: record.question_text.to_lowercase(),
            question_en: record.question_text_en.as_deref().map(str::to_lowercase),
            answer: record.answer.to_lowercase(),
            triggers: record
                .triggers_detected
                .iter()
                .map(|t| t.to_lowercase())
                .collect(),
        }
    }

    fn contains(&self, needle: &str) -> bool {
        self.question.contains(needle)
            || self
                .question_en
                .as_deref()
                .is_some_and(|q| q.contains(needle))
            || self.answer.contains(needle)
            || self.triggers.iter().any(|t| t.contains(needle))
    }
}

/// Immutable, ordered record snapshot plus its category table.
///
/// Insertion order is the canonical order used by every operation. All
/// operations borrow `&self` and never mutate, so a shared engine needs no
/// synchronization.
#[derive(Debug)]
pub struct QueryEngine {
    records: Vec<AuditRecord>,
    categories: CategoryTable,
    index: HashMap<String, usize>,
    haystacks: Vec<Haystack>,
    loaded_at: DateTime<Utc>,
}

impl QueryEngine {
    /// Freeze `records` into an engine.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidRecord`] if a record's category is not in
    /// `categories` or a cached view disagrees with its source.
    pub fn new(records: Vec<AuditRecord>, categories: CategoryTable) -> Result<Self, LoadError> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if !categories.contains(record.category) {
                return Err(LoadError::InvalidRecord {
                    index: position,
                    id: Some(record.id.clone()),
                    field: "category".to_string(),
                    reason: format!("unknown category {}", record.category),
                });
            }
            record
                .verify_derived()
                .map_err(|e| LoadError::InvalidRecord {
                    index: position,
                    id: Some(record.id.clone()),
                    field: "derived".to_string(),
                    reason: e.to_string(),
                })?;
            index.entry(record.id.clone()).or_insert(position);
        }

        let haystacks = records.iter().map(Haystack::new).collect();
        Ok(Self {
            records,
            categories,
            index,
            haystacks,
            loaded_at: Utc::now(),
        })
    }

    /// Parse, validate and freeze a dataset held in memory.
    ///
    /// # Errors
    ///
    /// See [`DatasetLoader::parse_str`].
    pub fn from_json(json: &str, categories: CategoryTable) -> Result<Self, LoadError> {
        let records = DatasetLoader::new(&categories).parse_str(json)?;
        Self::new(records, categories)
    }

    /// Read, validate and freeze a dataset file.
    ///
    /// # Errors
    ///
    /// See [`DatasetLoader::load_file`].
    pub fn load(path: &Path, categories: CategoryTable) -> Result<Self, LoadError> {
        let records = DatasetLoader::new(&categories).load_file(path)?;
        Self::new(records, categories)
    }

    /// All records in canonical order.
    #[must_use]
    pub fn records(&self) -> &[AuditRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub const fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    /// When this snapshot was frozen.
    #[must_use]
    pub const fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// First record whose id equals `id` exactly.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&AuditRecord> {
        self.index.get(id).map(|&idx| &self.records[idx])
    }

    /// Stable filter over the snapshot.
    ///
    /// Narrowing passes run in a fixed sequence: classification, then
    /// category, then text. The text pass is skipped when `query` is blank;
    /// otherwise the lower-cased query must be a substring of the question
    /// (either language), the answer, or one of the trigger names.
    #[must_use]
    pub fn search(&self, query: &str, filters: &SearchFilters) -> Vec<&AuditRecord> {
        let needle = (!query.trim().is_empty()).then(|| query.to_lowercase());

        self.records
            .iter()
            .zip(&self.haystacks)
            .filter(|(r, _)| filters.classification.admits(&r.classification))
            .filter(|(r, _)| filters.category.admits(&r.category))
            .filter(|(_, h)| needle.as_deref().is_none_or(|n| h.contains(n)))
            .map(|(r, _)| r)
            .collect()
    }

    /// Records with the given classification, in canonical order.
    #[must_use]
    pub fn by_classification(&self, classification: Classification) -> Vec<&AuditRecord> {
        self.search("", &SearchFilters::default().with_classification(classification))
    }

    /// Records in the given category, in canonical order.
    #[must_use]
    pub fn by_category(&self, category: CategoryId) -> Vec<&AuditRecord> {
        self.search("", &SearchFilters::default().with_category(category))
    }

    /// Counts by classification and category plus the full trigger ranking.
    #[must_use]
    pub fn aggregate(&self) -> Summary {
        Summary::compute(&self.records, self.categories.ids())
    }

    /// Trigger ranking, optionally restricted to one category.
    #[must_use]
    pub fn trigger_ranking(&self, category: Option<CategoryId>) -> Vec<TriggerCount> {
        rank_triggers(
            self.records
                .iter()
                .filter(|r| category.is_none_or(|c| r.category == c)),
        )
    }

    /// Previous and next record ids in canonical order.
    ///
    /// Both sides are `None` when `id` is unknown.
    #[must_use]
    pub fn navigate(&self, id: &str) -> Navigation<'_> {
        let Some(&idx) = self.index.get(id) else {
            return Navigation::default();
        };
        Navigation {
            prev: idx
                .checked_sub(1)
                .map(|prev| self.records[prev].id.as_str()),
            next: self.records.get(idx + 1).map(|r| r.id.as_str()),
        }
    }

    /// Full, untruncated answer text.
    #[must_use]
    pub fn full_answer(&self, id: &str) -> Option<&str> {
        self.find_by_id(id).map(|r| r.answer.as_str())
    }

    /// Consumer analysis text, if the record has one.
    #[must_use]
    pub fn analysis(&self, id: &str) -> Option<&str> {
        self.find_by_id(id)
            .filter(|r| r.has_analysis())
            .map(|r| r.psychological_impact.as_str())
    }
}
