//! Aggregate statistics over a record snapshot.
//!
//! The engine only returns raw counts. Rates and percentages are left to the
//! presentation layer, which must guard the zero-total case itself.

use std::collections::{BTreeMap, HashMap};

use ctrl_core::category::CategoryId;
use ctrl_core::entities::AuditRecord;
use ctrl_core::enums::Classification;
use serde::Serialize;

/// Record counts per classification. Every class is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationCounts {
    #[serde(rename = "CRITICAL")]
    pub critical: usize,
    #[serde(rename = "WARNING")]
    pub warning: usize,
    #[serde(rename = "OPPORTUNITY")]
    pub opportunity: usize,
}

impl ClassificationCounts {
    #[must_use]
    pub const fn get(&self, classification: Classification) -> usize {
        match classification {
            Classification::Critical => self.critical,
            Classification::Warning => self.warning,
            Classification::Opportunity => self.opportunity,
        }
    }

    /// Sum over all classes.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.critical + self.warning + self.opportunity
    }

    fn record(&mut self, classification: Classification) {
        match classification {
            Classification::Critical => self.critical += 1,
            Classification::Warning => self.warning += 1,
            Classification::Opportunity => self.opportunity += 1,
        }
    }
}

/// Per-category totals broken down by classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub total: usize,
    pub critical: usize,
    pub warning: usize,
    pub opportunity: usize,
}

impl CategoryStats {
    fn record(&mut self, classification: Classification) {
        self.total += 1;
        match classification {
            Classification::Critical => self.critical += 1,
            Classification::Warning => self.warning += 1,
            Classification::Opportunity => self.opportunity += 1,
        }
    }
}

/// Occurrence count for one trigger name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerCount {
    pub trigger: String,
    pub count: usize,
}

/// Aggregate view of a full snapshot.
///
/// Internally consistent by construction: `total` equals both the sum of
/// `by_classification` and the sum of every `by_category` total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub by_classification: ClassificationCounts,
    pub by_category: BTreeMap<CategoryId, CategoryStats>,
    /// Full ranking; callers truncate with [`Summary::top`].
    pub top_triggers: Vec<TriggerCount>,
}

impl Summary {
    /// Compute a summary over `records`, seeding every known category.
    pub(crate) fn compute(
        records: &[AuditRecord],
        categories: impl IntoIterator<Item = CategoryId>,
    ) -> Self {
        let mut by_classification = ClassificationCounts::default();
        let mut by_category: BTreeMap<CategoryId, CategoryStats> = categories
            .into_iter()
            .map(|id| (id, CategoryStats::default()))
            .collect();

        for record in records {
            by_classification.record(record.classification);
            by_category
                .entry(record.category)
                .or_default()
                .record(record.classification);
        }

        Self {
            total: records.len(),
            by_classification,
            by_category,
            top_triggers: rank_triggers(records.iter()),
        }
    }

    /// The `k` most frequent triggers (fewer if the ranking is shorter).
    #[must_use]
    pub fn top(&self, k: usize) -> &[TriggerCount] {
        &self.top_triggers[..k.min(self.top_triggers.len())]
    }
}

/// Rank trigger names by occurrence count, descending.
///
/// Ties keep first-seen order in the iteration sequence; with canonical
/// record order that makes the ranking fully deterministic.
pub fn rank_triggers<'a>(records: impl IntoIterator<Item = &'a AuditRecord>) -> Vec<TriggerCount> {
    let mut ranking: Vec<TriggerCount> = Vec::new();
    let mut slots: HashMap<&'a str, usize> = HashMap::new();

    for record in records {
        for name in &record.triggers_detected {
            let slot = *slots.entry(name.as_str()).or_insert_with(|| {
                ranking.push(TriggerCount {
                    trigger: name.clone(),
                    count: 0,
                });
                ranking.len() - 1
            });
            ranking[slot].count += 1;
        }
    }

    // `sort_by` is stable, so equal counts stay in first-seen order.
    ranking.sort_by(|a, b| b.count.cmp(&a.count));
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_default_to_zero() {
        let counts = ClassificationCounts::default();
        for c in Classification::ALL {
            assert_eq!(counts.get(c), 0);
        }
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn counts_serialize_with_classification_keys() {
        let counts = ClassificationCounts {
            critical: 2,
            warning: 1,
            opportunity: 0,
        };
        let value = serde_json::to_value(counts).unwrap();
        assert_eq!(value["CRITICAL"], 2);
        assert_eq!(value["OPPORTUNITY"], 0);
    }

    #[test]
    fn top_truncates_without_panicking() {
        let summary = Summary {
            total: 0,
            by_classification: ClassificationCounts::default(),
            by_category: BTreeMap::new(),
            top_triggers: vec![TriggerCount {
                trigger: "a".into(),
                count: 1,
            }],
        };
        assert_eq!(summary.top(10).len(), 1);
        assert!(summary.top(0).is_empty());
    }
}
