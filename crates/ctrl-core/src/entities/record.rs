use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::category::CategoryId;
use crate::entities::trigger::{TriggerDetail, trigger_names};
use crate::enums::Classification;
use crate::errors::CoreError;
use crate::preview::answer_preview;

/// One logged question/answer exchange plus its precomputed classification.
///
/// `answer_preview` and `triggers_detected` are cached views of `answer` and
/// `triggers_detail`; [`AuditRecord::verify_derived`] checks they agree.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditRecord {
    pub id: String,
    pub question_text: String,
    /// English rendering of the question, for bilingual datasets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_text_en: Option<String>,
    pub answer: String,
    pub answer_preview: String,
    pub category: CategoryId,
    pub category_name: String,
    pub mention: bool,
    /// 1-based rank of the subject brand; `None` means "not ranked".
    pub position: Option<u32>,
    pub ranking_list: Vec<String>,
    pub triggers_detected: Vec<String>,
    pub triggers_detail: Vec<TriggerDetail>,
    pub citations: Vec<String>,
    pub classification: Classification,
    pub classification_reason: String,
    /// Precomputed consumer analysis narrative; may be empty.
    #[serde(default)]
    pub psychological_impact: String,
}

impl AuditRecord {
    /// 1-based position of `brand` in `ranking_list`, matched case-insensitively.
    ///
    /// When a brand is listed more than once the first occurrence wins.
    #[must_use]
    pub fn brand_rank(&self, brand: &str) -> Option<usize> {
        let wanted = brand.to_lowercase();
        self.ranking_list
            .iter()
            .position(|b| b.to_lowercase() == wanted)
            .map(|idx| idx + 1)
    }

    /// Whether the record carries a consumer analysis.
    #[must_use]
    pub fn has_analysis(&self) -> bool {
        !self.psychological_impact.is_empty()
    }

    /// Check that the cached views agree with their sources.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming the stale field.
    pub fn verify_derived(&self) -> Result<(), CoreError> {
        if self.answer_preview != answer_preview(&self.answer) {
            return Err(CoreError::Validation(format!(
                "record {}: answer_preview does not match answer",
                self.id
            )));
        }
        if self.triggers_detected != trigger_names(&self.triggers_detail) {
            return Err(CoreError::Validation(format!(
                "record {}: triggers_detected does not match triggers_detail",
                self.id
            )));
        }
        Ok(())
    }
}
