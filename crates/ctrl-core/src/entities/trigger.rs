use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TriggerSeverity;

/// One detected trigger occurrence inside a model answer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TriggerDetail {
    /// Trigger name.
    pub trigger: String,
    /// Severity tag (`type` on the wire).
    #[serde(rename = "type")]
    pub severity: TriggerSeverity,
    /// Verbatim excerpt of the answer. Never truncated for display.
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub reason: String,
}

/// Project trigger details onto their names, preserving order.
#[must_use]
pub fn trigger_names(details: &[TriggerDetail]) -> Vec<String> {
    details.iter().map(|d| d.trigger.clone()).collect()
}
