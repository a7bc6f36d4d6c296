//! Classification, severity, impact, and language enums for llmctrl.
//!
//! Classification and severity tags serialize as upper-case strings
//! (`"CRITICAL"`, `"WARNING"`, `"OPPORTUNITY"`), which is the shape the
//! upstream analysis pipeline writes. Parsing is exact: an unrecognized tag
//! is a data-integrity error, never silently defaulted.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Overall severity tag assigned to an audit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Critical,
    Warning,
    Opportunity,
}

impl Classification {
    /// Every classification, in display order.
    pub const ALL: [Self; 3] = [Self::Critical, Self::Warning, Self::Opportunity];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Warning => "WARNING",
            Self::Opportunity => "OPPORTUNITY",
        }
    }

    /// Consumer impact level implied by the classification.
    #[must_use]
    pub const fn impact_level(self) -> ImpactLevel {
        match self {
            Self::Critical => ImpactLevel::High,
            Self::Warning => ImpactLevel::Medium,
            Self::Opportunity => ImpactLevel::Low,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::UnknownValue {
                field: "classification".to_string(),
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// TriggerSeverity
// ---------------------------------------------------------------------------

/// Severity tag carried by a single trigger occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerSeverity {
    Critical,
    Warning,
}

impl TriggerSeverity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Warning => "WARNING",
        }
    }
}

impl fmt::Display for TriggerSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ImpactLevel
// ---------------------------------------------------------------------------

/// How strongly a response is expected to sway a consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    High,
    Medium,
    Low,
}

impl ImpactLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// Display language of a dataset (drives category names and labels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// Localized display label for a classification.
    #[must_use]
    pub const fn classification_label(self, classification: Classification) -> &'static str {
        match (self, classification) {
            (Self::En, Classification::Critical) => "Critical",
            (Self::En, Classification::Warning) => "Warning",
            (Self::En, Classification::Opportunity) => "Opportunity",
            (Self::Es, Classification::Critical) => "Crítico",
            (Self::Es, Classification::Warning) => "Advertencia",
            (Self::Es, Classification::Opportunity) => "Oportunidad",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
