//! Entity structs for the llmctrl data model.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation. Records are read-only once loaded.

mod record;
mod trigger;

pub use record::AuditRecord;
pub use trigger::{TriggerDetail, trigger_names};
