use ctrl_core::category::Category;
use ctrl_core::entities::{AuditRecord, TriggerDetail};
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaType};
use crate::output::output;

/// Handle `llmctrl schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema_value(args.type_name)?, flags.format)
}

fn schema_value(type_name: SchemaType) -> anyhow::Result<serde_json::Value> {
    let schema = match type_name {
        SchemaType::Record => schema_for!(AuditRecord),
        SchemaType::Trigger => schema_for!(TriggerDetail),
        SchemaType::Category => schema_for!(Category),
    };
    Ok(serde_json::to_value(schema)?)
}
