use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Totals by classification and category plus top triggers.
    Summary,
    /// Search and filter records.
    List(ListArgs),
    /// Show one record with its neighbours.
    Get(IdArgs),
    /// Previous and next record ids.
    Nav(IdArgs),
    /// Trigger frequency ranking.
    Triggers(TriggersArgs),
    /// Per-category breakdown with critical rate.
    Categories,
    /// Load every configured market and report totals.
    Markets,
    /// Validate a dataset file without querying it.
    Validate(ValidateArgs),
    /// Print a JSON Schema for the data model.
    Schema(SchemaArgs),
}

/// Arguments for `llmctrl list`.
#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive substring matched against question, answer and triggers.
    pub query: Option<String>,
    /// CRITICAL, WARNING, OPPORTUNITY or ALL (any case).
    #[arg(short = 'c', long, default_value = "ALL")]
    pub classification: String,
    /// Category id or ALL.
    #[arg(short = 'k', long, default_value = "ALL")]
    pub category: String,
}

/// Arguments for commands addressing one record.
#[derive(Clone, Debug, Args)]
pub struct IdArgs {
    pub id: String,
}

/// Arguments for `llmctrl triggers`.
#[derive(Clone, Debug, Args)]
pub struct TriggersArgs {
    /// Restrict the ranking to one category id (or ALL).
    #[arg(short = 'k', long, default_value = "ALL")]
    pub category: String,
    /// Number of triggers to show (defaults to `general.top_triggers`).
    #[arg(short, long)]
    pub top: Option<u32>,
}

/// Arguments for `llmctrl validate`.
#[derive(Clone, Debug, Args)]
pub struct ValidateArgs {
    pub path: PathBuf,
    /// Optional `id -> analysis` overlay to validate alongside.
    #[arg(long)]
    pub analyses: Option<PathBuf>,
}

/// Arguments for `llmctrl schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    #[arg(value_enum, default_value = "record")]
    pub type_name: SchemaType,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    Record,
    Trigger,
    Category,
}
