use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `llmctrl` binary.
#[derive(Debug, Parser)]
#[command(
    name = "llmctrl",
    version,
    about = "llmctrl - query LLM brand-audit snapshots"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Market to query (defaults to `general.default_market`)
    #[arg(short, long, global = true)]
    pub market: Option<String>,

    /// Dataset file overriding the market's configured `data_path`
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            market: self.market.clone(),
            data: self.data.clone(),
        }
    }
}
