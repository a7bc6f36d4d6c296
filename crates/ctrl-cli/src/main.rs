#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

use anyhow::Context;
use clap::Parser;
use ctrl_config::CtrlConfig;

mod cli;
mod commands;
mod context;
mod output;
mod ui;

fn main() {
    if let Err(error) = run() {
        eprintln!("llmctrl error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();
    init_tracing(flags.quiet, flags.verbose)?;
    ui::init(&flags);

    if let cli::Commands::Schema(args) = &cli.command {
        return commands::schema::handle(args, &flags);
    }

    let config = CtrlConfig::load_with_dotenv().context("failed to load llmctrl configuration")?;

    match &cli.command {
        cli::Commands::Markets => return commands::markets::handle(&config, &flags),
        cli::Commands::Validate(args) => {
            let market_id = flags
                .market
                .as_deref()
                .unwrap_or(&config.general.default_market);
            let market = config.market(Some(market_id))?;
            return commands::validate::handle(args, market_id, market, &flags);
        }
        _ => {}
    }

    let ctx = context::AppContext::init(config, &flags)?;
    tracing::debug!(
        market = %ctx.market_id,
        path = %ctx.data_path.display(),
        records = ctx.engine.len(),
        "snapshot ready"
    );

    commands::dispatch::dispatch(cli.command, &ctx, &flags)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("LLMCTRL_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
