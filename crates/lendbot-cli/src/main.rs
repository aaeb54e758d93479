//! Lendbot CLI - Automated investing for peer-to-peer lending marketplaces.
//!
//! # Usage
//!
//! ```bash
//! # Validate a strategy
//! lendbot check --strategy strategy.toml
//!
//! # Show which ratings the strategy would serve first
//! lendbot rank --strategy strategy.toml --market market.json
//!
//! # Simulate a strategy-driven run
//! lendbot plan --strategy strategy.toml --market market.json
//!
//! # Simulate investing 400 into loan 12345
//! lendbot invest --market market.json --loan 12345 --amount 400
//!
//! # Normalize a rating set
//! lendbot ratings '["B", "AAAAA"]'
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let format = cli.format;

    match cli.command {
        Commands::Check(args) => commands::check::execute(args, format)?,
        Commands::Rank(args) => commands::rank::execute(args, format)?,
        Commands::Plan(args) => commands::plan::execute(args, format)?,
        Commands::Invest(args) => commands::invest::execute(args, format)?,
        Commands::Ratings(args) => commands::ratings::execute(args, format)?,
    }

    Ok(())
}

/// Logs go to stderr so that stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "info,lendbot=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
