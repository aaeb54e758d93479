//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{CheckArgs, InvestArgs, PlanArgs, RankArgs, RatingsArgs};

/// Lendbot - Automated investing for peer-to-peer lending marketplaces
#[derive(Parser)]
#[command(name = "lendbot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Log decisions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Validate a strategy file and show its per-rating parameters
    Check(CheckArgs),

    /// Rank ratings by how far they lag behind their target share
    Rank(RankArgs),

    /// Simulate strategy-driven investing against a market snapshot
    Plan(PlanArgs),

    /// Simulate a single investment into a chosen loan
    Invest(InvestArgs),

    /// Parse a rating set literal and print its canonical form
    Ratings(RatingsArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
