//! Rank command implementation.
//!
//! Shows under-invested ratings in the order the strategy would serve them.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::{load_market, load_strategy};
use crate::output::{format_percent, print_output};

/// Arguments for the rank command.
#[derive(Args, Debug)]
pub struct RankArgs {
    /// Strategy file (TOML)
    #[arg(short, long, env = "LENDBOT_STRATEGY")]
    pub strategy: PathBuf,

    /// Market snapshot file (JSON)
    #[arg(short, long)]
    pub market: PathBuf,
}

/// Demand of one rating.
#[derive(Debug, Serialize, Tabled)]
pub struct DemandRow {
    #[tabled(rename = "#")]
    pub priority: usize,
    #[tabled(rename = "Rating")]
    pub rating: String,
    #[tabled(rename = "Target")]
    pub target_share: String,
    #[tabled(rename = "Current")]
    pub current_share: String,
    #[tabled(rename = "Demand")]
    pub demand: String,
}

/// Execute the rank command.
pub fn execute(args: RankArgs, format: OutputFormat) -> Result<()> {
    let strategy = load_strategy(&args.strategy)?;
    let portfolio = load_market(&args.market)?.portfolio();

    let rows: Vec<DemandRow> = strategy
        .demand_by_rating(portfolio.shares_by_rating())
        .into_iter()
        .enumerate()
        .map(|(i, (rating, demand))| DemandRow {
            priority: i + 1,
            rating: rating.to_string(),
            target_share: strategy
                .strategy_for(rating)
                .map(|s| format_percent(s.target_share()))
                .unwrap_or_default(),
            current_share: format_percent(portfolio.share_on(rating)),
            demand: format_percent(demand),
        })
        .collect();

    print_output(&rows, format)
}
