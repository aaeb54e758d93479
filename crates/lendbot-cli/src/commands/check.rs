//! Check command implementation.
//!
//! Validates a strategy file and shows the resolved per-rating parameters.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use lendbot_strategy::StrategyPerRating;

use crate::cli::OutputFormat;
use crate::commands::load_strategy;
use crate::output::{format_percent, format_range, print_header, print_output, print_success, KeyValue};

/// Arguments for the check command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Strategy file (TOML)
    #[arg(short, long, env = "LENDBOT_STRATEGY")]
    pub strategy: PathBuf,
}

/// Resolved parameters of one rating.
#[derive(Debug, Serialize, Tabled)]
pub struct RatingRow {
    #[tabled(rename = "Rating")]
    pub rating: String,
    #[tabled(rename = "Target")]
    pub target_share: String,
    #[tabled(rename = "Term (months)")]
    pub term_months: String,
    #[tabled(rename = "Investment")]
    pub investment: String,
    #[tabled(rename = "Loan share")]
    pub loan_share: String,
    #[tabled(rename = "Ask")]
    pub ask: String,
    #[tabled(rename = "Longer first")]
    pub prefer_longer_terms: bool,
}

impl From<&StrategyPerRating> for RatingRow {
    fn from(strategy: &StrategyPerRating) -> Self {
        Self {
            rating: strategy.rating().to_string(),
            target_share: format_percent(strategy.target_share()),
            term_months: format_range(strategy.min_term_months(), strategy.max_term_months()),
            investment: format_range(
                strategy.min_investment_amount(),
                Some(strategy.max_investment_amount()),
            ),
            loan_share: format_range(
                format_percent(strategy.min_loan_share()),
                Some(format_percent(strategy.max_loan_share())),
            ),
            ask: format_range(strategy.min_ask_amount(), Some(strategy.max_ask_amount())),
            prefer_longer_terms: strategy.prefer_longer_terms(),
        }
    }
}

/// Execute the check command.
pub fn execute(args: CheckArgs, format: OutputFormat) -> Result<()> {
    let strategy = load_strategy(&args.strategy)?;
    let rows: Vec<RatingRow> = strategy.strategies().map(RatingRow::from).collect();

    if format != OutputFormat::Table {
        return print_output(&rows, format);
    }

    print_success(&format!("Strategy {} is valid", args.strategy.display()));
    print_header("Limits");
    print_output(
        &[
            KeyValue::new("Minimum balance", strategy.minimum_balance()),
            KeyValue::new("Investment ceiling", strategy.investment_ceiling()),
        ],
        format,
    )?;
    print_header("Ratings");
    print_output(&rows, format)
}
