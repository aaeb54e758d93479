//! Plan command implementation.
//!
//! Runs the strategy against an in-memory copy of a market snapshot.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use lendbot_core::Investment;
use lendbot_engine::{InvestmentReport, Investor, OperatingMode};

use crate::cli::OutputFormat;
use crate::commands::{load_strategy, simulated_market};
use crate::error::CliError;
use crate::output::{print_header, print_output, print_single, print_warning, KeyValue};

/// Arguments for the plan command.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Strategy file (TOML)
    #[arg(short, long, env = "LENDBOT_STRATEGY")]
    pub strategy: PathBuf,

    /// Market snapshot file (JSON)
    #[arg(short, long)]
    pub market: PathBuf,

    /// Balance to plan with instead of the snapshot's wallet balance
    #[arg(short, long)]
    pub balance: Option<Decimal>,
}

/// One planned investment.
#[derive(Debug, Serialize, Tabled)]
pub struct InvestmentRow {
    #[tabled(rename = "Loan")]
    pub loan_id: u64,
    #[tabled(rename = "Rating")]
    pub rating: String,
    #[tabled(rename = "Amount")]
    pub amount: Decimal,
}

impl From<&Investment> for InvestmentRow {
    fn from(investment: &Investment) -> Self {
        Self {
            loan_id: investment.loan_id,
            rating: investment.rating.to_string(),
            amount: investment.amount,
        }
    }
}

/// Execute the plan command.
pub fn execute(args: PlanArgs, format: OutputFormat) -> Result<()> {
    let strategy = load_strategy(&args.strategy)?;
    let market = simulated_market(&args.market, args.balance)?;

    let report = Investor::new(market, false)
        .run(OperatingMode::StrategyDriven(&strategy))
        .map_err(CliError::from)?;

    print_report(&report, format)
}

/// Prints the investments of a run followed by a summary.
pub fn print_report(report: &InvestmentReport, format: OutputFormat) -> Result<()> {
    let rows: Vec<InvestmentRow> = report.made.iter().map(InvestmentRow::from).collect();
    match format {
        OutputFormat::Json => print_single(report),
        OutputFormat::Csv => print_output(&rows, format),
        OutputFormat::Table => {
            for rejection in &report.rejected {
                print_warning(&rejection.reason);
            }
            print_header("Investments");
            print_output(&rows, format)?;
            print_header("Summary");
            print_output(
                &[
                    KeyValue::new("Investments", report.made.len()),
                    KeyValue::new("Total invested", report.total_invested()),
                    KeyValue::new("Remaining balance", report.balance),
                ],
                format,
            )
        }
    }
}
