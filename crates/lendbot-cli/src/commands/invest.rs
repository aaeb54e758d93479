//! Invest command implementation.
//!
//! Simulates a user-driven investment into a single loan.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;

use lendbot_engine::{Investor, OperatingMode};

use crate::cli::OutputFormat;
use crate::commands::plan::print_report;
use crate::commands::simulated_market;
use crate::error::CliError;

/// Arguments for the invest command.
#[derive(Args, Debug)]
pub struct InvestArgs {
    /// Market snapshot file (JSON)
    #[arg(short, long)]
    pub market: PathBuf,

    /// Loan to invest into
    #[arg(short, long)]
    pub loan: u64,

    /// Amount to invest, a multiple of 200
    #[arg(short, long)]
    pub amount: Decimal,

    /// Balance to invest from instead of the snapshot's wallet balance
    #[arg(short, long)]
    pub balance: Option<Decimal>,
}

/// Execute the invest command.
pub fn execute(args: InvestArgs, format: OutputFormat) -> Result<()> {
    let market = simulated_market(&args.market, args.balance)?;

    let report = Investor::new(market, false)
        .run(OperatingMode::UserDriven {
            loan_id: args.loan,
            amount: args.amount,
        })
        .map_err(CliError::from)?;

    print_report(&report, format)
}
