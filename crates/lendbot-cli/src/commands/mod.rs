//! CLI command implementations.

pub mod check;
pub mod invest;
pub mod plan;
pub mod rank;
pub mod ratings;

pub use check::CheckArgs;
pub use invest::InvestArgs;
pub use plan::PlanArgs;
pub use rank::RankArgs;
pub use ratings::RatingsArgs;

use std::path::Path;

use lendbot_engine::{DryRunApi, MarketSnapshot};
use lendbot_strategy::SimpleInvestmentStrategy;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Loads and validates a strategy file.
pub fn load_strategy(path: &Path) -> CliResult<SimpleInvestmentStrategy> {
    debug!("Loading strategy from {}", path.display());
    lendbot_strategy::load_strategy(path).map_err(|source| CliError::Strategy {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a market snapshot file.
pub fn load_market(path: &Path) -> CliResult<MarketSnapshot> {
    debug!("Loading market snapshot from {}", path.display());
    MarketSnapshot::from_file(path).map_err(|source| CliError::Market {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a market snapshot into an in-memory marketplace, replacing its
/// wallet balance when `balance` is given.
pub fn simulated_market(path: &Path, balance: Option<Decimal>) -> CliResult<DryRunApi> {
    let mut snapshot = load_market(path)?;
    if let Some(balance) = balance {
        snapshot.balance = balance;
    }
    Ok(DryRunApi::new(snapshot))
}
