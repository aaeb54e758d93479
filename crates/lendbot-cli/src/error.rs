//! CLI error types.

use std::path::PathBuf;

use lendbot_core::CoreError;
use lendbot_engine::InvestError;
use lendbot_strategy::StrategyError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Strategy file could not be loaded.
    #[error("Invalid strategy {path}: {source}")]
    Strategy {
        /// The strategy file.
        path: PathBuf,
        /// What went wrong.
        source: StrategyError,
    },

    /// Market snapshot could not be loaded.
    #[error("Invalid market snapshot {path}: {source}")]
    Market {
        /// The snapshot file.
        path: PathBuf,
        /// What went wrong.
        source: InvestError,
    },

    /// Rating set literal could not be parsed.
    #[error("Invalid rating set: {0}")]
    Ratings(#[from] CoreError),

    /// Investment failed.
    #[error(transparent)]
    Invest(#[from] InvestError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
