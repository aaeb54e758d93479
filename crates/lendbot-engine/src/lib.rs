//! # Lendbot Engine
//!
//! Runs investment decisions against a peer-to-peer lending marketplace.
//!
//! - [`InvestingApi`]: what the engine needs from a marketplace
//! - [`Investor`]: strategy-driven and user-driven investing, with dry runs
//! - [`DryRunApi`]: an in-memory marketplace loaded from a [`MarketSnapshot`]
//!
//! ## Example
//!
//! ```rust
//! use lendbot_core::prelude::*;
//! use lendbot_engine::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let market = DryRunApi::new(MarketSnapshot {
//!     balance: dec!(1000),
//!     loans: vec![Loan::new(1, Rating::A, dec!(100000), dec!(50000), 36)],
//!     investments: vec![],
//! });
//!
//! let mut investor = Investor::new(market, false);
//! let report = investor
//!     .run(OperatingMode::UserDriven { loan_id: 1, amount: dec!(400) })
//!     .unwrap();
//! assert_eq!(report.balance, dec!(600));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod dry_run;
pub mod error;
pub mod investor;

pub use api::InvestingApi;
pub use dry_run::{DryRunApi, MarketSnapshot};
pub use error::{InvestError, InvestResult};
pub use investor::{InvestmentReport, Investor, OperatingMode, Rejection};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::api::InvestingApi;
    pub use crate::dry_run::{DryRunApi, MarketSnapshot};
    pub use crate::error::{InvestError, InvestResult};
    pub use crate::investor::{InvestmentReport, Investor, OperatingMode, Rejection};
}
