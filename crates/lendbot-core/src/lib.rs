//! # Lendbot Core
//!
//! Core types for the Lendbot peer-to-peer lending investment engine.
//!
//! - **Ratings**: the closed, ordered set of marketplace risk tiers and the
//!   `["A", "B"]` literal form used for rating sets in configuration
//! - **Loans**: open listings and the investments made into them
//! - **Portfolio**: the per-cycle snapshot a strategy decides against
//!
//! All monetary values are [`rust_decimal::Decimal`].
//!
//! ## Example
//!
//! ```rust
//! use lendbot_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let loan = Loan::new(1, Rating::A, dec!(100000), dec!(80000), 36);
//! let portfolio = PortfolioOverview::calculate(dec!(10000), &[Investment::new(&loan, dec!(400))]);
//! assert_eq!(portfolio.share_on(Rating::A), dec!(1));
//!
//! let enabled: Ratings = "[\"A\", \"B\"]".parse().unwrap();
//! assert!(enabled.contains(Rating::B));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use types::{Investment, Loan, PortfolioOverview, Rating, Ratings};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Investment, Loan, PortfolioOverview, Rating, Ratings};
    pub use rust_decimal::Decimal;
}
