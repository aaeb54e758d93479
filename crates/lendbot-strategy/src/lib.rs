//! # Lendbot Strategy
//!
//! Decides which open loans to invest in, in what order, and how much.
//!
//! The [`SimpleInvestmentStrategy`] keeps a target share of the portfolio for
//! every [`Rating`](lendbot_core::Rating). Each cycle it:
//!
//! 1. Stops if the balance is below the minimum or the invested total is
//!    above the ceiling
//! 2. Ranks ratings by demand (target share minus current share)
//! 3. Filters each rating's loans by term and ask amount, then orders them
//!    by term
//! 4. Sizes each investment from the loan's remaining amount and the
//!    rating's bounds, rounded down to a multiple of
//!    [`MINIMAL_INVESTMENT_INCREMENT`]
//!
//! Strategies are immutable and every decision is a pure function of the
//! inputs, so a strategy can be shared freely between threads.
//!
//! ## Example
//!
//! ```rust
//! use lendbot_core::prelude::*;
//! use lendbot_strategy::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let strategies = Rating::all().iter().map(|&rating| {
//!     StrategyPerRating::builder(rating)
//!         .target_share(dec!(0.1))
//!         .investment_amount(dec!(200), dec!(1000))
//!         .loan_share(dec!(0), dec!(0.01))
//!         .build()
//!         .unwrap()
//! });
//! let strategy = SimpleInvestmentStrategy::new(dec!(200), dec!(1000000), strategies).unwrap();
//!
//! let loans = vec![Loan::new(1, Rating::A, dec!(100000), dec!(100000), 36)];
//! let portfolio = PortfolioOverview::calculate(dec!(5000), &[]);
//!
//! let recommendations = strategy.recommendations(&loans, &portfolio);
//! assert_eq!(recommendations.len(), 1);
//! assert_eq!(recommendations[0].amount, dec!(1000));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod per_rating;
pub mod simple;
pub mod strategy;

pub use config::{load_strategy, RatingParameters, StrategyConfig};
pub use error::{StrategyError, StrategyResult, Validate, ValidationError};
pub use per_rating::{StrategyPerRating, StrategyPerRatingBuilder};
pub use simple::{group_by_rating, SimpleInvestmentStrategy};
pub use strategy::{
    is_valid_increment, round_to_increment, InvestmentStrategy, Recommendation,
    MINIMAL_INVESTMENT_INCREMENT,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{load_strategy, StrategyConfig};
    pub use crate::error::{StrategyError, StrategyResult};
    pub use crate::per_rating::StrategyPerRating;
    pub use crate::simple::SimpleInvestmentStrategy;
    pub use crate::strategy::{InvestmentStrategy, Recommendation, MINIMAL_INVESTMENT_INCREMENT};
}
