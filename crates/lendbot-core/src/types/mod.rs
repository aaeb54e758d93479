//! Domain types shared by the strategy and execution layers.

mod loan;
mod portfolio;
mod rating;
mod ratings;

pub use loan::{Investment, Loan};
pub use portfolio::PortfolioOverview;
pub use rating::Rating;
pub use ratings::Ratings;
