//! Marketplace loan listings and the investments made into them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Rating;

/// An open loan listing on the marketplace.
///
/// Loans are supplied fresh for every decision cycle and are never mutated by
/// the strategy. Two loans with the same `id` are the same listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    /// Marketplace identifier.
    pub id: u64,

    /// Risk rating of the loan.
    pub rating: Rating,

    /// Total size of the loan.
    pub amount: Decimal,

    /// Amount still open for investment.
    pub remaining_investment: Decimal,

    /// Loan term in months.
    pub term_in_months: u32,

    /// Display name given by the borrower.
    #[serde(default)]
    pub name: Option<String>,
}

impl Loan {
    /// Creates a new loan listing.
    #[must_use]
    pub fn new(
        id: u64,
        rating: Rating,
        amount: Decimal,
        remaining_investment: Decimal,
        term_in_months: u32,
    ) -> Self {
        Self {
            id,
            rating,
            amount,
            remaining_investment,
            term_in_months,
            name: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns true if nothing remains to be invested.
    #[must_use]
    pub fn is_fully_funded(&self) -> bool {
        self.remaining_investment <= Decimal::ZERO
    }
}

/// Money committed to a single loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investment {
    /// The loan invested into.
    pub loan_id: u64,

    /// Rating of that loan at the time of investing.
    pub rating: Rating,

    /// Amount invested.
    pub amount: Decimal,
}

impl Investment {
    /// Creates an investment of `amount` into `loan`.
    #[must_use]
    pub fn new(loan: &Loan, amount: Decimal) -> Self {
        Self {
            loan_id: loan.id,
            rating: loan.rating,
            amount,
        }
    }
}
