//! The investment strategy abstraction.

use lendbot_core::{Loan, PortfolioOverview};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Granularity of every investment. Recommended amounts are always a multiple of it.
pub const MINIMAL_INVESTMENT_INCREMENT: Decimal = dec!(200);

/// Decides which loans to invest in and how much to put into each.
///
/// Implementations are pure: every call depends only on its arguments and the
/// strategy's immutable configuration.
pub trait InvestmentStrategy: Send + Sync {
    /// Returns the loans worth investing in, in the order they should be acted on.
    ///
    /// Returns nothing when the portfolio is outside the strategy's balance
    /// floor or investment ceiling.
    fn matching_loans<'a>(&self, loans: &'a [Loan], portfolio: &PortfolioOverview)
        -> Vec<&'a Loan>;

    /// Returns how much to invest into `loan`, zero meaning "skip it".
    ///
    /// The result is a non-negative multiple of [`MINIMAL_INVESTMENT_INCREMENT`]
    /// and never exceeds the portfolio's available balance.
    fn recommend_investment_amount(&self, loan: &Loan, portfolio: &PortfolioOverview) -> Decimal;

    /// Pairs each matching loan with its recommended amount, dropping zero amounts.
    ///
    /// Every amount is sized against the same snapshot; callers that execute
    /// several investments should re-size against a fresh snapshot between them.
    fn recommendations<'a>(
        &self,
        loans: &'a [Loan],
        portfolio: &PortfolioOverview,
    ) -> Vec<Recommendation<'a>> {
        self.matching_loans(loans, portfolio)
            .into_iter()
            .filter_map(|loan| {
                let amount = self.recommend_investment_amount(loan, portfolio);
                (amount > Decimal::ZERO).then_some(Recommendation { loan, amount })
            })
            .collect()
    }
}

/// A loan together with the amount recommended for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation<'a> {
    /// The loan to invest into.
    pub loan: &'a Loan,
    /// The amount to invest.
    pub amount: Decimal,
}

/// Rounds `amount` down to a multiple of [`MINIMAL_INVESTMENT_INCREMENT`].
///
/// Negative amounts round to zero.
#[must_use]
pub fn round_to_increment(amount: Decimal) -> Decimal {
    if amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (amount / MINIMAL_INVESTMENT_INCREMENT).floor() * MINIMAL_INVESTMENT_INCREMENT
}

/// Returns true if `amount` is a positive multiple of [`MINIMAL_INVESTMENT_INCREMENT`].
#[must_use]
pub fn is_valid_increment(amount: Decimal) -> bool {
    amount > Decimal::ZERO && (amount % MINIMAL_INVESTMENT_INCREMENT).is_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_increment() {
        assert_eq!(round_to_increment(dec!(0)), dec!(0));
        assert_eq!(round_to_increment(dec!(199.99)), dec!(0));
        assert_eq!(round_to_increment(dec!(200)), dec!(200));
        assert_eq!(round_to_increment(dec!(999)), dec!(800));
        assert_eq!(round_to_increment(dec!(1000)), dec!(1000));
        assert_eq!(round_to_increment(dec!(-500)), dec!(0));
    }

    #[test]
    fn test_is_valid_increment() {
        assert!(is_valid_increment(dec!(200)));
        assert!(is_valid_increment(dec!(4400)));
        assert!(!is_valid_increment(dec!(0)));
        assert!(!is_valid_increment(dec!(300)));
        assert!(!is_valid_increment(dec!(-200)));
        assert!(!is_valid_increment(dec!(200.5)));
    }
}
