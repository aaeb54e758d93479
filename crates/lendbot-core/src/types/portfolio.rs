//! Point-in-time view of the investor's portfolio.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Investment, Rating};

/// Snapshot of the investor's portfolio for a single decision cycle.
///
/// Read-only once built. `shares_by_rating` holds the fraction of the total
/// invested amount sitting in each rating; ratings absent from the map are
/// treated as holding a zero share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioOverview {
    available_balance: Decimal,
    total_invested: Decimal,
    shares_by_rating: BTreeMap<Rating, Decimal>,
}

impl PortfolioOverview {
    /// Creates a snapshot from externally computed figures.
    #[must_use]
    pub fn new(
        available_balance: Decimal,
        total_invested: Decimal,
        shares_by_rating: BTreeMap<Rating, Decimal>,
    ) -> Self {
        Self {
            available_balance,
            total_invested,
            shares_by_rating,
        }
    }

    /// Builds a snapshot from the investor's existing investments.
    ///
    /// When nothing is invested every rating holds a zero share.
    #[must_use]
    pub fn calculate(available_balance: Decimal, investments: &[Investment]) -> Self {
        let mut invested_by_rating: BTreeMap<Rating, Decimal> = BTreeMap::new();
        for investment in investments {
            *invested_by_rating.entry(investment.rating).or_default() += investment.amount;
        }
        let total_invested: Decimal = invested_by_rating.values().copied().sum();

        let shares_by_rating = Rating::all()
            .iter()
            .map(|rating| {
                let invested = invested_by_rating.get(rating).copied().unwrap_or_default();
                let share = if total_invested.is_zero() {
                    Decimal::ZERO
                } else {
                    invested / total_invested
                };
                (*rating, share)
            })
            .collect();

        Self {
            available_balance,
            total_invested,
            shares_by_rating,
        }
    }

    /// Free balance ready to be invested.
    #[must_use]
    pub fn available_balance(&self) -> Decimal {
        self.available_balance
    }

    /// Total amount committed so far.
    #[must_use]
    pub fn total_invested(&self) -> Decimal {
        self.total_invested
    }

    /// Current share of each rating in the portfolio.
    #[must_use]
    pub fn shares_by_rating(&self) -> &BTreeMap<Rating, Decimal> {
        &self.shares_by_rating
    }

    /// Current share of a single rating, zero when unknown.
    #[must_use]
    pub fn share_on(&self, rating: Rating) -> Decimal {
        self.shares_by_rating
            .get(&rating)
            .copied()
            .unwrap_or_default()
    }

    /// Amount invested into a single rating.
    #[must_use]
    pub fn invested_on(&self, rating: Rating) -> Decimal {
        self.total_invested * self.share_on(rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Loan;
    use rust_decimal_macros::dec;

    fn investment(id: u64, rating: Rating, amount: Decimal) -> Investment {
        let loan = Loan::new(id, rating, dec!(100000), dec!(100000), 12);
        Investment::new(&loan, amount)
    }

    #[test]
    fn test_calculate_empty() {
        let overview = PortfolioOverview::calculate(dec!(5000), &[]);
        assert_eq!(overview.available_balance(), dec!(5000));
        assert_eq!(overview.total_invested(), Decimal::ZERO);
        assert_eq!(overview.shares_by_rating().len(), Rating::all().len());
        assert!(overview.shares_by_rating().values().all(|s| s.is_zero()));
    }

    #[test]
    fn test_calculate_shares() {
        let investments = vec![
            investment(1, Rating::A, dec!(600)),
            investment(2, Rating::A, dec!(200)),
            investment(3, Rating::B, dec!(200)),
        ];
        let overview = PortfolioOverview::calculate(dec!(0), &investments);

        assert_eq!(overview.total_invested(), dec!(1000));
        assert_eq!(overview.share_on(Rating::A), dec!(0.8));
        assert_eq!(overview.share_on(Rating::B), dec!(0.2));
        assert_eq!(overview.share_on(Rating::D), Decimal::ZERO);

        let total: Decimal = overview.shares_by_rating().values().copied().sum();
        assert_eq!(total, Decimal::ONE);
    }

    #[test]
    fn test_share_on_missing_rating() {
        let mut shares = BTreeMap::new();
        shares.insert(Rating::AA, dec!(0.5));
        let overview = PortfolioOverview::new(dec!(100), dec!(1000), shares);
        assert_eq!(overview.share_on(Rating::AA), dec!(0.5));
        assert_eq!(overview.share_on(Rating::C), Decimal::ZERO);
        assert_eq!(overview.invested_on(Rating::AA), dec!(500));
        assert_eq!(overview.invested_on(Rating::C), Decimal::ZERO);
    }
}
