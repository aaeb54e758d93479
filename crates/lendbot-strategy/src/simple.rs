//! Rating-demand investment strategy.
//!
//! Ratings whose share of the portfolio lags furthest behind their target are
//! served first. Within a rating, loans are ordered by term according to that
//! rating's preference and sized by the per-rating bounds.

use std::collections::{BTreeMap, HashSet};

use lendbot_core::{Loan, PortfolioOverview, Rating};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{StrategyError, StrategyResult};
use crate::per_rating::StrategyPerRating;
use crate::strategy::{round_to_increment, InvestmentStrategy};

/// Investment strategy driven by per-rating target shares.
///
/// Holds one [`StrategyPerRating`] for every [`Rating`], a minimum balance
/// below which nothing is invested, and a ceiling on the total invested
/// amount above which nothing is invested. Immutable after construction.
#[derive(Debug, Clone)]
pub struct SimpleInvestmentStrategy {
    minimum_balance: Decimal,
    investment_ceiling: Decimal,
    strategies: BTreeMap<Rating, StrategyPerRating>,
}

impl SimpleInvestmentStrategy {
    /// Creates the strategy.
    ///
    /// Fails unless `strategies` covers every rating exactly once. A ceiling
    /// below the minimum balance is accepted; it simply never invests.
    pub fn new(
        minimum_balance: Decimal,
        investment_ceiling: Decimal,
        strategies: impl IntoIterator<Item = StrategyPerRating>,
    ) -> StrategyResult<Self> {
        let mut by_rating = BTreeMap::new();
        for strategy in strategies {
            let rating = strategy.rating();
            if by_rating.insert(rating, strategy).is_some() {
                return Err(StrategyError::DuplicateRating { rating });
            }
        }

        let missing: Vec<Rating> = Rating::all()
            .iter()
            .copied()
            .filter(|rating| !by_rating.contains_key(rating))
            .collect();
        if !missing.is_empty() {
            return Err(StrategyError::MissingRatings { ratings: missing });
        }

        Ok(Self {
            minimum_balance,
            investment_ceiling,
            strategies: by_rating,
        })
    }

    /// Balance floor below which nothing is invested.
    #[must_use]
    pub fn minimum_balance(&self) -> Decimal {
        self.minimum_balance
    }

    /// Total invested amount above which nothing is invested.
    #[must_use]
    pub fn investment_ceiling(&self) -> Decimal {
        self.investment_ceiling
    }

    /// Parameters for a single rating.
    #[must_use]
    pub fn strategy_for(&self, rating: Rating) -> Option<&StrategyPerRating> {
        self.strategies.get(&rating)
    }

    /// Iterates the per-rating parameters, best rating first.
    pub fn strategies(&self) -> impl Iterator<Item = &StrategyPerRating> + '_ {
        self.strategies.values()
    }

    /// Returns each under-invested rating with its demand, highest demand first.
    ///
    /// Demand is the target share minus the current share; ratings missing
    /// from `shares` count as holding nothing. Ratings at or above their
    /// target are left out. Equal demand is ordered by rating, best first.
    #[must_use]
    pub fn demand_by_rating(&self, shares: &BTreeMap<Rating, Decimal>) -> Vec<(Rating, Decimal)> {
        let mut demands: Vec<(Rating, Decimal)> = self
            .strategies
            .values()
            .filter_map(|strategy| {
                let current = shares.get(&strategy.rating()).copied().unwrap_or_default();
                let demand = strategy.target_share() - current;
                (demand > Decimal::ZERO).then_some((strategy.rating(), demand))
            })
            .collect();
        demands.sort_by(|(ra, da), (rb, db)| db.cmp(da).then_with(|| ra.cmp(rb)));
        demands
    }

    /// Returns under-invested ratings in the order they should be served.
    #[must_use]
    pub fn rank_ratings_by_demand(&self, shares: &BTreeMap<Rating, Decimal>) -> Vec<Rating> {
        self.demand_by_rating(shares)
            .into_iter()
            .map(|(rating, _)| rating)
            .collect()
    }
}

/// Groups loans by rating, keeping first-seen order and dropping repeated loan ids.
#[must_use]
pub fn group_by_rating(loans: &[Loan]) -> BTreeMap<Rating, Vec<&Loan>> {
    let mut grouped: BTreeMap<Rating, Vec<&Loan>> = BTreeMap::new();
    let mut seen: HashSet<(Rating, u64)> = HashSet::with_capacity(loans.len());
    for loan in loans {
        if seen.insert((loan.rating, loan.id)) {
            grouped.entry(loan.rating).or_default().push(loan);
        }
    }
    grouped
}

impl InvestmentStrategy for SimpleInvestmentStrategy {
    fn matching_loans<'a>(
        &self,
        loans: &'a [Loan],
        portfolio: &PortfolioOverview,
    ) -> Vec<&'a Loan> {
        if portfolio.available_balance() < self.minimum_balance {
            debug!(
                balance = %portfolio.available_balance(),
                minimum = %self.minimum_balance,
                "Balance below minimum, not investing"
            );
            return Vec::new();
        }
        if portfolio.total_invested() > self.investment_ceiling {
            debug!(
                invested = %portfolio.total_invested(),
                ceiling = %self.investment_ceiling,
                "Investment ceiling reached, not investing"
            );
            return Vec::new();
        }

        let grouped = group_by_rating(loans);
        let mut matches = Vec::new();
        for rating in self.rank_ratings_by_demand(portfolio.shares_by_rating()) {
            let (Some(group), Some(strategy)) = (grouped.get(&rating), self.strategies.get(&rating))
            else {
                continue;
            };

            let mut acceptable: Vec<&Loan> = group
                .iter()
                .copied()
                .filter(|loan| strategy.is_acceptable(loan))
                .collect();
            if strategy.prefer_longer_terms() {
                acceptable.sort_by(|a, b| b.term_in_months.cmp(&a.term_in_months));
            } else {
                acceptable.sort_by_key(|loan| loan.term_in_months);
            }

            debug!(
                %rating,
                offered = group.len(),
                acceptable = acceptable.len(),
                "Matched loans for rating"
            );
            matches.extend(acceptable);
        }
        matches
    }

    fn recommend_investment_amount(&self, loan: &Loan, portfolio: &PortfolioOverview) -> Decimal {
        let Some(strategy) = self.strategies.get(&loan.rating) else {
            return Decimal::ZERO;
        };

        let by_share = loan.remaining_investment * strategy.max_loan_share();
        let capped = by_share
            .min(strategy.max_investment_amount())
            .min(portfolio.available_balance());
        let rounded = round_to_increment(capped);

        if rounded.is_zero() || rounded < strategy.min_investment_amount() {
            debug!(
                loan_id = loan.id,
                amount = %rounded,
                minimum = %strategy.min_investment_amount(),
                "Recommended amount below minimum investment"
            );
            return Decimal::ZERO;
        }
        rounded
    }
}
