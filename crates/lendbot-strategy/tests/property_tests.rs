//! Property-based tests for strategy invariants.
//!
//! - Recommended amounts are whole increments within balance and bounds
//! - Demand ranking is descending and only holds under-invested ratings
//! - Matching never returns a loan twice or a loan the rating rejects

use std::collections::{BTreeMap, HashSet};

use lendbot_core::prelude::*;
use lendbot_strategy::prelude::*;
use proptest::prelude::*;
use rust_decimal_macros::dec;

fn any_rating() -> impl Strategy<Value = Rating> {
    proptest::sample::select(Rating::all().to_vec())
}

/// Whole-unit amounts in `0..max`.
fn amount(max: u64) -> impl Strategy<Value = Decimal> {
    (0..max).prop_map(Decimal::from)
}

/// A fraction with three decimal places in `[0, 1]`.
fn fraction() -> impl Strategy<Value = Decimal> {
    (0u32..=1000).prop_map(|n| Decimal::new(i64::from(n), 3))
}

fn any_loan() -> impl Strategy<Value = Loan> {
    (0u64..50, any_rating(), 0u64..500_000, 0u32..=84).prop_flat_map(|(id, rating, size, term)| {
        (0..=size).prop_map(move |remaining| {
            Loan::new(id, rating, Decimal::from(size), Decimal::from(remaining), term)
        })
    })
}

fn strategy_with(
    targets: Vec<Decimal>,
    max_share: Decimal,
    max_investment: Decimal,
    min_investment: Decimal,
) -> SimpleInvestmentStrategy {
    let strategies = Rating::all().iter().zip(targets).map(|(&rating, target)| {
        StrategyPerRating::builder(rating)
            .target_share(target)
            .term_months(6, Some(60))
            .investment_amount(min_investment, max_investment.max(min_investment))
            .loan_share(dec!(0), max_share)
            .ask_amount(dec!(1000), dec!(400000))
            .prefer_longer_terms(rating.rank() % 2 == 0)
            .build()
            .unwrap()
    });
    SimpleInvestmentStrategy::new(dec!(0), dec!(100000000), strategies).unwrap()
}

fn targets() -> impl Strategy<Value = Vec<Decimal>> {
    proptest::collection::vec(fraction(), Rating::all().len())
}

proptest! {
    #[test]
    fn property_recommendation_is_whole_increment_within_bounds(
        loan in any_loan(),
        balance in amount(100_000),
        max_share in fraction(),
        max_investment in amount(20_000),
        min_investment in amount(2_000),
    ) {
        let strategy = strategy_with(vec![dec!(0.1); 8], max_share, max_investment, min_investment);
        let overview = PortfolioOverview::calculate(balance, &[]);

        let recommended = strategy.recommend_investment_amount(&loan, &overview);

        prop_assert!(recommended >= Decimal::ZERO);
        prop_assert!((recommended % MINIMAL_INVESTMENT_INCREMENT).is_zero());
        prop_assert!(recommended <= balance);
        prop_assert!(recommended <= max_investment.max(min_investment));
        prop_assert!(recommended <= loan.remaining_investment * max_share);
        if !recommended.is_zero() {
            prop_assert!(recommended >= min_investment);
        }
    }

    #[test]
    fn property_demand_ranking_is_descending(
        targets in targets(),
        current in proptest::collection::vec(fraction(), Rating::all().len()),
    ) {
        let strategy = strategy_with(targets, dec!(0.01), dec!(1000), dec!(200));
        let shares: BTreeMap<Rating, Decimal> =
            Rating::all().iter().copied().zip(current).collect();

        let demand = strategy.demand_by_rating(&shares);

        for (rating, value) in &demand {
            prop_assert!(*value > Decimal::ZERO);
            let expected = strategy.strategy_for(*rating).unwrap().target_share() - shares[rating];
            prop_assert_eq!(*value, expected);
        }
        for pair in demand.windows(2) {
            let ((first_rating, first), (second_rating, second)) = (pair[0], pair[1]);
            prop_assert!(first > second || (first == second && first_rating < second_rating));
        }
        let under_invested = Rating::all()
            .iter()
            .filter(|r| strategy.strategy_for(**r).unwrap().target_share() > shares[*r])
            .count();
        prop_assert_eq!(demand.len(), under_invested);
    }

    #[test]
    fn property_matches_are_unique_and_acceptable(
        targets in targets(),
        loans in proptest::collection::vec(any_loan(), 0..40),
    ) {
        let strategy = strategy_with(targets, dec!(0.01), dec!(1000), dec!(200));
        let overview = PortfolioOverview::calculate(dec!(10000), &[]);

        let matched = strategy.matching_loans(&loans, &overview);

        let mut seen = HashSet::new();
        for loan in &matched {
            prop_assert!(seen.insert((loan.rating, loan.id)));
            let per_rating = strategy.strategy_for(loan.rating).unwrap();
            prop_assert!(per_rating.is_acceptable(loan));
            prop_assert!(per_rating.target_share() > Decimal::ZERO);
        }
    }
}
