//! Benchmarks for loan matching and sizing.
//!
//! Run with: cargo bench -p lendbot-strategy

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use lendbot_core::{Investment, Loan, PortfolioOverview, Rating};
use lendbot_strategy::{InvestmentStrategy, SimpleInvestmentStrategy, StrategyPerRating};

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn create_strategy() -> SimpleInvestmentStrategy {
    let strategies = Rating::all().iter().map(|&rating| {
        StrategyPerRating::builder(rating)
            .target_share(dec!(0.125))
            .term_months(6, Some(72))
            .investment_amount(dec!(200), dec!(2000))
            .loan_share(dec!(0), dec!(0.02))
            .ask_amount(dec!(10000), dec!(500000))
            .prefer_longer_terms(rating.rank() % 2 == 0)
            .build()
            .unwrap()
    });
    SimpleInvestmentStrategy::new(dec!(200), dec!(10000000), strategies).unwrap()
}

fn create_market(count: usize) -> Vec<Loan> {
    let ratings = Rating::all();
    let terms = [6, 12, 24, 36, 48, 60, 84];
    (0..count)
        .map(|i| {
            let amount = Decimal::from(20_000 + (i % 40) as u64 * 10_000);
            Loan::new(
                i as u64,
                ratings[i % ratings.len()],
                amount,
                amount / dec!(2),
                terms[i % terms.len()],
            )
        })
        .collect()
}

fn create_portfolio(market: &[Loan]) -> PortfolioOverview {
    let investments: Vec<Investment> = market
        .iter()
        .step_by(3)
        .map(|loan| Investment::new(loan, dec!(400)))
        .collect();
    PortfolioOverview::calculate(dec!(50000), &investments)
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_matching(c: &mut Criterion) {
    let strategy = create_strategy();

    let mut group = c.benchmark_group("matching_loans");
    for size in [10, 100, 1000, 10000].iter() {
        let market = create_market(*size);
        let portfolio = create_portfolio(&market);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &market, |b, market| {
            b.iter(|| strategy.matching_loans(black_box(market), black_box(&portfolio)))
        });
    }
    group.finish();
}

fn bench_recommendations(c: &mut Criterion) {
    let strategy = create_strategy();

    let mut group = c.benchmark_group("recommendations");
    for size in [100, 1000].iter() {
        let market = create_market(*size);
        let portfolio = create_portfolio(&market);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &market, |b, market| {
            b.iter(|| strategy.recommendations(black_box(market), black_box(&portfolio)))
        });
    }
    group.finish();
}

fn bench_single_recommendation(c: &mut Criterion) {
    let strategy = create_strategy();
    let loan = Loan::new(1, Rating::B, dec!(250000), dec!(180000), 48);
    let portfolio = PortfolioOverview::calculate(dec!(50000), &[]);

    c.bench_function("recommend_investment_amount", |b| {
        b.iter(|| strategy.recommend_investment_amount(black_box(&loan), black_box(&portfolio)))
    });
}

// =============================================================================
// CRITERION GROUPS
// =============================================================================

criterion_group!(matching, bench_matching, bench_recommendations);
criterion_group!(sizing, bench_single_recommendation);

criterion_main!(matching, sizing);
