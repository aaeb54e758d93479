//! Executes investment decisions against a marketplace.

use std::collections::HashSet;

use lendbot_core::{Investment, Loan, PortfolioOverview};
use lendbot_strategy::{is_valid_increment, InvestmentStrategy, MINIMAL_INVESTMENT_INCREMENT};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::api::InvestingApi;
use crate::error::{InvestError, InvestResult};

/// What a single run of the investor should do.
#[derive(Clone, Copy)]
pub enum OperatingMode<'a> {
    /// Invest into whatever the strategy recommends until it recommends nothing.
    StrategyDriven(&'a dyn InvestmentStrategy),

    /// Invest a fixed amount into a single loan chosen by the user.
    UserDriven {
        /// The loan to invest into.
        loan_id: u64,
        /// The amount to invest.
        amount: Decimal,
    },
}

impl std::fmt::Debug for OperatingMode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StrategyDriven(_) => f.write_str("StrategyDriven"),
            Self::UserDriven { loan_id, amount } => f
                .debug_struct("UserDriven")
                .field("loan_id", loan_id)
                .field("amount", amount)
                .finish(),
        }
    }
}

/// An investment the marketplace refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// The loan invested into.
    pub loan_id: u64,
    /// The amount attempted.
    pub amount: Decimal,
    /// Why it failed.
    pub reason: String,
}

/// Outcome of one investor run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvestmentReport {
    /// Investments made, in execution order.
    pub made: Vec<Investment>,
    /// Investments the marketplace refused.
    pub rejected: Vec<Rejection>,
    /// Wallet balance after the run.
    pub balance: Decimal,
    /// Whether the investments were only simulated.
    pub dry_run: bool,
}

impl InvestmentReport {
    fn new(balance: Decimal, dry_run: bool) -> Self {
        Self {
            made: Vec::new(),
            rejected: Vec::new(),
            balance,
            dry_run,
        }
    }

    /// Sum of all investments made.
    #[must_use]
    pub fn total_invested(&self) -> Decimal {
        self.made.iter().map(|investment| investment.amount).sum()
    }
}

/// Drives investment decisions through an [`InvestingApi`].
///
/// In dry-run mode nothing is submitted to the marketplace: the investor
/// tracks its own balance and records each investment as if it succeeded.
#[derive(Debug)]
pub struct Investor<A> {
    api: A,
    dry_run: bool,
    dry_run_balance: Option<Decimal>,
}

impl<A: InvestingApi> Investor<A> {
    /// Creates an investor over `api`.
    pub fn new(api: A, dry_run: bool) -> Self {
        Self {
            api,
            dry_run,
            dry_run_balance: None,
        }
    }

    /// Uses `balance` instead of the wallet balance during dry runs.
    #[must_use]
    pub fn with_dry_run_balance(mut self, balance: Decimal) -> Self {
        self.dry_run_balance = Some(balance);
        self
    }

    /// Returns true if investments are only simulated.
    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// The marketplace this investor talks to.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Consumes the investor, returning the marketplace.
    pub fn into_api(self) -> A {
        self.api
    }

    /// Current portfolio overview as seen by this investor.
    pub fn portfolio(&self) -> InvestResult<PortfolioOverview> {
        let balance = self.starting_balance()?;
        let investments = self.api.investments()?;
        Ok(PortfolioOverview::calculate(balance, &investments))
    }

    /// Runs the investor once in the given mode.
    pub fn run(&mut self, mode: OperatingMode<'_>) -> InvestResult<InvestmentReport> {
        info!(?mode, dry_run = self.dry_run, "Starting investment run");
        match mode {
            OperatingMode::StrategyDriven(strategy) => self.invest_from_strategy(strategy),
            OperatingMode::UserDriven { loan_id, amount } => {
                let balance = self.starting_balance()?;
                let investment = self.invest_once(loan_id, amount)?;
                let mut report = InvestmentReport::new(balance - investment.amount, self.dry_run);
                report.made.push(investment);
                Ok(report)
            }
        }
    }

    /// Invests into everything the strategy recommends.
    ///
    /// After every investment the portfolio is recalculated and the strategy
    /// consulted again, so each decision sees the effect of the previous one.
    /// Each loan is attempted at most once per run. Refused investments are
    /// recorded in the report and do not stop the run.
    pub fn invest_from_strategy(
        &mut self,
        strategy: &dyn InvestmentStrategy,
    ) -> InvestResult<InvestmentReport> {
        let mut balance = self.starting_balance()?;
        let mut investments = self.api.investments()?;
        let loans = self.api.available_loans()?;
        info!(
            balance = %balance,
            loans = loans.len(),
            held = investments.len(),
            "Evaluating marketplace"
        );

        let mut attempted: HashSet<u64> = HashSet::new();
        let mut report = InvestmentReport::new(balance, self.dry_run);

        while let Some((loan, amount)) = next_investment(
            strategy,
            &loans,
            &PortfolioOverview::calculate(balance, &investments),
            &attempted,
        ) {
            attempted.insert(loan.id);
            let investment = Investment::new(loan, amount);

            match self.submit(&investment) {
                Ok(()) => {
                    balance -= amount;
                    info!(
                        loan_id = loan.id,
                        rating = %loan.rating,
                        amount = %amount,
                        balance = %balance,
                        "Invested"
                    );
                    investments.push(investment.clone());
                    report.made.push(investment);
                }
                Err(e) if e.is_rejection() => {
                    warn!(loan_id = loan.id, amount = %amount, error = %e, "Investment refused");
                    report.rejected.push(Rejection {
                        loan_id: loan.id,
                        amount,
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        report.balance = balance;
        info!(
            made = report.made.len(),
            rejected = report.rejected.len(),
            total = %report.total_invested(),
            "Investment run finished"
        );
        Ok(report)
    }

    /// Invests `amount` into the loan `loan_id`.
    ///
    /// The amount must be a positive multiple of
    /// [`MINIMAL_INVESTMENT_INCREMENT`] and fit both the loan's remaining
    /// amount and the balance.
    pub fn invest_once(&mut self, loan_id: u64, amount: Decimal) -> InvestResult<Investment> {
        let loans = self.api.available_loans()?;
        let loan = loans
            .iter()
            .find(|loan| loan.id == loan_id)
            .ok_or(InvestError::LoanNotFound { loan_id })?;

        if !is_valid_increment(amount) {
            return Err(InvestError::invalid_amount(
                loan_id,
                amount,
                format!("must be a positive multiple of {MINIMAL_INVESTMENT_INCREMENT}"),
            ));
        }
        if amount > loan.remaining_investment {
            return Err(InvestError::invalid_amount(
                loan_id,
                amount,
                format!("exceeds remaining investment {}", loan.remaining_investment),
            ));
        }
        let balance = self.starting_balance()?;
        if amount > balance {
            return Err(InvestError::InsufficientBalance {
                requested: amount,
                available: balance,
            });
        }

        let investment = Investment::new(loan, amount);
        self.submit(&investment)?;
        info!(loan_id, rating = %loan.rating, amount = %amount, "Invested");
        Ok(investment)
    }

    fn starting_balance(&self) -> InvestResult<Decimal> {
        match self.dry_run_balance {
            Some(balance) if self.dry_run => Ok(balance),
            _ => self.api.wallet_balance(),
        }
    }

    fn submit(&mut self, investment: &Investment) -> InvestResult<()> {
        if self.dry_run {
            debug!(loan_id = investment.loan_id, "Dry run, not submitting");
            return Ok(());
        }
        self.api.invest(investment)
    }
}

/// First matching loan not yet attempted that the strategy would put money into.
fn next_investment<'a>(
    strategy: &dyn InvestmentStrategy,
    loans: &'a [Loan],
    portfolio: &PortfolioOverview,
    attempted: &HashSet<u64>,
) -> Option<(&'a Loan, Decimal)> {
    strategy
        .matching_loans(loans, portfolio)
        .into_iter()
        .filter(|loan| !attempted.contains(&loan.id))
        .find_map(|loan| {
            let amount = strategy.recommend_investment_amount(loan, portfolio);
            (amount > Decimal::ZERO).then_some((loan, amount))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dry_run::{DryRunApi, MarketSnapshot};
    use lendbot_core::Rating;
    use lendbot_strategy::{SimpleInvestmentStrategy, StrategyPerRating};
    use rust_decimal_macros::dec;

    /// Records submissions and refuses the loans it is told to.
    #[derive(Default)]
    struct RecordingApi {
        loans: Vec<Loan>,
        balance: Decimal,
        refuse: HashSet<u64>,
        submitted: Vec<Investment>,
    }

    impl InvestingApi for RecordingApi {
        fn available_loans(&self) -> InvestResult<Vec<Loan>> {
            Ok(self.loans.clone())
        }

        fn wallet_balance(&self) -> InvestResult<Decimal> {
            Ok(self.balance)
        }

        fn investments(&self) -> InvestResult<Vec<Investment>> {
            Ok(self.submitted.clone())
        }

        fn invest(&mut self, investment: &Investment) -> InvestResult<()> {
            if self.refuse.contains(&investment.loan_id) {
                return Err(InvestError::rejected(investment.loan_id, "closed"));
            }
            self.balance -= investment.amount;
            self.submitted.push(investment.clone());
            Ok(())
        }
    }

    fn strategy() -> SimpleInvestmentStrategy {
        let strategies = Rating::all().iter().map(|&rating| {
            StrategyPerRating::builder(rating)
                .target_share(dec!(0.125))
                .investment_amount(dec!(200), dec!(400))
                .build()
                .unwrap()
        });
        SimpleInvestmentStrategy::new(dec!(200), dec!(1000000), strategies).unwrap()
    }

    fn loans() -> Vec<Loan> {
        vec![
            Loan::new(1, Rating::A, dec!(50000), dec!(50000), 24),
            Loan::new(2, Rating::B, dec!(50000), dec!(50000), 24),
            Loan::new(3, Rating::C, dec!(50000), dec!(50000), 24),
        ]
    }

    #[test]
    fn test_strategy_driven_until_balance_runs_out() {
        let api = RecordingApi {
            loans: loans(),
            balance: dec!(1000),
            ..Default::default()
        };
        let mut investor = Investor::new(api, false);

        let report = investor.invest_from_strategy(&strategy()).unwrap();

        // 400 + 400 leaves 200, enough for one more minimal investment.
        assert_eq!(report.made.len(), 3);
        assert_eq!(report.total_invested(), dec!(1000));
        assert_eq!(report.balance, Decimal::ZERO);
        assert_eq!(investor.api().submitted.len(), 3);
    }

    #[test]
    fn test_each_decision_sees_previous_investments() {
        let api = RecordingApi {
            loans: loans(),
            balance: dec!(10000),
            ..Default::default()
        };
        let mut investor = Investor::new(api, false);

        let report = investor.invest_from_strategy(&strategy()).unwrap();

        // Equal demand starts with A; once A holds a share, B lags furthest.
        let order: Vec<u64> = report.made.iter().map(|i| i.loan_id).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_rejection_does_not_stop_run() {
        let api = RecordingApi {
            loans: loans(),
            balance: dec!(10000),
            refuse: HashSet::from([1]),
            ..Default::default()
        };
        let mut investor = Investor::new(api, false);

        let report = investor.invest_from_strategy(&strategy()).unwrap();

        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].loan_id, 1);
        assert_eq!(report.made.len(), 2);
        assert_eq!(report.balance, dec!(9200));
    }

    #[test]
    fn test_dry_run_submits_nothing() {
        let api = RecordingApi {
            loans: loans(),
            balance: dec!(10000),
            ..Default::default()
        };
        let mut investor = Investor::new(api, true).with_dry_run_balance(dec!(600));

        let report = investor.invest_from_strategy(&strategy()).unwrap();

        assert!(report.dry_run);
        assert_eq!(report.total_invested(), dec!(600));
        assert!(investor.api().submitted.is_empty());
    }

    #[test]
    fn test_balance_override_ignored_outside_dry_run() {
        let api = RecordingApi {
            balance: dec!(1000),
            ..Default::default()
        };
        let investor = Investor::new(api, false).with_dry_run_balance(dec!(5));
        assert_eq!(investor.portfolio().unwrap().available_balance(), dec!(1000));
    }

    #[test]
    fn test_below_minimum_balance_invests_nothing() {
        let api = RecordingApi {
            loans: loans(),
            balance: dec!(199),
            ..Default::default()
        };
        let report = Investor::new(api, false)
            .invest_from_strategy(&strategy())
            .unwrap();
        assert!(report.made.is_empty());
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn test_invest_once_validation() {
        let api = RecordingApi {
            loans: vec![Loan::new(1, Rating::A, dec!(50000), dec!(600), 24)],
            balance: dec!(400),
            ..Default::default()
        };
        let mut investor = Investor::new(api, false);

        assert!(matches!(
            investor.invest_once(9, dec!(200)),
            Err(InvestError::LoanNotFound { loan_id: 9 })
        ));
        assert!(matches!(
            investor.invest_once(1, dec!(300)),
            Err(InvestError::InvalidAmount { .. })
        ));
        assert!(matches!(
            investor.invest_once(1, dec!(0)),
            Err(InvestError::InvalidAmount { .. })
        ));
        assert!(matches!(
            investor.invest_once(1, dec!(800)),
            Err(InvestError::InvalidAmount { .. })
        ));
        assert!(matches!(
            investor.invest_once(1, dec!(600)),
            Err(InvestError::InsufficientBalance { .. })
        ));

        let investment = investor.invest_once(1, dec!(400)).unwrap();
        assert_eq!(investment.rating, Rating::A);
        assert_eq!(investor.api().submitted, vec![investment]);
    }

    #[test]
    fn test_user_driven_run_against_dry_run_market() {
        let snapshot = MarketSnapshot {
            balance: dec!(1000),
            loans: loans(),
            investments: Vec::new(),
        };
        let mut market = DryRunApi::new(snapshot);
        let mut investor = Investor::new(&mut market, false);

        let report = investor
            .run(OperatingMode::UserDriven {
                loan_id: 2,
                amount: dec!(600),
            })
            .unwrap();

        assert_eq!(report.balance, dec!(400));
        assert_eq!(market.balance(), dec!(400));
        assert_eq!(market.loans()[1].remaining_investment, dec!(49400));
    }

    #[test]
    fn test_strategy_driven_run() {
        let mut market = DryRunApi::new(MarketSnapshot {
            balance: dec!(800),
            loans: loans(),
            investments: Vec::new(),
        });
        let strategy = strategy();

        let report = Investor::new(&mut market, false)
            .run(OperatingMode::StrategyDriven(&strategy))
            .unwrap();

        assert_eq!(report.made.len(), 2);
        assert_eq!(market.balance(), Decimal::ZERO);
        assert_eq!(market.held_investments().len(), 2);
    }
}
