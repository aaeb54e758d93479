//! In-memory marketplace for dry runs.
//!
//! A [`MarketSnapshot`] is a JSON file capturing what the marketplace looked
//! like at one moment:
//!
//! ```json
//! {
//!   "balance": 5000,
//!   "loans": [
//!     { "id": 1, "rating": "A", "amount": 100000, "remaining_investment": 40000, "term_in_months": 36 }
//!   ],
//!   "investments": [
//!     { "loan_id": 9, "rating": "B", "amount": 400 }
//!   ]
//! }
//! ```

use std::path::Path;

use lendbot_core::{Investment, Loan, PortfolioOverview};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::InvestingApi;
use crate::error::{InvestError, InvestResult};

/// State of a marketplace and an investor's wallet at one moment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Free wallet balance.
    pub balance: Decimal,

    /// Open loan listings.
    #[serde(default)]
    pub loans: Vec<Loan>,

    /// Investments already held.
    #[serde(default)]
    pub investments: Vec<Investment>,
}

impl MarketSnapshot {
    /// Loads a snapshot from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> InvestResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading market snapshot");
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parses a snapshot from JSON.
    pub fn from_json_str(content: &str) -> InvestResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Portfolio overview of the investor in this snapshot.
    #[must_use]
    pub fn portfolio(&self) -> PortfolioOverview {
        PortfolioOverview::calculate(self.balance, &self.investments)
    }
}

/// A marketplace simulated in memory.
///
/// Investing moves money from the wallet into the loan, exactly like the
/// real marketplace would, so successive decisions see their own effects.
#[derive(Debug, Clone, Default)]
pub struct DryRunApi {
    balance: Decimal,
    loans: Vec<Loan>,
    investments: Vec<Investment>,
}

impl DryRunApi {
    /// Creates a marketplace from a snapshot.
    #[must_use]
    pub fn new(snapshot: MarketSnapshot) -> Self {
        Self {
            balance: snapshot.balance,
            loans: snapshot.loans,
            investments: snapshot.investments,
        }
    }

    /// Loads a marketplace from a snapshot file.
    pub fn from_file(path: impl AsRef<Path>) -> InvestResult<Self> {
        MarketSnapshot::from_file(path).map(Self::new)
    }

    /// Current wallet balance.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// All listed loans, fully funded ones included.
    #[must_use]
    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    /// Investments held, oldest first.
    #[must_use]
    pub fn held_investments(&self) -> &[Investment] {
        &self.investments
    }

    /// Captures the current state.
    #[must_use]
    pub fn snapshot(&self) -> MarketSnapshot {
        MarketSnapshot {
            balance: self.balance,
            loans: self.loans.clone(),
            investments: self.investments.clone(),
        }
    }
}

impl From<MarketSnapshot> for DryRunApi {
    fn from(snapshot: MarketSnapshot) -> Self {
        Self::new(snapshot)
    }
}

impl InvestingApi for DryRunApi {
    fn available_loans(&self) -> InvestResult<Vec<Loan>> {
        Ok(self
            .loans
            .iter()
            .filter(|loan| !loan.is_fully_funded())
            .cloned()
            .collect())
    }

    fn wallet_balance(&self) -> InvestResult<Decimal> {
        Ok(self.balance)
    }

    fn investments(&self) -> InvestResult<Vec<Investment>> {
        Ok(self.investments.clone())
    }

    fn invest(&mut self, investment: &Investment) -> InvestResult<()> {
        let loan = self
            .loans
            .iter_mut()
            .find(|loan| loan.id == investment.loan_id)
            .ok_or(InvestError::LoanNotFound {
                loan_id: investment.loan_id,
            })?;

        if investment.amount > loan.remaining_investment {
            return Err(InvestError::rejected(
                loan.id,
                format!("only {} remaining", loan.remaining_investment),
            ));
        }
        if investment.amount > self.balance {
            return Err(InvestError::InsufficientBalance {
                requested: investment.amount,
                available: self.balance,
            });
        }

        loan.remaining_investment -= investment.amount;
        self.balance -= investment.amount;
        self.investments.push(investment.clone());
        debug!(
            loan_id = investment.loan_id,
            amount = %investment.amount,
            balance = %self.balance,
            "Simulated investment"
        );
        Ok(())
    }
}
