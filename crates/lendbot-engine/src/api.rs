//! The marketplace seen from the investor's side.

use lendbot_core::{Investment, Loan};
use rust_decimal::Decimal;

use crate::error::InvestResult;

/// Access to a lending marketplace on behalf of one authenticated investor.
///
/// Implementations may be remote clients or in-memory simulations; the
/// investor only ever talks to this trait.
pub trait InvestingApi {
    /// Loans currently open for investment.
    fn available_loans(&self) -> InvestResult<Vec<Loan>>;

    /// Free balance in the investor's wallet.
    fn wallet_balance(&self) -> InvestResult<Decimal>;

    /// Investments the investor already holds.
    fn investments(&self) -> InvestResult<Vec<Investment>>;

    /// Submits a single investment.
    fn invest(&mut self, investment: &Investment) -> InvestResult<()>;
}

impl<A: InvestingApi + ?Sized> InvestingApi for &mut A {
    fn available_loans(&self) -> InvestResult<Vec<Loan>> {
        (**self).available_loans()
    }

    fn wallet_balance(&self) -> InvestResult<Decimal> {
        (**self).wallet_balance()
    }

    fn investments(&self) -> InvestResult<Vec<Investment>> {
        (**self).investments()
    }

    fn invest(&mut self, investment: &Investment) -> InvestResult<()> {
        (**self).invest(investment)
    }
}
