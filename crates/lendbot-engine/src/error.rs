//! Investment execution error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Investment operation result type.
pub type InvestResult<T> = Result<T, InvestError>;

/// Errors raised while talking to the marketplace or executing investments.
#[derive(Debug, Error)]
pub enum InvestError {
    /// No open loan carries this id.
    #[error("Loan {loan_id} not found on the marketplace")]
    LoanNotFound {
        /// The requested loan id.
        loan_id: u64,
    },

    /// The wallet cannot cover the investment.
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        /// Amount requested.
        requested: Decimal,
        /// Balance available.
        available: Decimal,
    },

    /// The amount is not acceptable for the loan.
    #[error("Invalid amount {amount} for loan {loan_id}: {reason}")]
    InvalidAmount {
        /// The loan invested into.
        loan_id: u64,
        /// The amount requested.
        amount: Decimal,
        /// Why the amount is invalid.
        reason: String,
    },

    /// The marketplace refused the investment.
    #[error("Investment into loan {loan_id} rejected: {reason}")]
    Rejected {
        /// The loan invested into.
        loan_id: u64,
        /// Reason given by the marketplace.
        reason: String,
    },

    /// Snapshot file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot file is not valid JSON.
    #[error("Invalid market snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

impl InvestError {
    /// Creates an invalid amount error.
    #[must_use]
    pub fn invalid_amount(loan_id: u64, amount: Decimal, reason: impl Into<String>) -> Self {
        Self::InvalidAmount {
            loan_id,
            amount,
            reason: reason.into(),
        }
    }

    /// Creates a rejection error.
    #[must_use]
    pub fn rejected(loan_id: u64, reason: impl Into<String>) -> Self {
        Self::Rejected {
            loan_id,
            reason: reason.into(),
        }
    }

    /// Returns true if only this single investment failed and others may still succeed.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::LoanNotFound { .. }
                | Self::InsufficientBalance { .. }
                | Self::InvalidAmount { .. }
                | Self::Rejected { .. }
        )
    }
}
