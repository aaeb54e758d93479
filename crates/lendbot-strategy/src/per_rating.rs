//! Per-rating investment parameters.

use lendbot_core::{Loan, Rating};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{StrategyResult, Validate, ValidationError};

/// Immutable investment parameters for a single rating.
///
/// Built through [`StrategyPerRating::builder`], which validates all bounds.
///
/// # Example
///
/// ```rust
/// use lendbot_core::Rating;
/// use lendbot_strategy::StrategyPerRating;
/// use rust_decimal_macros::dec;
///
/// let strategy = StrategyPerRating::builder(Rating::A)
///     .target_share(dec!(0.2))
///     .term_months(6, Some(48))
///     .investment_amount(dec!(200), dec!(1000))
///     .loan_share(dec!(0), dec!(0.01))
///     .ask_amount(dec!(10000), dec!(500000))
///     .build()
///     .unwrap();
/// assert_eq!(strategy.max_term_months(), Some(48));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyPerRating {
    rating: Rating,
    target_share: Decimal,
    min_term_months: u32,
    max_term_months: Option<u32>,
    min_investment_amount: Decimal,
    max_investment_amount: Decimal,
    min_loan_share: Decimal,
    max_loan_share: Decimal,
    min_ask_amount: Decimal,
    max_ask_amount: Decimal,
    prefer_longer_terms: bool,
}

impl StrategyPerRating {
    /// Starts building parameters for `rating`.
    ///
    /// Unset bounds are unrestricted: any term, any ask, up to the whole
    /// remaining loan, and no target share.
    #[must_use]
    pub fn builder(rating: Rating) -> StrategyPerRatingBuilder {
        StrategyPerRatingBuilder::new(rating)
    }

    /// Returns true if the loan passes the term and ask-amount filters.
    ///
    /// The loan's rating is not checked; callers only pass loans of this rating.
    #[must_use]
    pub fn is_acceptable(&self, loan: &Loan) -> bool {
        let term = loan.term_in_months;
        if term < self.min_term_months {
            return false;
        }
        if self.max_term_months.is_some_and(|max| term > max) {
            return false;
        }
        loan.amount >= self.min_ask_amount && loan.amount <= self.max_ask_amount
    }

    /// The rating these parameters apply to.
    #[must_use]
    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Desired fraction of the invested total held in this rating.
    #[must_use]
    pub fn target_share(&self) -> Decimal {
        self.target_share
    }

    /// Shortest acceptable term.
    #[must_use]
    pub fn min_term_months(&self) -> u32 {
        self.min_term_months
    }

    /// Longest acceptable term, `None` when unbounded.
    #[must_use]
    pub fn max_term_months(&self) -> Option<u32> {
        self.max_term_months
    }

    /// Smallest amount worth putting into one loan.
    #[must_use]
    pub fn min_investment_amount(&self) -> Decimal {
        self.min_investment_amount
    }

    /// Largest amount put into one loan.
    #[must_use]
    pub fn max_investment_amount(&self) -> Decimal {
        self.max_investment_amount
    }

    /// Lower bound on the fraction of a loan's remaining amount to take.
    ///
    /// Only validated against [`max_loan_share`](Self::max_loan_share).
    /// Recommended amounts are not raised to meet it.
    #[must_use]
    pub fn min_loan_share(&self) -> Decimal {
        self.min_loan_share
    }

    /// Upper bound on the fraction of a loan's remaining amount to take.
    #[must_use]
    pub fn max_loan_share(&self) -> Decimal {
        self.max_loan_share
    }

    /// Smallest acceptable total loan size.
    #[must_use]
    pub fn min_ask_amount(&self) -> Decimal {
        self.min_ask_amount
    }

    /// Largest acceptable total loan size.
    #[must_use]
    pub fn max_ask_amount(&self) -> Decimal {
        self.max_ask_amount
    }

    /// Whether longer loans are matched first.
    #[must_use]
    pub fn prefer_longer_terms(&self) -> bool {
        self.prefer_longer_terms
    }
}

fn is_fraction(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::ONE
}

impl Validate for StrategyPerRating {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let field = |name: &str| format!("{}.{}", self.rating, name);

        if !is_fraction(self.target_share) {
            errors.push(ValidationError::with_rule(
                field("target_share"),
                format!("Target share {} must be within [0, 1]", self.target_share),
                "fraction",
            ));
        }

        if let Some(max) = self.max_term_months {
            if max < self.min_term_months {
                errors.push(ValidationError::with_rule(
                    field("max_term_months"),
                    format!(
                        "Maximum term {} is below minimum term {}",
                        max, self.min_term_months
                    ),
                    "term_range",
                ));
            }
        }

        if self.min_investment_amount < Decimal::ZERO {
            errors.push(ValidationError::with_rule(
                field("min_investment_amount"),
                "Minimum investment cannot be negative",
                "non_negative",
            ));
        }
        if self.max_investment_amount < self.min_investment_amount {
            errors.push(ValidationError::with_rule(
                field("max_investment_amount"),
                format!(
                    "Maximum investment {} is below minimum investment {}",
                    self.max_investment_amount, self.min_investment_amount
                ),
                "investment_range",
            ));
        }

        for (name, value) in [
            ("min_loan_share", self.min_loan_share),
            ("max_loan_share", self.max_loan_share),
        ] {
            if !is_fraction(value) {
                errors.push(ValidationError::with_rule(
                    field(name),
                    format!("Loan share {value} must be within [0, 1]"),
                    "fraction",
                ));
            }
        }
        if self.max_loan_share < self.min_loan_share {
            errors.push(ValidationError::with_rule(
                field("max_loan_share"),
                "Maximum loan share is below minimum loan share",
                "loan_share_range",
            ));
        }

        if self.min_ask_amount < Decimal::ZERO {
            errors.push(ValidationError::with_rule(
                field("min_ask_amount"),
                "Minimum ask cannot be negative",
                "non_negative",
            ));
        }
        if self.max_ask_amount < self.min_ask_amount {
            errors.push(ValidationError::with_rule(
                field("max_ask_amount"),
                format!(
                    "Maximum ask {} is below minimum ask {}",
                    self.max_ask_amount, self.min_ask_amount
                ),
                "ask_range",
            ));
        }

        errors
    }
}

/// Builder for [`StrategyPerRating`].
#[derive(Debug, Clone)]
pub struct StrategyPerRatingBuilder {
    inner: StrategyPerRating,
}

impl StrategyPerRatingBuilder {
    fn new(rating: Rating) -> Self {
        Self {
            inner: StrategyPerRating {
                rating,
                target_share: Decimal::ZERO,
                min_term_months: 0,
                max_term_months: None,
                min_investment_amount: Decimal::ZERO,
                max_investment_amount: Decimal::MAX,
                min_loan_share: Decimal::ZERO,
                max_loan_share: Decimal::ONE,
                min_ask_amount: Decimal::ZERO,
                max_ask_amount: Decimal::MAX,
                prefer_longer_terms: false,
            },
        }
    }

    /// Sets the target share.
    #[must_use]
    pub fn target_share(mut self, share: Decimal) -> Self {
        self.inner.target_share = share;
        self
    }

    /// Sets the acceptable term range; `None` leaves it unbounded above.
    #[must_use]
    pub fn term_months(mut self, min: u32, max: Option<u32>) -> Self {
        self.inner.min_term_months = min;
        self.inner.max_term_months = max;
        self
    }

    /// Sets the per-loan investment bounds.
    #[must_use]
    pub fn investment_amount(mut self, min: Decimal, max: Decimal) -> Self {
        self.inner.min_investment_amount = min;
        self.inner.max_investment_amount = max;
        self
    }

    /// Sets the bounds on the fraction of a loan's remaining amount to take.
    #[must_use]
    pub fn loan_share(mut self, min: Decimal, max: Decimal) -> Self {
        self.inner.min_loan_share = min;
        self.inner.max_loan_share = max;
        self
    }

    /// Sets the acceptable total loan size range.
    #[must_use]
    pub fn ask_amount(mut self, min: Decimal, max: Decimal) -> Self {
        self.inner.min_ask_amount = min;
        self.inner.max_ask_amount = max;
        self
    }

    /// Sets whether longer loans are matched first.
    #[must_use]
    pub fn prefer_longer_terms(mut self, prefer: bool) -> Self {
        self.inner.prefer_longer_terms = prefer;
        self
    }

    /// Validates the bounds and builds the strategy.
    pub fn build(self) -> StrategyResult<StrategyPerRating> {
        self.inner.validate_or_error()?;
        Ok(self.inner)
    }
}
