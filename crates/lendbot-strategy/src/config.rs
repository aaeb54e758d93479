//! Strategy configuration files.
//!
//! A strategy file is TOML. Global limits sit at the top level, shared
//! per-rating parameters under `[default]`, and rating-specific overrides
//! under `[ratings.<NAME>]`:
//!
//! ```toml
//! minimum_balance = 200
//! investment_ceiling = 1000000
//! ratings_enabled = '["AAAAA", "AAAA", "AAA", "AA", "A", "B"]'
//!
//! [default]
//! target_share = 0.1
//! min_term_months = 0
//! max_term_months = -1
//! min_investment_amount = 200
//! max_investment_amount = 400
//! min_loan_share = 0
//! max_loan_share = 0.01
//! min_ask_amount = 0
//! max_ask_amount = 1000000
//! prefer_longer_terms = false
//!
//! [ratings.AAAAA]
//! target_share = 0.05
//! prefer_longer_terms = true
//! ```
//!
//! Each rating's parameters are its own section overlaid on `[default]`.
//! `max_term_months` may be omitted or negative to leave the term unbounded;
//! every other parameter must be present in one of the two sections.

use std::collections::BTreeMap;
use std::path::Path;

use lendbot_core::{Rating, Ratings};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{StrategyError, StrategyResult, Validate, ValidationError};
use crate::per_rating::StrategyPerRating;
use crate::simple::SimpleInvestmentStrategy;

/// Per-rating parameters as written in a strategy file; every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RatingParameters {
    /// Desired fraction of the invested total.
    pub target_share: Option<Decimal>,
    /// Shortest acceptable term.
    pub min_term_months: Option<u32>,
    /// Longest acceptable term; negative means unbounded.
    pub max_term_months: Option<i64>,
    /// Smallest amount per loan.
    pub min_investment_amount: Option<Decimal>,
    /// Largest amount per loan.
    pub max_investment_amount: Option<Decimal>,
    /// Lower bound on the fraction of a loan to take.
    pub min_loan_share: Option<Decimal>,
    /// Upper bound on the fraction of a loan to take.
    pub max_loan_share: Option<Decimal>,
    /// Smallest acceptable loan size.
    pub min_ask_amount: Option<Decimal>,
    /// Largest acceptable loan size.
    pub max_ask_amount: Option<Decimal>,
    /// Whether longer loans are matched first.
    pub prefer_longer_terms: Option<bool>,
}

impl RatingParameters {
    /// Returns these parameters with gaps filled from `fallback`.
    #[must_use]
    pub fn or(&self, fallback: &Self) -> Self {
        Self {
            target_share: self.target_share.or(fallback.target_share),
            min_term_months: self.min_term_months.or(fallback.min_term_months),
            max_term_months: self.max_term_months.or(fallback.max_term_months),
            min_investment_amount: self.min_investment_amount.or(fallback.min_investment_amount),
            max_investment_amount: self.max_investment_amount.or(fallback.max_investment_amount),
            min_loan_share: self.min_loan_share.or(fallback.min_loan_share),
            max_loan_share: self.max_loan_share.or(fallback.max_loan_share),
            min_ask_amount: self.min_ask_amount.or(fallback.min_ask_amount),
            max_ask_amount: self.max_ask_amount.or(fallback.max_ask_amount),
            prefer_longer_terms: self.prefer_longer_terms.or(fallback.prefer_longer_terms),
        }
    }

    fn resolve(&self, rating: Rating, enabled: bool) -> StrategyResult<StrategyPerRating> {
        fn require<T>(value: Option<T>, rating: Rating, field: &'static str) -> StrategyResult<T> {
            value.ok_or(StrategyError::MissingField { rating, field })
        }

        let target_share = require(self.target_share, rating, "target_share")?;
        let min_term = require(self.min_term_months, rating, "min_term_months")?;
        let max_term = match self.max_term_months {
            Some(max) if max >= 0 => Some(u32::try_from(max).unwrap_or(u32::MAX)),
            _ => None,
        };

        StrategyPerRating::builder(rating)
            .target_share(if enabled { target_share } else { Decimal::ZERO })
            .term_months(min_term, max_term)
            .investment_amount(
                require(self.min_investment_amount, rating, "min_investment_amount")?,
                require(self.max_investment_amount, rating, "max_investment_amount")?,
            )
            .loan_share(
                require(self.min_loan_share, rating, "min_loan_share")?,
                require(self.max_loan_share, rating, "max_loan_share")?,
            )
            .ask_amount(
                require(self.min_ask_amount, rating, "min_ask_amount")?,
                require(self.max_ask_amount, rating, "max_ask_amount")?,
            )
            .prefer_longer_terms(require(
                self.prefer_longer_terms,
                rating,
                "prefer_longer_terms",
            )?)
            .build()
    }
}

/// Contents of a strategy file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrategyConfig {
    /// Balance floor below which nothing is invested.
    pub minimum_balance: Decimal,

    /// Total invested amount above which nothing is invested.
    pub investment_ceiling: Decimal,

    /// Ratings allowed to receive investments; all when absent.
    #[serde(default)]
    pub ratings_enabled: Option<Ratings>,

    /// Parameters shared by every rating.
    #[serde(default)]
    pub default: RatingParameters,

    /// Rating-specific overrides, keyed by rating name.
    #[serde(default)]
    pub ratings: BTreeMap<String, RatingParameters>,
}

impl StrategyConfig {
    /// Loads a strategy file.
    pub fn from_file(path: impl AsRef<Path>) -> StrategyResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading strategy");
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses strategy file contents.
    pub fn from_toml_str(content: &str) -> StrategyResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Resolves the parameters of every rating, best rating first.
    pub fn resolve(&self) -> StrategyResult<Vec<StrategyPerRating>> {
        let mut overrides = BTreeMap::new();
        for (name, parameters) in &self.ratings {
            overrides.insert(name.parse::<Rating>()?, parameters);
        }

        Rating::all()
            .iter()
            .map(|&rating| {
                let enabled = self
                    .ratings_enabled
                    .as_ref()
                    .map_or(true, |enabled| enabled.contains(rating));
                overrides
                    .get(&rating)
                    .map_or_else(|| self.default.clone(), |p| p.or(&self.default))
                    .resolve(rating, enabled)
            })
            .collect()
    }

    /// Builds the investment strategy described by this configuration.
    pub fn build_strategy(&self) -> StrategyResult<SimpleInvestmentStrategy> {
        let strategies = self.resolve()?;

        let total_target: Decimal = strategies.iter().map(StrategyPerRating::target_share).sum();
        if total_target > Decimal::ONE {
            warn!(
                total = %total_target,
                "Target shares sum above 1, some ratings will never reach their target"
            );
        }

        SimpleInvestmentStrategy::new(self.minimum_balance, self.investment_ceiling, strategies)
    }
}

impl Validate for StrategyConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.minimum_balance < Decimal::ZERO {
            errors.push(ValidationError::with_rule(
                "minimum_balance",
                "Minimum balance cannot be negative",
                "non_negative",
            ));
        }
        if self.investment_ceiling < Decimal::ZERO {
            errors.push(ValidationError::with_rule(
                "investment_ceiling",
                "Investment ceiling cannot be negative",
                "non_negative",
            ));
        }
        for name in self.ratings.keys() {
            if Rating::parse(name).is_none() {
                errors.push(ValidationError::with_rule(
                    format!("ratings.{name}"),
                    format!("Unknown rating '{name}'"),
                    "known_rating",
                ));
            }
        }

        errors
    }
}

/// Loads a strategy file and builds the strategy it describes.
pub fn load_strategy(path: impl AsRef<Path>) -> StrategyResult<SimpleInvestmentStrategy> {
    StrategyConfig::from_file(path)?.build_strategy()
}
