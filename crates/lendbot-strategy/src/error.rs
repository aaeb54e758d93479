//! Strategy configuration error types.

use lendbot_core::{CoreError, Rating};
use thiserror::Error;

/// Strategy operation result type.
pub type StrategyResult<T> = Result<T, StrategyError>;

/// Errors raised while building or loading a strategy.
///
/// All of these are fatal at construction time: a strategy is never returned
/// in a partially usable state.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// One or more ratings have no strategy.
    #[error("Missing strategy for ratings: {}", join(.ratings))]
    MissingRatings {
        /// Ratings without configuration coverage.
        ratings: Vec<Rating>,
    },

    /// The same rating was configured twice.
    #[error("Duplicate strategy for rating {rating}")]
    DuplicateRating {
        /// The rating configured more than once.
        rating: Rating,
    },

    /// A required parameter is absent from both the default and the rating section.
    #[error("Missing parameter '{field}' for rating {rating}")]
    MissingField {
        /// Rating being resolved.
        rating: Rating,
        /// Name of the missing parameter.
        field: &'static str,
    },

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(ValidationError),

    /// Multiple validation errors.
    #[error("Multiple validation errors: {}", join(.0))]
    MultipleValidationErrors(Vec<ValidationError>),

    /// Rating names or rating sets that fail to parse.
    #[error(transparent)]
    Format(#[from] CoreError),

    /// Malformed strategy file.
    #[error("Invalid strategy file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Strategy file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A single validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
    /// Validation rule that was violated.
    pub rule: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Creates a validation error with a rule name.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref rule) = self.rule {
            write!(f, "{}: {} (rule: {})", self.field, self.message, rule)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// Trait for validatable configurations.
pub trait Validate {
    /// Validates the configuration.
    ///
    /// Returns a list of validation errors, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error if invalid.
    fn validate_or_error(&self) -> StrategyResult<()> {
        let mut errors = self.validate();
        match errors.len() {
            0 => Ok(()),
            1 => Err(StrategyError::Validation(errors.remove(0))),
            _ => Err(StrategyError::MultipleValidationErrors(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Always(Vec<ValidationError>);

    impl Validate for Always {
        fn validate(&self) -> Vec<ValidationError> {
            self.0.clone()
        }
    }

    #[test]
    fn test_error_display() {
        let err = StrategyError::MissingRatings {
            ratings: vec![Rating::AAAAA, Rating::D],
        };
        assert_eq!(err.to_string(), "Missing strategy for ratings: AAAAA, D");

        let err = StrategyError::MissingField {
            rating: Rating::B,
            field: "target_share",
        };
        assert!(err.to_string().contains("target_share"));
        assert!(err.to_string().contains('B'));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("A.target_share", "must be within [0, 1]");
        assert_eq!(err.to_string(), "A.target_share: must be within [0, 1]");

        let err = ValidationError::with_rule("A.max_term_months", "below minimum", "term_range");
        assert_eq!(
            err.to_string(),
            "A.max_term_months: below minimum (rule: term_range)"
        );
    }

    #[test]
    fn test_validate_or_error() {
        assert!(Always(vec![]).validate_or_error().is_ok());
        assert!(Always(vec![]).is_valid());

        let one = Always(vec![ValidationError::new("x", "bad")]);
        assert!(matches!(
            one.validate_or_error(),
            Err(StrategyError::Validation(_))
        ));

        let two = Always(vec![
            ValidationError::new("x", "bad"),
            ValidationError::new("y", "worse"),
        ]);
        match two.validate_or_error() {
            Err(StrategyError::MultipleValidationErrors(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_core_error_conversion() {
        let err: StrategyError = CoreError::unknown_rating("Z").into();
        assert_eq!(err.to_string(), "Unknown rating: 'Z'");
    }
}
