//! Error types for the Lendbot core types.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while parsing or constructing core types.
///
/// These are caller-recoverable: a rating set that fails to parse can be
/// replaced with a default by the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Text does not follow the expected literal format.
    #[error("Invalid format '{input}': {reason}")]
    InvalidFormat {
        /// The offending input.
        input: String,
        /// Description of what was expected.
        reason: String,
    },

    /// A rating name does not match any known rating.
    #[error("Unknown rating: '{name}'")]
    UnknownRating {
        /// The unrecognized name.
        name: String,
    },
}

impl CoreError {
    /// Creates an invalid format error.
    #[must_use]
    pub fn invalid_format(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown rating error.
    #[must_use]
    pub fn unknown_rating(name: impl Into<String>) -> Self {
        Self::UnknownRating { name: name.into() }
    }

    /// Returns true if this is a format error of any kind.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::InvalidFormat { .. } | Self::UnknownRating { .. })
    }
}
