//! Marketplace risk ratings.
//!
//! - [`Rating`]: the closed, totally ordered set of risk tiers a loan can carry

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Risk tier assigned to a loan by the marketplace.
///
/// The ordering runs from the safest tier (`AAAAA`) to the riskiest (`D`).
/// The set is closed: every strategy must cover every variant.
///
/// # Examples
///
/// ```
/// use lendbot_core::Rating;
///
/// let rating: Rating = "AA".parse().unwrap();
/// assert_eq!(rating, Rating::AA);
/// assert!(Rating::AAAAA < Rating::D);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum Rating {
    /// Lowest risk
    AAAAA = 1,
    /// AAAA
    AAAA = 2,
    /// AAA
    AAA = 3,
    /// AA
    AA = 4,
    /// A
    A = 5,
    /// B
    B = 6,
    /// C
    C = 7,
    /// Highest risk
    D = 8,
}

impl Rating {
    /// Returns the rank of this rating (1 = `AAAAA`, 8 = `D`).
    #[must_use]
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Returns the symbolic name used on the marketplace and in configuration.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::AAAAA => "AAAAA",
            Self::AAAA => "AAAA",
            Self::AAA => "AAA",
            Self::AA => "AA",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }

    /// Returns all ratings, best to worst.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::AAAAA,
            Self::AAAA,
            Self::AAA,
            Self::AA,
            Self::A,
            Self::B,
            Self::C,
            Self::D,
        ]
    }

    /// Looks up a rating by its exact (case-sensitive) name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|r| r.code() == name)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Rating {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::parse(s).ok_or_else(|| CoreError::unknown_rating(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_ordering() {
        assert!(Rating::AAAAA < Rating::AAAA);
        assert!(Rating::A < Rating::B);
        assert!(Rating::C < Rating::D);

        let all = Rating::all();
        assert_eq!(all.len(), 8);
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_rating_rank() {
        assert_eq!(Rating::AAAAA.rank(), 1);
        assert_eq!(Rating::A.rank(), 5);
        assert_eq!(Rating::D.rank(), 8);
    }

    #[test]
    fn test_rating_parse() {
        for rating in Rating::all() {
            assert_eq!(Rating::parse(rating.code()), Some(*rating));
        }
        assert_eq!(Rating::parse("aaa"), None);
        assert_eq!(Rating::parse(" A"), None);
        assert_eq!(Rating::parse("E"), None);
    }

    #[test]
    fn test_rating_from_str() {
        assert_eq!("B".parse::<Rating>(), Ok(Rating::B));
        assert_eq!(
            "b".parse::<Rating>(),
            Err(CoreError::unknown_rating("b"))
        );
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&Rating::AAA).unwrap();
        assert_eq!(json, "\"AAA\"");
        let parsed: Rating = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Rating::AAA);
    }
}
