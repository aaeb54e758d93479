//! Sets of ratings and their textual literal form.
//!
//! A rating set is written as a bracketed list of double-quoted rating names,
//! for example `["AAAAA", "AA", "B"]`. Parsing tolerates arbitrary whitespace
//! between elements; formatting always produces the canonical form with
//! ratings in rank order and `", "` separators.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Rating;
use crate::error::{CoreError, CoreResult};

const EXPECTED_FORMAT: &str = "expected a bracketed list such as [\"A\", \"B\"]";

/// An immutable set of ratings, stored in rank order.
///
/// # Examples
///
/// ```
/// use lendbot_core::{Rating, Ratings};
///
/// let ratings = Ratings::parse("[ \"B\",\"AAA\" , \"B\" ]").unwrap();
/// assert_eq!(ratings, Ratings::of([Rating::AAA, Rating::B]));
/// assert_eq!(ratings.to_string(), "[\"AAA\", \"B\"]");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Ratings {
    ratings: BTreeSet<Rating>,
}

impl Ratings {
    /// Creates a set from any collection of ratings. Duplicates collapse.
    #[must_use]
    pub fn of(ratings: impl IntoIterator<Item = Rating>) -> Self {
        Self {
            ratings: ratings.into_iter().collect(),
        }
    }

    /// Creates the empty set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates the set of every known rating.
    #[must_use]
    pub fn all() -> Self {
        Self::of(Rating::all().iter().copied())
    }

    /// Parses the literal form `["T1", "T2", ...]`.
    ///
    /// Brackets are mandatory, each element must be double-quoted and match a
    /// rating name exactly. `[]` and a whitespace-only interior both yield the
    /// empty set.
    pub fn parse(text: &str) -> CoreResult<Self> {
        let trimmed = text.trim();
        let inner = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| CoreError::invalid_format(text, EXPECTED_FORMAT))?;

        if inner.trim().is_empty() {
            return Ok(Self::empty());
        }

        let mut ratings = BTreeSet::new();
        for part in inner.split(',') {
            let element = part.trim();
            let name = element
                .strip_prefix('"')
                .and_then(|rest| rest.strip_suffix('"'))
                .ok_or_else(|| {
                    CoreError::invalid_format(
                        text,
                        format!("element {element:?} is not double-quoted"),
                    )
                })?;
            ratings.insert(name.parse::<Rating>()?);
        }
        Ok(Self { ratings })
    }

    /// Returns true if the set contains the given rating.
    #[must_use]
    pub fn contains(&self, rating: Rating) -> bool {
        self.ratings.contains(&rating)
    }

    /// Iterates the ratings in rank order.
    pub fn iter(&self) -> impl Iterator<Item = Rating> + '_ {
        self.ratings.iter().copied()
    }

    /// Returns the number of ratings in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

impl fmt::Display for Ratings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, rating) in self.ratings.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "\"{rating}\"")?;
        }
        f.write_str("]")
    }
}

impl FromStr for Ratings {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::parse(s)
    }
}

impl FromIterator<Rating> for Ratings {
    fn from_iter<I: IntoIterator<Item = Rating>>(iter: I) -> Self {
        Self::of(iter)
    }
}

impl Serialize for Ratings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ratings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
