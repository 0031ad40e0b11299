//! Exhibit indices: numbers or single capital letters.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ExhibitError;

/// Identity of an exhibit within a run.
///
/// Numeric indices remember their zero padding so that `007` prints and
/// increments as `008`. Letters taken from folder names are `A` through
/// `Y`; `Z` only ever appears as the reserved rebuttal exhibit after `Y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExhibitIndex {
    /// A positive integer.
    Numeric {
        /// Numeric value.
        value: u64,
        /// Number of digits as written.
        width: usize,
    },
    /// A capital letter.
    Letter(char),
}

impl ExhibitIndex {
    /// Build a numeric index without padding.
    pub fn number(value: u64) -> Self {
        Self::Numeric { value, width: 0 }
    }

    /// The index that follows this one, if there is any.
    ///
    /// Numbers increment; letters step through the alphabet, so `Y`
    /// is followed by `Z` and `Z` has no successor.
    pub fn successor(&self) -> Option<Self> {
        match *self {
            Self::Numeric { value, width } => value
                .checked_add(1)
                .map(|value| Self::Numeric { value, width }),
            Self::Letter(letter) if letter < 'Z' => {
                char::from_u32(letter as u32 + 1).map(Self::Letter)
            }
            Self::Letter(_) => None,
        }
    }
}

impl FromStr for ExhibitIndex {
    type Err = ExhibitError;

    /// Parse an index as it appears in a folder name: digits, or one
    /// capital letter from `A` to `Y`.
    fn from_str(s: &str) -> crate::Result<Self> {
        let invalid = |reason: &str| ExhibitError::invalid_exhibit_name(s.into(), reason);

        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(letter @ 'A'..='Y'), None) => Ok(Self::Letter(letter)),
            (Some(_), _) if s.chars().all(|c| c.is_ascii_digit()) => {
                let value = s
                    .parse::<u64>()
                    .map_err(|_| invalid("the exhibit number is too large"))?;
                Ok(Self::Numeric {
                    value,
                    width: s.len(),
                })
            }
            _ => Err(invalid(
                "the index must be a number or a capital letter from A-Y",
            )),
        }
    }
}

impl fmt::Display for ExhibitIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Numeric { value, width } => write!(f, "{value:0width$}"),
            Self::Letter(letter) => write!(f, "{letter}"),
        }
    }
}

impl Serialize for ExhibitIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
