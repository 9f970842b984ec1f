//! Cardinality bounds of containment relations.
//!
//! A multiplicity is written either as a single count (`"1"`) or as a range
//! (`"0..*"`). Bounds are kept as strings: `*` is a legal upper bound and the
//! generated metadata carries the bounds verbatim.

use std::fmt;

/// Separator between the lower and upper bound of a ranged multiplicity.
pub const RANGE_SEPARATOR: &str = "..";

/// Lower and upper cardinality bound.
///
/// # Examples
///
/// ```
/// use modelgen_core::multiplicity::Multiplicity;
///
/// let ranged = Multiplicity::split("1..*");
/// assert_eq!(ranged.min(), "1");
/// assert_eq!(ranged.max(), "*");
///
/// let single = Multiplicity::split("2");
/// assert_eq!(single.min(), "2");
/// assert_eq!(single.max(), "2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Multiplicity {
    min: String,
    max: String,
}

impl Multiplicity {
    /// Creates a multiplicity from explicit bounds.
    pub fn new(min: impl Into<String>, max: impl Into<String>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    /// The fixed `1..1` multiplicity assigned to root classes and to classes
    /// that are not contained anywhere.
    pub fn exactly_one() -> Self {
        Self::new("1", "1")
    }

    /// Splits a multiplicity string on the first `..` separator.
    ///
    /// Without a separator the whole string is used for both bounds.
    pub fn split(value: &str) -> Self {
        match value.split_once(RANGE_SEPARATOR) {
            Some((min, max)) => Self::new(min, max),
            None => Self::new(value, value),
        }
    }

    /// Returns the lower bound.
    pub fn min(&self) -> &str {
        &self.min
    }

    /// Returns the upper bound.
    pub fn max(&self) -> &str {
        &self.max
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}{RANGE_SEPARATOR}{}", self.min, self.max)
        }
    }
}
