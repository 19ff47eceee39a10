//! The interval of the observable a density is normalized over.
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// All the ways an [`ObservableRange`] can be malformed
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RangeError {
    #[error("The range bounds must be finite, received [{0}, {1}]")]
    NotFinite(f64, f64),
    #[error("The lower bound {0} must be less than the upper bound {1}")]
    Empty(f64, f64),
}

/// A closed interval $`[\min, \max]`$ of the observable.
///
/// The upper bound plays the same role as the `y_max` cap of the
/// double-sided shapes; building both from the same value keeps them in sync.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RangeBounds"))]
pub struct ObservableRange {
    pub min: f64,
    pub max: f64,
}

impl ObservableRange {
    pub fn new(min: f64, max: f64) -> Result<Self, RangeError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(RangeError::NotFinite(min, max));
        }
        if min >= max {
            return Err(RangeError::Empty(min, max));
        }
        Ok(Self { min, max })
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Intersect `[a, b]` with this range, returning `None` when they do not overlap
    pub fn clip(&self, a: f64, b: f64) -> Option<(f64, f64)> {
        let lo = a.max(self.min);
        let hi = b.min(self.max);
        if lo < hi {
            Some((lo, hi))
        } else {
            None
        }
    }
}

impl TryFrom<(f64, f64)> for ObservableRange {
    type Error = RangeError;

    fn try_from(value: (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1)
    }
}

/// The unchecked serialized form of an [`ObservableRange`]
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RangeBounds {
    min: f64,
    max: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RangeBounds> for ObservableRange {
    type Error = RangeError;

    fn try_from(value: RangeBounds) -> Result<Self, Self::Error> {
        Self::new(value.min, value.max)
    }
}
