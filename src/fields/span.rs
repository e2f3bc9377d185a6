//! Time spans, smoothness classes and polarization classes of fields.

use std::fmt;

use crate::errors::FieldError;
use crate::math::Scalar;

/// Closed time interval `[start, end]` on which a field is non-zero.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    /// Left end.
    pub start: Scalar,
    /// Right end.
    pub end: Scalar,
}

impl Span {
    /// Creates `[start, end]`; the ends are swapped if given in reverse.
    #[must_use]
    pub fn new(start: Scalar, end: Scalar) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    /// Length of the interval.
    #[must_use]
    pub fn duration(&self) -> Scalar {
        self.end - self.start
    }

    /// Midpoint of the interval.
    #[must_use]
    pub fn midpoint(&self) -> Scalar {
        0.5 * (self.start + self.end)
    }

    /// True if `t` lies in the closed interval.
    #[must_use]
    pub fn contains(&self, t: Scalar) -> bool {
        self.start <= t && t <= self.end
    }

    /// Clamps `t` into the interval.
    #[must_use]
    pub fn clamp(&self, t: Scalar) -> Scalar {
        t.clamp(self.start, self.end)
    }

    /// Smallest interval containing both spans.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Overlap of both spans, `None` if they are disjoint.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(Self { start, end })
    }

    /// Interval translated by `dt`.
    #[must_use]
    pub fn shifted(&self, dt: Scalar) -> Self {
        Self {
            start: self.start + dt,
            end: self.end + dt,
        }
    }

    /// Interval extended by non-negative amounts on each side.
    pub fn padded(&self, before: Scalar, after: Scalar) -> Result<Self, FieldError> {
        if !(before >= 0.0 && after >= 0.0) {
            return Err(FieldError::config(format!(
                "padding must be non-negative, got ({before:e}, {after:e})"
            )));
        }
        Ok(Self {
            start: self.start - before,
            end: self.end + after,
        })
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Number of continuous derivatives of the vector potential at the edges of its support.
///
/// Ordered so that `min` picks the rougher of two fields.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Continuity {
    /// Continuous up to the given derivative order.
    Finite(u32),
    /// Smooth.
    Infinite,
}

impl fmt::Display for Continuity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(n) => write!(f, "C{n}"),
            Self::Infinite => f.write_str("C∞"),
        }
    }
}

/// Polarization class of a field.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarization {
    /// Oscillates along a single fixed axis.
    Linear,
    /// Any other polarization state.
    Arbitrary,
}
