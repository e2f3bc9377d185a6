//! Trapezoidal envelope: linear ramp up, flat top, linear ramp down.

use crate::errors::FieldError;
use crate::fields::{Continuity, Span};
use crate::math::Scalar;
use crate::params::{Param, ParameterSet};

use super::Envelope;

/// Piecewise-linear envelope supported on `[0, up + flat + down]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Trapezoidal {
    up: Scalar,
    flat: Scalar,
    down: Scalar,
}

impl Trapezoidal {
    /// Creates a trapezoid from segment durations (time units).
    pub fn new(up: Scalar, flat: Scalar, down: Scalar) -> Result<Self, FieldError> {
        if [up, flat, down].iter().any(|x| !(*x >= 0.0) || !x.is_finite()) {
            return Err(FieldError::config(format!(
                "trapezoid segments must be non-negative, got up = {up:e}, flat = {flat:e}, down = {down:e}"
            )));
        }
        if up + flat + down <= 0.0 {
            return Err(FieldError::config("trapezoid has zero total length"));
        }
        Ok(Self { up, flat, down })
    }

    /// Builds from `T` and segment lengths in cycles (`ramp` or `ramp_up`/`ramp_down`, `flat`).
    pub fn from_params(params: &ParameterSet) -> Result<Self, FieldError> {
        let period = params.require(Param::Period)?;
        let ramp = params.scalar(Param::Ramp);
        let edge = |side: Param| -> Result<Scalar, FieldError> {
            match (ramp, params.scalar(side)) {
                (Some(_), Some(_)) => Err(FieldError::config(format!(
                    "{} and {side} cannot both be given",
                    Param::Ramp
                ))),
                (Some(r), None) | (None, Some(r)) => Ok(r),
                (None, None) => Ok(0.0),
            }
        };
        let up = edge(Param::RampUp)?;
        let down = edge(Param::RampDown)?;
        let flat = params.scalar(Param::Flat).unwrap_or(0.0);
        Self::new(up * period, flat * period, down * period)
    }

    fn total(&self) -> Scalar {
        self.up + self.flat + self.down
    }
}

impl Envelope for Trapezoidal {
    fn value(&self, t: Scalar) -> Scalar {
        let end = self.total();
        if t < 0.0 || t > end {
            0.0
        } else if t < self.up {
            t / self.up
        } else if t <= self.up + self.flat {
            1.0
        } else {
            (end - t) / self.down
        }
    }

    fn derivative(&self, t: Scalar) -> Scalar {
        let end = self.total();
        if t < 0.0 || t > end {
            0.0
        } else if t < self.up {
            1.0 / self.up
        } else if t <= self.up + self.flat {
            0.0
        } else {
            -1.0 / self.down
        }
    }

    fn span(&self) -> Span {
        Span::new(0.0, self.total())
    }

    fn continuity(&self) -> Continuity {
        Continuity::Finite(0)
    }

    fn name(&self) -> &'static str {
        "trapezoidal"
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::units::UnitTable;

    #[test]
    fn segments_follow_cycle_counts() {
        let params = ParameterSet::new()
            .with(Param::Period, 10.0)
            .with(Param::Intensity, 1.0)
            .with(Param::Envelope, "trapezoidal")
            .with(Param::Ramp, 2.0)
            .with(Param::Flat, 3.0)
            .resolve(&UnitTable::default())
            .unwrap();
        let env = Trapezoidal::from_params(&params).unwrap();
        assert_eq!(env.span(), Span::new(0.0, 70.0));
        assert_relative_eq!(env.value(10.0), 0.5);
        assert_relative_eq!(env.value(35.0), 1.0);
        assert_relative_eq!(env.value(60.0), 0.5);
        assert_relative_eq!(env.derivative(5.0), 0.05);
        assert_relative_eq!(env.derivative(65.0), -0.05);
        assert_eq!(env.value(-1.0), 0.0);
        assert_eq!(env.value(71.0), 0.0);
    }

    #[test]
    fn rejects_ambiguous_or_empty_trapezoids() {
        let params = ParameterSet::new()
            .with(Param::Period, 10.0)
            .with(Param::Intensity, 1.0)
            .with(Param::Ramp, 2.0)
            .with(Param::RampUp, 1.0)
            .resolve(&UnitTable::default())
            .unwrap();
        assert!(Trapezoidal::from_params(&params).is_err());
        assert!(Trapezoidal::new(0.0, 0.0, 0.0).is_err());
        assert!(Trapezoidal::new(-1.0, 2.0, 1.0).is_err());
    }

    #[test]
    fn asymmetric_edges() {
        let env = Trapezoidal::new(10.0, 0.0, 30.0).unwrap();
        assert_relative_eq!(env.value(10.0), 1.0);
        assert_relative_eq!(env.value(25.0), 0.5);
    }
}
