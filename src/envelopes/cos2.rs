//! cos² envelope spanning a whole number of cycles.

use std::f64::consts::PI;

use crate::errors::FieldError;
use crate::fields::{Continuity, Span};
use crate::math::special::sinc;
use crate::math::{CScalar, Scalar};
use crate::params::{Param, ParameterSet};

use super::Envelope;

/// `cos²(πt/L)` on `[−L/2, L/2]` with `L = N·T`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cos2 {
    length: Scalar,
}

impl Cos2 {
    /// Creates an envelope of total length `length`.
    pub fn new(length: Scalar) -> Result<Self, FieldError> {
        if !(length > 0.0 && length.is_finite()) {
            return Err(FieldError::config(format!("cos² length must be positive, got {length:e}")));
        }
        Ok(Self { length })
    }

    /// Builds from `T` and `cycles`.
    pub fn from_params(params: &ParameterSet) -> Result<Self, FieldError> {
        Self::new(params.require(Param::Cycles)? * params.require(Param::Period)?)
    }
}

impl Envelope for Cos2 {
    fn value(&self, t: Scalar) -> Scalar {
        if 2.0 * t.abs() > self.length {
            0.0
        } else {
            (PI * t / self.length).cos().powi(2)
        }
    }

    fn derivative(&self, t: Scalar) -> Scalar {
        if 2.0 * t.abs() > self.length {
            0.0
        } else {
            -PI / self.length * (2.0 * PI * t / self.length).sin()
        }
    }

    fn span(&self) -> Span {
        Span::new(-0.5 * self.length, 0.5 * self.length)
    }

    fn continuity(&self) -> Continuity {
        Continuity::Finite(1)
    }

    fn spectrum(&self, omega: Scalar) -> Option<CScalar> {
        let l = self.length;
        let k = 2.0 * PI / l;
        let half = 0.5 * l;
        let value = 0.5 * l * sinc(omega * half)
            + 0.25 * l * (sinc((omega - k) * half) + sinc((omega + k) * half));
        Some(CScalar::new(value, 0.0))
    }

    fn name(&self) -> &'static str {
        "cos²"
    }
}
