//! Carrier-free fields: constant steps and ramps.

use std::f64::consts::{PI, TAU};

use crate::errors::FieldError;
use crate::math::{Scalar, R3};
use crate::params::{choose, FieldKind, Param, ParameterSet};

use super::{Continuity, Field, Span};

/// Field of constant strength `E₀` along z on `[0, tmax]`.
///
/// `A(t) = −E₀ clamp(t, 0, tmax)`, so the potential keeps its final value
/// after the step.
#[derive(Debug, Clone)]
pub struct ConstantField {
    params: ParameterSet,
    amplitude: Scalar,
    tmax: Scalar,
}

fn duration(params: &ParameterSet) -> Result<Scalar, FieldError> {
    let tmax = params.require(Param::Tmax)?;
    if !(tmax > 0.0 && tmax.is_finite()) {
        return Err(FieldError::config(format!("tmax must be positive, got {tmax:e}")));
    }
    Ok(tmax)
}

/// `ω` if the parameter set has a frequency, one cycle per duration otherwise.
fn characteristic_frequency(params: &ParameterSet, tmax: Scalar) -> Scalar {
    params
        .scalar(Param::AngularFrequency)
        .unwrap_or(TAU / tmax)
}

impl ConstantField {
    /// Builds from a resolved set with `E₀` (or `I₀`) and `tmax`.
    pub fn from_params(params: &ParameterSet) -> Result<Self, FieldError> {
        Ok(Self {
            amplitude: params.require(Param::Amplitude)?,
            tmax: duration(params)?,
            params: params.clone(),
        })
    }
}

impl Field for ConstantField {
    fn vector_potential_at_phase(&self, t: Scalar, _shift: Scalar) -> R3 {
        R3::new(0.0, 0.0, -self.amplitude * t.clamp(0.0, self.tmax))
    }

    fn field_amplitude_at_phase(&self, t: Scalar, _shift: Scalar) -> R3 {
        if (0.0..=self.tmax).contains(&t) {
            R3::new(0.0, 0.0, self.amplitude)
        } else {
            R3::zeros()
        }
    }

    fn span(&self) -> Span {
        Span::new(0.0, self.tmax)
    }

    fn continuity(&self) -> Continuity {
        Continuity::Finite(0)
    }

    fn quantity(&self, quantity: Param) -> Result<Scalar, FieldError> {
        self.params
            .scalar(quantity)
            .ok_or(FieldError::UndefinedQuantity { quantity })
    }

    fn max_frequency(&self) -> Scalar {
        characteristic_frequency(&self.params, self.tmax)
    }
}

/// Profile of a ramp, `g(s)` on `s ∈ [0, 1]` rising from 0 to 1.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampShape {
    /// `g = s`.
    Linear,
    /// `g = s²`.
    Parabolic,
    /// `g = sin²(πs/2)`.
    Sin2,
}

impl RampShape {
    fn value(self, s: Scalar) -> Scalar {
        match self {
            Self::Linear => s,
            Self::Parabolic => s * s,
            Self::Sin2 => (0.5 * PI * s).sin().powi(2),
        }
    }

    /// `G(s) = ∫₀ˢ g`.
    fn integral(self, s: Scalar) -> Scalar {
        match self {
            Self::Linear => 0.5 * s * s,
            Self::Parabolic => s * s * s / 3.0,
            Self::Sin2 => 0.5 * s - (PI * s).sin() / (2.0 * PI),
        }
    }
}

/// Whether a ramp rises or falls.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampDirection {
    /// From 0 to `E₀`.
    Up,
    /// From `E₀` to 0.
    Down,
}

/// Field `E₀ g(t/tmax)` along z on `[0, tmax]`, zero elsewhere.
#[derive(Debug, Clone)]
pub struct Ramp {
    params: ParameterSet,
    shape: RampShape,
    direction: RampDirection,
    amplitude: Scalar,
    tmax: Scalar,
}

impl Ramp {
    /// Builds from a resolved set with a ramp `kind`, `E₀` (or `I₀`), `tmax` and `ramp = up|down`.
    pub fn from_params(params: &ParameterSet) -> Result<Self, FieldError> {
        let shape = match FieldKind::of(params)? {
            FieldKind::LinearRamp => RampShape::Linear,
            FieldKind::ParabolicRamp => RampShape::Parabolic,
            FieldKind::Sin2Ramp => RampShape::Sin2,
            other => {
                return Err(FieldError::config(format!("{other:?} is not a ramp kind")));
            }
        };
        let direction = match params.get(Param::Ramp) {
            None => RampDirection::Up,
            Some(_) => {
                let name = params.symbol(Param::Ramp).ok_or_else(|| {
                    FieldError::config("ramp direction must be `up` or `down`")
                })?;
                choose(
                    "ramp direction",
                    name,
                    &[("up", RampDirection::Up), ("down", RampDirection::Down)],
                )?
            }
        };
        Ok(Self {
            shape,
            direction,
            amplitude: params.require(Param::Amplitude)?,
            tmax: duration(params)?,
            params: params.clone(),
        })
    }

    /// Profile of the ramp.
    #[must_use]
    pub const fn shape(&self) -> RampShape {
        self.shape
    }

    /// Rising or falling.
    #[must_use]
    pub const fn direction(&self) -> RampDirection {
        self.direction
    }

    fn profile(&self, s: Scalar) -> Scalar {
        match self.direction {
            RampDirection::Up => self.shape.value(s),
            RampDirection::Down => self.shape.value(1.0 - s),
        }
    }

    fn profile_integral(&self, s: Scalar) -> Scalar {
        match self.direction {
            RampDirection::Up => self.shape.integral(s),
            RampDirection::Down => self.shape.integral(1.0) - self.shape.integral(1.0 - s),
        }
    }
}

impl Field for Ramp {
    fn vector_potential_at_phase(&self, t: Scalar, _shift: Scalar) -> R3 {
        let s = (t / self.tmax).clamp(0.0, 1.0);
        R3::new(0.0, 0.0, -self.amplitude * self.tmax * self.profile_integral(s))
    }

    fn field_amplitude_at_phase(&self, t: Scalar, _shift: Scalar) -> R3 {
        if (0.0..=self.tmax).contains(&t) {
            R3::new(0.0, 0.0, self.amplitude * self.profile(t / self.tmax))
        } else {
            R3::zeros()
        }
    }

    fn span(&self) -> Span {
        Span::new(0.0, self.tmax)
    }

    fn continuity(&self) -> Continuity {
        Continuity::Finite(0)
    }

    fn quantity(&self, quantity: Param) -> Result<Scalar, FieldError> {
        self.params
            .scalar(quantity)
            .ok_or(FieldError::UndefinedQuantity { quantity })
    }

    fn max_frequency(&self) -> Scalar {
        characteristic_frequency(&self.params, self.tmax)
    }
}
