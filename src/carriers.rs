//! Carrier oscillations multiplying the envelope.
//!
//! Every carrier accepts an extra phase offset `δ` on evaluation; the
//! cycle-peak intensity maximizes over it without rebuilding the carrier.

use std::fmt::Debug;

use crate::errors::FieldError;
use crate::fields::Polarization;
use crate::math::{CScalar, Scalar, C3, R3};
use crate::params::{choose, Param, ParameterSet};

/// An oscillation `c(t; δ)` with a fixed angular frequency.
///
/// Every carrier can be written `c = Im(P e^{iθ})` with `θ = ωt + ϕ + δ` and
/// a complex polarization vector `P`.
pub trait Carrier: Debug + Send + Sync {
    /// Carrier vector at time `t` with additional phase `shift`.
    fn value(&self, t: Scalar, shift: Scalar) -> R3;

    /// Time derivative of [`value`](Self::value).
    fn derivative(&self, t: Scalar, shift: Scalar) -> R3;

    /// Angular frequency ω.
    fn angular_frequency(&self) -> Scalar;

    /// Carrier-envelope phase ϕ.
    fn phase(&self) -> Scalar;

    /// Number of spatial components the carrier populates (1 or 3).
    fn dimensions(&self) -> usize;

    /// Polarization class.
    fn polarization(&self) -> Polarization;

    /// Complex polarization vector `P`.
    fn complex_polarization(&self) -> C3;
}

/// `sin(ωt + ϕ)` along z.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedCarrier {
    omega: Scalar,
    phase: Scalar,
}

impl FixedCarrier {
    /// Creates a carrier with angular frequency `omega` and CEP `phase`.
    #[must_use]
    pub const fn new(omega: Scalar, phase: Scalar) -> Self {
        Self { omega, phase }
    }

    /// Same carrier with its phase advanced by `delta`.
    #[must_use]
    pub fn phase_shift(&self, delta: Scalar) -> Self {
        Self::new(self.omega, self.phase + delta)
    }

    fn theta(&self, t: Scalar, shift: Scalar) -> Scalar {
        self.omega * t + self.phase + shift
    }

    fn scalar(&self, t: Scalar, shift: Scalar) -> Scalar {
        self.theta(t, shift).sin()
    }

    fn scalar_derivative(&self, t: Scalar, shift: Scalar) -> Scalar {
        self.omega * self.theta(t, shift).cos()
    }
}

impl Carrier for FixedCarrier {
    fn value(&self, t: Scalar, shift: Scalar) -> R3 {
        R3::new(0.0, 0.0, self.scalar(t, shift))
    }

    fn derivative(&self, t: Scalar, shift: Scalar) -> R3 {
        R3::new(0.0, 0.0, self.scalar_derivative(t, shift))
    }

    fn angular_frequency(&self) -> Scalar {
        self.omega
    }

    fn phase(&self) -> Scalar {
        self.phase
    }

    fn dimensions(&self) -> usize {
        1
    }

    fn polarization(&self) -> Polarization {
        Polarization::Linear
    }

    fn complex_polarization(&self) -> C3 {
        R3::z().map(CScalar::from)
    }
}

/// Principal axes of the laboratory frame.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// x axis.
    X,
    /// y axis.
    Y,
    /// z axis.
    Z,
}

impl Axis {
    /// Unit vector along the axis.
    #[must_use]
    pub fn unit(self) -> R3 {
        match self {
            Self::X => R3::x(),
            Self::Y => R3::y(),
            Self::Z => R3::z(),
        }
    }
}

/// A fixed carrier embedded along one axis of a three-dimensional field.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTransverseCarrier {
    carrier: FixedCarrier,
    axis: Axis,
}

impl LinearTransverseCarrier {
    /// Creates a linear carrier polarized along `axis`.
    #[must_use]
    pub const fn new(carrier: FixedCarrier, axis: Axis) -> Self {
        Self { carrier, axis }
    }

    /// Polarization axis.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }
}

impl Carrier for LinearTransverseCarrier {
    fn value(&self, t: Scalar, shift: Scalar) -> R3 {
        self.axis.unit() * self.carrier.scalar(t, shift)
    }

    fn derivative(&self, t: Scalar, shift: Scalar) -> R3 {
        self.axis.unit() * self.carrier.scalar_derivative(t, shift)
    }

    fn angular_frequency(&self) -> Scalar {
        self.carrier.omega
    }

    fn phase(&self) -> Scalar {
        self.carrier.phase
    }

    fn dimensions(&self) -> usize {
        3
    }

    fn polarization(&self) -> Polarization {
        Polarization::Linear
    }

    fn complex_polarization(&self) -> C3 {
        self.axis.unit().map(CScalar::from)
    }
}

/// `(ξ cos θ, 0, sin θ)/√(1+ξ²)` with `θ = ωt + ϕ`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipticalCarrier {
    carrier: FixedCarrier,
    xi: Scalar,
}

impl EllipticalCarrier {
    /// Creates an elliptical carrier with ellipticity `xi` (0 is linear along z, ±1 circular).
    #[must_use]
    pub const fn new(carrier: FixedCarrier, xi: Scalar) -> Self {
        Self { carrier, xi }
    }

    /// Ellipticity ξ.
    #[must_use]
    pub const fn ellipticity(&self) -> Scalar {
        self.xi
    }

    fn norm(&self) -> Scalar {
        (1.0 + self.xi * self.xi).sqrt()
    }
}

impl Carrier for EllipticalCarrier {
    fn value(&self, t: Scalar, shift: Scalar) -> R3 {
        let (s, c) = self.carrier.theta(t, shift).sin_cos();
        R3::new(self.xi * c, 0.0, s) / self.norm()
    }

    fn derivative(&self, t: Scalar, shift: Scalar) -> R3 {
        let (s, c) = self.carrier.theta(t, shift).sin_cos();
        R3::new(-self.xi * s, 0.0, c) * (self.carrier.omega / self.norm())
    }

    fn angular_frequency(&self) -> Scalar {
        self.carrier.omega
    }

    fn phase(&self) -> Scalar {
        self.carrier.phase
    }

    fn dimensions(&self) -> usize {
        3
    }

    fn polarization(&self) -> Polarization {
        if self.xi == 0.0 {
            Polarization::Linear
        } else {
            Polarization::Arbitrary
        }
    }

    fn complex_polarization(&self) -> C3 {
        C3::new(CScalar::new(0.0, self.xi), CScalar::from(0.0), CScalar::from(1.0)) / CScalar::from(self.norm())
    }
}

/// Carriers of three-dimensional fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransverseCarrier {
    /// Linear polarization along a principal axis.
    Linear(LinearTransverseCarrier),
    /// Elliptical polarization in the xz plane.
    Elliptical(EllipticalCarrier),
}

impl Carrier for TransverseCarrier {
    fn value(&self, t: Scalar, shift: Scalar) -> R3 {
        match self {
            Self::Linear(c) => c.value(t, shift),
            Self::Elliptical(c) => c.value(t, shift),
        }
    }

    fn derivative(&self, t: Scalar, shift: Scalar) -> R3 {
        match self {
            Self::Linear(c) => c.derivative(t, shift),
            Self::Elliptical(c) => c.derivative(t, shift),
        }
    }

    fn angular_frequency(&self) -> Scalar {
        match self {
            Self::Linear(c) => c.angular_frequency(),
            Self::Elliptical(c) => c.angular_frequency(),
        }
    }

    fn phase(&self) -> Scalar {
        match self {
            Self::Linear(c) => c.phase(),
            Self::Elliptical(c) => c.phase(),
        }
    }

    fn dimensions(&self) -> usize {
        3
    }

    fn polarization(&self) -> Polarization {
        match self {
            Self::Linear(c) => c.polarization(),
            Self::Elliptical(c) => c.polarization(),
        }
    }

    fn complex_polarization(&self) -> C3 {
        match self {
            Self::Linear(c) => c.complex_polarization(),
            Self::Elliptical(c) => c.complex_polarization(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CarrierKind {
    Fixed,
    LinearTransverse,
    Elliptical,
}

const CARRIER_KINDS: &[(&str, CarrierKind)] = &[
    ("fixed", CarrierKind::Fixed),
    ("linear_transverse", CarrierKind::LinearTransverse),
    ("elliptical", CarrierKind::Elliptical),
];

fn fixed_from_params(params: &ParameterSet) -> Result<FixedCarrier, FieldError> {
    let omega = params.require(Param::AngularFrequency)?;
    let phase = params.scalar(Param::Phase).unwrap_or(0.0);
    Ok(FixedCarrier::new(omega, phase))
}

/// Builds the carrier of a one-dimensional field from a resolved parameter set.
pub fn make_linear_carrier(params: &ParameterSet) -> Result<FixedCarrier, FieldError> {
    let kind = params
        .symbol(Param::Carrier)
        .map_or(Ok(CarrierKind::Fixed), |name| choose("carrier", name, CARRIER_KINDS))?;
    if kind != CarrierKind::Fixed {
        return Err(FieldError::config(
            "one-dimensional fields take the `fixed` carrier; use kind = transverse",
        ));
    }
    if params.contains(Param::Ellipticity) {
        return Err(FieldError::config("ξ requires kind = transverse"));
    }
    fixed_from_params(params)
}

/// Builds the carrier of a three-dimensional field: elliptical when ξ is given, linear along z otherwise.
pub fn make_transverse_carrier(params: &ParameterSet) -> Result<TransverseCarrier, FieldError> {
    let default = if params.contains(Param::Ellipticity) {
        CarrierKind::Elliptical
    } else {
        CarrierKind::LinearTransverse
    };
    let kind = params
        .symbol(Param::Carrier)
        .map_or(Ok(default), |name| choose("carrier", name, CARRIER_KINDS))?;
    let fixed = fixed_from_params(params)?;
    match kind {
        CarrierKind::Elliptical => {
            let xi = params.scalar(Param::Ellipticity).unwrap_or(0.0);
            Ok(TransverseCarrier::Elliptical(EllipticalCarrier::new(fixed, xi)))
        }
        CarrierKind::LinearTransverse | CarrierKind::Fixed => {
            if params.contains(Param::Ellipticity) {
                return Err(FieldError::config("ξ requires the elliptical carrier"));
            }
            Ok(TransverseCarrier::Linear(LinearTransverseCarrier::new(fixed, Axis::Z)))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn fixed_carrier_phase_shift_adds() {
        let c = FixedCarrier::new(0.5, 0.2);
        let shifted = c.phase_shift(FRAC_PI_2);
        assert_relative_eq!(shifted.phase(), 0.2 + FRAC_PI_2);
        assert_relative_eq!(shifted.value(1.0, 0.0), c.value(1.0, FRAC_PI_2));
        assert_relative_eq!(c.value(1.0, 0.0).z, (0.7_f64).sin());
    }

    #[test]
    fn elliptical_carrier_has_unit_norm_when_circular() {
        let c = EllipticalCarrier::new(FixedCarrier::new(1.0, 0.0), 1.0);
        for &t in &[0.0, 0.3, 2.0] {
            assert_relative_eq!(c.value(t, 0.0).norm(), 1.0 / 2.0_f64.sqrt(), epsilon = 1.0e-15);
        }
        assert_eq!(c.polarization(), Polarization::Arbitrary);
    }

    #[test]
    fn derivatives_match_finite_difference() {
        let carriers = [
            TransverseCarrier::Elliptical(EllipticalCarrier::new(FixedCarrier::new(0.7, 0.1), 0.4)),
            TransverseCarrier::Linear(LinearTransverseCarrier::new(FixedCarrier::new(0.7, 0.1), Axis::Y)),
        ];
        let h = 1.0e-6;
        for c in carriers {
            let fd = (c.value(1.3 + h, 0.2) - c.value(1.3 - h, 0.2)) / (2.0 * h);
            assert_relative_eq!(c.derivative(1.3, 0.2), fd, epsilon = 1.0e-8);
        }
    }

    #[test]
    fn complex_polarization_reproduces_carrier() {
        let c = EllipticalCarrier::new(FixedCarrier::new(0.7, 0.3), -0.6);
        let p = c.complex_polarization();
        for &t in &[0.0, 1.1, 4.0] {
            let theta = 0.7 * t + 0.3;
            let phasor = CScalar::from_polar(1.0, theta);
            let rebuilt = p.map(|x| (x * phasor).im);
            assert_relative_eq!(rebuilt, c.value(t, 0.0), epsilon = 1.0e-15);
        }
    }

    #[test]
    fn transverse_default_depends_on_ellipticity() {
        let base = ParameterSet::new().with(Param::AngularFrequency, 0.057);
        assert!(matches!(
            make_transverse_carrier(&base).unwrap(),
            TransverseCarrier::Linear(_)
        ));
        let with_xi = base.clone().with(Param::Ellipticity, 0.5);
        assert!(matches!(
            make_transverse_carrier(&with_xi).unwrap(),
            TransverseCarrier::Elliptical(_)
        ));
        assert!(make_linear_carrier(&with_xi).is_err());
        let bad = base.with(Param::Carrier, "circularish");
        assert!(make_linear_carrier(&bad).is_err());
    }
}
