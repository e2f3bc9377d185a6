//! Carrier pulses: `A(t) = A₀ e(t) c(t)`.

use std::f64::consts::PI;
use std::sync::Arc;

use nalgebra::Rotation3;

use crate::carriers::{make_linear_carrier, make_transverse_carrier, Carrier, FixedCarrier, TransverseCarrier};
use crate::envelopes::{make_envelope, EnvelopeRef};
use crate::errors::FieldError;
use crate::math::{CScalar, Scalar, C3, R3};
use crate::params::{Param, ParameterSet};

use super::{Continuity, Field, Polarization, Span};

/// A pulse built from an envelope and a carrier.
///
/// The electric field is the analytic product-rule derivative
/// `F = −A₀ (e′ c + e c′)`, rotated for three-dimensional fields.
#[derive(Debug, Clone)]
pub struct CarrierField<C> {
    params: ParameterSet,
    envelope: EnvelopeRef,
    carrier: C,
    amplitude: Scalar,
    rotation: Option<Rotation3<Scalar>>,
}

/// One-dimensional pulse polarized along z.
pub type LinearField = CarrierField<FixedCarrier>;

/// Three-dimensional pulse with a linear-transverse or elliptical carrier.
pub type TransverseField = CarrierField<TransverseCarrier>;

impl<C: Carrier + Clone + 'static> CarrierField<C> {
    /// Assembles a pulse from a resolved parameter set and its parts.
    ///
    /// `params` must contain `A₀`.
    pub fn new(
        params: ParameterSet,
        envelope: EnvelopeRef,
        carrier: C,
        rotation: Option<Rotation3<Scalar>>,
    ) -> Result<Self, FieldError> {
        let amplitude = params.require(Param::VectorPotential)?;
        Ok(Self {
            params,
            envelope,
            carrier,
            amplitude,
            rotation,
        })
    }

    /// Resolved parameters.
    #[must_use]
    pub const fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// The concrete carrier.
    #[must_use]
    pub const fn carrier_ref(&self) -> &C {
        &self.carrier
    }

    /// Rotation applied to the carrier frame.
    #[must_use]
    pub const fn rotation(&self) -> Option<&Rotation3<Scalar>> {
        self.rotation.as_ref()
    }

    fn rotate(&self, v: R3) -> R3 {
        self.rotation.map_or(v, |r| r * v)
    }

    /// Closed-form Fourier transform `∫ A(t) e^{−iωt} dt`, available when the envelope has one.
    ///
    /// With `c = Im(P e^{i(ω₀t+ϕ)})` the transform is
    /// `A₀ (P e^{iϕ} ê(ω−ω₀) − P* e^{−iϕ} ê(ω+ω₀)) / 2i`.
    #[must_use]
    pub fn analytic_vector_potential_spectrum(&self, omega: Scalar) -> Option<C3> {
        let omega0 = self.carrier.angular_frequency();
        let phase = CScalar::from_polar(1.0, self.carrier.phase());
        let lower = self.envelope.spectrum(omega - omega0)?;
        let upper = self.envelope.spectrum(omega + omega0)?;
        let p = self.carrier.complex_polarization();
        let scale = CScalar::new(0.0, -0.5 * self.amplitude);
        let mut spectrum = (p * (phase * lower) - p.map(|x| x.conj()) * (phase.conj() * upper)) * scale;
        if let Some(r) = self.rotation {
            let m = r.matrix().map(CScalar::from);
            spectrum = m * spectrum;
        }
        Some(spectrum)
    }
}

impl LinearField {
    /// Builds a one-dimensional pulse from a resolved parameter set.
    pub fn from_params(params: &ParameterSet) -> Result<Self, FieldError> {
        if params.contains(Param::Rotation) {
            return Err(FieldError::config("rotation applies to transverse fields only"));
        }
        let envelope = make_envelope(params)?;
        let carrier = make_linear_carrier(params)?;
        Self::new(params.clone(), envelope, carrier, None)
    }
}

impl TransverseField {
    /// Builds a three-dimensional pulse from a resolved parameter set.
    pub fn from_params(params: &ParameterSet) -> Result<Self, FieldError> {
        let envelope = make_envelope(params)?;
        let carrier = make_transverse_carrier(params)?;
        let rotation = params.rotation(Param::Rotation).copied();
        Self::new(params.clone(), envelope, carrier, rotation)
    }
}

impl<C: Carrier + Clone + 'static> Field for CarrierField<C> {
    fn vector_potential_at_phase(&self, t: Scalar, shift: Scalar) -> R3 {
        let e = self.envelope.value(t);
        if e == 0.0 {
            return R3::zeros();
        }
        self.rotate(self.carrier.value(t, shift) * (self.amplitude * e))
    }

    fn field_amplitude_at_phase(&self, t: Scalar, shift: Scalar) -> R3 {
        let e = self.envelope.value(t);
        let de = self.envelope.derivative(t);
        if e == 0.0 && de == 0.0 {
            return R3::zeros();
        }
        let dadt = self.carrier.value(t, shift) * de + self.carrier.derivative(t, shift) * e;
        self.rotate(-dadt * self.amplitude)
    }

    fn span(&self) -> Span {
        self.envelope.span()
    }

    fn dimensions(&self) -> usize {
        self.carrier.dimensions()
    }

    fn polarization(&self) -> Polarization {
        self.carrier.polarization()
    }

    fn continuity(&self) -> Continuity {
        self.envelope.continuity()
    }

    fn quantity(&self, quantity: Param) -> Result<Scalar, FieldError> {
        self.params
            .scalar(quantity)
            .ok_or(FieldError::UndefinedQuantity { quantity })
    }

    fn max_frequency(&self) -> Scalar {
        self.carrier.angular_frequency()
    }

    fn carrier(&self) -> Option<&dyn Carrier> {
        Some(&self.carrier)
    }

    fn envelope(&self) -> Option<&EnvelopeRef> {
        Some(&self.envelope)
    }
}

/// A shared one-dimensional Gaussian pulse from atomic-unit values.
///
/// `sigma_max` is the support half-width in units of σ.
pub fn gaussian_pulse(
    omega: Scalar,
    intensity: Scalar,
    tau: Scalar,
    sigma_max: Scalar,
    phase: Scalar,
) -> Result<Arc<LinearField>, FieldError> {
    let params = ParameterSet::new()
        .with(Param::Period, 2.0 * PI / omega)
        .with(Param::Intensity, intensity)
        .with(Param::Tau, tau)
        .with(Param::SigmaMax, sigma_max)
        .with(Param::Phase, phase)
        .resolve(&crate::units::UnitTable::default())?;
    LinearField::from_params(&params).map(Arc::new)
}
