//! Laser field representations and the field creation front-end.
//!
//! A field is an immutable function of time returning the vector potential
//! `A(t)` and the electric field `F(t) = −dA/dt`, both as [`R3`]; fields of
//! dimension one populate the z component only. Fields are shared as
//! [`FieldRef`] so that combinators and dispersed fields can hold their
//! parents without copying.

mod constant;
mod frontend;
mod pulse;
mod span;
mod time_axis;

use std::f64::consts::TAU;
use std::fmt::Debug;
use std::sync::Arc;

pub use constant::{ConstantField, Ramp, RampDirection, RampShape};
pub use frontend::{make_field, parse_field};
pub use pulse::{gaussian_pulse, CarrierField, LinearField, TransverseField};
pub use span::{Continuity, Polarization, Span};
pub use time_axis::{default_sampling_rate, steps, time_axis};

use crate::carriers::Carrier;
use crate::dispersion::ElementRef;
use crate::envelopes::EnvelopeRef;
use crate::errors::FieldError;
use crate::math::optimize::maximize_bounded;
use crate::math::{Scalar, R3};
use crate::params::Param;

/// Shared handle to a field.
pub type FieldRef = Arc<dyn Field>;

/// Number of phase samples seeding the cycle-peak search.
const PHASE_SCAN: usize = 16;

/// A time-dependent electric field given through its vector potential.
///
/// Implementors provide evaluation with an extra carrier phase offset `δ`
/// and their span. Everything else defaults to the parent field, so wrapper
/// types override only what they change.
pub trait Field: Debug + Send + Sync + 'static {
    /// Vector potential at `t` with the carrier phase advanced by `shift`.
    fn vector_potential_at_phase(&self, t: Scalar, shift: Scalar) -> R3;

    /// Electric field at `t` with the carrier phase advanced by `shift`.
    fn field_amplitude_at_phase(&self, t: Scalar, shift: Scalar) -> R3;

    /// Interval outside of which the field vanishes.
    fn span(&self) -> Span;

    /// Field this one is derived from, if any.
    fn parent(&self) -> Option<&FieldRef> {
        None
    }

    /// Number of populated spatial components (1 or 3).
    fn dimensions(&self) -> usize {
        self.parent().map_or(1, |p| p.dimensions())
    }

    /// Polarization class.
    fn polarization(&self) -> Polarization {
        self.parent().map_or(Polarization::Linear, |p| p.polarization())
    }

    /// Smoothness of the vector potential at the edges of the span.
    fn continuity(&self) -> Continuity {
        self.parent().map_or(Continuity::Infinite, |p| p.continuity())
    }

    /// A resolved scalar parameter in atomic units.
    fn quantity(&self, quantity: Param) -> Result<Scalar, FieldError> {
        self.parent()
            .map_or(Err(FieldError::UndefinedQuantity { quantity }), |p| p.quantity(quantity))
    }

    /// Highest angular frequency of interest, used for sampling.
    fn max_frequency(&self) -> Scalar {
        self.parent().map_or(0.0, |p| p.max_frequency())
    }

    /// Carrier of the underlying pulse.
    fn carrier(&self) -> Option<&dyn Carrier> {
        self.parent().and_then(|p| p.carrier())
    }

    /// Envelope of the underlying pulse.
    fn envelope(&self) -> Option<&EnvelopeRef> {
        self.parent().and_then(|p| p.envelope())
    }

    /// Undispersed field and accumulated element when this field is the result of dispersion.
    fn dispersion_source(&self) -> Option<(&FieldRef, &ElementRef)> {
        None
    }

    /// Vector potential `A(t)`.
    fn vector_potential(&self, t: Scalar) -> R3 {
        self.vector_potential_at_phase(t, 0.0)
    }

    /// Electric field `F(t) = −dA/dt`.
    fn field_amplitude(&self, t: Scalar) -> R3 {
        self.field_amplitude_at_phase(t, 0.0)
    }

    /// `∫ₐᵇ F dt = −(A(b) − A(a))`.
    fn integrated_field_amplitude(&self, a: Scalar, b: Scalar) -> R3 {
        -(self.vector_potential(b) - self.vector_potential(a))
    }

    /// `|F(t)|²`.
    fn instantaneous_intensity(&self, t: Scalar) -> Scalar {
        self.field_amplitude(t).norm_squared()
    }

    /// Cycle-peak intensity: `|F(t; δ)|²` maximized over the carrier phase offset.
    fn intensity(&self, t: Scalar) -> Scalar {
        maximize_bounded(
            |shift| self.field_amplitude_at_phase(t, shift).norm_squared(),
            0.0,
            TAU,
            PHASE_SCAN,
            1.0e-10,
        )
        .value
    }

    /// Wavelength λ.
    fn wavelength(&self) -> Result<Scalar, FieldError> {
        self.quantity(Param::Wavelength)
    }

    /// Period T.
    fn period(&self) -> Result<Scalar, FieldError> {
        self.quantity(Param::Period)
    }

    /// Frequency f.
    fn frequency(&self) -> Result<Scalar, FieldError> {
        self.quantity(Param::Frequency)
    }

    /// Wavenumber ν = 1/λ.
    fn wavenumber(&self) -> Result<Scalar, FieldError> {
        self.quantity(Param::Wavenumber)
    }

    /// Angular frequency ω.
    fn angular_frequency(&self) -> Result<Scalar, FieldError> {
        self.quantity(Param::AngularFrequency)
    }

    /// Photon energy ħω.
    fn photon_energy(&self) -> Result<Scalar, FieldError> {
        self.quantity(Param::PhotonEnergy)
    }

    /// Peak intensity I₀.
    fn peak_intensity(&self) -> Result<Scalar, FieldError> {
        self.quantity(Param::Intensity)
    }

    /// Peak field E₀.
    fn amplitude(&self) -> Result<Scalar, FieldError> {
        self.quantity(Param::Amplitude)
    }

    /// Peak vector potential A₀.
    fn vector_potential_amplitude(&self) -> Result<Scalar, FieldError> {
        self.quantity(Param::VectorPotential)
    }

    /// Ponderomotive potential Uₚ.
    fn ponderomotive_potential(&self) -> Result<Scalar, FieldError> {
        self.quantity(Param::PonderomotivePotential)
    }
}
