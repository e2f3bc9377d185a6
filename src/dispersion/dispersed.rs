//! The dispersed field.

use crate::carriers::Carrier;
use crate::errors::FieldError;
use crate::envelopes::EnvelopeRef;
use crate::fields::{Continuity, Field, FieldRef, Polarization, Span};
use crate::math::{Scalar, R3};

use super::{find_time_span, BSplineField, DispersionOptions, ElementRef};

/// A field after passage through a dispersive element.
///
/// Built once from the undispersed field: the dispersed vector potential and
/// its quadrature copy are sampled on a discovered span, truncated and fitted
/// with B-splines. A carrier phase offset `δ` is evaluated as
/// `cos δ · A_I + sin δ · A_Q`.
#[derive(Debug, Clone)]
pub struct DispersedField {
    original: FieldRef,
    element: ElementRef,
    in_phase: BSplineField,
    quadrature: BSplineField,
    iterations: usize,
    converged: bool,
}

impl DispersedField {
    /// Disperses `original` through `element`.
    pub fn new(original: FieldRef, element: ElementRef, options: &DispersionOptions) -> Result<Self, FieldError> {
        let max_frequency = original.max_frequency();
        let sampled = find_time_span(original.as_ref(), element.as_ref(), options)?
            .truncated(options.cutoff, original.span());
        let times = sampled.times();
        let duration = sampled.span().duration();
        let intervals = ((duration / options.knot_spacing(max_frequency)).ceil() as usize).max(1);
        let fit = |values: &[R3]| {
            BSplineField::fit(&times, values, options.spline_degree, intervals)
                .map(|f| f.with_max_frequency(max_frequency))
        };
        let in_phase = fit(&sampled.in_phase)?;
        let quadrature = fit(&sampled.quadrature)?;
        log::debug!(
            "dispersed field on {} with {intervals} spline intervals after {} span iterations",
            in_phase.span(),
            sampled.iterations
        );
        Ok(Self {
            original,
            element,
            in_phase,
            quadrature,
            iterations: sampled.iterations,
            converged: sampled.converged,
        })
    }

    /// Undispersed field.
    #[must_use]
    pub const fn original(&self) -> &FieldRef {
        &self.original
    }

    /// Accumulated dispersive element.
    #[must_use]
    pub const fn element(&self) -> &ElementRef {
        &self.element
    }

    /// False if the span search hit its iteration limit.
    #[must_use]
    pub const fn converged(&self) -> bool {
        self.converged
    }

    /// Growth steps taken by the span search.
    #[must_use]
    pub const fn iterations(&self) -> usize {
        self.iterations
    }

    /// Spline reconstruction of the dispersed vector potential.
    #[must_use]
    pub const fn in_phase(&self) -> &BSplineField {
        &self.in_phase
    }

    /// Spline reconstruction of the quadrature copy.
    #[must_use]
    pub const fn quadrature(&self) -> &BSplineField {
        &self.quadrature
    }
}

impl Field for DispersedField {
    fn vector_potential_at_phase(&self, t: Scalar, shift: Scalar) -> R3 {
        let (s, c) = shift.sin_cos();
        self.in_phase.vector_potential(t) * c + self.quadrature.vector_potential(t) * s
    }

    fn field_amplitude_at_phase(&self, t: Scalar, shift: Scalar) -> R3 {
        let (s, c) = shift.sin_cos();
        self.in_phase.field_amplitude(t) * c + self.quadrature.field_amplitude(t) * s
    }

    fn span(&self) -> Span {
        self.in_phase.span()
    }

    fn parent(&self) -> Option<&FieldRef> {
        Some(&self.original)
    }

    fn dimensions(&self) -> usize {
        if self.element.is_isotropic() {
            self.original.dimensions()
        } else {
            3
        }
    }

    fn polarization(&self) -> Polarization {
        if self.element.is_isotropic() {
            self.original.polarization()
        } else {
            Polarization::Arbitrary
        }
    }

    fn continuity(&self) -> Continuity {
        self.original.continuity().min(self.in_phase.continuity())
    }

    fn carrier(&self) -> Option<&dyn Carrier> {
        None
    }

    fn envelope(&self) -> Option<&EnvelopeRef> {
        None
    }

    fn dispersion_source(&self) -> Option<(&FieldRef, &ElementRef)> {
        Some((&self.original, &self.element))
    }
}
