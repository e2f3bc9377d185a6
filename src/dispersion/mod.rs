//! Dispersion of fields through linear optical elements.
//!
//! A field is sampled on a uniform grid, transformed, multiplied by the
//! element's transfer function and transformed back. The grid is grown until
//! the result stops changing (see [`find_time_span`]), cut where the pulse
//! falls below a cutoff, and fitted with B-splines so that the dispersed
//! field is again a continuous function of time.

mod bspline_field;
mod dispersed;
mod elements;
mod span;

use std::f64::consts::TAU;

pub use bspline_field::BSplineField;
pub use dispersed::DispersedField;
pub use elements::{
    cascade, Cascade, Chirp, Crystal, DispersiveElement, ElementRef, IsotropicMedium, MaterialRef, PhaseShift,
    Transfer,
};
pub use span::{disperse_samples, find_time_span, SampledDispersion};

use crate::errors::FieldError;
use crate::fields::FieldRef;
use crate::math::bspline::MAX_DEGREE;
use crate::math::Scalar;

/// Knobs of the dispersion pipeline.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispersionOptions {
    /// Factor by which the sampled span grows per iteration.
    pub growth: Scalar,
    /// Maximum number of growth steps.
    pub max_iterations: usize,
    /// Relative L2 change below which the span is accepted.
    pub tolerance: Scalar,
    /// Relative amplitude below which the dispersed field is cut.
    pub cutoff: Scalar,
    /// Polynomial degree of the fitted B-splines.
    pub spline_degree: usize,
    /// Spline knots per period of the highest frequency.
    pub knots_per_cycle: Scalar,
    /// Samples per period of the highest frequency.
    pub samples_per_cycle: Scalar,
}

impl Default for DispersionOptions {
    fn default() -> Self {
        Self {
            growth: 2.0,
            max_iterations: 7,
            tolerance: 5.0e-4,
            cutoff: 1.0e5 * Scalar::EPSILON.sqrt(),
            spline_degree: 3,
            knots_per_cycle: 40.0,
            samples_per_cycle: 100.0,
        }
    }
}

impl DispersionOptions {
    /// Builder-style override of the growth factor.
    #[must_use]
    pub const fn with_growth(mut self, growth: Scalar) -> Self {
        self.growth = growth;
        self
    }

    /// Builder-style override of the iteration limit.
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Builder-style override of the convergence tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: Scalar) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builder-style override of the truncation cutoff.
    #[must_use]
    pub const fn with_cutoff(mut self, cutoff: Scalar) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Builder-style override of the spline degree.
    #[must_use]
    pub const fn with_spline_degree(mut self, degree: usize) -> Self {
        self.spline_degree = degree;
        self
    }

    /// Builder-style override of the knot density.
    #[must_use]
    pub const fn with_knots_per_cycle(mut self, knots: Scalar) -> Self {
        self.knots_per_cycle = knots;
        self
    }

    /// Builder-style override of the sampling density.
    #[must_use]
    pub const fn with_samples_per_cycle(mut self, samples: Scalar) -> Self {
        self.samples_per_cycle = samples;
        self
    }

    /// Checks that the options describe a usable pipeline.
    pub fn validate(&self) -> Result<(), FieldError> {
        let problem = if !(self.growth > 1.0) {
            "growth factor must exceed 1"
        } else if !(self.tolerance > 0.0) {
            "tolerance must be positive"
        } else if !(0.0..1.0).contains(&self.cutoff) {
            "cutoff must lie in [0, 1)"
        } else if !(1..=MAX_DEGREE).contains(&self.spline_degree) {
            "spline degree must lie between 1 and 15"
        } else if !(self.knots_per_cycle > 0.0) {
            "knots per cycle must be positive"
        } else if !(self.samples_per_cycle >= 2.0 * self.knots_per_cycle) {
            "at least two samples per knot interval are required"
        } else {
            return Ok(());
        };
        Err(FieldError::config(format!("{problem}: {self:?}")))
    }

    /// Sampling step for a field whose highest angular frequency is `max_frequency`.
    pub(crate) fn sampling_step(&self, max_frequency: Scalar) -> Result<Scalar, FieldError> {
        if !(max_frequency > 0.0 && max_frequency.is_finite()) {
            return Err(FieldError::Domain(format!(
                "cannot sample a field with max frequency {max_frequency:e}"
            )));
        }
        Ok(TAU / (self.samples_per_cycle * max_frequency))
    }

    /// Knot spacing for a field whose highest angular frequency is `max_frequency`.
    pub(crate) fn knot_spacing(&self, max_frequency: Scalar) -> Scalar {
        TAU / (self.knots_per_cycle * max_frequency)
    }
}

/// Disperses `field` through `element`.
///
/// Dispersing an already dispersed field composes the elements as
/// `Cascade[element, previous]` and rebuilds from the undispersed field.
pub fn disperse(field: &FieldRef, element: ElementRef, options: &DispersionOptions) -> Result<FieldRef, FieldError> {
    let dispersed = match field.dispersion_source() {
        Some((original, previous)) => {
            DispersedField::new(original.clone(), cascade(element, previous.clone()), options)?
        }
        None => DispersedField::new(field.clone(), element, options)?,
    };
    Ok(std::sync::Arc::new(dispersed))
}
