//! Fields reconstructed from sampled vector potentials.

use std::f64::consts::PI;

use crate::errors::FieldError;
use crate::fields::{Continuity, Field, Polarization, Span};
use crate::math::bspline::UniformBSpline;
use crate::math::{Scalar, R3};

/// A field whose vector potential is a uniform B-spline; zero outside its span.
///
/// `F = −A′` is the exact derivative of the spline. The field has no carrier,
/// so the phase offset of `*_at_phase` evaluation is ignored.
#[derive(Debug, Clone)]
pub struct BSplineField {
    spline: UniformBSpline,
    dimensions: usize,
    max_frequency: Scalar,
}

impl BSplineField {
    /// Least-squares fit of `values` at `times` with `intervals` knot intervals of `degree`.
    ///
    /// The field is three-dimensional if any sample has an x or y component.
    pub fn fit(times: &[Scalar], values: &[R3], degree: usize, intervals: usize) -> Result<Self, FieldError> {
        let (Some(&start), Some(&end)) = (times.first(), times.last()) else {
            return Err(FieldError::Domain("cannot fit a spline to no samples".into()));
        };
        let spline = UniformBSpline::fit(start, end, intervals, degree, times, values)?;
        let dimensions = if values.iter().any(|v| v.x != 0.0 || v.y != 0.0) { 3 } else { 1 };
        Ok(Self::from_spline(spline, dimensions))
    }

    /// Wraps an existing spline; `max_frequency` defaults to the knot Nyquist frequency.
    #[must_use]
    pub fn from_spline(spline: UniformBSpline, dimensions: usize) -> Self {
        let intervals = spline.len() - spline.degree();
        let step = (spline.end() - spline.start()) / intervals as Scalar;
        Self {
            spline,
            dimensions,
            max_frequency: PI / step,
        }
    }

    /// Builder-style override of the highest frequency of interest.
    #[must_use]
    pub const fn with_max_frequency(mut self, max_frequency: Scalar) -> Self {
        self.max_frequency = max_frequency;
        self
    }

    /// Underlying spline.
    #[must_use]
    pub const fn spline(&self) -> &UniformBSpline {
        &self.spline
    }
}

impl Field for BSplineField {
    fn vector_potential_at_phase(&self, t: Scalar, _shift: Scalar) -> R3 {
        if self.span().contains(t) {
            self.spline.value(t)
        } else {
            R3::zeros()
        }
    }

    fn field_amplitude_at_phase(&self, t: Scalar, _shift: Scalar) -> R3 {
        if self.span().contains(t) {
            -self.spline.derivative(t)
        } else {
            R3::zeros()
        }
    }

    fn span(&self) -> Span {
        Span::new(self.spline.start(), self.spline.end())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn polarization(&self) -> Polarization {
        if self.dimensions == 1 {
            Polarization::Linear
        } else {
            Polarization::Arbitrary
        }
    }

    fn continuity(&self) -> Continuity {
        Continuity::Finite(self.spline.degree().saturating_sub(1) as u32)
    }

    fn max_frequency(&self) -> Scalar {
        self.max_frequency
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::spectra::linspace;

    #[test]
    fn reproduces_a_smooth_pulse() {
        let times = linspace(-30.0, 30.0, 1201);
        let pulse = |t: Scalar| (-t * t / 100.0).exp() * (0.5 * t).sin();
        let values: Vec<R3> = times.iter().map(|&t| R3::new(0.0, 0.0, pulse(t))).collect();
        let field = BSplineField::fit(&times, &values, 3, 600).unwrap();
        assert_eq!(field.dimensions(), 1);
        assert_eq!(field.polarization(), Polarization::Linear);
        assert_eq!(field.continuity(), Continuity::Finite(2));
        for &t in &[-12.3, 0.0, 4.4, 17.0] {
            assert_relative_eq!(field.vector_potential(t).z, pulse(t), epsilon = 1.0e-6);
        }
        let h = 1.0e-5;
        let fd = -(pulse(2.0 + h) - pulse(2.0 - h)) / (2.0 * h);
        assert_relative_eq!(field.field_amplitude(2.0).z, fd, epsilon = 1.0e-4);
        assert_eq!(field.vector_potential(31.0), R3::zeros());
    }

    #[test]
    fn transverse_samples_make_a_three_dimensional_field() {
        let times = linspace(0.0, 10.0, 101);
        let values: Vec<R3> = times.iter().map(|&t| R3::new(t.sin(), 0.0, t.cos())).collect();
        let field = BSplineField::fit(&times, &values, 3, 20).unwrap();
        assert_eq!(field.dimensions(), 3);
        assert_eq!(field.polarization(), Polarization::Arbitrary);
        assert!(BSplineField::fit(&[], &[], 3, 4).is_err());
        assert!(BSplineField::fit(&times, &values, 16, 20).is_err());
    }
}
