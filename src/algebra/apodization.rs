//! Apodization windows and the apodized field.
//!
//! Windows are defined on the normalized coordinate `x ∈ [−½, ½]` and vanish
//! (together with their derivative) for `|2x| > 1`.

use std::f64::consts::{PI, TAU};

use crate::errors::FieldError;
use crate::fields::{Continuity, Field, FieldRef, Span};
use crate::math::special::{bessel_i0, bessel_i1_over_z};
use crate::math::{Scalar, R3};

/// Window functions for [`ApodizedField`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Window {
    /// Rectangular window.
    Rect,
    /// Hann (raised cosine).
    Hann,
    /// Hamming, `a₀ = 25/46`.
    Hamming,
    /// Classic Blackman, `(0.42, 0.5, 0.08)`.
    Blackman,
    /// Blackman with exact zeros at the third and fourth sidelobes.
    BlackmanExact,
    /// Four-term Nuttall with continuous first derivative.
    Nuttall,
    /// Four-term Blackman–Nuttall.
    BlackmanNuttall,
    /// Four-term Blackman–Harris.
    BlackmanHarris,
    /// Kaiser window `I₀(πα√(1 − 4x²)) / I₀(πα)`.
    Kaiser(Scalar),
}

impl Window {
    /// Coefficients `aₖ` of `Σ aₖ cos(2πkx)`, or `None` for Kaiser.
    fn cosine_terms(self) -> Option<&'static [Scalar]> {
        Some(match self {
            Self::Rect => &[1.0],
            Self::Hann => &[0.5, 0.5],
            Self::Hamming => &[25.0 / 46.0, 21.0 / 46.0],
            Self::Blackman => &[0.42, 0.5, 0.08],
            Self::BlackmanExact => &[7938.0 / 18608.0, 9240.0 / 18608.0, 1430.0 / 18608.0],
            Self::Nuttall => &[0.355_768, 0.487_396, 0.144_232, 0.012_604],
            Self::BlackmanNuttall => &[0.363_581_9, 0.489_177_5, 0.136_599_5, 0.010_641_1],
            Self::BlackmanHarris => &[0.358_75, 0.488_29, 0.141_28, 0.011_68],
            Self::Kaiser(_) => return None,
        })
    }

    /// Window value at `x`.
    #[must_use]
    pub fn value(self, x: Scalar) -> Scalar {
        if 2.0 * x.abs() > 1.0 {
            return 0.0;
        }
        match self.cosine_terms() {
            Some(terms) => terms
                .iter()
                .enumerate()
                .map(|(k, a)| a * (TAU * k as Scalar * x).cos())
                .sum(),
            None => {
                let Self::Kaiser(alpha) = self else { return 0.0 };
                let beta = PI * alpha;
                bessel_i0(beta * (1.0 - 4.0 * x * x).max(0.0).sqrt()) / bessel_i0(beta)
            }
        }
    }

    /// Derivative `dW/dx`.
    #[must_use]
    pub fn derivative(self, x: Scalar) -> Scalar {
        if 2.0 * x.abs() > 1.0 {
            return 0.0;
        }
        match self.cosine_terms() {
            Some(terms) => terms
                .iter()
                .enumerate()
                .skip(1)
                .map(|(k, a)| {
                    let w = TAU * k as Scalar;
                    -a * w * (w * x).sin()
                })
                .sum(),
            None => {
                let Self::Kaiser(alpha) = self else { return 0.0 };
                let beta = PI * alpha;
                let z = beta * (1.0 - 4.0 * x * x).max(0.0).sqrt();
                // d/dx I₀(z) = I₁(z) dz/dx with z dz/dx = −4β²x
                -4.0 * beta * beta * x * bessel_i1_over_z(z) / bessel_i0(beta)
            }
        }
    }
}

/// Field multiplied by a window stretched over `[a, b]`.
///
/// `A = W A_p` and `F = W F_p − W′ A_p / (b − a)`, so `F = −dA/dt` holds.
#[derive(Debug, Clone)]
pub struct ApodizedField {
    parent: FieldRef,
    window: Window,
    bounds: Span,
    span: Span,
}

impl ApodizedField {
    /// Apodizes `parent` with `window` mapped onto `[a, b]`.
    pub fn new(parent: FieldRef, window: Window, a: Scalar, b: Scalar) -> Result<Self, FieldError> {
        let bounds = Span::new(a, b);
        if !(bounds.duration() > 0.0) {
            return Err(FieldError::config(format!("apodization interval {bounds} is empty")));
        }
        if let Window::Kaiser(alpha) = window {
            if !(alpha >= 0.0 && alpha.is_finite()) {
                return Err(FieldError::config(format!("Kaiser α must be non-negative, got {alpha:e}")));
            }
        }
        let span = parent.span().intersection(&bounds).ok_or_else(|| {
            FieldError::config(format!("apodization interval {bounds} misses the field span {}", parent.span()))
        })?;
        Ok(Self {
            parent,
            window,
            bounds,
            span,
        })
    }

    /// Window in use.
    #[must_use]
    pub const fn window(&self) -> Window {
        self.window
    }

    fn coordinate(&self, t: Scalar) -> Scalar {
        (t - self.bounds.start) / self.bounds.duration() - 0.5
    }
}

impl Field for ApodizedField {
    fn vector_potential_at_phase(&self, t: Scalar, shift: Scalar) -> R3 {
        let w = self.window.value(self.coordinate(t));
        if w == 0.0 {
            return R3::zeros();
        }
        self.parent.vector_potential_at_phase(t, shift) * w
    }

    fn field_amplitude_at_phase(&self, t: Scalar, shift: Scalar) -> R3 {
        let x = self.coordinate(t);
        let w = self.window.value(x);
        let dw = self.window.derivative(x);
        if w == 0.0 && dw == 0.0 {
            return R3::zeros();
        }
        self.parent.field_amplitude_at_phase(t, shift) * w
            - self.parent.vector_potential_at_phase(t, shift) * (dw / self.bounds.duration())
    }

    fn span(&self) -> Span {
        self.span
    }

    fn parent(&self) -> Option<&FieldRef> {
        Some(&self.parent)
    }

    fn continuity(&self) -> Continuity {
        self.parent.continuity().min(Continuity::Finite(0))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::fields::gaussian_pulse;

    const ALL: [Window; 9] = [
        Window::Rect,
        Window::Hann,
        Window::Hamming,
        Window::Blackman,
        Window::BlackmanExact,
        Window::Nuttall,
        Window::BlackmanNuttall,
        Window::BlackmanHarris,
        Window::Kaiser(3.0),
    ];

    #[test]
    fn windows_peak_at_centre_and_vanish_outside() {
        for window in ALL {
            assert_relative_eq!(window.value(0.0), 1.0, epsilon = 1.0e-6);
            assert_eq!(window.value(0.51), 0.0);
            assert_eq!(window.derivative(-0.6), 0.0);
        }
        assert_relative_eq!(Window::Hann.value(0.5), 0.0, epsilon = 1.0e-15);
        assert_relative_eq!(Window::Hamming.value(0.5), 2.0 / 46.0, epsilon = 1.0e-15);
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let h = 1.0e-6;
        for window in ALL {
            for &x in &[-0.37, -0.1, 0.05, 0.42] {
                let fd = (window.value(x + h) - window.value(x - h)) / (2.0 * h);
                assert_relative_eq!(window.derivative(x), fd, epsilon = 1.0e-7);
            }
        }
    }

    #[test]
    fn apodized_field_keeps_f_equal_to_minus_da_dt() {
        let parent: FieldRef = gaussian_pulse(0.057, 0.01, 200.0, 6.0, 0.2).unwrap();
        let field = ApodizedField::new(parent.clone(), Window::Kaiser(2.0), -300.0, 250.0).unwrap();
        assert_eq!(field.span().start, -300.0);
        assert_eq!(field.span().end, 250.0);
        let h = 1.0e-4;
        for &t in &[-250.0, -12.0, 0.0, 199.0] {
            let fd = -(field.vector_potential(t + h) - field.vector_potential(t - h)) / (2.0 * h);
            assert_relative_eq!(field.field_amplitude(t), fd, epsilon = 1.0e-9);
        }
        assert_eq!(field.vector_potential(260.0), R3::zeros());
        assert_relative_eq!(field.wavelength().unwrap(), parent.wavelength().unwrap());
    }

    #[test]
    fn disjoint_interval_is_rejected() {
        let parent: FieldRef = gaussian_pulse(0.057, 0.01, 200.0, 6.0, 0.0).unwrap();
        assert!(ApodizedField::new(parent, Window::Hann, 1.0e5, 2.0e5).is_err());
    }
}
