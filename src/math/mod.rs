//! Shared numerical primitives anchored on `nalgebra`.

/// Uniform B-spline bases and banded least-squares fitting.
pub mod bspline;
/// Bounded one-dimensional maximization.
pub mod optimize;
/// Bracketing and Brent root finding.
pub mod roots;
/// Modified Bessel functions and related special functions.
pub mod special;

use nalgebra::{Matrix3, Vector3};

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Convenient alias for three-dimensional real vectors.
pub type R3 = Vector3<Scalar>;
/// Convenient alias for three-by-three real matrices.
pub type R3x3 = Matrix3<Scalar>;
/// Primary complex scalar type used for spectra and transfer functions.
pub type CScalar = num_complex::Complex<Scalar>;
/// Convenient alias for three-dimensional complex vectors.
pub type C3 = Vector3<CScalar>;
/// Convenient alias for three-by-three complex matrices.
pub type C3x3 = Matrix3<CScalar>;

/// Returns the complex exponential `e^(j * theta)` using `Scalar` precision.
#[must_use]
pub fn phasor(theta: Scalar) -> CScalar {
    num_complex::Complex::from_polar(1.0, theta)
}

/// Relative L2 distance `‖a − b‖ / ‖a‖` between two sampled vector signals.
///
/// Returns the absolute distance when `a` vanishes identically.
#[must_use]
pub fn relative_l2_distance(a: &[R3], b: &[R3]) -> Scalar {
    let mut diff = 0.0;
    let mut norm = 0.0;
    for (x, y) in a.iter().zip(b) {
        diff += (x - y).norm_squared();
        norm += x.norm_squared();
    }
    if norm > 0.0 {
        (diff / norm).sqrt()
    } else {
        diff.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn phasor_has_unit_magnitude() {
        let p = phasor(0.7);
        assert_relative_eq!(p.norm(), 1.0, epsilon = 1.0e-12);
        assert_relative_eq!(p.arg(), 0.7, epsilon = 1.0e-12);
    }

    #[test]
    fn relative_distance_of_identical_signals_vanishes() {
        let a = vec![R3::new(1.0, 2.0, 2.0), R3::z()];
        assert_relative_eq!(relative_l2_distance(&a, &a), 0.0);
        let b = vec![R3::zeros(), R3::zeros()];
        assert_relative_eq!(relative_l2_distance(&a, &b), 1.0, epsilon = 1.0e-12);
    }
}
