//! Special functions used by window and envelope spectra.

use super::Scalar;

/// Modified Bessel function of the first kind, order zero, `I₀(z)`.
///
/// Evaluated from its power series `Σ (z²/4)ᵏ / (k!)²`, which converges for
/// all real `z`; Kaiser windows only need moderate arguments.
#[must_use]
pub fn bessel_i0(z: Scalar) -> Scalar {
    let q = 0.25 * z * z;
    let mut term = 1.0;
    let mut sum = 1.0;
    let mut k = 1.0;
    while term > Scalar::EPSILON * sum {
        term *= q / (k * k);
        sum += term;
        k += 1.0;
    }
    sum
}

/// `I₁(z)/z`, regular at the origin where it equals ½.
#[must_use]
pub fn bessel_i1_over_z(z: Scalar) -> Scalar {
    let q = 0.25 * z * z;
    let mut term = 0.5;
    let mut sum = 0.5;
    let mut k = 1.0;
    while term > Scalar::EPSILON * sum {
        term *= q / (k * (k + 1.0));
        sum += term;
        k += 1.0;
    }
    sum
}

/// Unnormalized cardinal sine `sin(x)/x` with `sinc(0) = 1`.
#[must_use]
pub fn sinc(x: Scalar) -> Scalar {
    if x.abs() < 1.0e-8 {
        1.0 - x * x / 6.0
    } else {
        x.sin() / x
    }
}
