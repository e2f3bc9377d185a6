//! Scalar root finding: bracket expansion and Brent's method.
//!
//! # References
//!
//! - Brent (1973). "Algorithms for Minimization without Derivatives", ch. 4.
//!   Prentice-Hall, Englewood Cliffs.

use crate::errors::FieldError;

use super::Scalar;

/// Stopping criteria for bracketing root finders.
#[derive(Debug, Clone, Copy)]
pub struct RootOptions {
    /// Absolute tolerance on the abscissa.
    pub x_tolerance: Scalar,
    /// Maximum number of Brent iterations.
    pub max_iterations: usize,
}

impl Default for RootOptions {
    fn default() -> Self {
        Self {
            x_tolerance: 1.0e-14,
            max_iterations: 200,
        }
    }
}

/// Expands `[lo, hi]` by moving `hi` outward geometrically until `f` changes sign.
///
/// `f(lo)` must already be finite. Returns the bracket with a sign change.
pub fn expand_upper_bracket<F>(
    f: F,
    lo: Scalar,
    mut hi: Scalar,
    factor: Scalar,
    max_steps: usize,
) -> Result<(Scalar, Scalar), FieldError>
where
    F: Fn(Scalar) -> Scalar,
{
    let f_lo = f(lo);
    let mut lower = lo;
    for _ in 0..max_steps {
        let f_hi = f(hi);
        if !f_hi.is_finite() {
            return Err(FieldError::Domain(format!(
                "root bracket evaluation is not finite at {hi:e}"
            )));
        }
        if f_lo.signum() != f_hi.signum() {
            return Ok((lower, hi));
        }
        lower = hi;
        hi *= factor;
    }
    Err(FieldError::Convergence(format!(
        "no sign change found in [{lo:e}, {hi:e}] after {max_steps} expansions"
    )))
}

/// Finds a root of `f` in `[a, b]` with Brent's method.
///
/// `f(a)` and `f(b)` must bracket the root (opposite signs, or one of them zero).
pub fn brent<F>(f: F, a: Scalar, b: Scalar, options: RootOptions) -> Result<Scalar, FieldError>
where
    F: Fn(Scalar) -> Scalar,
{
    let (mut a, mut b) = (a, b);
    let mut fa = f(a);
    let mut fb = f(b);
    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }
    if fa.signum() == fb.signum() {
        return Err(FieldError::Convergence(format!(
            "interval [{a:e}, {b:e}] does not bracket a root"
        )));
    }

    let mut c = a;
    let mut fc = fa;
    let mut d = b - a;
    let mut e = d;

    for _ in 0..options.max_iterations {
        if fb.signum() == fc.signum() {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 2.0 * Scalar::EPSILON * b.abs() + 0.5 * options.x_tolerance;
        let m = 0.5 * (c - b);
        if m.abs() <= tol || fb == 0.0 {
            return Ok(b);
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            // Inverse quadratic interpolation, or secant when only two points differ.
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                (2.0 * m * s, 1.0 - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * m * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            } else {
                p = -p;
            }
            if 2.0 * p < (3.0 * m * q - (tol * q).abs()).min((e * q).abs()) {
                e = d;
                d = p / q;
            } else {
                d = m;
                e = m;
            }
        } else {
            d = m;
            e = m;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol { d } else { tol.copysign(m) };
        fb = f(b);
    }

    Err(FieldError::Convergence(format!(
        "Brent's method did not converge in {} iterations",
        options.max_iterations
    )))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn brent_finds_square_root_of_two() {
        let root = brent(|x| x * x - 2.0, 0.0, 2.0, RootOptions::default()).unwrap();
        assert_relative_eq!(root, std::f64::consts::SQRT_2, epsilon = 1.0e-13);
    }

    #[test]
    fn brent_rejects_non_bracketing_interval() {
        let err = brent(|x| x * x + 1.0, -1.0, 1.0, RootOptions::default());
        assert!(matches!(err, Err(FieldError::Convergence(_))));
    }

    #[test]
    fn bracket_expansion_reaches_far_root() {
        let (lo, hi) = expand_upper_bracket(|x| x - 1000.0, 1.0, 2.0, 2.0, 60).unwrap();
        assert!(lo < 1000.0 && hi >= 1000.0);
        let root = brent(|x| x - 1000.0, lo, hi, RootOptions::default()).unwrap();
        assert_relative_eq!(root, 1000.0, epsilon = 1.0e-10);
    }
}
