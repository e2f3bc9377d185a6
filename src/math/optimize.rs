//! Bounded one-dimensional maximization.
//!
//! The objective is scanned on a coarse uniform grid first, then the best
//! cell is refined with golden-section search. The scan guards against the
//! periodic, multi-modal objectives that appear when maximizing over a
//! carrier phase.

use super::Scalar;

const INV_PHI: Scalar = 0.618_033_988_749_894_8;

/// Result of a bounded maximization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Maximum {
    /// Abscissa of the maximum.
    pub x: Scalar,
    /// Objective value at `x`.
    pub value: Scalar,
}

/// Maximizes `f` over `[a, b]`.
///
/// `samples` grid points seed the search (at least 3 are used) and the
/// golden-section refinement stops once the bracket is narrower than `tolerance`.
pub fn maximize_bounded<F>(f: F, a: Scalar, b: Scalar, samples: usize, tolerance: Scalar) -> Maximum
where
    F: Fn(Scalar) -> Scalar,
{
    let n = samples.max(3);
    let h = (b - a) / (n - 1) as Scalar;
    let mut best = Maximum { x: a, value: f(a) };
    let mut best_index = 0;
    for i in 1..n {
        let x = a + h * i as Scalar;
        let value = f(x);
        if value > best.value {
            best = Maximum { x, value };
            best_index = i;
        }
    }

    let mut lo = if best_index == 0 { a } else { best.x - h };
    let mut hi = if best_index == n - 1 { b } else { best.x + h };
    let mut x1 = hi - INV_PHI * (hi - lo);
    let mut x2 = lo + INV_PHI * (hi - lo);
    let mut f1 = f(x1);
    let mut f2 = f(x2);
    while hi - lo > tolerance {
        if f1 > f2 {
            hi = x2;
            x2 = x1;
            f2 = f1;
            x1 = hi - INV_PHI * (hi - lo);
            f1 = f(x1);
        } else {
            lo = x1;
            x1 = x2;
            f1 = f2;
            x2 = lo + INV_PHI * (hi - lo);
            f2 = f(x2);
        }
    }

    let (x, value) = if f1 > f2 { (x1, f1) } else { (x2, f2) };
    if value > best.value {
        Maximum { x, value }
    } else {
        best
    }
}
