//! Uniform B-spline bases and banded least-squares fitting.
//!
//! A [`UniformBSpline`] of degree `p` on `[a, b]` split into `n` equal
//! intervals has `n + p` basis functions; on each interval exactly `p + 1` of
//! them are non-zero. Local values come from the Cox–de Boor recursion with
//! integer knots, derivatives from the differenced coefficients of the
//! degree `p − 1` basis.
//!
//! # References
//!
//! - de Boor (2001). "A Practical Guide to Splines" (rev. ed). Springer.
//! - Piegl & Tiller (1997). "The NURBS Book" (2nd ed), algorithm A2.2.

use crate::errors::FieldError;

use super::{Scalar, R3};

/// Highest supported polynomial degree.
pub const MAX_DEGREE: usize = 15;

/// Evaluates the `degree + 1` non-zero uniform B-spline basis functions at local coordinate `u ∈ [0, 1]`.
///
/// Entry `r` belongs to the basis function starting `degree − r` knots to the left.
fn local_basis(u: Scalar, degree: usize, out: &mut [Scalar]) {
    out[0] = 1.0;
    for j in 1..=degree {
        let mut saved = 0.0;
        for r in 0..j {
            // right[r + 1] = r + 1 − u, left[j − r] = u + j − r − 1, their sum is j.
            let temp = out[r] / j as Scalar;
            let right = (r + 1) as Scalar - u;
            let left = u + (j - r) as Scalar - 1.0;
            out[r] = saved + right * temp;
            saved = left * temp;
        }
        out[j] = saved;
    }
}

/// A vector-valued B-spline with uniform knots.
#[derive(Debug, Clone)]
pub struct UniformBSpline {
    start: Scalar,
    step: Scalar,
    intervals: usize,
    degree: usize,
    coefficients: Vec<R3>,
}

impl UniformBSpline {
    /// Number of basis functions for `intervals` intervals of degree `degree`.
    #[must_use]
    pub const fn basis_len(intervals: usize, degree: usize) -> usize {
        intervals + degree
    }

    /// Fits a spline to samples `(times[m], values[m])` in the least-squares sense.
    ///
    /// The samples must lie in `[start, end]` and outnumber the basis functions.
    pub fn fit(
        start: Scalar,
        end: Scalar,
        intervals: usize,
        degree: usize,
        times: &[Scalar],
        values: &[R3],
    ) -> Result<Self, FieldError> {
        if !(end > start) || intervals == 0 {
            return Err(FieldError::Domain(format!(
                "cannot build a spline on [{start:e}, {end:e}] with {intervals} intervals"
            )));
        }
        if degree > MAX_DEGREE {
            return Err(FieldError::Domain(format!(
                "spline degree {degree} exceeds the supported maximum {MAX_DEGREE}"
            )));
        }
        let size = Self::basis_len(intervals, degree);
        if times.len() != values.len() || times.len() < size {
            return Err(FieldError::Domain(format!(
                "{} samples cannot determine {size} spline coefficients",
                times.len()
            )));
        }

        let step = (end - start) / intervals as Scalar;
        let mut normal = BandedSpd::zeros(size, degree);
        let mut rhs = vec![R3::zeros(); size];
        let mut basis = vec![0.0; degree + 1];
        for (&t, &y) in times.iter().zip(values) {
            let (interval, u) = locate(start, step, intervals, t);
            local_basis(u, degree, &mut basis);
            for r in 0..=degree {
                let i = interval + r;
                rhs[i] += y * basis[r];
                for s in 0..=r {
                    normal.add(i, interval + s, basis[r] * basis[s]);
                }
            }
        }
        normal.regularize(1.0e-13);
        let coefficients = normal.solve(rhs)?;

        Ok(Self {
            start,
            step,
            intervals,
            degree,
            coefficients,
        })
    }

    /// Polynomial degree of the basis.
    #[must_use]
    pub const fn degree(&self) -> usize {
        self.degree
    }

    /// Left end of the spline domain.
    #[must_use]
    pub const fn start(&self) -> Scalar {
        self.start
    }

    /// Right end of the spline domain.
    #[must_use]
    pub fn end(&self) -> Scalar {
        self.start + self.step * self.intervals as Scalar
    }

    /// Number of coefficients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// True if the spline has no coefficients.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Spline value at `t`; `t` is clamped into the domain.
    #[must_use]
    pub fn value(&self, t: Scalar) -> R3 {
        let (interval, u) = locate(self.start, self.step, self.intervals, t);
        let mut basis = [0.0; MAX_DEGREE + 1];
        local_basis(u, self.degree, &mut basis);
        (0..=self.degree)
            .map(|r| self.coefficients[interval + r] * basis[r])
            .sum()
    }

    /// Time derivative of the spline at `t`; `t` is clamped into the domain.
    #[must_use]
    pub fn derivative(&self, t: Scalar) -> R3 {
        if self.degree == 0 {
            return R3::zeros();
        }
        let (interval, u) = locate(self.start, self.step, self.intervals, t);
        let mut basis = [0.0; MAX_DEGREE + 1];
        local_basis(u, self.degree - 1, &mut basis);
        (0..self.degree)
            .map(|r| {
                let k = interval + r + 1;
                (self.coefficients[k] - self.coefficients[k - 1]) * basis[r]
            })
            .sum::<R3>()
            / self.step
    }
}

/// Maps `t` to an interval index and local coordinate, clamping into the domain.
fn locate(start: Scalar, step: Scalar, intervals: usize, t: Scalar) -> (usize, Scalar) {
    let x = ((t - start) / step).clamp(0.0, intervals as Scalar);
    let interval = (x.floor() as usize).min(intervals - 1);
    (interval, x - interval as Scalar)
}

/// Symmetric positive-definite band matrix with Cholesky solve.
#[derive(Debug, Clone)]
struct BandedSpd {
    size: usize,
    bandwidth: usize,
    /// `band[i * (bandwidth + 1) + d]` holds element `(i, i − d)`.
    band: Vec<Scalar>,
}

impl BandedSpd {
    fn zeros(size: usize, bandwidth: usize) -> Self {
        Self {
            size,
            bandwidth,
            band: vec![0.0; size * (bandwidth + 1)],
        }
    }

    fn index(&self, i: usize, j: usize) -> usize {
        i * (self.bandwidth + 1) + (i - j)
    }

    /// Adds `value` to element `(i, j)` with `j ≤ i`.
    fn add(&mut self, i: usize, j: usize, value: Scalar) {
        let k = self.index(i, j);
        self.band[k] += value;
    }

    fn get(&self, i: usize, j: usize) -> Scalar {
        self.band[self.index(i, j)]
    }

    fn regularize(&mut self, relative: Scalar) {
        let max_diag = (0..self.size).map(|i| self.get(i, i)).fold(0.0, Scalar::max);
        for i in 0..self.size {
            self.add(i, i, relative * max_diag);
        }
    }

    /// Solves `G x = b` in place through the banded Cholesky factor.
    fn solve(mut self, mut rhs: Vec<R3>) -> Result<Vec<R3>, FieldError> {
        let n = self.size;
        let p = self.bandwidth;
        for j in 0..n {
            let first = j.saturating_sub(p);
            let mut diag = self.get(j, j);
            for k in first..j {
                diag -= self.get(j, k).powi(2);
            }
            if !(diag > 0.0) {
                return Err(FieldError::Domain(format!(
                    "spline normal equations are singular at row {j}"
                )));
            }
            let diag = diag.sqrt();
            let idx = self.index(j, j);
            self.band[idx] = diag;
            for i in j + 1..(j + p + 1).min(n) {
                let mut s = self.get(i, j);
                for k in i.saturating_sub(p)..j {
                    s -= self.get(i, k) * self.get(j, k);
                }
                let idx = self.index(i, j);
                self.band[idx] = s / diag;
            }
        }

        // L y = b
        for i in 0..n {
            let mut s = rhs[i];
            for k in i.saturating_sub(p)..i {
                s -= rhs[k] * self.get(i, k);
            }
            rhs[i] = s / self.get(i, i);
        }
        // Lᵀ x = y
        for i in (0..n).rev() {
            let mut s = rhs[i];
            for k in i + 1..(i + p + 1).min(n) {
                s -= rhs[k] * self.get(k, i);
            }
            rhs[i] = s / self.get(i, i);
        }
        Ok(rhs)
    }
}
