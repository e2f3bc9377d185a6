//! Frequency grids, normalized Fourier transforms and field spectra.
//!
//! Transforms are normalized so that the forward transform of samples
//! `x(t₀ + n·dt)` approximates `∫ x(t) e^{−iω(t − t₀)} dt` on the grid
//! returned by [`rfft_frequencies`]. Spectra of fields can be re-referenced
//! to `t = 0` with [`Spectrum::at_origin`].

use std::f64::consts::TAU;
use std::fmt;
use std::sync::Arc;

use rustfft::{Fft, FftPlanner};

use crate::errors::FieldError;
use crate::fields::{time_axis, Field};
use crate::math::{CScalar, Scalar, C3, R3};

/// Generates `n` linearly spaced samples in [start, stop].
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n).map(|i| start + step * i as Scalar).collect()
        }
    }
}

/// Angular frequencies of the `n/2 + 1` bins of a real transform with spacing `dt`.
#[must_use]
pub fn rfft_frequencies(n: usize, dt: Scalar) -> Vec<Scalar> {
    let dw = TAU / (n as Scalar * dt);
    (0..=n / 2).map(|k| dw * k as Scalar).collect()
}

/// Angular frequencies of the `n` bins of a complex transform, in FFT order.
#[must_use]
pub fn fft_frequencies(n: usize, dt: Scalar) -> Vec<Scalar> {
    let dw = TAU / (n as Scalar * dt);
    let positive = (n + 1) / 2;
    (0..n)
        .map(|k| {
            if k < positive {
                dw * k as Scalar
            } else {
                dw * (k as Scalar - n as Scalar)
            }
        })
        .collect()
}

/// Planned real-to-complex transform of a fixed length.
///
/// Unnormalized: `inverse(forward(x)) = x`.
#[derive(Clone)]
pub struct RealFft {
    len: usize,
    forward: Arc<dyn Fft<Scalar>>,
    inverse: Arc<dyn Fft<Scalar>>,
}

impl fmt::Debug for RealFft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RealFft").field("len", &self.len).finish()
    }
}

impl RealFft {
    /// Plans transforms of length `len`.
    #[must_use]
    pub fn new(len: usize) -> Self {
        let mut planner = FftPlanner::<Scalar>::new();
        Self {
            len,
            forward: planner.plan_fft_forward(len),
            inverse: planner.plan_fft_inverse(len),
        }
    }

    /// Transform length.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True for the zero-length transform.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of non-negative frequency bins.
    #[must_use]
    pub const fn bins(&self) -> usize {
        self.len / 2 + 1
    }

    /// Non-negative frequency half of the DFT `Σ xₙ e^{−2πikn/N}`.
    #[must_use]
    pub fn forward(&self, samples: &[Scalar]) -> Vec<CScalar> {
        debug_assert_eq!(samples.len(), self.len);
        let mut buffer: Vec<CScalar> = samples.iter().map(|&x| CScalar::new(x, 0.0)).collect();
        self.forward.process(&mut buffer);
        buffer.truncate(self.bins());
        buffer
    }

    /// Inverse of [`forward`](Self::forward), completing the spectrum by Hermitian symmetry.
    ///
    /// Imaginary parts of the DC and (even length) Nyquist bins are ignored.
    #[must_use]
    pub fn inverse(&self, spectrum: &[CScalar]) -> Vec<Scalar> {
        debug_assert_eq!(spectrum.len(), self.bins());
        let n = self.len;
        let mut buffer = vec![CScalar::new(0.0, 0.0); n];
        buffer[0] = CScalar::new(spectrum[0].re, 0.0);
        for k in 1..spectrum.len() {
            if 2 * k == n {
                buffer[k] = CScalar::new(spectrum[k].re, 0.0);
            } else {
                buffer[k] = spectrum[k];
                buffer[n - k] = spectrum[k].conj();
            }
        }
        self.inverse.process(&mut buffer);
        let scale = 1.0 / n as Scalar;
        buffer.iter().map(|z| z.re * scale).collect()
    }

    /// Componentwise [`forward`](Self::forward) of vector samples; vanishing components are skipped.
    #[must_use]
    pub fn forward_vectors(&self, samples: &[R3]) -> Vec<C3> {
        let mut spectrum = vec![C3::zeros(); self.bins()];
        for axis in 0..3 {
            let component: Vec<Scalar> = samples.iter().map(|v| v[axis]).collect();
            if component.iter().all(|x| *x == 0.0) {
                continue;
            }
            for (value, z) in spectrum.iter_mut().zip(self.forward(&component)) {
                value[axis] = z;
            }
        }
        spectrum
    }

    /// Componentwise [`inverse`](Self::inverse) of a vector spectrum.
    #[must_use]
    pub fn inverse_vectors(&self, spectrum: &[C3]) -> Vec<R3> {
        let mut samples = vec![R3::zeros(); self.len];
        for axis in 0..3 {
            let component: Vec<CScalar> = spectrum.iter().map(|v| v[axis]).collect();
            if component.iter().all(|z| z.norm_sqr() == 0.0) {
                continue;
            }
            for (value, x) in samples.iter_mut().zip(self.inverse(&component)) {
                value[axis] = x;
            }
        }
        samples
    }
}

/// Approximates `∫ x(t) e^{−iω(t − t₀)} dt` from samples spaced by `dt` starting at `t₀`.
#[must_use]
pub fn forward_transform(samples: &[Scalar], dt: Scalar) -> Vec<CScalar> {
    RealFft::new(samples.len())
        .forward(samples)
        .into_iter()
        .map(|z| z * dt)
        .collect()
}

/// Inverse of [`forward_transform`] for `n` samples spaced by `dt`.
#[must_use]
pub fn inverse_transform(spectrum: &[CScalar], n: usize, dt: Scalar) -> Vec<Scalar> {
    RealFft::new(n)
        .inverse(spectrum)
        .into_iter()
        .map(|x| x / dt)
        .collect()
}

/// Spectrum of a sampled vector signal.
#[derive(Debug, Clone)]
pub struct Spectrum {
    /// Angular frequencies of the bins.
    pub frequencies: Vec<Scalar>,
    /// Complex amplitudes per bin.
    pub values: Vec<C3>,
    /// Time the phases are referenced to.
    pub time_origin: Scalar,
}

impl Spectrum {
    /// Transforms vector samples taken every `dt` from `start`.
    #[must_use]
    pub fn from_samples(samples: &[R3], start: Scalar, dt: Scalar) -> Self {
        let values = RealFft::new(samples.len())
            .forward_vectors(samples)
            .into_iter()
            .map(|v| v * CScalar::new(dt, 0.0))
            .collect();
        Self {
            frequencies: rfft_frequencies(samples.len(), dt),
            values,
            time_origin: start,
        }
    }

    /// Same spectrum with phases referenced to `t = 0`.
    #[must_use]
    pub fn at_origin(mut self) -> Self {
        let t0 = self.time_origin;
        for (value, &omega) in self.values.iter_mut().zip(&self.frequencies) {
            *value *= CScalar::from_polar(1.0, -omega * t0);
        }
        self.time_origin = 0.0;
        self
    }

    /// `|X(ω)|²` summed over components.
    #[must_use]
    pub fn power(&self) -> Vec<Scalar> {
        self.values
            .iter()
            .map(|v| v.iter().map(|z| z.norm_sqr()).sum())
            .collect()
    }
}

fn sampled_spectrum<F>(field: &dyn Field, fs: Option<Scalar>, sample: F) -> Result<Spectrum, FieldError>
where
    F: Fn(Scalar) -> R3,
{
    let times = time_axis(field, fs)?;
    if times.len() < 2 {
        return Err(FieldError::Domain("cannot transform fewer than two samples".into()));
    }
    let dt = times[1] - times[0];
    let samples: Vec<R3> = times.iter().map(|&t| sample(t)).collect();
    Ok(Spectrum::from_samples(&samples, times[0], dt))
}

/// Spectrum of the vector potential sampled over the field's span.
pub fn vector_potential_spectrum(field: &dyn Field, fs: Option<Scalar>) -> Result<Spectrum, FieldError> {
    sampled_spectrum(field, fs, |t| field.vector_potential(t))
}

/// Spectrum of the electric field sampled over the field's span.
pub fn field_amplitude_spectrum(field: &dyn Field, fs: Option<Scalar>) -> Result<Spectrum, FieldError> {
    sampled_spectrum(field, fs, |t| field.field_amplitude(t))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::fields::gaussian_pulse;

    #[test]
    fn linspace_basic() {
        let v = linspace(0.0, 1.0, 5);
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn frequency_grids() {
        let r = rfft_frequencies(8, 0.5);
        assert_eq!(r.len(), 5);
        assert_relative_eq!(r[1], TAU / 4.0);
        let f = fft_frequencies(5, 1.0);
        assert_relative_eq!(f[2], 2.0 * TAU / 5.0);
        assert_relative_eq!(f[3], -2.0 * TAU / 5.0);
    }

    #[test]
    fn real_transform_inverts_for_odd_and_even_lengths() {
        for n in [16, 17] {
            let x: Vec<Scalar> = (0..n).map(|i| (0.3 * i as Scalar).sin() + 0.1 * i as Scalar).collect();
            let fft = RealFft::new(n);
            let back = fft.inverse(&fft.forward(&x));
            for (a, b) in x.iter().zip(&back) {
                assert_relative_eq!(a, b, epsilon = 1.0e-12);
            }
        }
    }

    #[test]
    fn normalized_transform_of_gaussian() {
        let dt = 0.05;
        let n = 2000;
        let start = -50.0;
        let x: Vec<Scalar> = (0..n).map(|i| (-(start + dt * i as Scalar).powi(2)).exp()).collect();
        let spectrum = forward_transform(&x, dt);
        let omegas = rfft_frequencies(n, dt);
        for k in [0, 10, 40] {
            let w = omegas[k];
            let expected = Scalar::sqrt(std::f64::consts::PI) * (-w * w / 4.0).exp();
            // undo the phase reference at `start`
            let at_origin = spectrum[k] * CScalar::from_polar(1.0, -w * start);
            assert_relative_eq!(at_origin.re, expected, epsilon = 1.0e-10);
            assert_relative_eq!(at_origin.im, 0.0, epsilon = 1.0e-10);
        }
        let back = inverse_transform(&spectrum, n, dt);
        assert_relative_eq!(back[1000], 1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn sampled_spectrum_matches_closed_form() {
        let field = gaussian_pulse(0.057, 0.01, 300.0, 12.0, 0.3).unwrap();
        let spectrum = vector_potential_spectrum(field.as_ref(), Some(0.5)).unwrap().at_origin();
        let peak = spectrum.power().into_iter().fold(0.0, Scalar::max).sqrt();
        for (omega, value) in spectrum.frequencies.iter().zip(&spectrum.values).step_by(7).take(60) {
            let closed = field.analytic_vector_potential_spectrum(*omega).unwrap();
            assert_relative_eq!(value.z.re, closed.z.re, epsilon = 1.0e-6 * peak);
            assert_relative_eq!(value.z.im, closed.z.im, epsilon = 1.0e-6 * peak);
        }
    }
}
