//! Sampling, transfer and discovery of the time span of a dispersed field.

use crate::errors::FieldError;
use crate::fields::{Field, Span};
use crate::math::{relative_l2_distance, CScalar, Scalar, C3, R3};
use crate::spectra::{rfft_frequencies, RealFft};

use super::{DispersionOptions, DispersiveElement};

/// Dispersed vector potential on a uniform grid.
///
/// `quadrature` is the same signal with every spectral component advanced
/// by a quarter cycle, so `cos δ · in_phase + sin δ · quadrature` is the
/// field with its carrier phase shifted by `δ`.
#[derive(Debug, Clone)]
pub struct SampledDispersion {
    /// Time of the first sample.
    pub start: Scalar,
    /// Sample spacing.
    pub dt: Scalar,
    /// Dispersed vector potential.
    pub in_phase: Vec<R3>,
    /// Quadrature copy of the dispersed vector potential.
    pub quadrature: Vec<R3>,
    /// Growth steps taken by the span search.
    pub iterations: usize,
    /// False if the search stopped at the iteration limit.
    pub converged: bool,
}

impl SampledDispersion {
    /// Interval covered by the samples.
    #[must_use]
    pub fn span(&self) -> Span {
        Span::new(self.start, self.time(self.in_phase.len().saturating_sub(1)))
    }

    /// Time of sample `k`.
    #[must_use]
    pub fn time(&self, k: usize) -> Scalar {
        self.start + self.dt * k as Scalar
    }

    /// Sample times.
    #[must_use]
    pub fn times(&self) -> Vec<Scalar> {
        (0..self.in_phase.len()).map(|k| self.time(k)).collect()
    }

    /// Drops the leading and trailing samples whose magnitude stays below
    /// `cutoff` times the peak, never cutting into `keep`.
    #[must_use]
    pub fn truncated(mut self, cutoff: Scalar, keep: Span) -> Self {
        let magnitude: Vec<Scalar> = self
            .in_phase
            .iter()
            .zip(&self.quadrature)
            .map(|(i, q)| (i.norm_squared() + q.norm_squared()).sqrt())
            .collect();
        let peak = magnitude.iter().copied().fold(0.0, Scalar::max);
        let index = |t: Scalar| ((t - self.start) / self.dt).round().max(0.0) as usize;
        let last_index = magnitude.len().saturating_sub(1);
        let (mut first, mut last) = (index(keep.start).min(last_index), index(keep.end).min(last_index));
        if peak > 0.0 {
            let threshold = cutoff * peak;
            if let Some(k) = magnitude.iter().position(|&m| m > threshold) {
                first = first.min(k);
            }
            if let Some(k) = magnitude.iter().rposition(|&m| m > threshold) {
                last = last.max(k);
            }
        }
        self.start = self.time(first);
        self.in_phase = self.in_phase[first..=last].to_vec();
        self.quadrature = self.quadrature[first..=last].to_vec();
        self
    }
}

/// Applies `element` to vector samples spaced by `dt`.
///
/// Returns the in-phase and quadrature signals.
#[must_use]
pub fn disperse_samples(samples: &[R3], dt: Scalar, element: &dyn DispersiveElement) -> (Vec<R3>, Vec<R3>) {
    let n = samples.len();
    let fft = RealFft::new(n);
    let mut spectrum = fft.forward_vectors(samples);
    for (value, omega) in spectrum.iter_mut().zip(rfft_frequencies(n, dt)) {
        *value = element.transfer(omega).apply(*value);
    }
    let quadrature: Vec<C3> = spectrum
        .iter()
        .enumerate()
        .map(|(k, &value)| {
            if k == 0 || 2 * k == n {
                C3::zeros()
            } else {
                value * CScalar::i()
            }
        })
        .collect();
    (fft.inverse_vectors(&spectrum), fft.inverse_vectors(&quadrature))
}

/// Finds a sampling window long enough to hold the dispersed field.
///
/// Starting from the field's own span, the window is grown symmetrically by
/// `options.growth` until the dispersed signal on the previous window changes
/// by less than `options.tolerance` (relative L2). The grid stays anchored to
/// the start of the original span so that successive windows share samples.
/// If the iteration limit is reached a warning is logged and the last window
/// is kept.
pub fn find_time_span(
    field: &dyn Field,
    element: &dyn DispersiveElement,
    options: &DispersionOptions,
) -> Result<SampledDispersion, FieldError> {
    options.validate()?;
    let span = field.span();
    if !span.duration().is_finite() {
        return Err(FieldError::Domain(format!("cannot disperse a field on {span}")));
    }
    let dt = options.sampling_step(field.max_frequency())?;
    let base = (span.duration() / dt).ceil() as usize + 1;

    let mut previous: Option<(usize, Vec<R3>)> = None;
    let mut scale = 1.0;
    let mut iteration = 0;
    loop {
        let pad = ((scale - 1.0) * base as Scalar / 2.0).ceil() as usize;
        let start = span.start - dt * pad as Scalar;
        let samples: Vec<R3> = (0..base + 2 * pad)
            .map(|k| field.vector_potential(start + dt * k as Scalar))
            .collect();
        let (in_phase, quadrature) = disperse_samples(&samples, dt, element);

        let change = previous.as_ref().map(|(old_pad, old)| {
            let offset = pad - old_pad;
            relative_l2_distance(old, &in_phase[offset..offset + old.len()])
        });
        log::debug!(
            "span search iteration {iteration}: [{start:.6e}, {:.6e}] with {} samples, change {change:?}",
            start + dt * (samples.len() - 1) as Scalar,
            samples.len()
        );
        let converged = change.is_some_and(|c| c < options.tolerance);
        if converged || iteration == options.max_iterations {
            if !converged {
                log::warn!(
                    "dispersed field did not converge after {iteration} span iterations (last change {change:?}); keeping the last span"
                );
            }
            return Ok(SampledDispersion {
                start,
                dt,
                in_phase,
                quadrature,
                iterations: iteration,
                converged,
            });
        }
        previous = Some((pad, in_phase));
        scale *= options.growth;
        iteration += 1;
    }
}
