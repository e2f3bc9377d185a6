//! Gaussian and truncated Gaussian envelopes.
//!
//! The vector potential envelope is `exp(−αt²)`. τ is the FWHM of the
//! cycle-peak *intensity*, so α is not simply `2 ln 2/τ²`: the field is the
//! time derivative of the vector potential and its cycle-peak intensity is
//! `exp(−2αt²)(ω² + 4α²t²)`. With `x = ατ²/2` the half-maximum condition at
//! `t = τ/2` reads `x − ln(1 + 4x²/(ωτ)²) = ln 2`.

use std::f64::consts::{FRAC_PI_2, LN_2, PI};

use crate::errors::FieldError;
use crate::fields::{Continuity, Span};
use crate::math::roots::{brent, expand_upper_bracket, RootOptions};
use crate::math::{CScalar, Scalar};
use crate::params::{Param, ParameterSet};

use super::Envelope;

/// Ratio between the intensity FWHM τ and the standard deviation σ.
pub(crate) fn fwhm_per_sigma() -> Scalar {
    2.0 * (2.0 * LN_2).sqrt()
}

/// Solves for the Gaussian exponent α given the intensity FWHM τ and angular frequency ω.
pub fn gaussian_exponent(tau: Scalar, omega: Scalar) -> Result<Scalar, FieldError> {
    if !(tau > 0.0 && omega > 0.0) {
        return Err(FieldError::Domain(format!(
            "Gaussian duration and frequency must be positive (τ = {tau:e}, ω = {omega:e})"
        )));
    }
    let wt2 = (omega * tau).powi(2);
    let residual = |x: Scalar| x - (1.0 + 4.0 * x * x / wt2).ln() - LN_2;
    let (lo, hi) = expand_upper_bracket(residual, LN_2, 2.0 * LN_2, 2.0, 64)?;
    let x = brent(residual, lo, hi, RootOptions::default())?;
    let alpha = 2.0 * x / (tau * tau);
    log::debug!("Gaussian exponent α = {alpha:e} for ωτ = {:.4}", omega * tau);
    Ok(alpha)
}

/// Rounds a support half-width up to a whole number of periods.
fn whole_cycles(tmax: Scalar, period: Scalar) -> Scalar {
    (tmax / period - 1.0e-9).ceil().max(1.0) * period
}

/// Reads τ (or σ) and the support half-width from a resolved parameter set.
fn durations(params: &ParameterSet) -> Result<(Scalar, Scalar, Scalar), FieldError> {
    let period = params.require(Param::Period)?;
    let tau = match params.exactly_one_of("pulse duration", &[Param::Tau, Param::Sigma])? {
        Param::Tau => params.require(Param::Tau)?,
        _ => fwhm_per_sigma() * params.require(Param::Sigma)?,
    };
    let tmax = match params.exactly_one_of(
        "support width",
        &[Param::SigmaMax, Param::Tmax, Param::CyclesMax],
    )? {
        Param::SigmaMax => params.require(Param::SigmaMax)? * tau / fwhm_per_sigma(),
        Param::Tmax => params.require(Param::Tmax)?,
        _ => params.require(Param::CyclesMax)? * period,
    };
    if !(tmax > 0.0) {
        return Err(FieldError::config(format!("support half-width must be positive, got {tmax:e}")));
    }
    Ok((period, tau, whole_cycles(tmax, period)))
}

/// Gaussian envelope `exp(−αt²)` on `[−tmax, tmax]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Gaussian {
    tau: Scalar,
    alpha: Scalar,
    tmax: Scalar,
}

impl Gaussian {
    /// Creates a Gaussian with intensity FWHM `tau` for a carrier of angular frequency `omega`.
    ///
    /// `tmax` is used as given.
    pub fn new(tau: Scalar, omega: Scalar, tmax: Scalar) -> Result<Self, FieldError> {
        Ok(Self {
            tau,
            alpha: gaussian_exponent(tau, omega)?,
            tmax,
        })
    }

    /// Builds from `T`, one of `τ|σ` and one of `σmax|tmax|Tmax`.
    pub fn from_params(params: &ParameterSet) -> Result<Self, FieldError> {
        let (period, tau, tmax) = durations(params)?;
        Self::new(tau, 2.0 * PI / period, tmax)
    }

    /// Exponent α.
    #[must_use]
    pub const fn alpha(&self) -> Scalar {
        self.alpha
    }

    /// Intensity FWHM τ.
    #[must_use]
    pub const fn tau(&self) -> Scalar {
        self.tau
    }

    /// Support half-width.
    #[must_use]
    pub const fn tmax(&self) -> Scalar {
        self.tmax
    }
}

impl Envelope for Gaussian {
    fn value(&self, t: Scalar) -> Scalar {
        if t.abs() > self.tmax {
            0.0
        } else {
            (-self.alpha * t * t).exp()
        }
    }

    fn derivative(&self, t: Scalar) -> Scalar {
        if t.abs() > self.tmax {
            0.0
        } else {
            -2.0 * self.alpha * t * (-self.alpha * t * t).exp()
        }
    }

    fn span(&self) -> Span {
        Span::new(-self.tmax, self.tmax)
    }

    fn continuity(&self) -> Continuity {
        Continuity::Infinite
    }

    fn spectrum(&self, omega: Scalar) -> Option<CScalar> {
        let a = self.alpha;
        Some(CScalar::new((PI / a).sqrt() * (-omega * omega / (4.0 * a)).exp(), 0.0))
    }

    fn name(&self) -> &'static str {
        "gauss"
    }
}

/// Gaussian whose tails beyond `toff` are compressed onto `[toff, tmax]`, reaching zero at `tmax`.
#[derive(Debug, Clone, PartialEq)]
pub struct TruncatedGaussian {
    gaussian: Gaussian,
    toff: Scalar,
}

impl TruncatedGaussian {
    /// Wraps a Gaussian; requires `0 ≤ toff < tmax`.
    pub fn new(gaussian: Gaussian, toff: Scalar) -> Result<Self, FieldError> {
        if !(toff >= 0.0 && toff < gaussian.tmax) {
            return Err(FieldError::config(format!(
                "truncation onset toff = {toff:e} must lie in [0, tmax = {:e})",
                gaussian.tmax
            )));
        }
        Ok(Self { gaussian, toff })
    }

    /// Builds from the Gaussian parameters plus `toff`.
    pub fn from_params(params: &ParameterSet) -> Result<Self, FieldError> {
        let toff = params.require(Param::Toff)?;
        Self::new(Gaussian::from_params(params)?, toff)
    }

    /// Maps `|t|` beyond `toff` to the warped time and its derivative `du/d|t|`.
    fn warp(&self, t: Scalar) -> Option<(Scalar, Scalar)> {
        let a = t.abs();
        if a <= self.toff {
            return Some((a, 1.0));
        }
        let width = self.gaussian.tmax - self.toff;
        let s = (a - self.toff) / width;
        if s >= 1.0 {
            return None;
        }
        let angle = FRAC_PI_2 * s;
        let u = self.toff + width * angle.tan() / FRAC_PI_2;
        Some((u, 1.0 / angle.cos().powi(2)))
    }
}

impl Envelope for TruncatedGaussian {
    fn value(&self, t: Scalar) -> Scalar {
        self.warp(t)
            .map_or(0.0, |(u, _)| (-self.gaussian.alpha * u * u).exp())
    }

    fn derivative(&self, t: Scalar) -> Scalar {
        let alpha = self.gaussian.alpha;
        self.warp(t).map_or(0.0, |(u, du)| {
            let g = (-alpha * u * u).exp();
            if g == 0.0 {
                0.0
            } else {
                -2.0 * alpha * u * du * g * t.signum()
            }
        })
    }

    fn span(&self) -> Span {
        self.gaussian.span()
    }

    fn continuity(&self) -> Continuity {
        Continuity::Finite(0)
    }

    fn name(&self) -> &'static str {
        "trunc_gauss"
    }
}
