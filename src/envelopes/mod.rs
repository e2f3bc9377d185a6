//! Vector-potential envelopes.
//!
//! An envelope is a real shape function multiplying the carrier. All
//! envelopes here are compactly supported; outside [`Envelope::span`] both
//! value and derivative are zero.

mod cos2;
mod gaussian;
mod trapezoidal;

use std::fmt::Debug;
use std::sync::Arc;

pub use cos2::Cos2;
pub use gaussian::{Gaussian, TruncatedGaussian};
pub use trapezoidal::Trapezoidal;

use crate::errors::FieldError;
use crate::fields::{Continuity, Span};
use crate::math::{CScalar, Scalar};
use crate::params::{choose, Param, ParameterSet};

/// Shared handle to an envelope.
pub type EnvelopeRef = Arc<dyn Envelope>;

/// Shape function of the vector potential.
pub trait Envelope: Debug + Send + Sync {
    /// Envelope value at `t`.
    fn value(&self, t: Scalar) -> Scalar;

    /// Time derivative at `t`.
    fn derivative(&self, t: Scalar) -> Scalar;

    /// Support of the envelope.
    fn span(&self) -> Span;

    /// Smoothness class at the edges of the support.
    fn continuity(&self) -> Continuity;

    /// Closed-form Fourier transform `∫ e(t) e^{−iωt} dt`, if known.
    fn spectrum(&self, _omega: Scalar) -> Option<CScalar> {
        None
    }

    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;
}

/// Envelope kinds selectable through the `env` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnvelopeKind {
    Gauss,
    TruncGauss,
    Trapezoidal,
    Cos2,
}

const ENVELOPE_KINDS: &[(&str, EnvelopeKind)] = &[
    ("gauss", EnvelopeKind::Gauss),
    ("trunc_gauss", EnvelopeKind::TruncGauss),
    ("trapezoidal", EnvelopeKind::Trapezoidal),
    ("cos²", EnvelopeKind::Cos2),
    ("cos2", EnvelopeKind::Cos2),
];

/// Builds the envelope selected by `env` (Gaussian by default) from a resolved parameter set.
pub fn make_envelope(params: &ParameterSet) -> Result<EnvelopeRef, FieldError> {
    let kind = params
        .symbol(Param::Envelope)
        .map_or(Ok(EnvelopeKind::Gauss), |name| choose("envelope", name, ENVELOPE_KINDS))?;
    let envelope: EnvelopeRef = match kind {
        EnvelopeKind::Gauss => Arc::new(Gaussian::from_params(params)?),
        EnvelopeKind::TruncGauss => Arc::new(TruncatedGaussian::from_params(params)?),
        EnvelopeKind::Trapezoidal => Arc::new(Trapezoidal::from_params(params)?),
        EnvelopeKind::Cos2 => Arc::new(Cos2::from_params(params)?),
    };
    log::debug!("built {} envelope on {}", envelope.name(), envelope.span());
    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::UnitTable;

    fn base() -> ParameterSet {
        ParameterSet::new()
            .with(Param::Period, 110.0)
            .with(Param::Intensity, 0.01)
    }

    #[test]
    fn defaults_to_gaussian() {
        let params = base()
            .with(Param::Tau, 200.0)
            .with(Param::SigmaMax, 6.0)
            .resolve(&UnitTable::default())
            .unwrap();
        assert_eq!(make_envelope(&params).unwrap().name(), "gauss");
    }

    #[test]
    fn selects_by_name() {
        let params = base()
            .with(Param::Envelope, "cos²")
            .with(Param::Cycles, 4.0)
            .resolve(&UnitTable::default())
            .unwrap();
        assert_eq!(make_envelope(&params).unwrap().name(), "cos²");
    }

    #[test]
    fn unknown_envelope_lists_choices() {
        let params = base().with(Param::Envelope, "lorentz").resolve(&UnitTable::default()).unwrap();
        let message = make_envelope(&params).unwrap_err().to_string();
        assert!(message.contains("trunc_gauss"), "{message}");
    }
}
