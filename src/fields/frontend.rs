//! Field creation from parameter sets and parameter blocks.

use std::sync::Arc;

use crate::dsl::parse_parameters;
use crate::errors::FieldError;
use crate::params::{FieldKind, ParameterSet};
use crate::units::UnitTable;

use super::{ConstantField, FieldRef, LinearField, Ramp, TransverseField};

/// Resolves `params` against `units` and builds the field selected by `kind`.
///
/// `kind` defaults to `linear`, the envelope to `gauss` and the carrier to
/// `fixed` (`elliptical` for transverse fields when ξ is given).
pub fn make_field(params: &ParameterSet, units: &UnitTable) -> Result<FieldRef, FieldError> {
    let resolved = params.resolve(units)?;
    let kind = FieldKind::of(&resolved)?;
    let field: FieldRef = match kind {
        FieldKind::Linear => Arc::new(LinearField::from_params(&resolved)?),
        FieldKind::Transverse => Arc::new(TransverseField::from_params(&resolved)?),
        FieldKind::Constant => Arc::new(ConstantField::from_params(&resolved)?),
        FieldKind::LinearRamp | FieldKind::ParabolicRamp | FieldKind::Sin2Ramp => {
            Arc::new(Ramp::from_params(&resolved)?)
        }
    };
    log::debug!("created {kind:?} field on {}", field.span());
    Ok(field)
}

/// Parses a parameter block and builds the field it describes.
pub fn parse_field(text: &str, units: &UnitTable) -> Result<FieldRef, FieldError> {
    make_field(&parse_parameters(text)?, units)
}
