//! Convenience re-exports for building and manipulating laser fields.

pub use crate::algebra::{Delay, FieldExt, Window};
pub use crate::constants::*;
pub use crate::dispersion::{
    Cascade, Chirp, Crystal, DispersedField, DispersionOptions, DispersiveElement, ElementRef, IsotropicMedium,
    PhaseShift, Transfer,
};
pub use crate::dsl::parse_parameters;
pub use crate::errors::{FieldError, UnitError};
pub use crate::fields::{
    gaussian_pulse, make_field, parse_field, time_axis, Continuity, Field, FieldRef, Polarization, Span,
};
pub use crate::materials::{RefractiveIndex, Sellmeier};
pub use crate::math::{Scalar, R3};
pub use crate::params::{quantity, Param, ParameterSet};
pub use crate::spectra::{field_amplitude_spectrum, vector_potential_spectrum, Spectrum};
pub use crate::units::{Quantity, UnitTable};
