//! Field algebra: sums, negation, delays, padding, windowing, apodization and dispersion.
//!
//! Combinators wrap their parents as [`FieldRef`]s and forward every derived
//! quantity to them unless they change it. [`FieldExt`] offers the algebra
//! as methods on shared fields:
//!
//! ```
//! use laser_fields::algebra::{Delay, FieldExt};
//! use laser_fields::fields::{gaussian_pulse, Field, FieldRef};
//!
//! let pump: FieldRef = gaussian_pulse(0.057, 0.01, 200.0, 6.0, 0.0).unwrap();
//! let probe = pump.delayed(Delay::Cycles(3.0)).unwrap();
//! let pair = pump.plus(&probe).unwrap();
//! assert!(pair.span().duration() > pump.span().duration());
//! ```

mod apodization;
mod sum;
mod wrappers;

use std::sync::Arc;

pub use apodization::{ApodizedField, Window};
pub use sum::SumField;
pub use wrappers::{Delay, DelayedField, NegatedField, PaddedField, WindowedField};

use crate::dispersion::{disperse, DispersionOptions, ElementRef};
use crate::errors::FieldError;
use crate::fields::FieldRef;
use crate::math::Scalar;

/// Algebra on shared fields.
pub trait FieldExt {
    /// `−A`.
    fn negated(&self) -> FieldRef;

    /// `A(t − t₀)`.
    fn delayed(&self, delay: Delay) -> Result<FieldRef, FieldError>;

    /// `A + B`; the dimensions must agree.
    fn plus(&self, other: &FieldRef) -> Result<FieldRef, FieldError>;

    /// `A − B`, the sum with the negated field.
    fn minus(&self, other: &FieldRef) -> Result<FieldRef, FieldError>;

    /// Span extended by non-negative `before` and `after`.
    fn padded(&self, before: Scalar, after: Scalar) -> Result<FieldRef, FieldError>;

    /// Restriction to `[a, b]`.
    fn windowed(&self, a: Scalar, b: Scalar) -> Result<FieldRef, FieldError>;

    /// Multiplication by `window` stretched over `[a, b]`.
    fn apodized(&self, window: Window, a: Scalar, b: Scalar) -> Result<FieldRef, FieldError>;

    /// Passage through a dispersive element.
    fn dispersed(&self, element: ElementRef, options: &DispersionOptions) -> Result<FieldRef, FieldError>;
}

impl FieldExt for FieldRef {
    fn negated(&self) -> FieldRef {
        Arc::new(NegatedField::new(self.clone()))
    }

    fn delayed(&self, delay: Delay) -> Result<FieldRef, FieldError> {
        Ok(Arc::new(DelayedField::new(self.clone(), delay)?))
    }

    fn plus(&self, other: &FieldRef) -> Result<FieldRef, FieldError> {
        Ok(Arc::new(SumField::new(self.clone(), other.clone())?))
    }

    fn minus(&self, other: &FieldRef) -> Result<FieldRef, FieldError> {
        self.plus(&other.negated())
    }

    fn padded(&self, before: Scalar, after: Scalar) -> Result<FieldRef, FieldError> {
        Ok(Arc::new(PaddedField::new(self.clone(), before, after)?))
    }

    fn windowed(&self, a: Scalar, b: Scalar) -> Result<FieldRef, FieldError> {
        Ok(Arc::new(WindowedField::new(self.clone(), a, b)?))
    }

    fn apodized(&self, window: Window, a: Scalar, b: Scalar) -> Result<FieldRef, FieldError> {
        Ok(Arc::new(ApodizedField::new(self.clone(), window, a, b)?))
    }

    fn dispersed(&self, element: ElementRef, options: &DispersionOptions) -> Result<FieldRef, FieldError> {
        disperse(self, element, options)
    }
}
