//! Single-parent combinators: negation, delay, padding and windowing.

use std::f64::consts::TAU;

use crate::errors::FieldError;
use crate::fields::{Field, FieldRef, Span};
use crate::math::{Scalar, R3};

/// A time delay, either absolute or relative to the field's period.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Delay {
    /// Delay in atomic units of time.
    Time(Scalar),
    /// Delay in carrier cycles.
    Cycles(Scalar),
    /// Delay by a carrier phase `φ`, i.e. `φ/2π` cycles.
    Phase(Scalar),
}

impl Delay {
    /// Delay in atomic time for `field`; relative delays need its period.
    pub fn time(self, field: &dyn Field) -> Result<Scalar, FieldError> {
        let t0 = match self {
            Self::Time(t0) => t0,
            Self::Cycles(n) => n * field.period()?,
            Self::Phase(phi) => phi / TAU * field.period()?,
        };
        if t0.is_finite() {
            Ok(t0)
        } else {
            Err(FieldError::Domain(format!("delay {self:?} is not finite")))
        }
    }
}

/// The parent field with `A` and `F` negated.
#[derive(Debug, Clone)]
pub struct NegatedField {
    parent: FieldRef,
}

impl NegatedField {
    /// Negates `parent`.
    #[must_use]
    pub const fn new(parent: FieldRef) -> Self {
        Self { parent }
    }
}

impl Field for NegatedField {
    fn vector_potential_at_phase(&self, t: Scalar, shift: Scalar) -> R3 {
        -self.parent.vector_potential_at_phase(t, shift)
    }

    fn field_amplitude_at_phase(&self, t: Scalar, shift: Scalar) -> R3 {
        -self.parent.field_amplitude_at_phase(t, shift)
    }

    fn span(&self) -> Span {
        self.parent.span()
    }

    fn parent(&self) -> Option<&FieldRef> {
        Some(&self.parent)
    }
}

/// The parent field delayed by `t₀`: `A(t) = A_p(t − t₀)`.
#[derive(Debug, Clone)]
pub struct DelayedField {
    parent: FieldRef,
    delay: Scalar,
}

impl DelayedField {
    /// Delays `parent` by `delay`.
    pub fn new(parent: FieldRef, delay: Delay) -> Result<Self, FieldError> {
        let delay = delay.time(parent.as_ref())?;
        Ok(Self { parent, delay })
    }

    /// Delay in atomic time.
    #[must_use]
    pub const fn delay(&self) -> Scalar {
        self.delay
    }
}

impl Field for DelayedField {
    fn vector_potential_at_phase(&self, t: Scalar, shift: Scalar) -> R3 {
        self.parent.vector_potential_at_phase(t - self.delay, shift)
    }

    fn field_amplitude_at_phase(&self, t: Scalar, shift: Scalar) -> R3 {
        self.parent.field_amplitude_at_phase(t - self.delay, shift)
    }

    fn span(&self) -> Span {
        self.parent.span().shifted(self.delay)
    }

    fn parent(&self) -> Option<&FieldRef> {
        Some(&self.parent)
    }
}

/// The parent field on a longer span.
///
/// `A` holds its boundary values outside the original span and `F` is zero
/// there.
#[derive(Debug, Clone)]
pub struct PaddedField {
    parent: FieldRef,
    span: Span,
}

impl PaddedField {
    /// Extends the span by `before` and `after`, both non-negative.
    pub fn new(parent: FieldRef, before: Scalar, after: Scalar) -> Result<Self, FieldError> {
        let span = parent.span().padded(before, after)?;
        Ok(Self { parent, span })
    }
}

impl Field for PaddedField {
    fn vector_potential_at_phase(&self, t: Scalar, shift: Scalar) -> R3 {
        let inner = self.parent.span();
        self.parent.vector_potential_at_phase(inner.clamp(t), shift)
    }

    fn field_amplitude_at_phase(&self, t: Scalar, shift: Scalar) -> R3 {
        if self.parent.span().contains(t) {
            self.parent.field_amplitude_at_phase(t, shift)
        } else {
            R3::zeros()
        }
    }

    fn span(&self) -> Span {
        self.span
    }

    fn parent(&self) -> Option<&FieldRef> {
        Some(&self.parent)
    }
}

/// The parent field cut to `[a, b]`; `A` and `F` are zero outside the window.
///
/// The span is the part of the window covered by the parent's span.
#[derive(Debug, Clone)]
pub struct WindowedField {
    parent: FieldRef,
    window: Span,
    span: Span,
}

impl WindowedField {
    /// Restricts `parent` to `[a, b]`; the result must overlap the parent's span.
    pub fn new(parent: FieldRef, a: Scalar, b: Scalar) -> Result<Self, FieldError> {
        let window = Span::new(a, b);
        let span = parent.span().intersection(&window).ok_or_else(|| {
            FieldError::config(format!("window {window} does not overlap the field span {}", parent.span()))
        })?;
        Ok(Self { parent, window, span })
    }

    /// The window `[a, b]`.
    #[must_use]
    pub const fn window(&self) -> Span {
        self.window
    }
}

impl Field for WindowedField {
    fn vector_potential_at_phase(&self, t: Scalar, shift: Scalar) -> R3 {
        if self.window.contains(t) {
            self.parent.vector_potential_at_phase(t, shift)
        } else {
            R3::zeros()
        }
    }

    fn field_amplitude_at_phase(&self, t: Scalar, shift: Scalar) -> R3 {
        if self.window.contains(t) {
            self.parent.field_amplitude_at_phase(t, shift)
        } else {
            R3::zeros()
        }
    }

    fn span(&self) -> Span {
        self.span
    }

    fn parent(&self) -> Option<&FieldRef> {
        Some(&self.parent)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::fields::{gaussian_pulse, parse_field};
    use crate::units::UnitTable;

    fn pulse() -> FieldRef {
        gaussian_pulse(0.057, 0.01, 200.0, 6.0, 0.3).unwrap()
    }

    #[test]
    fn negation_flips_potential_and_field() {
        let field = pulse();
        let negated = NegatedField::new(field.clone());
        for &t in &[-90.0, 0.0, 33.0] {
            assert_eq!(negated.vector_potential(t), -field.vector_potential(t));
            assert_eq!(negated.field_amplitude(t), -field.field_amplitude(t));
        }
        assert_relative_eq!(negated.intensity(10.0), field.intensity(10.0), max_relative = 1.0e-12);
        assert_eq!(negated.amplitude().unwrap(), field.amplitude().unwrap());
    }

    #[test]
    fn delays_in_time_cycles_and_phase() {
        let field = pulse();
        let period = field.period().unwrap();
        let by_time = DelayedField::new(field.clone(), Delay::Time(50.0)).unwrap();
        assert_relative_eq!(by_time.span().start, field.span().start + 50.0);
        assert_eq!(by_time.vector_potential(70.0), field.vector_potential(20.0));
        let by_cycles = DelayedField::new(field.clone(), Delay::Cycles(2.0)).unwrap();
        assert_relative_eq!(by_cycles.delay(), 2.0 * period);
        let by_phase = DelayedField::new(field, Delay::Phase(std::f64::consts::PI)).unwrap();
        assert_relative_eq!(by_phase.delay(), 0.5 * period);
    }

    #[test]
    fn padding_extends_boundary_values() {
        let field = pulse();
        let padded = PaddedField::new(field.clone(), 100.0, 40.0).unwrap();
        let inner = field.span();
        assert_relative_eq!(padded.span().start, inner.start - 100.0);
        assert_relative_eq!(padded.span().end, inner.end + 40.0);
        assert_eq!(padded.vector_potential(inner.end + 20.0), field.vector_potential(inner.end));
        assert_eq!(padded.field_amplitude(inner.start - 1.0), R3::zeros());
        assert!(matches!(
            PaddedField::new(field, -1.0, 0.0),
            Err(FieldError::Configuration(_))
        ));
    }

    #[test]
    fn window_vanishes_outside_bounds() {
        let field = pulse();
        let windowed = WindowedField::new(field.clone(), -80.0, 120.0).unwrap();
        assert_eq!(windowed.span(), Span::new(-80.0, 120.0));
        for &t in &[-80.5, 121.0, 400.0] {
            assert_eq!(windowed.vector_potential(t), R3::zeros());
            assert_eq!(windowed.field_amplitude(t), R3::zeros());
            assert_eq!(windowed.intensity(t), 0.0);
        }
        assert_eq!(windowed.field_amplitude(10.0), field.field_amplitude(10.0));
        assert!(WindowedField::new(field, 1.0e4, 2.0e4).is_err());
    }

    #[test]
    fn window_keeps_potential_held_past_the_parent_span() {
        let step = parse_field("kind = constant; E0 = 1; tmax = 50", &UnitTable::default()).unwrap();
        let windowed = WindowedField::new(step.clone(), 0.0, 100.0).unwrap();
        assert_eq!(windowed.span(), Span::new(0.0, 50.0));
        assert_eq!(windowed.window(), Span::new(0.0, 100.0));
        assert_eq!(windowed.vector_potential(60.0), step.vector_potential(60.0));
        assert_relative_eq!(windowed.vector_potential(60.0).z, -50.0);
        assert_eq!(windowed.field_amplitude(60.0), R3::zeros());
        assert_eq!(windowed.vector_potential(100.5), R3::zeros());
        assert_eq!(windowed.vector_potential(-0.5), R3::zeros());
    }
}
