//! Sum of two fields.

use crate::errors::FieldError;
use crate::fields::{Continuity, Field, FieldRef, Polarization, Span};
use crate::math::{Scalar, R3};
use crate::params::Param;

/// Componentwise sum `A = A₁ + A₂` of two fields of equal dimension.
#[derive(Debug, Clone)]
pub struct SumField {
    a: FieldRef,
    b: FieldRef,
}

impl SumField {
    /// Adds `a` and `b`.
    pub fn new(a: FieldRef, b: FieldRef) -> Result<Self, FieldError> {
        if a.dimensions() != b.dimensions() {
            return Err(FieldError::IncompatibleFields(format!(
                "cannot add a {}-dimensional field to a {}-dimensional one",
                b.dimensions(),
                a.dimensions()
            )));
        }
        Ok(Self { a, b })
    }

    /// The two addends.
    #[must_use]
    pub const fn addends(&self) -> (&FieldRef, &FieldRef) {
        (&self.a, &self.b)
    }
}

impl Field for SumField {
    fn vector_potential_at_phase(&self, t: Scalar, shift: Scalar) -> R3 {
        self.a.vector_potential_at_phase(t, shift) + self.b.vector_potential_at_phase(t, shift)
    }

    fn field_amplitude_at_phase(&self, t: Scalar, shift: Scalar) -> R3 {
        self.a.field_amplitude_at_phase(t, shift) + self.b.field_amplitude_at_phase(t, shift)
    }

    fn span(&self) -> Span {
        self.a.span().union(&self.b.span())
    }

    fn dimensions(&self) -> usize {
        self.a.dimensions()
    }

    fn polarization(&self) -> Polarization {
        let linear = |f: &FieldRef| f.polarization() == Polarization::Linear && f.dimensions() == 1;
        if linear(&self.a) && linear(&self.b) {
            Polarization::Linear
        } else {
            Polarization::Arbitrary
        }
    }

    fn continuity(&self) -> Continuity {
        self.a.continuity().min(self.b.continuity())
    }

    /// Defined only where both addends agree exactly; conflicting values are incompatible.
    fn quantity(&self, quantity: Param) -> Result<Scalar, FieldError> {
        match (self.a.quantity(quantity), self.b.quantity(quantity)) {
            (Ok(x), Ok(y)) if x == y => Ok(x),
            (Ok(x), Ok(y)) => Err(FieldError::IncompatibleFields(format!(
                "addends disagree on {quantity}: {x:e} and {y:e}"
            ))),
            (Err(e), _) | (_, Err(e)) => Err(e),
        }
    }

    fn max_frequency(&self) -> Scalar {
        self.a.max_frequency().max(self.b.max_frequency())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::fields::{gaussian_pulse, parse_field};
    use crate::units::UnitTable;

    #[test]
    fn sum_adds_componentwise_over_the_union() {
        let a: FieldRef = gaussian_pulse(0.057, 0.01, 200.0, 6.0, 0.0).unwrap();
        let b: FieldRef = gaussian_pulse(0.114, 0.02, 100.0, 6.0, 0.5).unwrap();
        let sum = SumField::new(a.clone(), b.clone()).unwrap();
        for &t in &[-100.0, 3.0, 250.0] {
            assert_eq!(sum.vector_potential(t), a.vector_potential(t) + b.vector_potential(t));
            assert_eq!(sum.field_amplitude(t), a.field_amplitude(t) + b.field_amplitude(t));
        }
        assert_eq!(sum.span(), a.span().union(&b.span()));
        assert_eq!(sum.polarization(), Polarization::Linear);
        assert_relative_eq!(sum.max_frequency(), 0.114);
        assert!(matches!(sum.wavelength(), Err(FieldError::IncompatibleFields(_))));
        assert!(matches!(sum.angular_frequency(), Err(FieldError::IncompatibleFields(_))));
        assert_relative_eq!(sum.quantity(Param::SigmaMax).unwrap(), 6.0);
    }

    #[test]
    fn mismatched_dimensions_are_incompatible() {
        let a: FieldRef = gaussian_pulse(0.057, 0.01, 200.0, 6.0, 0.0).unwrap();
        let b = parse_field("kind = transverse; ω = 0.057; E0 = 0.05; τ = 200; Tmax = 4; ξ = 1", &UnitTable::default())
            .unwrap();
        assert!(matches!(SumField::new(a, b), Err(FieldError::IncompatibleFields(_))));
    }

    #[test]
    fn quantity_missing_from_an_addend_is_undefined() {
        let units = UnitTable::default();
        let pulse: FieldRef = gaussian_pulse(0.057, 0.01, 200.0, 6.0, 0.0).unwrap();
        let constant = parse_field("kind = constant; E0 = 0.01; tmax = 100", &units).unwrap();
        let sum = SumField::new(pulse, constant).unwrap();
        assert!(matches!(
            sum.angular_frequency(),
            Err(FieldError::UndefinedQuantity {
                quantity: Param::AngularFrequency
            })
        ));
    }

    #[test]
    fn transverse_sum_is_arbitrary() {
        let units = UnitTable::default();
        let a = parse_field("kind = transverse; ω = 0.057; E0 = 0.05; τ = 200; Tmax = 4", &units).unwrap();
        let b = parse_field("kind = transverse; ω = 0.057; E0 = 0.05; τ = 200; Tmax = 4", &units).unwrap();
        let sum = SumField::new(a, b).unwrap();
        assert_eq!(sum.dimensions(), 3);
        assert_eq!(sum.polarization(), Polarization::Arbitrary);
        assert_relative_eq!(sum.angular_frequency().unwrap(), 0.057);
    }
}
