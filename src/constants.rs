//! Physical constants and Hartree atomic-unit scales.
//!
//! All field computations run in atomic units (ħ = e = mₑ = 4πε₀ = 1). The
//! SI constants below are used only to convert user quantities into and out
//! of that system.
//!
//! ## Accuracy
//!
//! Constants marked "exact" have zero uncertainty by SI definition (2019 revision).
//! Measured constants are CODATA 2018 recommended values.
//!
//! ## References
//!
//! - NIST Reference on Constants, Units, and Uncertainty: <https://physics.nist.gov/cuu/Constants/>
//! - Tiesinga, E., Mohr, P. J., Newell, D. B., & Taylor, B. N. (2021). CODATA Recommended Values of the Fundamental Physical Constants: 2018.

use std::f64::consts::PI;

/// Vacuum permittivity ε₀ in farads per meter (F/m).
/// Approximate value: 8.8541878128 × 10⁻¹² F/m (11 significant figures).
pub const VACUUM_PERMITTIVITY: f64 = 8.854_187_812_8e-12;
/// Speed of light in vacuum _c_ in meters per second (m/s).
/// Exact value by SI definition (2019): 299,792,458 m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;
/// Elementary charge _e_ in coulombs (C).
/// Exact value by 2019 SI definition: 1.602176634 × 10⁻¹⁹ C.
pub const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19;

/// Bohr radius a₀ in meters, the atomic unit of length.
pub const BOHR_RADIUS: f64 = 5.291_772_109_03e-11;
/// Atomic unit of time ħ/Eₕ in seconds.
pub const ATOMIC_UNIT_OF_TIME: f64 = 2.418_884_326_585_7e-17;
/// Hartree energy Eₕ in joules, the atomic unit of energy.
pub const HARTREE_ENERGY: f64 = 4.359_744_722_207_1e-18;
/// Hartree energy in electronvolts.
pub const HARTREE_IN_EV: f64 = 27.211_386_245_988;
/// Atomic unit of electric field Eₕ/(e a₀) in volts per meter.
pub const ATOMIC_UNIT_OF_ELECTRIC_FIELD: f64 = 5.142_206_747_63e11;
/// Atomic unit of vector potential (field × time) in V·s/m.
pub const ATOMIC_UNIT_OF_VECTOR_POTENTIAL: f64 =
    ATOMIC_UNIT_OF_ELECTRIC_FIELD * ATOMIC_UNIT_OF_TIME;
/// Atomic unit of intensity in W/m², chosen so that `E₀ = √I₀` holds in
/// atomic units, i.e. `I = ε₀ c E²/2` evaluated at one atomic field unit.
/// Approximate value: 3.50944 × 10¹⁶ W/cm².
pub const ATOMIC_UNIT_OF_INTENSITY: f64 = 0.5
    * VACUUM_PERMITTIVITY
    * SPEED_OF_LIGHT
    * ATOMIC_UNIT_OF_ELECTRIC_FIELD
    * ATOMIC_UNIT_OF_ELECTRIC_FIELD;
/// Speed of light in atomic units (the inverse fine-structure constant).
pub const SPEED_OF_LIGHT_AU: f64 = 137.035_999_084;

/// Returns the angular frequency corresponding to a linear frequency `hz`.
#[inline]
#[must_use]
pub fn angular_frequency(hz: f64) -> f64 {
    2.0 * PI * hz
}

/// Photon energy in electronvolts for a vacuum wavelength in nanometres.
#[inline]
#[must_use]
pub fn photon_energy_ev(wavelength_nm: f64) -> f64 {
    let omega_au = 2.0 * PI * SPEED_OF_LIGHT_AU / (wavelength_nm * 1.0e-9 / BOHR_RADIUS);
    omega_au * HARTREE_IN_EV
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn atomic_speed_of_light_matches_si() {
        let c_au = SPEED_OF_LIGHT * ATOMIC_UNIT_OF_TIME / BOHR_RADIUS;
        assert_relative_eq!(c_au, SPEED_OF_LIGHT_AU, max_relative = 1.0e-9);
    }

    #[test]
    fn atomic_intensity_matches_reference() {
        // 3.50944758e16 W/cm²
        assert_relative_eq!(ATOMIC_UNIT_OF_INTENSITY * 1.0e-4, 3.509_447_6e16, max_relative = 1.0e-6);
    }

    #[test]
    fn hartree_units_are_consistent() {
        assert_relative_eq!(
            HARTREE_ENERGY / ELEMENTARY_CHARGE,
            HARTREE_IN_EV,
            max_relative = 1.0e-10
        );
    }

    #[test]
    fn photon_energy_of_800nm() {
        assert_relative_eq!(photon_energy_ev(800.0), 1.549_8, max_relative = 1.0e-4);
        assert_relative_eq!(angular_frequency(1.0), 2.0 * PI);
    }
}
