//! Refractive-index models and a small database of optical materials.
//!
//! Indices are evaluated at angular frequencies in atomic units; the
//! Sellmeier tables themselves are in micrometres, as published.

use std::f64::consts::TAU;

use crate::constants::{BOHR_RADIUS, SPEED_OF_LIGHT_AU};
use crate::math::Scalar;

/// Frequency-dependent refractive index of a transparent medium.
pub trait RefractiveIndex: std::fmt::Debug + Send + Sync {
    /// Real refractive index `n(ω)`.
    fn index(&self, omega: Scalar) -> Scalar;

    /// True if `ω` lies in the range where the model is trusted.
    fn is_valid(&self, _omega: Scalar) -> bool {
        true
    }

    /// Wavenumber `k(ω) = n(ω) ω / c`.
    fn wavenumber(&self, omega: Scalar) -> Scalar {
        self.index(omega) * omega / SPEED_OF_LIGHT_AU
    }

    /// Inverse group velocity `k′(ω)` from a central difference.
    fn group_slowness(&self, omega: Scalar) -> Scalar {
        let h = 1.0e-4 * omega;
        (self.wavenumber(omega + h) - self.wavenumber(omega - h)) / (2.0 * h)
    }
}

/// Vacuum wavelength in micrometres for an atomic-unit angular frequency.
#[must_use]
pub fn wavelength_um(omega: Scalar) -> Scalar {
    TAU * SPEED_OF_LIGHT_AU / omega * BOHR_RADIUS * 1.0e6
}

/// Sellmeier model `n² = a + Σ Bᵢ λ² / (λ² − Cᵢ)` with λ in µm.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Sellmeier {
    /// Name of the material.
    pub name: String,
    /// Constant term, 1 for the standard form.
    pub offset: Scalar,
    /// Oscillator strengths `Bᵢ`.
    pub strengths: Vec<Scalar>,
    /// Resonance wavelengths squared `Cᵢ` in µm².
    pub resonances: Vec<Scalar>,
    /// Wavelength range `[min, max]` of validity in µm.
    pub range: (Scalar, Scalar),
}

impl Sellmeier {
    /// Standard three-term form with `a = 1`.
    #[must_use]
    pub fn new(name: &str, strengths: [Scalar; 3], resonances: [Scalar; 3], range: (Scalar, Scalar)) -> Self {
        Self {
            name: name.to_owned(),
            offset: 1.0,
            strengths: strengths.to_vec(),
            resonances: resonances.to_vec(),
            range,
        }
    }

    /// Builder-style override of the constant term.
    #[must_use]
    pub const fn with_offset(mut self, offset: Scalar) -> Self {
        self.offset = offset;
        self
    }

    /// Index at a vacuum wavelength in µm.
    #[must_use]
    pub fn index_at_wavelength(&self, lambda: Scalar) -> Scalar {
        let l2 = lambda * lambda;
        let n2 = self.offset
            + self
                .strengths
                .iter()
                .zip(&self.resonances)
                .map(|(b, c)| b * l2 / (l2 - c))
                .sum::<Scalar>();
        n2.sqrt()
    }
}

impl RefractiveIndex for Sellmeier {
    fn index(&self, omega: Scalar) -> Scalar {
        self.index_at_wavelength(wavelength_um(omega))
    }

    fn is_valid(&self, omega: Scalar) -> bool {
        if !(omega > 0.0) {
            return false;
        }
        let lambda = wavelength_um(omega);
        self.range.0 <= lambda && lambda <= self.range.1
    }
}

/// Schott N-BK7 borosilicate crown glass.
#[must_use]
pub fn bk7() -> Sellmeier {
    Sellmeier::new(
        "N-BK7",
        [1.039_612_12, 0.231_792_344, 1.010_469_45],
        [0.006_000_698_67, 0.020_017_914_4, 103.560_653],
        (0.3, 2.5),
    )
}

/// Fused silica (Malitson 1965).
#[must_use]
pub fn fused_silica() -> Sellmeier {
    Sellmeier::new(
        "SiO2",
        [0.696_166_3, 0.407_942_6, 0.897_479_4],
        [0.068_404_3_f64.powi(2), 0.116_241_4_f64.powi(2), 9.896_161_f64.powi(2)],
        (0.21, 3.71),
    )
}

/// Calcium fluoride (Malitson 1963).
#[must_use]
pub fn calcium_fluoride() -> Sellmeier {
    Sellmeier::new(
        "CaF2",
        [0.567_588_8, 0.471_091_4, 3.848_472_3],
        [0.050_263_605_f64.powi(2), 0.100_390_9_f64.powi(2), 34.649_040_f64.powi(2)],
        (0.23, 9.7),
    )
}

/// Sapphire, ordinary ray (Malitson & Dodge 1972).
#[must_use]
pub fn sapphire_ordinary() -> Sellmeier {
    Sellmeier::new(
        "Al2O3 (o)",
        [1.431_349_3, 0.650_547_13, 5.341_402_1],
        [0.072_663_1_f64.powi(2), 0.119_324_2_f64.powi(2), 18.028_251_f64.powi(2)],
        (0.2, 5.5),
    )
}

/// Sapphire, extraordinary ray (Malitson & Dodge 1972).
#[must_use]
pub fn sapphire_extraordinary() -> Sellmeier {
    Sellmeier::new(
        "Al2O3 (e)",
        [1.503_975_9, 0.550_691_41, 6.592_737_9],
        [0.074_028_8_f64.powi(2), 0.121_652_9_f64.powi(2), 20.072_248_f64.powi(2)],
        (0.2, 5.5),
    )
}

/// Crystalline quartz, ordinary ray (Ghosh 1999).
#[must_use]
pub fn quartz_ordinary() -> Sellmeier {
    Sellmeier {
        name: "quartz (o)".to_owned(),
        offset: 1.286_041_41,
        strengths: vec![1.070_440_83, 1.102_022_42],
        resonances: vec![1.005_859_97e-2, 100.0],
        range: (0.198, 2.05),
    }
}

/// Crystalline quartz, extraordinary ray (Ghosh 1999).
#[must_use]
pub fn quartz_extraordinary() -> Sellmeier {
    Sellmeier {
        name: "quartz (e)".to_owned(),
        offset: 1.288_518_04,
        strengths: vec![1.095_099_24, 1.156_624_75],
        resonances: vec![1.021_018_64e-2, 100.0],
        range: (0.198, 2.05),
    }
}

/// Looks a material up by name (case-insensitive).
#[must_use]
pub fn lookup(name: &str) -> Option<Sellmeier> {
    let material = match name.to_ascii_lowercase().as_str() {
        "bk7" | "n-bk7" => bk7(),
        "sio2" | "fused_silica" | "fused silica" => fused_silica(),
        "caf2" => calcium_fluoride(),
        "sapphire" | "sapphire_o" | "al2o3" => sapphire_ordinary(),
        "sapphire_e" => sapphire_extraordinary(),
        "quartz" | "quartz_o" => quartz_ordinary(),
        "quartz_e" => quartz_extraordinary(),
        _ => return None,
    };
    Some(material)
}
