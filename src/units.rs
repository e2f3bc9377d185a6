//! Physical dimensions, a runtime unit registry, and unit preferences.
//!
//! Units are looked up by symbol at runtime (the parameter DSL carries units
//! as text) and reduce to a scale factor onto Hartree atomic units. A
//! [`UnitTable`] records which unit a bare number is assumed to carry for
//! each parameter; it is an explicit value handed to quantity resolution,
//! never a global.

use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::fmt;

use crate::constants::{
    ATOMIC_UNIT_OF_ELECTRIC_FIELD, ATOMIC_UNIT_OF_INTENSITY, ATOMIC_UNIT_OF_TIME,
    ATOMIC_UNIT_OF_VECTOR_POTENTIAL, BOHR_RADIUS, HARTREE_ENERGY, HARTREE_IN_EV,
};
use crate::errors::UnitError;
use crate::math::Scalar;
use crate::params::Param;

/// Physical dimension of a quantity.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    /// Length (wavelength).
    Length,
    /// Time (period, durations).
    Time,
    /// Inverse time (frequency, angular frequency).
    InverseTime,
    /// Inverse length (wavenumber).
    Wavenumber,
    /// Energy (photon energy, ponderomotive potential).
    Energy,
    /// Power per area.
    Intensity,
    /// Electric field strength.
    ElectricField,
    /// Vector potential (field × time).
    VectorPotential,
    /// Plane angle.
    Angle,
    /// Pure number.
    Dimensionless,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Length => "length",
            Self::Time => "time",
            Self::InverseTime => "inverse time",
            Self::Wavenumber => "wavenumber",
            Self::Energy => "energy",
            Self::Intensity => "intensity",
            Self::ElectricField => "electric field",
            Self::VectorPotential => "vector potential",
            Self::Angle => "angle",
            Self::Dimensionless => "dimensionless",
        };
        f.write_str(name)
    }
}

/// A unit from the registry.
///
/// `dimension == None` marks the generic atomic unit, which fits every
/// dimension with a scale of one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    symbol: &'static str,
    dimension: Option<Dimension>,
    to_atomic: Scalar,
}

const NANO: Scalar = 1.0e-9;
const FEMTO: Scalar = 1.0e-15;

const fn unit(symbol: &'static str, dimension: Dimension, to_atomic: Scalar) -> Unit {
    Unit {
        symbol,
        dimension: Some(dimension),
        to_atomic,
    }
}

/// The registry: canonical units followed by their aliases.
fn registry() -> &'static [(&'static [&'static str], Unit)] {
    use Dimension::*;
    const TABLE: &[(&[&str], Unit)] = &[
        (&["au", "a.u."], Unit { symbol: "au", dimension: None, to_atomic: 1.0 }),
        // length
        (&["bohr", "a0", "a₀"], unit("bohr", Length, 1.0)),
        (&["m"], unit("m", Length, 1.0 / BOHR_RADIUS)),
        (&["mm"], unit("mm", Length, 1.0e-3 / BOHR_RADIUS)),
        (&["μm", "um", "micron"], unit("μm", Length, 1.0e-6 / BOHR_RADIUS)),
        (&["nm"], unit("nm", Length, NANO / BOHR_RADIUS)),
        (&["Å", "Angstrom", "angstrom", "AA"], unit("Å", Length, 1.0e-10 / BOHR_RADIUS)),
        (&["pm"], unit("pm", Length, 1.0e-12 / BOHR_RADIUS)),
        // time
        (&["s"], unit("s", Time, 1.0 / ATOMIC_UNIT_OF_TIME)),
        (&["ps"], unit("ps", Time, 1.0e-12 / ATOMIC_UNIT_OF_TIME)),
        (&["fs"], unit("fs", Time, FEMTO / ATOMIC_UNIT_OF_TIME)),
        (&["as"], unit("as", Time, 1.0e-18 / ATOMIC_UNIT_OF_TIME)),
        (&["jiffy"], unit("jiffy", Time, 1.0)),
        // inverse time
        (&["Hz", "1/s", "s^-1"], unit("Hz", InverseTime, ATOMIC_UNIT_OF_TIME)),
        (&["GHz"], unit("GHz", InverseTime, 1.0e9 * ATOMIC_UNIT_OF_TIME)),
        (&["THz"], unit("THz", InverseTime, 1.0e12 * ATOMIC_UNIT_OF_TIME)),
        (&["PHz", "1/fs", "fs^-1", "rad/fs"], unit("PHz", InverseTime, 1.0e15 * ATOMIC_UNIT_OF_TIME)),
        (&["rad/s"], unit("rad/s", InverseTime, ATOMIC_UNIT_OF_TIME)),
        // wavenumber
        (&["1/m", "m^-1"], unit("m⁻¹", Wavenumber, BOHR_RADIUS)),
        (&["1/cm", "cm^-1", "Kayser"], unit("cm⁻¹", Wavenumber, 1.0e2 * BOHR_RADIUS)),
        (&["1/μm", "μm^-1", "1/um", "um^-1"], unit("μm⁻¹", Wavenumber, 1.0e6 * BOHR_RADIUS)),
        (&["1/nm", "nm^-1"], unit("nm⁻¹", Wavenumber, 1.0e9 * BOHR_RADIUS)),
        // energy
        (&["Ha", "Hartree", "hartree", "Eh", "Eₕ"], unit("Ha", Energy, 1.0)),
        (&["Ry", "Rydberg"], unit("Ry", Energy, 0.5)),
        (&["J"], unit("J", Energy, 1.0 / HARTREE_ENERGY)),
        (&["eV"], unit("eV", Energy, 1.0 / HARTREE_IN_EV)),
        (&["meV"], unit("meV", Energy, 1.0e-3 / HARTREE_IN_EV)),
        (&["keV"], unit("keV", Energy, 1.0e3 / HARTREE_IN_EV)),
        // intensity
        (&["W/m^2"], unit("W/m²", Intensity, 1.0 / ATOMIC_UNIT_OF_INTENSITY)),
        (&["W/cm^2"], unit("W/cm²", Intensity, 1.0e4 / ATOMIC_UNIT_OF_INTENSITY)),
        (&["GW/cm^2"], unit("GW/cm²", Intensity, 1.0e13 / ATOMIC_UNIT_OF_INTENSITY)),
        (&["TW/cm^2"], unit("TW/cm²", Intensity, 1.0e16 / ATOMIC_UNIT_OF_INTENSITY)),
        (&["PW/cm^2"], unit("PW/cm²", Intensity, 1.0e19 / ATOMIC_UNIT_OF_INTENSITY)),
        // electric field
        (&["V/m"], unit("V/m", ElectricField, 1.0 / ATOMIC_UNIT_OF_ELECTRIC_FIELD)),
        (&["V/cm"], unit("V/cm", ElectricField, 1.0e2 / ATOMIC_UNIT_OF_ELECTRIC_FIELD)),
        (&["MV/cm"], unit("MV/cm", ElectricField, 1.0e8 / ATOMIC_UNIT_OF_ELECTRIC_FIELD)),
        (&["GV/m"], unit("GV/m", ElectricField, 1.0e9 / ATOMIC_UNIT_OF_ELECTRIC_FIELD)),
        (&["V/Å", "V/Angstrom"], unit("V/Å", ElectricField, 1.0e10 / ATOMIC_UNIT_OF_ELECTRIC_FIELD)),
        // vector potential
        (&["Vs/m"], unit("V·s/m", VectorPotential, 1.0 / ATOMIC_UNIT_OF_VECTOR_POTENTIAL)),
        // angle
        (&["rad"], unit("rad", Angle, 1.0)),
        (&["mrad"], unit("mrad", Angle, 1.0e-3)),
        (&["deg", "°"], unit("°", Angle, PI / 180.0)),
        // pure numbers
        (&["1"], unit("1", Dimensionless, 1.0)),
        (&["%"], unit("%", Dimensionless, 1.0e-2)),
    ];
    TABLE
}

/// Normalizes spelling variants: whitespace, multiplication dots, Unicode
/// superscripts and the micro sign.
fn normalize(symbol: &str) -> String {
    symbol
        .trim()
        .replace("⁻¹", "^-1")
        .replace('²', "^2")
        .replace('µ', "μ")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '·' && *c != '*')
        .collect()
}

impl Unit {
    /// Looks up a unit by symbol or alias.
    pub fn parse(symbol: &str) -> Result<Self, UnitError> {
        let key = normalize(symbol);
        registry()
            .iter()
            .find(|(aliases, _)| aliases.iter().any(|a| *a == key))
            .map(|(_, unit)| *unit)
            .ok_or_else(|| UnitError::UnknownUnit(symbol.to_string()))
    }

    /// The generic atomic unit.
    #[must_use]
    pub const fn atomic() -> Self {
        Self {
            symbol: "au",
            dimension: None,
            to_atomic: 1.0,
        }
    }

    /// Canonical symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        self.symbol
    }

    /// Dimension, or `None` for the generic atomic unit.
    #[must_use]
    pub const fn dimension(&self) -> Option<Dimension> {
        self.dimension
    }

    /// True if values in this unit may be assigned to a quantity of `dimension`.
    #[must_use]
    pub fn fits(&self, dimension: Dimension) -> bool {
        self.dimension.map_or(true, |d| d == dimension)
    }

    /// Converts `value` in this unit into atomic units.
    #[must_use]
    pub fn to_atomic(&self, value: Scalar) -> Scalar {
        value * self.to_atomic
    }

    /// Converts `value` in atomic units into this unit.
    #[must_use]
    pub fn from_atomic(&self, value: Scalar) -> Scalar {
        value / self.to_atomic
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol)
    }
}

/// A scalar with an optional unit; `None` means "use the table preference".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    /// Numerical value in `unit`.
    pub value: Scalar,
    /// Attached unit, if any.
    pub unit: Option<Unit>,
}

impl Quantity {
    /// A bare number.
    #[must_use]
    pub const fn bare(value: Scalar) -> Self {
        Self { value, unit: None }
    }

    /// A number in the given unit.
    #[must_use]
    pub const fn new(value: Scalar, unit: Unit) -> Self {
        Self {
            value,
            unit: Some(unit),
        }
    }

    /// A number already in atomic units.
    #[must_use]
    pub const fn atomic(value: Scalar) -> Self {
        Self::new(value, Unit::atomic())
    }

    /// Parses `value` together with a unit symbol.
    pub fn with_symbol(value: Scalar, symbol: &str) -> Result<Self, UnitError> {
        Ok(Self::new(value, Unit::parse(symbol)?))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Some(unit) => write!(f, "{} {unit}", self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

/// Unit preferences: which unit a bare number carries, per parameter.
///
/// Parameters without an entry are read in atomic units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitTable {
    preferences: BTreeMap<Param, Unit>,
}

impl UnitTable {
    /// Laboratory units: nm, fs, W/cm², V/m, eV and their relatives.
    #[must_use]
    pub fn laboratory() -> Self {
        const LAB: &[(Param, &str)] = &[
            (Param::Wavelength, "nm"),
            (Param::Period, "fs"),
            (Param::Frequency, "PHz"),
            (Param::Wavenumber, "1/cm"),
            (Param::AngularFrequency, "1/fs"),
            (Param::PhotonEnergy, "eV"),
            (Param::Intensity, "W/cm^2"),
            (Param::Amplitude, "V/m"),
            (Param::VectorPotential, "Vs/m"),
            (Param::PonderomotivePotential, "eV"),
            (Param::Tau, "fs"),
            (Param::Sigma, "fs"),
            (Param::Tmax, "fs"),
            (Param::Toff, "fs"),
            (Param::Phase, "rad"),
        ];
        let preferences = LAB
            .iter()
            .filter_map(|&(param, symbol)| Unit::parse(symbol).ok().map(|u| (param, u)))
            .collect();
        Self { preferences }
    }

    /// Returns a copy with selected preferences replaced.
    ///
    /// Names follow the parameter DSL (`"λ"`, `"lambda"`, `"I0"`, ...).
    pub fn with_overrides(&self, overrides: &[(&str, &str)]) -> Result<Self, UnitError> {
        let mut table = self.clone();
        for &(name, symbol) in overrides {
            let param: Param = name.parse()?;
            let unit = Unit::parse(symbol)?;
            check_dimension(param, &unit)?;
            table.preferences.insert(param, unit);
        }
        Ok(table)
    }

    /// Preferred unit for `param` (atomic if unset).
    #[must_use]
    pub fn preference(&self, param: Param) -> Unit {
        self.preferences.get(&param).copied().unwrap_or(Unit::atomic())
    }

    /// Converts a quantity assigned to `param` into atomic units.
    pub fn to_atomic(&self, param: Param, quantity: Quantity) -> Result<Scalar, UnitError> {
        let unit = quantity.unit.unwrap_or_else(|| self.preference(param));
        check_dimension(param, &unit)?;
        Ok(unit.to_atomic(quantity.value))
    }

    /// Expresses an atomic-unit value of `param` in the preferred unit.
    #[must_use]
    pub fn from_atomic(&self, param: Param, value: Scalar) -> Quantity {
        let unit = self.preference(param);
        Quantity::new(unit.from_atomic(value), unit)
    }
}

fn check_dimension(param: Param, unit: &Unit) -> Result<(), UnitError> {
    let expected = param.dimension().unwrap_or(Dimension::Dimensionless);
    if unit.fits(expected) {
        Ok(())
    } else {
        Err(UnitError::DimensionMismatch {
            quantity: param.to_string(),
            unit: unit.symbol().to_string(),
            expected: expected.to_string(),
            found: unit
                .dimension()
                .map_or_else(|| "atomic".to_string(), |d| d.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn parses_spelling_variants() {
        let a = Unit::parse("W/cm²").unwrap();
        let b = Unit::parse("W / cm^2").unwrap();
        assert_eq!(a, b);
        assert_eq!(Unit::parse("µm").unwrap(), Unit::parse("um").unwrap());
        assert_eq!(Unit::parse("V·s/m").unwrap().dimension(), Some(Dimension::VectorPotential));
        assert!(matches!(Unit::parse("furlong"), Err(UnitError::UnknownUnit(_))));
    }

    #[test]
    fn converts_laboratory_values() {
        let nm = Unit::parse("nm").unwrap();
        assert_relative_eq!(nm.to_atomic(800.0), 15_117.809, max_relative = 1.0e-6);
        let fs = Unit::parse("fs").unwrap();
        assert_relative_eq!(fs.to_atomic(1.0), 41.341_374, max_relative = 1.0e-6);
        let ev = Unit::parse("eV").unwrap();
        assert_relative_eq!(ev.from_atomic(1.0), HARTREE_IN_EV, max_relative = 1.0e-12);
        let intensity = Unit::parse("W/cm^2").unwrap();
        // E₀ = √I₀ ≈ 0.05338 au at 1e14 W/cm²
        assert_relative_eq!(intensity.to_atomic(1.0e14).sqrt(), 0.053_380, max_relative = 1.0e-4);
    }

    #[test]
    fn default_table_is_atomic() {
        let table = UnitTable::default();
        let x = table.to_atomic(Param::Wavelength, Quantity::bare(42.0)).unwrap();
        assert_relative_eq!(x, 42.0);
    }

    #[test]
    fn laboratory_table_reads_bare_numbers() {
        let table = UnitTable::laboratory();
        let lambda = table.to_atomic(Param::Wavelength, Quantity::bare(800.0)).unwrap();
        assert_relative_eq!(lambda, 800.0e-9 / BOHR_RADIUS, max_relative = 1.0e-12);
        let back = table.from_atomic(Param::Wavelength, lambda);
        assert_relative_eq!(back.value, 800.0, max_relative = 1.0e-12);
    }

    #[test]
    fn overrides_validate_names_and_dimensions() {
        let table = UnitTable::default().with_overrides(&[("λ", "μm")]).unwrap();
        assert_eq!(table.preference(Param::Wavelength).symbol(), "μm");
        assert!(matches!(
            UnitTable::default().with_overrides(&[("wavelength_ish", "nm")]),
            Err(UnitError::UnknownParameter(_))
        ));
        assert!(matches!(
            UnitTable::default().with_overrides(&[("I0", "nm")]),
            Err(UnitError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn explicit_unit_of_wrong_dimension_is_rejected() {
        let table = UnitTable::default();
        let q = Quantity::with_symbol(800.0, "fs").unwrap();
        assert!(table.to_atomic(Param::Wavelength, q).is_err());
    }
}
