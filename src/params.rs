//! Named pulse parameters and quantity resolution.
//!
//! A [`ParameterSet`] maps [`Param`] names to values as the user wrote them.
//! [`ParameterSet::resolve`] validates the competing parameter groups,
//! converts every quantity into atomic units through a [`UnitTable`] and
//! derives the missing members of each group with an ordered rule table,
//! iterated until no rule fires. Envelope durations are converted but left
//! as given; each envelope validates its own competing duration groups.

use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use nalgebra::{Rotation3, Unit as UnitVector};

use crate::constants::SPEED_OF_LIGHT_AU;
use crate::errors::{FieldError, UnitError};
use crate::math::{Scalar, R3, R3x3};
use crate::units::{Dimension, Quantity, Unit, UnitTable};

/// Parameter names understood by the field front-end.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Param {
    /// Vacuum wavelength λ.
    Wavelength,
    /// Carrier period T.
    Period,
    /// Linear frequency f.
    Frequency,
    /// Wavenumber ν = 1/λ.
    Wavenumber,
    /// Angular frequency ω.
    AngularFrequency,
    /// Photon energy ħω.
    PhotonEnergy,
    /// Peak intensity I₀.
    Intensity,
    /// Peak electric field E₀.
    Amplitude,
    /// Peak vector potential A₀.
    VectorPotential,
    /// Ponderomotive potential Uₚ.
    PonderomotivePotential,
    /// Intensity FWHM duration τ.
    Tau,
    /// Intensity standard deviation σ.
    Sigma,
    /// Half-width of the support in units of σ.
    SigmaMax,
    /// Half-width of the support (time).
    Tmax,
    /// Half-width of the support in cycles.
    CyclesMax,
    /// Onset of the truncation warp.
    Toff,
    /// Number of cycles of a cos² envelope.
    Cycles,
    /// Both ramp lengths of a trapezoid, or the direction of a ramp field.
    Ramp,
    /// Rising edge length of a trapezoid, in cycles.
    RampUp,
    /// Falling edge length of a trapezoid, in cycles.
    RampDown,
    /// Flat-top length of a trapezoid, in cycles.
    Flat,
    /// Envelope kind.
    Envelope,
    /// Carrier kind.
    Carrier,
    /// Ellipticity ξ of an elliptical carrier.
    Ellipticity,
    /// Carrier-envelope phase ϕ.
    Phase,
    /// Field kind.
    Kind,
    /// Rotation of a transverse field.
    Rotation,
}

/// All parameters with their accepted spellings; the first entry is the display symbol.
const NAMES: &[(Param, &[&str])] = &[
    (Param::Wavelength, &["λ", "lambda", "wavelength"]),
    (Param::Period, &["T", "period"]),
    (Param::Frequency, &["f", "frequency"]),
    (Param::Wavenumber, &["ν", "nu", "wavenumber"]),
    (Param::AngularFrequency, &["ω", "omega"]),
    (Param::PhotonEnergy, &["ħω", "hbar_omega", "photon_energy"]),
    (Param::Intensity, &["I₀", "I0", "intensity"]),
    (Param::Amplitude, &["E₀", "E0", "amplitude"]),
    (Param::VectorPotential, &["A₀", "A0"]),
    (Param::PonderomotivePotential, &["Uₚ", "Up", "U_p"]),
    (Param::Tau, &["τ", "tau"]),
    (Param::Sigma, &["σ", "sigma"]),
    (Param::SigmaMax, &["σmax", "sigma_max", "sigmamax"]),
    (Param::Tmax, &["tmax"]),
    (Param::CyclesMax, &["Tmax"]),
    (Param::Toff, &["toff"]),
    (Param::Cycles, &["cycles"]),
    (Param::Ramp, &["ramp"]),
    (Param::RampUp, &["ramp_up"]),
    (Param::RampDown, &["ramp_down"]),
    (Param::Flat, &["flat"]),
    (Param::Envelope, &["env", "envelope"]),
    (Param::Carrier, &["carrier"]),
    (Param::Ellipticity, &["ξ", "xi"]),
    (Param::Phase, &["ϕ", "φ", "phi", "cep"]),
    (Param::Kind, &["kind"]),
    (Param::Rotation, &["rotation"]),
];

impl Param {
    /// Frequency-like group; exactly one member is user supplied.
    pub const FREQUENCY_GROUP: [Self; 6] = [
        Self::Wavelength,
        Self::Period,
        Self::Frequency,
        Self::Wavenumber,
        Self::AngularFrequency,
        Self::PhotonEnergy,
    ];

    /// Amplitude-like group; exactly one member is user supplied.
    pub const AMPLITUDE_GROUP: [Self; 4] = [
        Self::Intensity,
        Self::Amplitude,
        Self::VectorPotential,
        Self::PonderomotivePotential,
    ];

    /// Display symbol.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        NAMES
            .iter()
            .find(|(p, _)| *p == self)
            .map_or("?", |(_, names)| names[0])
    }

    /// Physical dimension, or `None` for symbolic parameters.
    #[must_use]
    pub const fn dimension(self) -> Option<Dimension> {
        use Dimension::*;
        match self {
            Self::Wavelength => Some(Length),
            Self::Period | Self::Tau | Self::Sigma | Self::Tmax | Self::Toff => Some(Time),
            Self::Frequency | Self::AngularFrequency => Some(InverseTime),
            Self::Wavenumber => Some(Wavenumber),
            Self::PhotonEnergy | Self::PonderomotivePotential => Some(Energy),
            Self::Intensity => Some(Intensity),
            Self::Amplitude => Some(ElectricField),
            Self::VectorPotential => Some(VectorPotential),
            Self::Phase => Some(Angle),
            Self::SigmaMax
            | Self::CyclesMax
            | Self::Cycles
            | Self::Ramp
            | Self::RampUp
            | Self::RampDown
            | Self::Flat
            | Self::Ellipticity => Some(Dimensionless),
            Self::Envelope | Self::Carrier | Self::Kind | Self::Rotation => None,
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Param {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        NAMES
            .iter()
            .find(|(_, names)| names.iter().any(|n| *n == key))
            .map(|(p, _)| *p)
            .ok_or_else(|| UnitError::UnknownParameter(key.to_string()))
    }
}

/// A parameter value as supplied by the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A number with an optional unit.
    Quantity(Quantity),
    /// A kind selector such as `gauss` or `up`.
    Symbol(String),
    /// A rotation of the polarization frame.
    Rotation(Rotation3<Scalar>),
}

impl Value {
    /// Builds a rotation from an axis-angle list `[x, y, z, angle]` or a row-major 3×3 matrix.
    pub fn rotation_from_components(components: &[Scalar]) -> Result<Self, FieldError> {
        match components.len() {
            4 => {
                let axis = R3::new(components[0], components[1], components[2]);
                let axis = UnitVector::try_new(axis, 1.0e-12).ok_or_else(|| {
                    FieldError::config("rotation axis must be a non-zero vector")
                })?;
                Ok(Self::Rotation(Rotation3::from_axis_angle(&axis, components[3])))
            }
            9 => {
                let m = R3x3::from_row_slice(components);
                let orthogonality = (m.transpose() * m - R3x3::identity()).norm();
                if orthogonality > 1.0e-8 || (m.determinant() - 1.0).abs() > 1.0e-8 {
                    return Err(FieldError::config(
                        "rotation matrix must be orthogonal with unit determinant",
                    ));
                }
                Ok(Self::Rotation(Rotation3::from_matrix_unchecked(m)))
            }
            n => Err(FieldError::config(format!(
                "rotation takes 4 (axis, angle) or 9 (matrix) components, got {n}"
            ))),
        }
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Self::Quantity(Quantity::bare(value))
    }
}

impl From<Quantity> for Value {
    fn from(value: Quantity) -> Self {
        Self::Quantity(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Symbol(value.to_string())
    }
}

impl From<Rotation3<Scalar>> for Value {
    fn from(value: Rotation3<Scalar>) -> Self {
        Self::Rotation(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quantity(q) => write!(f, "{q}"),
            Self::Symbol(s) => write!(f, ":{s}"),
            Self::Rotation(r) => write!(f, "{r}"),
        }
    }
}

/// The kind of field a parameter set describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// One-dimensional carrier pulse.
    Linear,
    /// Three-dimensional carrier pulse.
    Transverse,
    /// Step of constant field strength.
    Constant,
    /// Linearly rising or falling field strength.
    LinearRamp,
    /// Parabolically rising or falling field strength.
    ParabolicRamp,
    /// sin²-shaped rise or fall of the field strength.
    Sin2Ramp,
}

impl FieldKind {
    const CHOICES: &'static [(&'static str, Self)] = &[
        ("linear", Self::Linear),
        ("transverse", Self::Transverse),
        ("constant", Self::Constant),
        ("linear_ramp", Self::LinearRamp),
        ("parabolic_ramp", Self::ParabolicRamp),
        ("sin²_ramp", Self::Sin2Ramp),
        ("sin2_ramp", Self::Sin2Ramp),
    ];

    /// Reads the kind from a parameter set (`linear` if absent).
    pub fn of(params: &ParameterSet) -> Result<Self, FieldError> {
        params
            .symbol(Param::Kind)
            .map_or(Ok(Self::Linear), |name| choose("field kind", name, Self::CHOICES))
    }

    /// True for kinds built around a carrier oscillation.
    #[must_use]
    pub const fn has_carrier(self) -> bool {
        matches!(self, Self::Linear | Self::Transverse)
    }
}

/// Picks `name` among `choices`, listing the valid names on failure.
pub(crate) fn choose<T: Copy>(what: &str, name: &str, choices: &[(&str, T)]) -> Result<T, FieldError> {
    choices
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, v)| *v)
        .ok_or_else(|| {
            let valid: Vec<&str> = choices.iter().map(|(n, _)| *n).collect();
            FieldError::config(format!(
                "unknown {what} `{name}`; valid choices: {}",
                valid.join(", ")
            ))
        })
}

fn list(params: &[Param]) -> String {
    let names: Vec<&str> = params.iter().map(|p| p.symbol()).collect();
    format!("{{{}}}", names.join(", "))
}

type Formula = fn(&[Scalar]) -> Scalar;

/// Derivation rules in firing order: `(target, sources, formula)`.
const RULES: &[(Param, &[Param], Formula)] = {
    use Param::*;
    &[
        (Period, &[Wavelength], |x| x[0] / SPEED_OF_LIGHT_AU),
        (Period, &[Frequency], |x| 1.0 / x[0]),
        (Period, &[Wavenumber], |x| 1.0 / (x[0] * SPEED_OF_LIGHT_AU)),
        (Period, &[AngularFrequency], |x| 2.0 * PI / x[0]),
        (Period, &[PhotonEnergy], |x| 2.0 * PI / x[0]),
        (Wavelength, &[Period], |x| SPEED_OF_LIGHT_AU * x[0]),
        (Frequency, &[Period], |x| 1.0 / x[0]),
        (Wavenumber, &[Wavelength], |x| 1.0 / x[0]),
        (AngularFrequency, &[Period], |x| 2.0 * PI / x[0]),
        (PhotonEnergy, &[AngularFrequency], |x| x[0]),
        (Amplitude, &[Intensity], |x| x[0].sqrt()),
        (Intensity, &[Amplitude], |x| x[0] * x[0]),
        (VectorPotential, &[PonderomotivePotential], |x| 2.0 * x[0].sqrt()),
        (Amplitude, &[VectorPotential, AngularFrequency], |x| x[0] * x[1]),
        (VectorPotential, &[Amplitude, AngularFrequency], |x| x[0] / x[1]),
        (PonderomotivePotential, &[VectorPotential], |x| 0.25 * x[0] * x[0]),
    ]
};

/// A set of named parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    values: BTreeMap<Param, Value>,
}

impl ParameterSet {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion.
    #[must_use]
    pub fn with(mut self, param: Param, value: impl Into<Value>) -> Self {
        self.insert(param, value);
        self
    }

    /// Inserts or replaces a value.
    pub fn insert(&mut self, param: Param, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(param, value.into())
    }

    /// Removes a value.
    pub fn remove(&mut self, param: Param) -> Option<Value> {
        self.values.remove(&param)
    }

    /// Raw value of `param`.
    #[must_use]
    pub fn get(&self, param: Param) -> Option<&Value> {
        self.values.get(&param)
    }

    /// True if `param` is present.
    #[must_use]
    pub fn contains(&self, param: Param) -> bool {
        self.values.contains_key(&param)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no parameter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates entries in parameter order.
    pub fn iter(&self) -> impl Iterator<Item = (Param, &Value)> {
        self.values.iter().map(|(p, v)| (*p, v))
    }

    /// Numerical value of `param`; atomic units once the set is resolved.
    #[must_use]
    pub fn scalar(&self, param: Param) -> Option<Scalar> {
        match self.values.get(&param) {
            Some(Value::Quantity(q)) => Some(q.value),
            _ => None,
        }
    }

    /// Like [`scalar`](Self::scalar), failing with a configuration error when absent.
    pub fn require(&self, param: Param) -> Result<Scalar, FieldError> {
        self.scalar(param)
            .ok_or_else(|| FieldError::config(format!("missing parameter {param}")))
    }

    /// Symbolic value of `param`.
    #[must_use]
    pub fn symbol(&self, param: Param) -> Option<&str> {
        match self.values.get(&param) {
            Some(Value::Symbol(s)) => Some(s),
            _ => None,
        }
    }

    /// Rotation stored under `param`.
    #[must_use]
    pub fn rotation(&self, param: Param) -> Option<&Rotation3<Scalar>> {
        match self.values.get(&param) {
            Some(Value::Rotation(r)) => Some(r),
            _ => None,
        }
    }

    fn present(&self, members: &[Param]) -> Vec<Param> {
        members.iter().copied().filter(|p| self.contains(*p)).collect()
    }

    /// Checks that exactly one of `members` is present and returns it.
    pub fn exactly_one_of(&self, group: &str, members: &[Param]) -> Result<Param, FieldError> {
        match self.present(members).as_slice() {
            [one] => Ok(*one),
            found => Err(FieldError::config(format!(
                "exactly one of {} is required for the {group}, got {}",
                list(members),
                list(found)
            ))),
        }
    }

    /// Checks that at most one of `members` is present and returns it.
    pub fn at_most_one_of(&self, group: &str, members: &[Param]) -> Result<Option<Param>, FieldError> {
        match self.present(members).as_slice() {
            [] => Ok(None),
            [one] => Ok(Some(*one)),
            found => Err(FieldError::config(format!(
                "at most one of {} may be given for the {group}, got {}",
                list(members),
                list(found)
            ))),
        }
    }

    /// Validates the competing groups, converts to atomic units and derives
    /// every quantity that follows from the supplied ones.
    pub fn resolve(&self, units: &UnitTable) -> Result<Self, FieldError> {
        let kind = FieldKind::of(self)?;
        if kind.has_carrier() {
            self.exactly_one_of("frequency group", &Param::FREQUENCY_GROUP)?;
            self.exactly_one_of("amplitude group", &Param::AMPLITUDE_GROUP)?;
        } else {
            self.at_most_one_of("frequency group", &Param::FREQUENCY_GROUP)?;
            let given = self.exactly_one_of("amplitude group", &Param::AMPLITUDE_GROUP)?;
            if matches!(given, Param::VectorPotential | Param::PonderomotivePotential) {
                return Err(FieldError::config(format!(
                    "{given} is undefined for a field without carrier; give I₀ or E₀"
                )));
            }
        }

        let mut resolved = Self::new();
        for (param, value) in self.iter() {
            let value = match value {
                Value::Quantity(q) => {
                    Value::Quantity(Quantity::atomic(units.to_atomic(param, *q)?))
                }
                other => other.clone(),
            };
            resolved.values.insert(param, value);
        }

        loop {
            let mut fired = false;
            for (target, sources, formula) in RULES {
                if resolved.contains(*target) {
                    continue;
                }
                let inputs: Option<Vec<Scalar>> =
                    sources.iter().map(|s| resolved.scalar(*s)).collect();
                if let Some(inputs) = inputs {
                    let value = formula(&inputs);
                    log::debug!("derived {target} = {value:e} from {}", list(sources));
                    resolved.insert(*target, Quantity::atomic(value));
                    fired = true;
                }
            }
            if !fired {
                break;
            }
        }

        for (param, value) in resolved.iter() {
            if let Value::Quantity(q) = value {
                if !q.value.is_finite() {
                    return Err(FieldError::Domain(format!(
                        "{param} resolved to a non-finite value"
                    )));
                }
            }
        }
        for param in Param::FREQUENCY_GROUP.iter().chain(&Param::AMPLITUDE_GROUP[..2]) {
            if let Some(x) = resolved.scalar(*param) {
                if x <= 0.0 {
                    return Err(FieldError::Domain(format!("{param} must be positive, got {x:e}")));
                }
            }
        }

        Ok(resolved)
    }
}

impl FromIterator<(Param, Value)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (Param, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Builds a quantity with a unit symbol, for use with [`ParameterSet::with`].
///
/// Fails on unknown unit symbols.
pub fn quantity(value: Scalar, unit: &str) -> Result<Quantity, UnitError> {
    Ok(Quantity::new(value, Unit::parse(unit)?))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::constants::HARTREE_IN_EV;

    fn lab(param: Param, value: Scalar) -> ParameterSet {
        ParameterSet::new()
            .with(param, value)
            .with(Param::Intensity, quantity(1.0e14, "W/cm^2").unwrap())
    }

    #[test]
    fn names_round_trip_through_display() {
        for (param, names) in NAMES {
            for name in *names {
                assert_eq!(name.parse::<Param>().unwrap(), *param);
            }
            assert_eq!(param.to_string().parse::<Param>().unwrap(), *param);
        }
        assert!("omega_prime".parse::<Param>().is_err());
    }

    #[test]
    fn equivalent_frequency_inputs_resolve_identically() {
        let reference = lab(Param::Wavelength, 800.0)
            .resolve(&UnitTable::laboratory())
            .unwrap();
        let period = reference.scalar(Param::Period).unwrap();
        let omega = reference.scalar(Param::AngularFrequency).unwrap();
        let alternatives = [
            (Param::Period, period),
            (Param::Frequency, 1.0 / period),
            (Param::Wavenumber, reference.scalar(Param::Wavenumber).unwrap()),
            (Param::AngularFrequency, omega),
            (Param::PhotonEnergy, omega),
        ];
        for (param, value) in alternatives {
            let set = ParameterSet::new()
                .with(param, Quantity::atomic(value))
                .with(Param::Intensity, quantity(1.0e14, "W/cm^2").unwrap())
                .resolve(&UnitTable::default())
                .unwrap();
            for p in Param::FREQUENCY_GROUP.iter().chain(&Param::AMPLITUDE_GROUP) {
                assert_relative_eq!(
                    set.scalar(*p).unwrap(),
                    reference.scalar(*p).unwrap(),
                    max_relative = 1.0e-13
                );
            }
        }
    }

    #[test]
    fn resolves_800nm_reference_values() {
        let set = lab(Param::Wavelength, 800.0)
            .resolve(&UnitTable::laboratory())
            .unwrap();
        assert_relative_eq!(set.scalar(Param::AngularFrequency).unwrap(), 0.056_954, max_relative = 1.0e-4);
        assert_relative_eq!(set.scalar(Param::Amplitude).unwrap(), 0.053_380, max_relative = 1.0e-4);
        assert_relative_eq!(
            set.scalar(Param::PhotonEnergy).unwrap() * HARTREE_IN_EV,
            1.5498,
            max_relative = 1.0e-4
        );
        let a0 = set.scalar(Param::VectorPotential).unwrap();
        assert_relative_eq!(set.scalar(Param::PonderomotivePotential).unwrap(), a0 * a0 / 4.0);
        // Uₚ ≈ 5.97 eV at 800 nm and 1e14 W/cm²
        assert_relative_eq!(
            set.scalar(Param::PonderomotivePotential).unwrap() * HARTREE_IN_EV,
            5.97,
            max_relative = 1.0e-2
        );
    }

    #[test]
    fn amplitude_group_round_trips() {
        let base = ParameterSet::new().with(Param::AngularFrequency, 0.057);
        let from_up = base.clone().with(Param::PonderomotivePotential, 0.2).resolve(&UnitTable::default()).unwrap();
        let e0 = from_up.scalar(Param::Amplitude).unwrap();
        let from_e0 = base.with(Param::Amplitude, e0).resolve(&UnitTable::default()).unwrap();
        assert_relative_eq!(from_e0.scalar(Param::PonderomotivePotential).unwrap(), 0.2, max_relative = 1.0e-14);
    }

    #[test]
    fn competing_members_are_rejected() {
        let set = lab(Param::Wavelength, 800.0).with(Param::Period, 110.0);
        let err = set.resolve(&UnitTable::laboratory()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("frequency group"), "{message}");
        assert!(message.contains("λ") && message.contains('T'), "{message}");

        let missing = ParameterSet::new().with(Param::Intensity, 1.0);
        assert!(matches!(missing.resolve(&UnitTable::default()), Err(FieldError::Configuration(_))));
    }

    #[test]
    fn constant_kind_needs_no_frequency() {
        let set = ParameterSet::new()
            .with(Param::Kind, "constant")
            .with(Param::Amplitude, 0.1)
            .with(Param::Tmax, 10.0)
            .resolve(&UnitTable::default())
            .unwrap();
        assert_relative_eq!(set.scalar(Param::Intensity).unwrap(), 0.01);
        assert!(set.scalar(Param::AngularFrequency).is_none());

        let with_a0 = ParameterSet::new()
            .with(Param::Kind, "constant")
            .with(Param::VectorPotential, 1.0);
        assert!(with_a0.resolve(&UnitTable::default()).is_err());
    }

    #[test]
    fn unit_dimension_mismatch_is_an_error() {
        let set = ParameterSet::new()
            .with(Param::Wavelength, quantity(800.0, "fs").unwrap())
            .with(Param::Intensity, 1.0);
        assert!(matches!(
            set.resolve(&UnitTable::default()),
            Err(FieldError::Units(UnitError::DimensionMismatch { .. }))
        ));
    }

    #[test]
    fn durations_are_converted_but_not_derived() {
        let set = ParameterSet::new()
            .with(Param::Period, 100.0)
            .with(Param::Intensity, 1.0)
            .with(Param::Tau, quantity(1.0, "fs").unwrap())
            .with(Param::CyclesMax, 3.0)
            .resolve(&UnitTable::default())
            .unwrap();
        assert_relative_eq!(set.scalar(Param::Tau).unwrap(), 41.341_374, max_relative = 1.0e-6);
        assert_relative_eq!(set.scalar(Param::CyclesMax).unwrap(), 3.0);
        assert!(!set.contains(Param::Sigma));
        assert!(!set.contains(Param::Tmax));
    }

    #[test]
    fn rotation_components_are_validated() {
        let r = Value::rotation_from_components(&[0.0, 0.0, 1.0, PI / 2.0]).unwrap();
        let Value::Rotation(r) = r else { panic!("expected rotation") };
        let x = r * R3::x();
        assert_relative_eq!(x, R3::y(), epsilon = 1.0e-14);
        assert!(Value::rotation_from_components(&[1.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 1.0]).is_err());
        assert!(Value::rotation_from_components(&[1.0, 2.0]).is_err());
    }

    #[test]
    fn unknown_kind_lists_choices() {
        let set = ParameterSet::new().with(Param::Kind, "sawtooth");
        let message = FieldKind::of(&set).unwrap_err().to_string();
        assert!(message.contains("transverse"), "{message}");
    }
}
