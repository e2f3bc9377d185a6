//! Dispersive elements and their frequency-domain transfer functions.
//!
//! An element maps the spectrum `Â(ω)` of the vector potential to
//! `H(ω) Â(ω)` for `ω ≥ 0`; negative frequencies follow from Hermitian
//! symmetry of real fields. All elements are lossless, so every element has
//! an exact inverse.

use std::fmt::Debug;
use std::sync::Arc;

use nalgebra::Rotation3;

use crate::errors::FieldError;
use crate::materials::RefractiveIndex;
use crate::math::{phasor, CScalar, Scalar, C3, C3x3};

/// Shared handle to a dispersive element.
pub type ElementRef = Arc<dyn DispersiveElement>;

/// Shared handle to a refractive-index model.
pub type MaterialRef = Arc<dyn RefractiveIndex>;

/// Transfer function value at one frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transfer {
    /// Same complex factor on every component.
    Isotropic(CScalar),
    /// Full 3×3 complex matrix in the laboratory frame.
    Anisotropic(C3x3),
}

impl Transfer {
    /// The identity transfer.
    #[must_use]
    pub fn identity() -> Self {
        Self::Isotropic(CScalar::new(1.0, 0.0))
    }

    /// Matrix form.
    #[must_use]
    pub fn matrix(&self) -> C3x3 {
        match *self {
            Self::Isotropic(h) => C3x3::from_diagonal_element(h),
            Self::Anisotropic(m) => m,
        }
    }

    /// `H v`.
    #[must_use]
    pub fn apply(&self, v: C3) -> C3 {
        match self {
            Self::Isotropic(h) => v * *h,
            Self::Anisotropic(m) => m * v,
        }
    }

    /// `self · inner`, i.e. `inner` acts first.
    #[must_use]
    pub fn compose(self, inner: Self) -> Self {
        match (self, inner) {
            (Self::Isotropic(a), Self::Isotropic(b)) => Self::Isotropic(a * b),
            (outer, inner) => Self::Anisotropic(outer.matrix() * inner.matrix()),
        }
    }
}

/// A linear, time-invariant, lossless optical element.
pub trait DispersiveElement: Debug + Send + Sync {
    /// Transfer function at angular frequency `omega ≥ 0`.
    fn transfer(&self, omega: Scalar) -> Transfer;

    /// Element undoing this one.
    fn inverse(&self) -> ElementRef;

    /// True if the transfer is a scalar at every frequency.
    fn is_isotropic(&self) -> bool {
        true
    }

    /// Constituents, outermost first, when the element is a cascade.
    fn parts(&self) -> Option<&[ElementRef]> {
        None
    }
}

/// Constant phase shift `H = e^{−iφ}`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseShift {
    /// Phase φ in radians.
    pub phase: Scalar,
}

impl PhaseShift {
    /// Shift by `phase`.
    #[must_use]
    pub const fn new(phase: Scalar) -> Self {
        Self { phase }
    }
}

impl DispersiveElement for PhaseShift {
    fn transfer(&self, _omega: Scalar) -> Transfer {
        Transfer::Isotropic(phasor(-self.phase))
    }

    fn inverse(&self) -> ElementRef {
        Arc::new(Self::new(-self.phase))
    }
}

/// Quadratic spectral phase `H = e^{−ib(ω−ω₀)²}`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chirp {
    /// Chirp coefficient `b` (half the group-delay dispersion).
    pub b: Scalar,
    /// Reference angular frequency ω₀.
    pub omega0: Scalar,
}

impl Chirp {
    /// Chirp with coefficient `b` about `omega0`.
    #[must_use]
    pub const fn new(b: Scalar, omega0: Scalar) -> Self {
        Self { b, omega0 }
    }
}

impl DispersiveElement for Chirp {
    fn transfer(&self, omega: Scalar) -> Transfer {
        let d = omega - self.omega0;
        Transfer::Isotropic(phasor(-self.b * d * d))
    }

    fn inverse(&self) -> ElementRef {
        Arc::new(Self::new(-self.b, self.omega0))
    }
}

/// Phase `(k(ω) − ω k′(ω₀)) d` of propagation through `length` of a medium.
///
/// Frequencies outside the model's validity range pass unchanged.
fn propagation(material: &dyn RefractiveIndex, omega: Scalar, slowness: Scalar, length: Scalar) -> CScalar {
    if !material.is_valid(omega) {
        return CScalar::new(1.0, 0.0);
    }
    phasor(-(material.wavenumber(omega) - omega * slowness) * length)
}

fn reference_slowness(material: &dyn RefractiveIndex, omega0: Scalar) -> Result<Scalar, FieldError> {
    if !material.is_valid(omega0) {
        return Err(FieldError::config(format!(
            "reference frequency {omega0:e} is outside the validity range of {material:?}"
        )));
    }
    Ok(material.group_slowness(omega0))
}

/// Propagation through an isotropic medium, in the frame moving at the group velocity at ω₀.
#[derive(Debug, Clone)]
pub struct IsotropicMedium {
    material: MaterialRef,
    length: Scalar,
    slowness: Scalar,
}

impl IsotropicMedium {
    /// `length` (bohr) of `material`, group delay referenced to `omega0`.
    pub fn new(material: MaterialRef, length: Scalar, omega0: Scalar) -> Result<Self, FieldError> {
        let slowness = reference_slowness(material.as_ref(), omega0)?;
        Ok(Self {
            material,
            length,
            slowness,
        })
    }

    /// Propagation length in bohr; negative for inverted media.
    #[must_use]
    pub const fn length(&self) -> Scalar {
        self.length
    }
}

impl DispersiveElement for IsotropicMedium {
    fn transfer(&self, omega: Scalar) -> Transfer {
        Transfer::Isotropic(propagation(self.material.as_ref(), omega, self.slowness, self.length))
    }

    fn inverse(&self) -> ElementRef {
        Arc::new(Self {
            material: self.material.clone(),
            length: -self.length,
            slowness: self.slowness,
        })
    }
}

/// Birefringent crystal with one medium per principal axis.
///
/// The lab-frame transfer is `R diag(H₁, H₂, H₃) Rᵀ` where `R` rotates the
/// crystal frame into the laboratory frame. Group delay is referenced to the
/// mean of the axes' `k′(ω₀)`.
#[derive(Debug, Clone)]
pub struct Crystal {
    axes: [MaterialRef; 3],
    length: Scalar,
    rotation: Rotation3<Scalar>,
    slowness: Scalar,
}

impl Crystal {
    /// Crystal with `axes` media along the crystal x, y and z axes.
    pub fn new(
        axes: [MaterialRef; 3],
        length: Scalar,
        omega0: Scalar,
        rotation: Rotation3<Scalar>,
    ) -> Result<Self, FieldError> {
        let mut slowness = 0.0;
        for axis in &axes {
            slowness += reference_slowness(axis.as_ref(), omega0)?;
        }
        Ok(Self {
            axes,
            length,
            rotation,
            slowness: slowness / 3.0,
        })
    }

    /// Uniaxial crystal with its optic axis along the crystal z axis.
    pub fn uniaxial(
        ordinary: MaterialRef,
        extraordinary: MaterialRef,
        length: Scalar,
        omega0: Scalar,
        rotation: Rotation3<Scalar>,
    ) -> Result<Self, FieldError> {
        Self::new([ordinary.clone(), ordinary, extraordinary], length, omega0, rotation)
    }
}

impl DispersiveElement for Crystal {
    fn transfer(&self, omega: Scalar) -> Transfer {
        let diagonal = C3::from_iterator(
            self.axes
                .iter()
                .map(|m| propagation(m.as_ref(), omega, self.slowness, self.length)),
        );
        let r = self.rotation.matrix().map(CScalar::from);
        Transfer::Anisotropic(r * C3x3::from_diagonal(&diagonal) * r.transpose())
    }

    fn inverse(&self) -> ElementRef {
        Arc::new(Self {
            axes: self.axes.clone(),
            length: -self.length,
            rotation: self.rotation,
            slowness: self.slowness,
        })
    }

    fn is_isotropic(&self) -> bool {
        false
    }
}

/// Elements applied in sequence; `Cascade[e₂, e₁]` has transfer `H₂ H₁`.
#[derive(Debug, Clone)]
pub struct Cascade {
    elements: Vec<ElementRef>,
}

impl Cascade {
    /// Cascade of `elements`, outermost first; nested cascades are flattened.
    #[must_use]
    pub fn new(elements: impl IntoIterator<Item = ElementRef>) -> Self {
        let mut flat = Vec::new();
        for element in elements {
            match element.parts() {
                Some(parts) => flat.extend(parts.iter().cloned()),
                None => flat.push(element),
            }
        }
        Self { elements: flat }
    }

    /// Flattened constituents, outermost first.
    #[must_use]
    pub fn elements(&self) -> &[ElementRef] {
        &self.elements
    }
}

impl DispersiveElement for Cascade {
    fn transfer(&self, omega: Scalar) -> Transfer {
        self.elements
            .iter()
            .fold(Transfer::identity(), |h, e| h.compose(e.transfer(omega)))
    }

    fn inverse(&self) -> ElementRef {
        Arc::new(Self::new(self.elements.iter().rev().map(|e| e.inverse())))
    }

    fn is_isotropic(&self) -> bool {
        self.elements.iter().all(|e| e.is_isotropic())
    }

    fn parts(&self) -> Option<&[ElementRef]> {
        Some(&self.elements)
    }
}

/// `Cascade[outer, inner]` as a shared element.
#[must_use]
pub fn cascade(outer: ElementRef, inner: ElementRef) -> ElementRef {
    Arc::new(Cascade::new([outer, inner]))
}
