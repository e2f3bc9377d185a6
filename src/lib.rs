#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Physical constants and atomic-unit scales.
pub mod constants;
/// Shared numerical primitives (vectors, root finding, optimization, splines).
pub mod math;
/// Runtime unit registry, quantities and unit preferences.
pub mod units;
/// Parameter names, parameter sets and the quantity resolver.
pub mod params;
/// Declarative parameter blocks.
pub mod dsl;
/// Vector-potential envelopes.
pub mod envelopes;
/// Carrier oscillations.
pub mod carriers;
/// Laser field representations and the field creation front-end.
pub mod fields;
/// Field algebra and combinators.
pub mod algebra;
/// Refractive-index models of optical materials.
pub mod materials;
/// Dispersive elements and dispersed fields.
pub mod dispersion;
/// Fourier transforms and field spectra.
pub mod spectra;
/// Error types shared between modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
