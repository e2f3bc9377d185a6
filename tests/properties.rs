use std::f64::consts::{PI, TAU};
use std::sync::Arc;

use approx::assert_relative_eq;
use laser_fields::algebra::{Delay, FieldExt, Window};
use laser_fields::dispersion::{cascade, Chirp, Crystal, DispersionOptions, DispersiveElement, ElementRef, PhaseShift};
use laser_fields::errors::FieldError;
use laser_fields::fields::{make_field, parse_field, Field, FieldRef, Polarization, Span};
use laser_fields::materials::{quartz_extraordinary, quartz_ordinary};
use laser_fields::math::{Scalar, R3};
use laser_fields::params::{Param, ParameterSet};
use laser_fields::units::UnitTable;
use nalgebra::Rotation3;

const OMEGA: Scalar = 0.057;

fn gaussian(tau: Scalar, phase: Scalar) -> FieldRef {
    let params = ParameterSet::new()
        .with(Param::AngularFrequency, OMEGA)
        .with(Param::Intensity, 0.0029)
        .with(Param::Tau, tau)
        .with(Param::SigmaMax, 6.0)
        .with(Param::Phase, phase);
    make_field(&params, &UnitTable::default()).unwrap()
}

#[test]
fn cycle_peak_intensity_halves_at_half_duration() {
    // from well below one cycle (T ≈ 110) to many cycles
    for tau in [40.0, 110.0, 400.0, 2_000.0] {
        let field = gaussian(tau, 0.0);
        let ratio = field.intensity(tau / 2.0) / field.intensity(0.0);
        assert_relative_eq!(ratio, 0.5, max_relative = 1.0e-5);
    }
}

#[test]
fn reference_pulse_at_800_nm() {
    let field = parse_field(
        "λ = 800 nm; I₀ = 1e14 W/cm^2; τ = 6.2 fs; σmax = 6",
        &UnitTable::default(),
    )
    .unwrap();
    let e0 = field.amplitude().unwrap();
    assert_relative_eq!(field.field_amplitude(0.0).norm(), e0, max_relative = 1.0e-12);
    assert_relative_eq!(field.vector_potential(0.0).norm(), 0.0, epsilon = 1.0e-14);
    let tau = field.quantity(Param::Tau).unwrap();
    assert_relative_eq!(field.intensity(tau / 2.0) / field.intensity(0.0), 0.5, max_relative = 1.0e-5);
    assert_relative_eq!(field.wavelength().unwrap(), 800.0e-9 / laser_fields::constants::BOHR_RADIUS, max_relative = 1.0e-12);
}

#[test]
fn equivalent_frequency_inputs_give_identical_fields() {
    let reference = gaussian(300.0, 0.3);
    let quantities = [
        Param::Wavelength,
        Param::Period,
        Param::Frequency,
        Param::Wavenumber,
        Param::PhotonEnergy,
    ];
    for param in quantities {
        let value = reference.quantity(param).unwrap();
        let params = ParameterSet::new()
            .with(param, value)
            .with(Param::Intensity, 0.0029)
            .with(Param::Tau, 300.0)
            .with(Param::SigmaMax, 6.0)
            .with(Param::Phase, 0.3);
        let field = make_field(&params, &UnitTable::default()).unwrap();
        for derived in [Param::AngularFrequency, Param::VectorPotential, Param::PonderomotivePotential] {
            assert_relative_eq!(
                field.quantity(derived).unwrap(),
                reference.quantity(derived).unwrap(),
                max_relative = 1.0e-13
            );
        }
        for &t in &[-250.0, 12.0, 180.0] {
            assert_relative_eq!(
                field.vector_potential(t),
                reference.vector_potential(t),
                epsilon = 1.0e-12,
                max_relative = 1.0e-10
            );
        }
    }
}

#[test]
fn field_algebra_laws() {
    let a = gaussian(200.0, 0.0);
    let short = gaussian(120.0, 1.3);
    let b = short.delayed(Delay::Time(90.0)).unwrap();

    let negated = a.negated();
    let zero = a.minus(&a).unwrap();
    let sum = a.plus(&b).unwrap();
    for &t in &[-300.0, -20.0, 0.0, 150.0] {
        assert_eq!(negated.field_amplitude(t), -a.field_amplitude(t));
        assert_eq!(zero.vector_potential(t), R3::zeros());
        assert_eq!(sum.vector_potential(t), a.vector_potential(t) + b.vector_potential(t));
    }
    assert_eq!(sum.span(), a.span().union(&b.span()));
    assert_eq!(sum.polarization(), Polarization::Linear);

    let nested = b.delayed(Delay::Cycles(1.0)).unwrap();
    let period = a.period().unwrap();
    assert_relative_eq!(nested.span().start, short.span().start + 90.0 + period, max_relative = 1.0e-12);
}

#[test]
fn spans_of_windows_and_padding() {
    let a = gaussian(200.0, 0.0);
    let windowed = a.windowed(-100.0, 60.0).unwrap();
    assert_eq!(windowed.span(), Span::new(-100.0, 60.0));
    for &t in &[-100.5, 60.5, 1_000.0] {
        assert_eq!(windowed.vector_potential(t), R3::zeros());
        assert_eq!(windowed.field_amplitude(t), R3::zeros());
        assert_eq!(windowed.intensity(t), 0.0);
    }
    let padded = a.padded(20.0, 30.0).unwrap();
    assert_relative_eq!(padded.span().duration(), a.span().duration() + 50.0, max_relative = 1.0e-12);
    assert!(matches!(a.padded(0.0, -1.0), Err(FieldError::Configuration(_))));
    assert!(matches!(a.windowed(1.0e5, 2.0e5), Err(FieldError::Configuration(_))));
    let apodized = a.apodized(Window::BlackmanHarris, -200.0, 200.0).unwrap();
    assert_eq!(apodized.vector_potential(-200.5), R3::zeros());
}

#[test]
fn zero_dispersion_is_idempotent() {
    let field = gaussian(200.0, 0.7);
    let a0 = field.vector_potential_amplitude().unwrap();
    let options = DispersionOptions::default();
    let elements: [ElementRef; 2] = [Arc::new(PhaseShift::new(0.0)), Arc::new(Chirp::new(0.0, OMEGA))];
    for element in elements {
        let dispersed = field.dispersed(element, &options).unwrap();
        for &t in &[-300.0, -45.0, 0.0, 90.0, 260.0] {
            assert_relative_eq!(dispersed.vector_potential(t).z, field.vector_potential(t).z, epsilon = 1.0e-4 * a0);
        }
    }
}

#[test]
fn crystal_and_its_inverse_with_a_phase_flip_negate_the_field() {
    let field = gaussian(200.0, 0.0);
    let crystal: ElementRef = Arc::new(
        Crystal::uniaxial(
            Arc::new(quartz_ordinary()),
            Arc::new(quartz_extraordinary()),
            2.0e6,
            OMEGA,
            Rotation3::from_axis_angle(&R3::y_axis(), 0.5),
        )
        .unwrap(),
    );
    let options = DispersionOptions::default();
    let through = field.dispersed(crystal.clone(), &options).unwrap();
    assert_eq!(through.dimensions(), 3);
    assert_eq!(through.polarization(), Polarization::Arbitrary);
    let span = through.span();
    let times: Vec<Scalar> = (0..200).map(|k| span.start + span.duration() * k as Scalar / 199.0).collect();
    assert!(times.iter().any(|&t| through.vector_potential(t).x.abs() > 1.0e-3));

    let undo = cascade(Arc::new(PhaseShift::new(PI)), crystal.inverse());
    let flipped = through.dispersed(undo, &options).unwrap();
    let (_, element) = flipped.dispersion_source().unwrap();
    assert!(!element.is_isotropic());
    let a0 = field.vector_potential_amplitude().unwrap();
    for &t in &[-250.0, -60.0, 0.0, 33.0, 200.0] {
        let value = flipped.vector_potential(t);
        assert_relative_eq!(value.z, -field.vector_potential(t).z, epsilon = 1.0e-4 * a0);
        assert_relative_eq!(value.x, 0.0, epsilon = 1.0e-6 * a0);
    }
}

#[test]
fn quarter_period_delay_shifts_the_carrier_of_a_long_pulse() {
    let field = gaussian(4_000.0, 0.0);
    let delayed = field.delayed(Delay::Phase(TAU / 4.0)).unwrap();
    let t = 0.1 * field.period().unwrap();
    assert_relative_eq!(
        delayed.field_amplitude(t).z,
        field.field_amplitude_at_phase(t, -PI / 2.0).z,
        max_relative = 1.0e-3
    );
}
