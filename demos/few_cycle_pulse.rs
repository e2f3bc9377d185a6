use std::sync::Arc;

use laser_fields::constants::{angular_frequency, photon_energy_ev, ATOMIC_UNIT_OF_TIME, BOHR_RADIUS, SPEED_OF_LIGHT};
use laser_fields::materials::fused_silica;
use laser_fields::prelude::*;

fn main() -> Result<(), FieldError> {
    // Two-cycle 800 nm pulse at 1e14 W/cm².
    let pulse = parse_field(
        "λ = 800 nm\nI₀ = 1e14 W/cm^2\nτ = 5 fs\nσmax = 6\nϕ = 0",
        &UnitTable::default(),
    )?;

    println!(
        "carrier: {:.4} eV, {:.4e} rad/s",
        photon_energy_ev(800.0),
        angular_frequency(SPEED_OF_LIGHT / 800.0e-9)
    );
    println!(
        "E0 = {:.6} au, A0 = {:.6} au, Up = {:.6} au",
        pulse.amplitude()?,
        pulse.vector_potential_amplitude()?,
        pulse.ponderomotive_potential()?
    );

    // 100 µm of fused silica, then a π phase flip.
    let glass = IsotropicMedium::new(Arc::new(fused_silica()), 100.0e-6 / BOHR_RADIUS, pulse.angular_frequency()?)?;
    let options = DispersionOptions::default();
    let stretched = pulse.dispersed(Arc::new(glass), &options)?;
    let flipped = stretched.dispersed(Arc::new(PhaseShift::new(std::f64::consts::PI)), &options)?;

    println!("t(fs), F(au), F_glass(au), F_flipped(au)");
    for t in time_axis(stretched.as_ref(), Some(0.5))?.into_iter().step_by(10) {
        println!(
            "{:.3}, {:.6e}, {:.6e}, {:.6e}",
            t * ATOMIC_UNIT_OF_TIME * 1.0e15,
            pulse.field_amplitude(t).z,
            stretched.field_amplitude(t).z,
            flipped.field_amplitude(t).z
        );
    }
    Ok(())
}
