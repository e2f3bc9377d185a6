//! Uniform time grids over a field's span.

use std::f64::consts::TAU;

use crate::errors::FieldError;
use crate::math::Scalar;
use crate::spectra::linspace;

use super::Field;

/// Samples per period of the highest frequency when no rate is given.
pub const SAMPLES_PER_CYCLE: Scalar = 100.0;

/// Default sampling rate `100 · max_frequency / 2π`.
pub fn default_sampling_rate(field: &dyn Field) -> Result<Scalar, FieldError> {
    let rate = SAMPLES_PER_CYCLE * field.max_frequency() / TAU;
    if rate > 0.0 && rate.is_finite() {
        Ok(rate)
    } else {
        Err(FieldError::Domain(format!(
            "cannot derive a sampling rate from max frequency {:e}",
            field.max_frequency()
        )))
    }
}

/// Number of samples covering the span at rate `fs` (default rate when `None`).
pub fn steps(field: &dyn Field, fs: Option<Scalar>) -> Result<usize, FieldError> {
    let fs = match fs {
        Some(fs) if fs > 0.0 && fs.is_finite() => fs,
        Some(fs) => {
            return Err(FieldError::Domain(format!("sampling rate must be positive, got {fs:e}")));
        }
        None => default_sampling_rate(field)?,
    };
    let duration = field.span().duration();
    if !duration.is_finite() {
        return Err(FieldError::Domain(format!("cannot sample the infinite span {}", field.span())));
    }
    Ok((duration * fs).ceil() as usize + 1)
}

/// Uniform grid over the field's span, both ends included.
pub fn time_axis(field: &dyn Field, fs: Option<Scalar>) -> Result<Vec<Scalar>, FieldError> {
    let n = steps(field, fs)?;
    let span = field.span();
    Ok(linspace(span.start, span.end, n))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::fields::gaussian_pulse;

    #[test]
    fn default_rate_gives_hundred_samples_per_cycle() {
        let field = gaussian_pulse(0.057, 0.01, 200.0, 6.0, 0.0).unwrap();
        let fs = default_sampling_rate(field.as_ref()).unwrap();
        assert_relative_eq!(fs * TAU / 0.057, 100.0, max_relative = 1.0e-12);
        let axis = time_axis(field.as_ref(), None).unwrap();
        let span = field.span();
        assert_eq!(axis.len(), steps(field.as_ref(), None).unwrap());
        assert_relative_eq!(axis[0], span.start);
        assert_relative_eq!(*axis.last().unwrap(), span.end);
        assert!(axis[1] - axis[0] <= (1.0 + 1.0e-12) / fs);
    }

    #[test]
    fn explicit_rate_is_validated() {
        let field = gaussian_pulse(0.057, 0.01, 200.0, 6.0, 0.0).unwrap();
        assert_eq!(steps(field.as_ref(), Some(1.0)).unwrap(), field.span().duration().ceil() as usize + 1);
        assert!(steps(field.as_ref(), Some(-1.0)).is_err());
    }
}
