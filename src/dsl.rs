//! Parser for declarative parameter blocks.
//!
//! ```text
//! # 800 nm, 6.2 fs Gaussian
//! λ = 800 nm
//! I₀ = 1e14 W/cm^2; τ = 6.2 fs
//! σmax : 6
//! env = :gauss
//! ```
//!
//! Statements are separated by newlines or `;` and read `name = value` or
//! `name : value`. A value is a number with an optional unit, a symbol
//! (`:gauss` or bare `gauss`), or a bracketed number list for `rotation`.

use crate::errors::FieldError;
use crate::math::Scalar;
use crate::params::{Param, ParameterSet, Value};
use crate::units::Quantity;

fn parse_error(line: usize, message: impl Into<String>) -> FieldError {
    FieldError::Parse {
        line,
        message: message.into(),
    }
}

/// Splits `text` into the longest leading number and the remainder.
fn split_number(text: &str) -> Option<(Scalar, &str)> {
    let end = text
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E')))
        .map_or(text.len(), |(i, _)| i);
    // Shrink until the prefix parses, so that `5eV` reads as 5 eV.
    (1..=end)
        .rev()
        .find_map(|k| text[..k].parse::<Scalar>().ok().map(|x| (x, text[k..].trim())))
}

fn parse_list(line: usize, text: &str) -> Result<Vec<Scalar>, FieldError> {
    let inner = text
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .ok_or_else(|| parse_error(line, format!("unterminated list `{text}`")))?;
    inner
        .split(',')
        .map(|item| {
            item.trim()
                .parse::<Scalar>()
                .map_err(|_| parse_error(line, format!("`{}` is not a number", item.trim())))
        })
        .collect()
}

fn parse_value(line: usize, param: Param, text: &str) -> Result<Value, FieldError> {
    if text.is_empty() {
        return Err(parse_error(line, format!("missing value for {param}")));
    }
    if let Some(symbol) = text.strip_prefix(':') {
        return Ok(Value::Symbol(symbol.trim().to_string()));
    }
    if text.starts_with('[') {
        if param != Param::Rotation {
            return Err(parse_error(line, format!("{param} does not take a list")));
        }
        let components = parse_list(line, text)?;
        return Value::rotation_from_components(&components)
            .map_err(|e| parse_error(line, e.to_string()));
    }
    match split_number(text) {
        Some((value, "")) => Ok(Value::Quantity(Quantity::bare(value))),
        Some((value, unit)) => Quantity::with_symbol(value, unit)
            .map(Value::Quantity)
            .map_err(|e| parse_error(line, e.to_string())),
        None => Ok(Value::Symbol(text.to_string())),
    }
}

/// Parses a parameter block into a [`ParameterSet`].
pub fn parse_parameters(text: &str) -> Result<ParameterSet, FieldError> {
    let mut params = ParameterSet::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let content = raw.split('#').next().unwrap_or_default();
        for statement in content.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let (name, value) = statement
                .split_once(['=', ':'])
                .ok_or_else(|| parse_error(line, format!("expected `name = value`, got `{statement}`")))?;
            let param: Param = name
                .trim()
                .parse()
                .map_err(|e: crate::errors::UnitError| parse_error(line, e.to_string()))?;
            let value = parse_value(line, param, value.trim())?;
            if params.insert(param, value).is_some() {
                return Err(parse_error(line, format!("{param} is given twice")));
            }
        }
    }
    log::debug!("parsed {} parameters", params.len());
    Ok(params)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn parses_mixed_block() {
        let params = parse_parameters(
            "# reference pulse\nλ = 800 nm\nI0 = 1e14 W/cm^2; tau = 6.2 fs\nσmax : 6\nenv = :gauss\ncarrier = fixed\n",
        )
        .unwrap();
        assert_eq!(params.len(), 6);
        let Some(Value::Quantity(q)) = params.get(Param::Wavelength) else {
            panic!("λ missing")
        };
        assert_relative_eq!(q.value, 800.0);
        assert_eq!(q.unit.map(|u| u.symbol()), Some("nm"));
        assert_eq!(params.symbol(Param::Envelope), Some("gauss"));
        assert_eq!(params.symbol(Param::Carrier), Some("fixed"));
        assert_eq!(params.scalar(Param::SigmaMax), Some(6.0));
    }

    #[test]
    fn symbol_values_after_colon_separator() {
        let params = parse_parameters("kind : :transverse").unwrap();
        assert_eq!(params.symbol(Param::Kind), Some("transverse"));
    }

    #[test]
    fn splits_units_glued_to_numbers() {
        assert_eq!(split_number("5eV"), Some((5.0, "eV")));
        assert_eq!(split_number("1.5e-3 fs"), Some((1.5e-3, "fs")));
        assert_eq!(split_number("gauss"), None);
    }

    #[test]
    fn parses_rotation_lists() {
        let params = parse_parameters("rotation = [0, 1, 0, 0.5]").unwrap();
        assert!(params.rotation(Param::Rotation).is_some());
        assert!(parse_parameters("λ = [1, 2]").is_err());
    }

    #[test]
    fn reports_line_of_bad_statement() {
        let err = parse_parameters("λ = 800 nm\nfoo = 3").unwrap_err();
        assert!(matches!(err, FieldError::Parse { line: 2, .. }), "{err}");
        let err = parse_parameters("λ = 800 parsecs").unwrap_err();
        assert!(matches!(err, FieldError::Parse { line: 1, .. }));
        let err = parse_parameters("T = 1; T = 2").unwrap_err();
        assert!(err.to_string().contains("twice"));
    }
}
