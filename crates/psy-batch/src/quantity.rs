//! Quantity strings: a number followed by a unit token.

use psy_core::{Pressure, PsyError, PsyResult, Temperature};

/// Split `"30 C"`, `"30C"` or `"1e5 Pa"` into value and unit token.
pub fn split_quantity(text: &str) -> PsyResult<(f64, &str)> {
    let text = text.trim();
    if let Some((number, unit)) = text.split_once(char::is_whitespace) {
        let value = number
            .parse::<f64>()
            .map_err(|_| PsyError::invalid_argument(format!("'{number}' is not a number")))?;
        return Ok((value, unit.trim()));
    }

    // no separator: longest numeric prefix wins
    let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).skip(1).collect();
    boundaries.push(text.len());
    for &end in boundaries.iter().rev() {
        if let Ok(value) = text[..end].parse::<f64>() {
            return Ok((value, &text[end..]));
        }
    }
    Err(PsyError::invalid_argument(format!(
        "'{text}' does not start with a number"
    )))
}

pub fn parse_temperature(text: &str) -> PsyResult<Temperature> {
    let (value, unit) = split_quantity(text)?;
    Temperature::new(value, unit)
}

/// Parse a pressure; gauge readings come back converted to absolute.
pub fn parse_pressure(text: &str, gauge: bool) -> PsyResult<Pressure> {
    let (value, unit) = split_quantity(text)?;
    let mut pressure = Pressure::new(value, unit, !gauge)?;
    pressure.to_absolute()?;
    Ok(pressure)
}
