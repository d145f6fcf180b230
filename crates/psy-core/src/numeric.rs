use crate::PsyError;

/// Floating point type used throughout the workspace
pub type Real = f64;

#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Reject NaN and infinities before they reach a correlation.
pub fn ensure_finite(v: Real, what: &str) -> Result<Real, PsyError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PsyError::invalid_argument(format!(
            "non-finite value for {what}: {v}"
        )))
    }
}

/// Relative humidity is a percentage in `[0, 100]`.
pub fn ensure_relative_humidity(rh: Real) -> Result<Real, PsyError> {
    let rh = ensure_finite(rh, "relative humidity")?;
    if (0.0..=100.0).contains(&rh) {
        Ok(rh)
    } else {
        Err(PsyError::InvalidValue {
            what: "relative humidity",
            value: rh,
        })
    }
}
