//! Saturation vapor pressure of water.
//!
//! Two Antoine correlations in mmHg and °C, `log10(P) = A - B / (T + C)`,
//! one below 60 °C and one from 60 °C up to 150 °C. The inverse switches
//! correlation at the high branch's own pressure at 60 °C, so every
//! temperature sampled from the forward model at or above 60 °C comes back
//! through the same branch it went in by.

use psy_core::units::constants::PA_PER_MHG;
use psy_core::{Pressure, PressureUnit, PsyError, PsyResult, Temperature};

pub const MIN_TEMPERATURE_C: f64 = 0.0;
pub const MAX_TEMPERATURE_C: f64 = 150.0;
pub const REGIME_SPLIT_C: f64 = 60.0;

const MMHG_PER_MHG: f64 = 1000.0;

/// Antoine coefficients for pressure in mmHg and temperature in °C.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Antoine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Antoine {
    /// 0 °C to 60 °C
    pub const LOW: Antoine = Antoine {
        a: 8.10765,
        b: 1750.286,
        c: 235.0,
    };

    /// 60 °C to 150 °C
    pub const HIGH: Antoine = Antoine {
        a: 7.96681,
        b: 1668.21,
        c: 228.0,
    };

    pub fn for_temperature(t_c: f64) -> Antoine {
        if t_c < REGIME_SPLIT_C {
            Self::LOW
        } else {
            Self::HIGH
        }
    }

    pub fn pressure_mmhg(&self, t_c: f64) -> f64 {
        10f64.powf(self.a - self.b / (t_c + self.c))
    }

    pub fn temperature_c(&self, p_mmhg: f64) -> f64 {
        self.b / (self.a - p_mmhg.log10()) - self.c
    }
}

fn split_mmhg() -> f64 {
    Antoine::HIGH.pressure_mmhg(REGIME_SPLIT_C) * (1.0 - 1e-12)
}

fn max_mmhg() -> f64 {
    Antoine::HIGH.pressure_mmhg(MAX_TEMPERATURE_C) * (1.0 + 1e-12)
}

pub(crate) fn psat_mmhg(t_c: f64) -> PsyResult<f64> {
    if !(MIN_TEMPERATURE_C..=MAX_TEMPERATURE_C).contains(&t_c) {
        return Err(PsyError::OutOfRange {
            what: "saturation pressure temperature (°C)",
            value: t_c,
        });
    }
    Ok(Antoine::for_temperature(t_c).pressure_mmhg(t_c))
}

pub(crate) fn psat_pa(t_c: f64) -> PsyResult<f64> {
    Ok(psat_mmhg(t_c)? / MMHG_PER_MHG * PA_PER_MHG)
}

pub(crate) fn tsat_from_mmhg(p_mmhg: f64) -> PsyResult<f64> {
    // below the low branch's 0 °C pressure the result is a negative °C value
    if !p_mmhg.is_finite() || p_mmhg <= 0.0 || p_mmhg > max_mmhg() {
        return Err(PsyError::OutOfRange {
            what: "saturation temperature vapor pressure (mmHg)",
            value: p_mmhg,
        });
    }
    let regime = if p_mmhg < split_mmhg() {
        Antoine::LOW
    } else {
        Antoine::HIGH
    };
    Ok(regime.temperature_c(p_mmhg))
}

pub(crate) fn tsat_from_pa(p_pa: f64) -> PsyResult<f64> {
    tsat_from_mmhg(p_pa / PA_PER_MHG * MMHG_PER_MHG)
}

/// Saturation vapor pressure at `temperature`, as an absolute pressure in mHg.
///
/// Fails with `OutOfRange` outside 0..=150 °C.
pub fn saturation_pressure(temperature: &Temperature) -> PsyResult<Pressure> {
    let p_mmhg = psat_mmhg(temperature.as_celsius())?;
    Pressure::new(p_mmhg, "mmHg", true)
}

/// Temperature (°C) at which `pressure` is the saturation vapor pressure.
///
/// The caller's pressure is read, never converted in place.
pub fn saturation_temperature(pressure: &Pressure) -> PsyResult<Temperature> {
    if !pressure.is_absolute() {
        return Err(PsyError::invalid_argument(
            "saturation temperature needs an absolute vapor pressure",
        ));
    }
    let p_mmhg = pressure.value_in(PressureUnit::MeterHg) * MMHG_PER_MHG;
    Temperature::celsius(tsat_from_mmhg(p_mmhg)?)
}
