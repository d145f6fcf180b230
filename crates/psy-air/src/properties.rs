//! Humid-air property formulas.
//!
//! Every function takes the dry-bulb temperature, the relative humidity in
//! percent and the absolute total pressure by reference and never converts
//! them in place. Inputs are validated before anything is computed:
//! relative humidity outside 0..=100 is `InvalidValue`, a dry-bulb
//! temperature outside 0..=150 °C is `OutOfRange`, a gauge pressure is
//! `InvalidArgument`.

use psy_core::units::constants::{KELVIN_OFFSET, PA_PER_ATM};
use psy_core::{Pressure, PsyError, PsyResult, Temperature, ensure_relative_humidity};

use crate::saturation::{MAX_TEMPERATURE_C, MIN_TEMPERATURE_C, psat_pa, tsat_from_pa};

/// g/mol
pub const MOLAR_MASS_DRY_AIR: f64 = 28.947;
/// g/mol
pub const MOLAR_MASS_WATER: f64 = 18.0;
/// Water to dry-air molar mass ratio, as used by the humidity ratio.
pub const MOLAR_MASS_RATIO: f64 = 0.6218;

/// Dry-air reference point: sea level at 15 °C.
const REFERENCE_TEMPERATURE_K: f64 = 288.15;
const REFERENCE_TEMPERATURE_C: f64 = 15.0;

/// Below this dry-bulb/dew-point spread `relative_humidity` heats a closed
/// volume instead of comparing saturation pressures directly.
const CLOSED_SYSTEM_SPREAD_C: f64 = 10.0;

/// Validated state in °C, percent and Pa.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AirState {
    pub t_c: f64,
    pub rh: f64,
    pub p_pa: f64,
}

impl AirState {
    pub fn new(temperature: &Temperature, rh: f64, pressure: &Pressure) -> PsyResult<Self> {
        let rh = ensure_relative_humidity(rh)?;
        let t_c = dry_bulb_c(temperature)?;
        let p_pa = total_pressure_pa(pressure)?;
        Ok(Self { t_c, rh, p_pa })
    }

    pub fn t_k(&self) -> f64 {
        self.t_c + KELVIN_OFFSET
    }

    pub fn partial_pressure_pa(&self) -> PsyResult<f64> {
        Ok(self.rh / 100.0 * psat_pa(self.t_c)?)
    }

    pub fn mole_fraction(&self) -> PsyResult<f64> {
        let y = self.partial_pressure_pa()? / self.p_pa;
        if y >= 1.0 {
            return Err(PsyError::OutOfRange {
                what: "vapor mole fraction",
                value: y,
            });
        }
        Ok(y)
    }

    pub fn humidity_ratio(&self) -> PsyResult<f64> {
        let y = self.mole_fraction()?;
        Ok(MOLAR_MASS_RATIO * y / (1.0 - y))
    }

    pub fn mass_fraction(&self) -> PsyResult<f64> {
        let x = self.humidity_ratio()?;
        Ok(x / (1.0 + x))
    }

    pub fn vapor_density(&self) -> PsyResult<f64> {
        // 0.002165 = 18 / (8.314 * 1000)
        Ok(0.002165 * self.partial_pressure_pa()? / self.t_k())
    }

    pub fn humid_volume(&self) -> PsyResult<f64> {
        let y = self.mole_fraction()?;
        // 287.2 = 8.314 * 1000 / 28.947
        Ok(287.2 * self.t_k() / (self.p_pa * (1.0 - y)))
    }

    pub fn humid_density(&self) -> PsyResult<f64> {
        let y = self.mole_fraction()?;
        Ok((1.0 - 0.37817 * y) * 0.0034817 * self.p_pa / self.t_k())
    }

    pub fn humid_molar_mass(&self) -> PsyResult<f64> {
        let y = self.mole_fraction()?;
        Ok((1.0 - y) * MOLAR_MASS_DRY_AIR + y * MOLAR_MASS_WATER)
    }
}

pub(crate) fn dry_bulb_c(temperature: &Temperature) -> PsyResult<f64> {
    let t_c = temperature.as_celsius();
    if !(MIN_TEMPERATURE_C..=MAX_TEMPERATURE_C).contains(&t_c) {
        return Err(PsyError::OutOfRange {
            what: "dry-bulb temperature (°C)",
            value: t_c,
        });
    }
    Ok(t_c)
}

pub(crate) fn total_pressure_pa(pressure: &Pressure) -> PsyResult<f64> {
    if !pressure.is_absolute() {
        return Err(PsyError::invalid_argument(
            "total pressure must be absolute; convert gauge readings with to_absolute()",
        ));
    }
    let p_pa = pressure.as_pa();
    if p_pa <= 0.0 {
        return Err(PsyError::OutOfRange {
            what: "total pressure (Pa)",
            value: p_pa,
        });
    }
    Ok(p_pa)
}

pub(crate) fn dry_air_pressure_pa(t_c: f64) -> PsyResult<f64> {
    let dry_at_reference = PA_PER_ATM - psat_pa(REFERENCE_TEMPERATURE_C)?;
    Ok(dry_at_reference * (t_c + KELVIN_OFFSET) / REFERENCE_TEMPERATURE_K)
}

/// Dew point in °C for a temperature and humidity already in range.
pub(crate) fn dew_point_c(t_c: f64, rh: f64) -> PsyResult<f64> {
    tsat_from_pa(rh / 100.0 * psat_pa(t_c)?)
}

/// Pressure of dry air in a closed volume that held sea-level air at 15 °C.
pub fn dry_air_pressure(temperature: &Temperature) -> PsyResult<Pressure> {
    let t_c = dry_bulb_c(temperature)?;
    Pressure::pascal(dry_air_pressure_pa(t_c)?)
}

/// Dry-air pressure plus the vapor partial pressure, in Pa.
pub fn humid_air_pressure(temperature: &Temperature, rh: f64) -> PsyResult<Pressure> {
    let rh = ensure_relative_humidity(rh)?;
    let t_c = dry_bulb_c(temperature)?;
    let total = dry_air_pressure_pa(t_c)? + rh / 100.0 * psat_pa(t_c)?;
    Pressure::pascal(total)
}

/// Partial pressure of water vapor, in Pa.
pub fn partial_pressure(temperature: &Temperature, rh: f64) -> PsyResult<Pressure> {
    let rh = ensure_relative_humidity(rh)?;
    let t_c = dry_bulb_c(temperature)?;
    Pressure::pascal(rh / 100.0 * psat_pa(t_c)?)
}

/// Temperature at which the air's current vapor content saturates it.
///
/// Saturated air (`rh == 100`) returns `temperature` unchanged. Bone-dry air
/// has no dew point and fails with `OutOfRange`.
pub fn dew_point(temperature: &Temperature, rh: f64) -> PsyResult<Temperature> {
    let rh = ensure_relative_humidity(rh)?;
    let t_c = dry_bulb_c(temperature)?;
    if rh == 100.0 {
        return Ok(*temperature);
    }
    if rh == 0.0 {
        return Err(PsyError::OutOfRange {
            what: "relative humidity for dew point",
            value: rh,
        });
    }
    Temperature::celsius(dew_point_c(t_c, rh)?)
}

/// Same as [`dew_point`].
pub fn saturated_temperature(temperature: &Temperature, rh: f64) -> PsyResult<Temperature> {
    dew_point(temperature, rh)
}

/// Relative humidity in percent from dry-bulb temperature and dew point.
///
/// Within 10 °C of the dew point the vapor is treated as heated at constant
/// mole fraction together with the dry air in a closed volume.
pub fn relative_humidity(temperature: &Temperature, dew_point: &Temperature) -> PsyResult<f64> {
    let t_c = dry_bulb_c(temperature)?;
    let dp_c = dew_point.as_celsius();
    if dp_c > t_c {
        return Err(PsyError::InvalidValue {
            what: "dew point above dry-bulb temperature (°C)",
            value: dp_c,
        });
    }
    let psat_t = psat_pa(t_c)?;
    let psat_dp = psat_pa(dp_c)?;

    if t_c - dp_c < CLOSED_SYSTEM_SPREAD_C {
        let y = psat_dp / (dry_air_pressure_pa(dp_c)? + psat_dp);
        let vapor = dry_air_pressure_pa(t_c)? * y / (1.0 - y);
        Ok(100.0 * vapor / psat_t)
    } else {
        Ok(100.0 * psat_dp / psat_t)
    }
}

/// Moles of vapor per mole of humid air.
pub fn mole_fraction(temperature: &Temperature, rh: f64, pressure: &Pressure) -> PsyResult<f64> {
    AirState::new(temperature, rh, pressure)?.mole_fraction()
}

/// Kilograms of vapor per kilogram of dry air.
#[doc(alias = "absolute_humidity")]
#[doc(alias = "moisture_content")]
pub fn humidity_ratio(temperature: &Temperature, rh: f64, pressure: &Pressure) -> PsyResult<f64> {
    AirState::new(temperature, rh, pressure)?.humidity_ratio()
}

/// Kilograms of vapor per kilogram of humid air.
pub fn mass_fraction(temperature: &Temperature, rh: f64, pressure: &Pressure) -> PsyResult<f64> {
    AirState::new(temperature, rh, pressure)?.mass_fraction()
}

/// Vapor mass per unit volume of humid air, kg/m³.
#[doc(alias = "volumetric_humidity")]
pub fn vapor_density(temperature: &Temperature, rh: f64, pressure: &Pressure) -> PsyResult<f64> {
    AirState::new(temperature, rh, pressure)?.vapor_density()
}

/// Volume of humid air per kilogram of dry air, m³/kg.
pub fn humid_volume(temperature: &Temperature, rh: f64, pressure: &Pressure) -> PsyResult<f64> {
    AirState::new(temperature, rh, pressure)?.humid_volume()
}

/// Humid air mass per unit volume of humid air, kg/m³.
pub fn humid_density(temperature: &Temperature, rh: f64, pressure: &Pressure) -> PsyResult<f64> {
    AirState::new(temperature, rh, pressure)?.humid_density()
}

/// Mean molar mass of humid air, g/mol.
pub fn humid_molar_mass(temperature: &Temperature, rh: f64, pressure: &Pressure) -> PsyResult<f64> {
    AirState::new(temperature, rh, pressure)?.humid_molar_mass()
}
