//! Enthalpy of dry air, water vapor and humid air.
//!
//! Component enthalpies are changes from 298.15 K in J/mol: a mean ideal-gas
//! heat capacity over the interval plus the difference in residual enthalpy
//! from the generalized (Pitzer) correlation,
//! `Hr = ((0.083 - 1.097/Tr^1.6) + ω(0.139 - 0.894/Tr^4.2))·Pr·R·Tc`.
//! Water vapor additionally carries the liquid heating from 0 °C and the
//! latent heat at 25 °C, so every water term is relative to liquid at 0 °C.
//!
//! The per-kilogram results (kJ/kg dry air) are shifted to a 0 °C reference.

use psy_core::units::constants::{KELVIN_OFFSET, PA_PER_BAR};
use psy_core::{Pressure, PsyError, PsyResult, Temperature};

use crate::config::SolverConfig;
use crate::properties::{
    AirState, MOLAR_MASS_DRY_AIR, MOLAR_MASS_WATER, dry_bulb_c, total_pressure_pa,
};
use crate::wet_bulb::ferrel_c;

/// J/(mol·K)
pub const GAS_CONSTANT: f64 = 8.314;

const REFERENCE_K: f64 = 298.15;
/// Heat of vaporization of water at 25 °C, J/mol.
const WATER_LATENT_HEAT: f64 = 43_965.0;
/// Moves the humid-air saturation enthalpy from 25 °C to 0 °C, kJ/kg dry air.
const SATURATION_ZERO_CORRECTION: f64 = 26.353_390_42;
/// Moves the dry-air enthalpy from 25 °C to 0 °C, kJ/kg dry air.
const DRY_AIR_ZERO_CORRECTION: f64 = 26.273_618_984_842_212;

/// Critical point and acentric factor of a gas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalConstants {
    /// Critical temperature [K]
    pub tc_k: f64,
    /// Critical pressure [bar]
    pub pc_bar: f64,
    /// Acentric factor
    pub omega: f64,
}

/// Constituents of humid air.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    /// Water (H₂O)
    H2O,
    /// Oxygen (O₂)
    O2,
    /// Nitrogen (N₂)
    N2,
    /// Argon (Ar)
    Ar,
    /// Carbon dioxide (CO₂)
    CO2,
}

impl Species {
    /// Dry-air mole fractions.
    pub const DRY_AIR: [(Species, f64); 4] = [
        (Species::O2, 0.2095),
        (Species::N2, 0.7809),
        (Species::Ar, 0.0092),
        (Species::CO2, 0.0004),
    ];

    pub fn critical(self) -> CriticalConstants {
        let (tc_k, pc_bar, omega) = match self {
            Species::H2O => (647.3, 220.5, 0.344),
            Species::O2 => (154.6, 50.5, 0.021),
            Species::N2 => (126.2, 33.9, 0.04),
            Species::Ar => (150.8, 48.7, 0.0),
            Species::CO2 => (304.2, 73.8, 0.225),
        };
        CriticalConstants {
            tc_k,
            pc_bar,
            omega,
        }
    }

    /// Mean `Cp/R` between 298.15 K and `t_k`.
    pub fn mean_cp_over_r(self, t_k: f64) -> f64 {
        let (a, b, d) = match self {
            Species::H2O => (3.47, 0.000_725, 12_100.0),
            Species::O2 => (3.639, 0.000_506, 22_700.0),
            Species::N2 => (3.280, 0.000_593, -4_000.0),
            Species::Ar => return 2.5001,
            Species::CO2 => (5.457, 0.001_045, 115_700.0),
        };
        a + b * (t_k + REFERENCE_K) - d / (REFERENCE_K * t_k)
    }

    /// Enthalpy change from 298.15 K, J/mol.
    pub fn enthalpy_change(self, temperature: &Temperature, pressure: &Pressure) -> PsyResult<f64> {
        let t_c = dry_bulb_c(temperature)?;
        let p_bar = total_pressure_pa(pressure)? / PA_PER_BAR;
        Ok(self.enthalpy_change_at(t_c + KELVIN_OFFSET, p_bar))
    }

    pub(crate) fn enthalpy_change_at(self, t_k: f64, p_bar: f64) -> f64 {
        let critical = self.critical();
        let base = match self {
            Species::H2O => water_reference_enthalpy(),
            _ => 0.0,
        };
        base + self.mean_cp_over_r(t_k) * (t_k - REFERENCE_K) * GAS_CONSTANT
            + residual_at(t_k, p_bar, &critical)
            - residual_at(REFERENCE_K, p_bar, &critical)
    }
}

/// Liquid water heated from 0 °C to 25 °C, then evaporated, J/mol.
fn water_reference_enthalpy() -> f64 {
    const T0: f64 = KELVIN_OFFSET;
    let cp_liquid = 8.712 + 0.00125 * (T0 + REFERENCE_K) / 2.0
        - 1.8e-7 * (REFERENCE_K * REFERENCE_K + T0 * T0 + REFERENCE_K * T0);
    cp_liquid * (REFERENCE_K - T0) * GAS_CONSTANT + WATER_LATENT_HEAT
}

fn residual_at(t_k: f64, p_bar: f64, critical: &CriticalConstants) -> f64 {
    let tr = t_k / critical.tc_k;
    let pr = p_bar / critical.pc_bar;
    ((0.083 - 1.097 / tr.powf(1.6)) + critical.omega * (0.139 - 0.894 / tr.powf(4.2)))
        * pr
        * GAS_CONSTANT
        * critical.tc_k
}

/// Residual enthalpy of a gas at `temperature` and `pressure`, J/mol.
pub fn residual_enthalpy(
    temperature: &Temperature,
    pressure: &Pressure,
    critical: &CriticalConstants,
) -> PsyResult<f64> {
    let t_k = temperature.as_kelvin();
    if t_k <= 0.0 {
        return Err(PsyError::OutOfRange {
            what: "residual enthalpy temperature (K)",
            value: t_k,
        });
    }
    let p_bar = total_pressure_pa(pressure)? / PA_PER_BAR;
    Ok(residual_at(t_k, p_bar, critical))
}

fn dry_air_change_at(t_k: f64, p_bar: f64) -> f64 {
    Species::DRY_AIR
        .iter()
        .map(|(species, fraction)| fraction * species.enthalpy_change_at(t_k, p_bar))
        .sum()
}

/// Dry-air enthalpy change from 298.15 K, J/mol.
pub fn dry_air_enthalpy_change(temperature: &Temperature, pressure: &Pressure) -> PsyResult<f64> {
    let t_c = dry_bulb_c(temperature)?;
    let p_bar = total_pressure_pa(pressure)? / PA_PER_BAR;
    Ok(dry_air_change_at(t_c + KELVIN_OFFSET, p_bar))
}

fn humid_change(state: &AirState, y: f64) -> f64 {
    let p_bar = state.p_pa / PA_PER_BAR;
    (1.0 - y) * dry_air_change_at(state.t_k(), p_bar)
        + y * Species::H2O.enthalpy_change_at(state.t_k(), p_bar)
}

/// Humid-air enthalpy change from 298.15 K, J/mol of humid air.
pub fn humid_air_enthalpy_change(
    temperature: &Temperature,
    rh: f64,
    pressure: &Pressure,
) -> PsyResult<f64> {
    let state = AirState::new(temperature, rh, pressure)?;
    let y = state.mole_fraction()?;
    Ok(humid_change(&state, y))
}

fn saturation_enthalpy_at(t_c: f64, p_pa: f64) -> PsyResult<f64> {
    let state = AirState {
        t_c,
        rh: 100.0,
        p_pa,
    };
    let y = state.mole_fraction()?;
    let molar_mass = state.humid_molar_mass()?;
    let mass_fraction = state.mass_fraction()?;
    Ok(SATURATION_ZERO_CORRECTION + humid_change(&state, y) / (molar_mass * (1.0 - mass_fraction)))
}

/// Enthalpy of saturated humid air at `temperature`, kJ/kg dry air.
pub fn humid_saturation_enthalpy(temperature: &Temperature, pressure: &Pressure) -> PsyResult<f64> {
    let t_c = dry_bulb_c(temperature)?;
    let p_pa = total_pressure_pa(pressure)?;
    saturation_enthalpy_at(t_c, p_pa)
}

/// Enthalpy of humid air, kJ/kg dry air.
///
/// Taken as the saturation enthalpy at the (Ferrel) wet-bulb temperature,
/// since adiabatic saturation runs at constant enthalpy.
pub fn humid_air_enthalpy(
    temperature: &Temperature,
    rh: f64,
    pressure: &Pressure,
    config: &SolverConfig,
) -> PsyResult<f64> {
    config.validate()?;
    let state = AirState::new(temperature, rh, pressure)?;
    let wet_bulb_c = ferrel_c(&state, config)?;
    saturation_enthalpy_at(wet_bulb_c, state.p_pa)
}

/// Enthalpy of dry air, kJ/kg dry air.
pub fn dry_air_enthalpy(temperature: &Temperature, pressure: &Pressure) -> PsyResult<f64> {
    Ok(DRY_AIR_ZERO_CORRECTION + dry_air_enthalpy_change(temperature, pressure)? / MOLAR_MASS_DRY_AIR)
}

/// Enthalpy of the water vapor carried by one kilogram of dry air, kJ/kg dry air.
pub fn water_vapor_enthalpy(temperature: &Temperature, rh: f64, pressure: &Pressure) -> PsyResult<f64> {
    let state = AirState::new(temperature, rh, pressure)?;
    let x = state.humidity_ratio()?;
    let p_bar = state.p_pa / PA_PER_BAR;
    Ok(x * Species::H2O.enthalpy_change_at(state.t_k(), p_bar) / MOLAR_MASS_WATER)
}
