//! psy-air: psychrometric properties of humid air.
//!
//! Contains:
//! - saturation (Antoine correlation, forward and inverse)
//! - wet_bulb (Ferrel solver and damped constant-wet-bulb-line solver)
//! - properties (humidity ratios, densities, dew point, partial pressures)
//! - enthalpy (residual-corrected enthalpy correlations)
//! - evaluate (every property of one state in a single record)
//! - config (solver tolerances and iteration caps)
//!
//! Valid for dry-bulb temperatures between 0 and 150 °C at near-atmospheric
//! total pressure. All pressures passed in must be absolute.

pub mod config;
pub mod enthalpy;
pub mod evaluate;
pub mod properties;
pub mod saturation;
pub mod wet_bulb;

pub use config::SolverConfig;
pub use enthalpy::{
    CriticalConstants, Species, dry_air_enthalpy, dry_air_enthalpy_change, humid_air_enthalpy,
    humid_air_enthalpy_change, humid_saturation_enthalpy, residual_enthalpy,
    water_vapor_enthalpy,
};
pub use evaluate::{HumidAirProperties, evaluate};
pub use properties::*;
pub use saturation::{Antoine, saturation_pressure, saturation_temperature};
pub use wet_bulb::{
    WetBulbComparison, calculate_wet_bulb_temperature, compare_wet_bulb_solvers,
    wet_bulb_temperature,
};

pub use psy_core::{Pressure, PsyError, PsyResult, Temperature};
