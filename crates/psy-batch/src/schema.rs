//! Batch file schema definitions.

use psy_air::SolverConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchFile {
    pub version: u32,
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub states: Vec<StateDef>,
}

/// One humid-air state. Quantities are strings such as `"30 C"` or `"101.325 kPa"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateDef {
    pub id: String,
    pub dry_bulb: String,
    /// Relative humidity, percent
    pub rh: f64,
    #[serde(default = "default_pressure")]
    pub pressure: String,
    /// Pressure is a gauge reading relative to one standard atmosphere
    #[serde(default)]
    pub gauge: bool,
}

fn default_pressure() -> String {
    "1 atm".to_string()
}
