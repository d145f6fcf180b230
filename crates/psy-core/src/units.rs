// psy-core/src/units.rs

use uom::si::f64::{Pressure as UomPressure, ThermodynamicTemperature as UomTemperature};

// SI views of the validated quantities, for callers working in uom
pub type SiPressure = UomPressure;
pub type SiTemperature = UomTemperature;

#[inline]
pub fn pa(v: f64) -> SiPressure {
    use uom::si::pressure::pascal;
    SiPressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> SiTemperature {
    use uom::si::thermodynamic_temperature::kelvin;
    SiTemperature::new::<kelvin>(v)
}

pub mod constants {
    /// Offset between the Celsius and Kelvin scales.
    pub const KELVIN_OFFSET: f64 = 273.15;
    pub const ABSOLUTE_ZERO_C: f64 = -KELVIN_OFFSET;
    pub const ABSOLUTE_ZERO_F: f64 = -459.67;

    // Pascal per unit; every pressure conversion goes through these.
    pub const PA_PER_BAR: f64 = 100_000.0;
    pub const PA_PER_ATM: f64 = 101_325.0;
    pub const PA_PER_MHG: f64 = 133_322.368_421;
    pub const PA_PER_PSI: f64 = 6_894.733_261;
    pub const PA_PER_TORR: f64 = PA_PER_ATM / 760.0;
}
