//! Validated pressure quantity, absolute or relative (gauge).

use std::fmt;

use crate::error::{PsyError, PsyResult};
use crate::numeric::ensure_finite;
use crate::resolver::QuantityKind;
use crate::units::constants::{PA_PER_ATM, PA_PER_BAR, PA_PER_MHG, PA_PER_PSI, PA_PER_TORR};
use crate::units::{SiPressure, pa};

/// Deepest gauge pressure accepted, Pa.
pub const RELATIVE_FLOOR_PA: f64 = -101_500.0;

// round-off allowance when a floor value is carried through a conversion
const FLOOR_SLACK: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PressureUnit {
    Pascal,
    Bar,
    Atm,
    MeterHg,
    Psi,
    Torr,
}

impl PressureUnit {
    pub const ALL: [PressureUnit; 6] = [
        PressureUnit::Pascal,
        PressureUnit::Bar,
        PressureUnit::Atm,
        PressureUnit::MeterHg,
        PressureUnit::Psi,
        PressureUnit::Torr,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Pascal => "Pa",
            Self::Bar => "bar",
            Self::Atm => "atm",
            Self::MeterHg => "mHg",
            Self::Psi => "psi",
            Self::Torr => "torr",
        }
    }

    // Both spellings of each canonical symbol are the same unit.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "Pa" | "pa" => Some(Self::Pascal),
            "bar" | "Bar" => Some(Self::Bar),
            "atm" | "Atm" => Some(Self::Atm),
            "mHg" | "mhg" => Some(Self::MeterHg),
            "psi" | "Psi" => Some(Self::Psi),
            "torr" | "Torr" => Some(Self::Torr),
            _ => None,
        }
    }

    /// Pascal in one of this unit.
    pub fn pa_per_unit(self) -> f64 {
        match self {
            Self::Pascal => 1.0,
            Self::Bar => PA_PER_BAR,
            Self::Atm => PA_PER_ATM,
            Self::MeterHg => PA_PER_MHG,
            Self::Psi => PA_PER_PSI,
            Self::Torr => PA_PER_TORR,
        }
    }

    /// Lowest gauge reading accepted in this unit (roughly a full vacuum).
    ///
    /// One floor in Pa, expressed in each unit, so converting a valid gauge
    /// pressure never lands below the target unit's floor.
    pub fn relative_floor(self) -> f64 {
        self.from_pa(RELATIVE_FLOOR_PA)
    }

    pub fn to_pa(self, value: f64) -> f64 {
        value * self.pa_per_unit()
    }

    pub fn from_pa(self, value_pa: f64) -> f64 {
        value_pa / self.pa_per_unit()
    }
}

/// A pressure that is never negative when absolute and never below the
/// unit's vacuum floor when relative.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "serde_impl::RawPressure"))]
pub struct Pressure {
    value: f64,
    unit: PressureUnit,
    absolute: bool,
}

impl Pressure {
    /// Build from a value and a unit token such as `"kPa"`, `"mmHg"` or `"bars"`.
    pub fn new(value: f64, unit: &str, is_absolute: bool) -> PsyResult<Self> {
        let value = ensure_finite(value, "pressure")?;
        if unit.trim().is_empty() {
            return Err(PsyError::invalid_argument("pressure unit is empty"));
        }
        let desc = QuantityKind::Pressure.resolve(unit)?;
        let unit = PressureUnit::from_symbol(desc.symbol)
            .ok_or_else(|| PsyError::invalid_unit(unit, QuantityKind::Pressure.name()))?;
        Self::from_unit(value * desc.prefix_factor, unit, is_absolute)
    }

    pub fn from_unit(value: f64, unit: PressureUnit, is_absolute: bool) -> PsyResult<Self> {
        let value = ensure_finite(value, "pressure")?;
        validate(value, unit, is_absolute)?;
        Ok(Self {
            value,
            unit,
            absolute: is_absolute,
        })
    }

    /// Absolute pressure in Pa.
    pub fn pascal(value: f64) -> PsyResult<Self> {
        Self::from_unit(value, PressureUnit::Pascal, true)
    }

    /// Absolute pressure in standard atmospheres.
    pub fn atmospheres(value: f64) -> PsyResult<Self> {
        Self::from_unit(value, PressureUnit::Atm, true)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> PressureUnit {
        self.unit
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Replace value and reference, keeping the unit. On error nothing changes.
    pub fn set_value(&mut self, value: f64, is_absolute: bool) -> PsyResult<()> {
        let value = ensure_finite(value, "pressure")?;
        validate(value, self.unit, is_absolute)?;
        self.value = value;
        self.absolute = is_absolute;
        Ok(())
    }

    /// Turn a gauge reading into an absolute one against one standard atmosphere.
    pub fn to_absolute(&mut self) -> PsyResult<()> {
        if self.absolute {
            return Ok(());
        }
        let value = self.value + self.unit.from_pa(PA_PER_ATM);
        self.set_value(value, true)
    }

    pub fn to_pa(&mut self) {
        self.convert(PressureUnit::Pascal);
    }

    pub fn to_bar(&mut self) {
        self.convert(PressureUnit::Bar);
    }

    pub fn to_atm(&mut self) {
        self.convert(PressureUnit::Atm);
    }

    pub fn to_psi(&mut self) {
        self.convert(PressureUnit::Psi);
    }

    pub fn to_mhg(&mut self) {
        self.convert(PressureUnit::MeterHg);
    }

    pub fn to_torr(&mut self) {
        self.convert(PressureUnit::Torr);
    }

    pub fn convert(&mut self, target: PressureUnit) {
        if self.unit == target {
            return;
        }
        self.value = self.value_in(target);
        self.unit = target;
    }

    /// Value expressed in `target`, routed through Pascal.
    pub fn value_in(&self, target: PressureUnit) -> f64 {
        if self.unit == target {
            return self.value;
        }
        target.from_pa(self.unit.to_pa(self.value))
    }

    pub fn as_pa(&self) -> f64 {
        self.value_in(PressureUnit::Pascal)
    }

    pub fn to_si(&self) -> SiPressure {
        pa(self.as_pa())
    }
}

fn validate(value: f64, unit: PressureUnit, is_absolute: bool) -> PsyResult<()> {
    if is_absolute && value < 0.0 {
        return Err(PsyError::InvalidValue {
            what: "negative absolute pressure",
            value,
        });
    }
    if !is_absolute && value < unit.relative_floor() * (1.0 + FLOOR_SLACK) {
        return Err(PsyError::InvalidValue {
            what: "relative pressure below vacuum",
            value,
        });
    }
    Ok(())
}

impl fmt::Display for Pressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reference = if self.absolute { "absolute" } else { "relative" };
        write!(f, "{} {} ({reference})", self.value, self.unit.symbol())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::{Pressure, PressureUnit};
    use crate::error::PsyError;

    #[derive(serde::Deserialize)]
    pub struct RawPressure {
        value: f64,
        unit: PressureUnit,
        absolute: bool,
    }

    impl TryFrom<RawPressure> for Pressure {
        type Error = PsyError;

        fn try_from(raw: RawPressure) -> Result<Self, Self::Error> {
            Pressure::from_unit(raw.value, raw.unit, raw.absolute)
        }
    }
}
