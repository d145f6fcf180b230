//! Validated temperature quantity.

use std::fmt;

use crate::error::{PsyError, PsyResult};
use crate::numeric::ensure_finite;
use crate::resolver::QuantityKind;
use crate::units::constants::{ABSOLUTE_ZERO_C, ABSOLUTE_ZERO_F, KELVIN_OFFSET};
use crate::units::{SiTemperature, k};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemperatureUnit {
    Celsius,
    Kelvin,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Kelvin => "K",
            Self::Fahrenheit => "F",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "C" => Some(Self::Celsius),
            "K" => Some(Self::Kelvin),
            "F" => Some(Self::Fahrenheit),
            _ => None,
        }
    }

    /// Lowest physically meaningful value in this unit.
    pub fn absolute_zero(self) -> f64 {
        match self {
            Self::Celsius => ABSOLUTE_ZERO_C,
            Self::Kelvin => 0.0,
            Self::Fahrenheit => ABSOLUTE_ZERO_F,
        }
    }

    fn to_celsius(self, value: f64) -> f64 {
        match self {
            Self::Celsius => value,
            Self::Kelvin => value - KELVIN_OFFSET,
            Self::Fahrenheit => (value - 32.0) / 1.8,
        }
    }

    fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Kelvin => celsius + KELVIN_OFFSET,
            Self::Fahrenheit => celsius * 1.8 + 32.0,
        }
    }
}

/// A temperature that is never below absolute zero.
///
/// The value is stored in the unit it was created with (prefix already
/// applied). `to_*` conversions rewrite the value/unit pair in place and are
/// no-ops when the unit already matches; `as_*` accessors leave it untouched.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "serde_impl::RawTemperature"))]
pub struct Temperature {
    value: f64,
    unit: TemperatureUnit,
}

impl Temperature {
    /// Build from a value and a unit token such as `"C"`, `"Kelvin"` or `"mK"`.
    pub fn new(value: f64, unit: &str) -> PsyResult<Self> {
        let value = ensure_finite(value, "temperature")?;
        if unit.trim().is_empty() {
            return Err(PsyError::invalid_argument("temperature unit is empty"));
        }
        let desc = QuantityKind::Temperature.resolve(unit)?;
        let unit = TemperatureUnit::from_symbol(desc.symbol)
            .ok_or_else(|| PsyError::invalid_unit(unit, QuantityKind::Temperature.name()))?;
        Self::from_unit(value * desc.prefix_factor, unit)
    }

    pub fn from_unit(value: f64, unit: TemperatureUnit) -> PsyResult<Self> {
        let value = ensure_finite(value, "temperature")?;
        validate(value, unit)?;
        Ok(Self { value, unit })
    }

    pub fn celsius(value: f64) -> PsyResult<Self> {
        Self::from_unit(value, TemperatureUnit::Celsius)
    }

    pub fn kelvin(value: f64) -> PsyResult<Self> {
        Self::from_unit(value, TemperatureUnit::Kelvin)
    }

    pub fn fahrenheit(value: f64) -> PsyResult<Self> {
        Self::from_unit(value, TemperatureUnit::Fahrenheit)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    /// Replace the value, keeping the unit. On error the instance is unchanged.
    pub fn set_value(&mut self, value: f64) -> PsyResult<()> {
        let value = ensure_finite(value, "temperature")?;
        validate(value, self.unit)?;
        self.value = value;
        Ok(())
    }

    pub fn to_celsius(&mut self) {
        self.convert(TemperatureUnit::Celsius);
    }

    pub fn to_kelvin(&mut self) {
        self.convert(TemperatureUnit::Kelvin);
    }

    pub fn to_fahrenheit(&mut self) {
        self.convert(TemperatureUnit::Fahrenheit);
    }

    fn convert(&mut self, target: TemperatureUnit) {
        if self.unit == target {
            return;
        }
        self.value = self.value_in(target);
        self.unit = target;
    }

    pub fn value_in(&self, target: TemperatureUnit) -> f64 {
        if self.unit == target {
            return self.value;
        }
        target.from_celsius(self.unit.to_celsius(self.value))
    }

    pub fn as_celsius(&self) -> f64 {
        self.value_in(TemperatureUnit::Celsius)
    }

    pub fn as_kelvin(&self) -> f64 {
        self.value_in(TemperatureUnit::Kelvin)
    }

    pub fn as_fahrenheit(&self) -> f64 {
        self.value_in(TemperatureUnit::Fahrenheit)
    }

    pub fn to_si(&self) -> SiTemperature {
        k(self.as_kelvin())
    }
}

fn validate(value: f64, unit: TemperatureUnit) -> PsyResult<()> {
    if value < unit.absolute_zero() {
        return Err(PsyError::InvalidValue {
            what: "temperature below absolute zero",
            value,
        });
    }
    Ok(())
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            TemperatureUnit::Kelvin => write!(f, "{} K", self.value),
            unit => write!(f, "{} °{}", self.value, unit.symbol()),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::{Temperature, TemperatureUnit};
    use crate::error::PsyError;

    #[derive(serde::Deserialize)]
    pub struct RawTemperature {
        value: f64,
        unit: TemperatureUnit,
    }

    impl TryFrom<RawTemperature> for Temperature {
        type Error = PsyError;

        fn try_from(raw: RawTemperature) -> Result<Self, Self::Error> {
            Temperature::from_unit(raw.value, raw.unit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_zero_boundary_celsius() {
        assert!(Temperature::new(-273.15, "C").is_ok());
        assert!(matches!(
            Temperature::new(-273.16, "C"),
            Err(PsyError::InvalidValue { .. })
        ));
    }

    #[test]
    fn absolute_zero_boundary_other_units() {
        assert!(Temperature::new(0.0, "K").is_ok());
        assert!(Temperature::new(-0.001, "K").is_err());
        assert!(Temperature::new(-459.67, "F").is_ok());
        assert!(Temperature::new(-460.0, "F").is_err());
    }

    #[test]
    fn prefix_is_applied_and_dropped() {
        let t = Temperature::new(300.0, "mK").unwrap();
        assert_eq!(t.unit(), TemperatureUnit::Kelvin);
        assert!((t.value() - 0.3).abs() < 1e-12);

        let t = Temperature::new(1.5, "kiloKelvin").unwrap();
        assert_eq!(t.value(), 1500.0);
    }

    #[test]
    fn written_names() {
        assert_eq!(Temperature::new(20.0, "Celcius").unwrap().unit(), TemperatureUnit::Celsius);
        assert_eq!(
            Temperature::new(20.0, "Fahrenheit").unwrap().unit(),
            TemperatureUnit::Fahrenheit
        );
    }

    #[test]
    fn bad_arguments() {
        assert!(matches!(
            Temperature::new(f64::NAN, "C"),
            Err(PsyError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Temperature::new(20.0, ""),
            Err(PsyError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Temperature::new(20.0, "Pa"),
            Err(PsyError::InvalidUnit { .. })
        ));
    }

    #[test]
    fn conversions_in_place() {
        let mut t = Temperature::celsius(100.0).unwrap();
        t.to_fahrenheit();
        assert_eq!(t.unit(), TemperatureUnit::Fahrenheit);
        assert!((t.value() - 212.0).abs() < 1e-12);

        t.to_kelvin();
        assert!((t.value() - 373.15).abs() < 1e-9);

        t.to_celsius();
        assert!((t.value() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn conversion_to_same_unit_is_exact_noop() {
        let mut t = Temperature::celsius(0.1 + 0.2).unwrap();
        let before = t.value();
        t.to_celsius();
        assert_eq!(t.value().to_bits(), before.to_bits());
    }

    #[test]
    fn non_mutating_accessors() {
        let t = Temperature::kelvin(300.0).unwrap();
        assert!((t.as_celsius() - 26.85).abs() < 1e-9);
        assert!((t.as_fahrenheit() - 80.33).abs() < 1e-9);
        assert_eq!(t.unit(), TemperatureUnit::Kelvin);
        assert_eq!(t.value(), 300.0);
    }

    #[test]
    fn set_value_keeps_old_value_on_error() {
        let mut t = Temperature::celsius(25.0).unwrap();
        assert!(t.set_value(-300.0).is_err());
        assert_eq!(t.value(), 25.0);
        t.set_value(30.0).unwrap();
        assert_eq!(t.value(), 30.0);
    }

    #[test]
    fn si_view() {
        use uom::si::thermodynamic_temperature::kelvin;
        let t = Temperature::celsius(25.0).unwrap();
        assert!((t.to_si().get::<kelvin>() - 298.15).abs() < 1e-9);
    }

    #[test]
    fn display() {
        assert_eq!(Temperature::celsius(25.0).unwrap().to_string(), "25 °C");
        assert_eq!(Temperature::kelvin(300.0).unwrap().to_string(), "300 K");
    }
}
