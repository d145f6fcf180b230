use psy_core::{
    Pressure, PressureUnit, PsyError, QuantityKind, Temperature, TemperatureUnit, resolve_unit,
};

#[test]
fn absolute_zero_is_the_floor() {
    assert!(Temperature::new(-273.15, "C").is_ok());
    assert!(matches!(
        Temperature::new(-273.16, "C"),
        Err(PsyError::InvalidValue { .. })
    ));
    assert!(Temperature::new(-459.67, "Fahrenheit").is_ok());
}

#[test]
fn gauge_floor_in_pascal() {
    assert!(Pressure::new(-101_500.0, "Pa", false).is_ok());
    assert!(Pressure::new(-101_501.0, "Pa", false).is_err());
}

#[test]
fn resolver_examples() {
    let d = resolve_unit("kPa", "pressure").unwrap();
    assert_eq!((d.prefix_factor, d.symbol, d.kind), (1000.0, "Pa", QuantityKind::Pressure));
    let d = resolve_unit("cm", "length").unwrap();
    assert_eq!((d.prefix_factor, d.symbol, d.kind), (0.01, "m", QuantityKind::Length));
    assert!(matches!(
        resolve_unit("Xz", "pressure"),
        Err(PsyError::InvalidUnit { .. })
    ));
    assert!(matches!(
        resolve_unit("m", "viscosity"),
        Err(PsyError::UnknownQuantity { .. })
    ));
}

#[test]
fn unit_lookup_by_symbol() {
    assert_eq!(PressureUnit::from_symbol("mhg"), Some(PressureUnit::MeterHg));
    assert_eq!(TemperatureUnit::from_symbol("K"), Some(TemperatureUnit::Kelvin));
    assert_eq!(TemperatureUnit::from_symbol("k"), None);
}

#[cfg(feature = "serde")]
mod serde_quantities {
    use super::*;

    #[test]
    fn pressure_json_keeps_unit_and_reference() {
        let p = Pressure::new(2.0, "bar", false).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        let back: Pressure = serde_json::from_str(&json).unwrap();
        assert_eq!(back.unit(), PressureUnit::Bar);
        assert!(!back.is_absolute());
        assert_eq!(back.value(), 2.0);
    }

    #[test]
    fn invalid_quantities_do_not_deserialize() {
        let below_zero = r#"{"value": -1.0, "unit": "Kelvin"}"#;
        assert!(serde_json::from_str::<Temperature>(below_zero).is_err());
        let negative = r#"{"value": -5.0, "unit": "Pascal", "absolute": true}"#;
        assert!(serde_json::from_str::<Pressure>(negative).is_err());
    }
}
