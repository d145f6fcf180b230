//! Full property evaluation of one humid-air state.

use psy_core::{Pressure, PsyResult, Temperature};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::SolverConfig;
use crate::enthalpy::{dry_air_enthalpy, humid_air_enthalpy, water_vapor_enthalpy};
use crate::properties::{AirState, dew_point_c};
use crate::saturation::psat_pa;
use crate::wet_bulb::{ferrel_c, line_c};

/// Every property of one state, in SI-ish engineering units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HumidAirProperties {
    /// °C
    pub dry_bulb_c: f64,
    /// %
    pub relative_humidity: f64,
    /// Pa (absolute)
    pub pressure_pa: f64,
    /// Pa
    pub saturation_pressure_pa: f64,
    /// Pa
    pub partial_pressure_pa: f64,
    /// °C; absent for bone-dry air
    pub dew_point_c: Option<f64>,
    /// °C, Ferrel solver
    pub wet_bulb_c: f64,
    /// °C, constant-wet-bulb-line solver; absent when it fails
    pub wet_bulb_line_c: Option<f64>,
    /// mol vapor / mol humid air
    pub mole_fraction: f64,
    /// kg vapor / kg dry air
    pub humidity_ratio: f64,
    /// kg vapor / kg humid air
    pub mass_fraction: f64,
    /// kg/m³
    pub vapor_density: f64,
    /// m³/kg dry air
    pub humid_volume: f64,
    /// kg/m³
    pub humid_density: f64,
    /// g/mol
    pub humid_molar_mass: f64,
    /// kJ/kg dry air
    pub dry_air_enthalpy: f64,
    /// kJ/kg dry air
    pub water_vapor_enthalpy: f64,
    /// kJ/kg dry air
    pub humid_air_enthalpy: f64,
}

pub fn evaluate(
    temperature: &Temperature,
    rh: f64,
    pressure: &Pressure,
    config: &SolverConfig,
) -> PsyResult<HumidAirProperties> {
    config.validate()?;
    let state = AirState::new(temperature, rh, pressure)?;

    let saturation_pressure_pa = psat_pa(state.t_c)?;
    let partial_pressure_pa = state.partial_pressure_pa()?;
    let y = state.mole_fraction()?;

    let dew_point = if state.rh == 100.0 {
        Some(state.t_c)
    } else if state.rh == 0.0 {
        None
    } else {
        Some(dew_point_c(state.t_c, state.rh)?)
    };

    let wet_bulb_c = ferrel_c(&state, config)?;
    let wet_bulb_line_c = match line_c(&state, config) {
        Ok(t) => Some(t),
        Err(err) => {
            warn!(error = %err, "constant-wet-bulb-line solver failed; reporting Ferrel only");
            None
        }
    };

    let props = HumidAirProperties {
        dry_bulb_c: state.t_c,
        relative_humidity: state.rh,
        pressure_pa: state.p_pa,
        saturation_pressure_pa,
        partial_pressure_pa,
        dew_point_c: dew_point,
        wet_bulb_c,
        wet_bulb_line_c,
        mole_fraction: y,
        humidity_ratio: state.humidity_ratio()?,
        mass_fraction: state.mass_fraction()?,
        vapor_density: state.vapor_density()?,
        humid_volume: state.humid_volume()?,
        humid_density: state.humid_density()?,
        humid_molar_mass: state.humid_molar_mass()?,
        dry_air_enthalpy: dry_air_enthalpy(temperature, pressure)?,
        water_vapor_enthalpy: water_vapor_enthalpy(temperature, rh, pressure)?,
        humid_air_enthalpy: humid_air_enthalpy(temperature, rh, pressure, config)?,
    };
    debug!(dry_bulb_c = props.dry_bulb_c, rh = props.relative_humidity, "state evaluated");
    Ok(props)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties;

    fn c(t: f64) -> Temperature {
        Temperature::celsius(t).unwrap()
    }

    fn atm() -> Pressure {
        Pressure::pascal(101_325.0).unwrap()
    }

    #[test]
    fn record_matches_individual_functions() {
        let config = SolverConfig::default();
        let (t, p) = (c(30.0), atm());
        let props = evaluate(&t, 50.0, &p, &config).unwrap();

        let checks = [
            (props.humidity_ratio, properties::humidity_ratio(&t, 50.0, &p).unwrap()),
            (props.mass_fraction, properties::mass_fraction(&t, 50.0, &p).unwrap()),
            (props.vapor_density, properties::vapor_density(&t, 50.0, &p).unwrap()),
            (props.humid_volume, properties::humid_volume(&t, 50.0, &p).unwrap()),
            (props.humid_density, properties::humid_density(&t, 50.0, &p).unwrap()),
            (props.humid_molar_mass, properties::humid_molar_mass(&t, 50.0, &p).unwrap()),
            (
                props.dew_point_c.unwrap(),
                properties::dew_point(&t, 50.0).unwrap().value(),
            ),
        ];
        for (from_record, direct) in checks {
            assert!((from_record - direct).abs() < 1e-12, "{from_record} vs {direct}");
        }
        assert!((props.wet_bulb_c - 22.1417).abs() < 1e-3);
        assert!(props.wet_bulb_line_c.is_some());
    }

    #[test]
    fn dry_air_has_no_dew_point() {
        let props = evaluate(&c(30.0), 0.0, &atm(), &SolverConfig::default()).unwrap();
        assert_eq!(props.dew_point_c, None);
        assert_eq!(props.humidity_ratio, 0.0);
    }

    #[test]
    fn line_solver_failure_is_not_fatal() {
        // enough for Ferrel at this state, too few for the line solver
        let config = SolverConfig {
            max_iterations: 25,
            ..SolverConfig::default()
        };
        let props = evaluate(&c(30.0), 50.0, &atm(), &config).unwrap();
        assert_eq!(props.wet_bulb_line_c, None);
        assert!((props.wet_bulb_c - 22.1417).abs() < 1e-3);
    }

    #[test]
    fn cold_states_evaluate() {
        let config = SolverConfig::default();
        for (t, rh, expected) in [(10.0, 50.0, 5.6353), (5.0, 60.0, 2.1830), (2.0, 80.0, 0.7889)] {
            let props = evaluate(&c(t), rh, &atm(), &config).unwrap();
            assert!((props.wet_bulb_c - expected).abs() < 1e-3, "{t} °C / {rh} %");
            assert!(props.dew_point_c.unwrap() < props.wet_bulb_c);
            if let Some(line) = props.wet_bulb_line_c {
                assert!((line - props.wet_bulb_c).abs() < config.agreement_tolerance);
            }
            let direct = humid_air_enthalpy(&c(t), rh, &atm(), &config).unwrap();
            assert_eq!(props.humid_air_enthalpy, direct);
        }
    }

    #[test]
    fn wet_bulb_below_freezing_has_no_saturation_enthalpy() {
        let config = SolverConfig::default();
        assert!(matches!(
            evaluate(&c(0.0), 50.0, &atm(), &config),
            Err(psy_core::PsyError::OutOfRange { .. })
        ));
    }

    #[test]
    fn serializes_to_json() {
        let props = evaluate(&c(25.0), 60.0, &atm(), &SolverConfig::default()).unwrap();
        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(json["relative_humidity"], 60.0);
        assert!(json["humid_air_enthalpy"].is_number());
    }
}
