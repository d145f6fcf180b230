//! Wet-bulb temperature solvers.
//!
//! Two procedures invert the saturation correlation for the wet-bulb state:
//!
//! - [`calculate_wet_bulb_temperature`] iterates the Ferrel psychrometer
//!   equation, `Pw = Psat(Twb) - A·P·(T - Twb)` with
//!   `A = 6.666667e-4·(1 + 0.00115·Twb)`. This is the primary solver. The
//!   fixed-point update is under-relaxed (`SolverConfig::ferrel_relaxation`):
//!   below about 11 °C the plain update overshoots further every step.
//! - [`wet_bulb_temperature`] walks down the constant-wet-bulb line in the
//!   humidity chart with multiplicative steps until the implied relative
//!   humidity reaches saturation. Kept for comparison.
//!
//! The two correlations are different models of the same physics and
//! disagree by a few tenths of a degree at ordinary conditions; the
//! damped solver degrades well beyond that at high temperature and
//! humidity.

use psy_core::{Pressure, PsyError, PsyResult, Temperature};
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::config::SolverConfig;
use crate::properties::{AirState, MOLAR_MASS_RATIO, dew_point_c};
use crate::saturation::{psat_pa, tsat_from_pa};

const FERREL_SEED_FRACTION: f64 = 0.7;
const FERREL_A: f64 = 0.000_666_666_7;
const FERREL_A_SLOPE: f64 = 0.001_15;

const LINE_SEED_FRACTION: f64 = 0.8;
/// Slope of the constant-wet-bulb line, (kg vapor/kg) per °C.
const WET_BULB_LINE_SLOPE: f64 = 0.000_416_67;
const STEP_UP: f64 = 1.1;
const STEP_DOWN: f64 = 0.9;

/// Wet-bulb temperature from the Ferrel psychrometer equation.
///
/// Saturated air (`rh == 100`) returns `dry_bulb` unchanged.
pub fn calculate_wet_bulb_temperature(
    dry_bulb: &Temperature,
    rh: f64,
    pressure: &Pressure,
    config: &SolverConfig,
) -> PsyResult<Temperature> {
    config.validate()?;
    let state = AirState::new(dry_bulb, rh, pressure)?;
    if state.rh == 100.0 {
        return Ok(*dry_bulb);
    }
    Temperature::celsius(ferrel_c(&state, config)?)
}

/// Wet-bulb temperature by following the constant-wet-bulb line.
///
/// Saturated air (`rh == 100`) returns `dry_bulb` unchanged.
pub fn wet_bulb_temperature(
    dry_bulb: &Temperature,
    rh: f64,
    pressure: &Pressure,
    config: &SolverConfig,
) -> PsyResult<Temperature> {
    config.validate()?;
    let state = AirState::new(dry_bulb, rh, pressure)?;
    if state.rh == 100.0 {
        return Ok(*dry_bulb);
    }
    Temperature::celsius(line_c(&state, config)?)
}

pub(crate) fn ferrel_c(state: &AirState, config: &SolverConfig) -> PsyResult<f64> {
    if state.rh == 100.0 {
        return Ok(state.t_c);
    }
    let dry_bulb_vapor_pa = state.partial_pressure_pa()?;
    let mut current = FERREL_SEED_FRACTION * state.t_c;

    for iteration in 1..=config.max_iterations {
        let a = FERREL_A * (1.0 + FERREL_A_SLOPE * current);
        let wet_bulb_vapor_pa = dry_bulb_vapor_pa + a * state.p_pa * (state.t_c - current);
        let next = match tsat_from_pa(wet_bulb_vapor_pa) {
            Ok(next) => next,
            Err(err) => {
                warn!(
                    iteration,
                    dry_bulb_c = state.t_c,
                    rh = state.rh,
                    error = %err,
                    "ferrel solver left the saturation curve"
                );
                return Err(PsyError::DidNotConverge {
                    what: "wet-bulb temperature (Ferrel)",
                    iterations: iteration,
                });
            }
        };
        trace!(iteration, current, next, "ferrel step");

        if (next - current).abs() < config.ferrel_tolerance {
            debug!(
                iterations = iteration,
                dry_bulb_c = state.t_c,
                rh = state.rh,
                wet_bulb_c = next,
                "ferrel solver converged"
            );
            return Ok(next);
        }
        current += config.ferrel_relaxation * (next - current);
    }

    warn!(
        dry_bulb_c = state.t_c,
        rh = state.rh,
        last = current,
        "ferrel solver hit the iteration cap"
    );
    Err(PsyError::DidNotConverge {
        what: "wet-bulb temperature (Ferrel)",
        iterations: config.max_iterations,
    })
}

pub(crate) fn line_c(state: &AirState, config: &SolverConfig) -> PsyResult<f64> {
    if state.rh == 100.0 {
        return Ok(state.t_c);
    }
    let x0 = state.mass_fraction()?;
    let mut trial = LINE_SEED_FRACTION * state.t_c;

    for iteration in 1..=config.max_iterations {
        let x = x0 - WET_BULB_LINE_SLOPE * (trial - state.t_c);
        let y = x / (MOLAR_MASS_RATIO + x);
        let rh_trial = 100.0 * y * state.p_pa / psat_pa(trial)?;
        trace!(iteration, trial, rh_trial, "wet-bulb line step");

        if (rh_trial - 100.0).abs() < config.line_rh_band {
            debug!(iterations = iteration, wet_bulb_c = trial, "line solver hit saturation band");
            return Ok(trial);
        }
        if rh_trial > 100.0 {
            trial *= STEP_UP;
            continue;
        }

        let dew = dew_point_c(trial, rh_trial)?;
        let gap = if trial > dew {
            let gap = trial - dew;
            trial *= STEP_DOWN;
            gap
        } else if trial == dew {
            return Ok(trial);
        } else {
            let gap = dew - trial;
            trial *= STEP_UP;
            gap
        };
        if gap < config.line_gap_tolerance {
            debug!(iterations = iteration, wet_bulb_c = trial, "line solver closed the gap");
            return Ok(trial);
        }
    }

    warn!(
        dry_bulb_c = state.t_c,
        rh = state.rh,
        last = trial,
        "line solver hit the iteration cap"
    );
    Err(PsyError::DidNotConverge {
        what: "wet-bulb temperature (constant wet-bulb line)",
        iterations: config.max_iterations,
    })
}

/// Both wet-bulb estimates for one state, in °C.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WetBulbComparison {
    pub ferrel_c: f64,
    pub line_c: f64,
    /// `|ferrel_c - line_c|`
    pub difference_c: f64,
    /// Whether the difference is within `SolverConfig::agreement_tolerance`
    pub agrees: bool,
}

/// Run both solvers and report how far apart they land.
pub fn compare_wet_bulb_solvers(
    dry_bulb: &Temperature,
    rh: f64,
    pressure: &Pressure,
    config: &SolverConfig,
) -> PsyResult<WetBulbComparison> {
    config.validate()?;
    let state = AirState::new(dry_bulb, rh, pressure)?;
    let ferrel = ferrel_c(&state, config)?;
    let line = line_c(&state, config)?;
    let difference_c = (ferrel - line).abs();
    let agrees = difference_c <= config.agreement_tolerance;
    if !agrees {
        warn!(
            dry_bulb_c = state.t_c,
            rh = state.rh,
            ferrel,
            line,
            difference_c,
            "wet-bulb solvers disagree"
        );
    }
    Ok(WetBulbComparison {
        ferrel_c: ferrel,
        line_c: line,
        difference_c,
        agrees,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use psy_core::TemperatureUnit;

    fn c(t: f64) -> Temperature {
        Temperature::celsius(t).unwrap()
    }

    fn atm() -> Pressure {
        Pressure::pascal(101_325.0).unwrap()
    }

    #[test]
    fn saturated_air_returns_dry_bulb_exactly() {
        let config = SolverConfig::default();
        let t = Temperature::kelvin(303.15).unwrap();
        for result in [
            wet_bulb_temperature(&t, 100.0, &atm(), &config).unwrap(),
            calculate_wet_bulb_temperature(&t, 100.0, &atm(), &config).unwrap(),
        ] {
            assert_eq!(result.unit(), TemperatureUnit::Kelvin);
            assert_eq!(result.value().to_bits(), t.value().to_bits());
        }
    }

    #[test]
    fn ferrel_thirty_degrees_half_saturated() {
        let config = SolverConfig::default();
        let wb = calculate_wet_bulb_temperature(&c(30.0), 50.0, &atm(), &config).unwrap();
        assert_eq!(wb.unit(), TemperatureUnit::Celsius);
        assert!((wb.value() - 22.1417).abs() < 1e-3);
    }

    #[test]
    fn line_thirty_degrees_half_saturated() {
        let config = SolverConfig::default();
        let wb = wet_bulb_temperature(&c(30.0), 50.0, &atm(), &config).unwrap();
        assert!((wb.value() - 21.81).abs() < 0.05);
    }

    #[test]
    fn solvers_agree_at_ordinary_conditions() {
        let config = SolverConfig::default();
        for t in [20.0, 25.0, 30.0] {
            for rh in [30.0, 40.0, 50.0, 60.0, 70.0, 80.0] {
                let cmp = compare_wet_bulb_solvers(&c(t), rh, &atm(), &config).unwrap();
                assert!(cmp.agrees, "{t} °C / {rh} %: {cmp:?}");
                assert!(cmp.ferrel_c < t && cmp.line_c < t);
            }
        }
    }

    // The two correlations land 0.33 °C apart at 30 °C / 50 %, so the
    // 0.01 °C agreement asked of them at this state does not hold; the
    // default tolerance is 0.5 °C instead.
    #[test]
    fn solvers_do_not_agree_to_a_hundredth_at_thirty_degrees_half_saturated() {
        let config = SolverConfig {
            agreement_tolerance: 0.01,
            ..SolverConfig::default()
        };
        let cmp = compare_wet_bulb_solvers(&c(30.0), 50.0, &atm(), &config).unwrap();
        assert!(!cmp.agrees);
        assert!((cmp.difference_c - (cmp.ferrel_c - cmp.line_c).abs()).abs() < 1e-15);
        assert!((cmp.difference_c - 0.331).abs() < 0.05, "{cmp:?}");

        let cmp =
            compare_wet_bulb_solvers(&c(30.0), 50.0, &atm(), &SolverConfig::default()).unwrap();
        assert!(cmp.agrees);
    }

    #[test]
    fn iteration_cap_is_enforced() {
        let config = SolverConfig {
            max_iterations: 1,
            ..SolverConfig::default()
        };
        assert!(matches!(
            calculate_wet_bulb_temperature(&c(30.0), 50.0, &atm(), &config),
            Err(PsyError::DidNotConverge { iterations: 1, .. })
        ));
    }

    #[test]
    fn line_solver_stalls_at_freezing() {
        // the multiplicative steps cannot move a trial of exactly 0 °C
        let config = SolverConfig {
            max_iterations: 200,
            ..SolverConfig::default()
        };
        assert!(matches!(
            wet_bulb_temperature(&c(0.0), 50.0, &atm(), &config),
            Err(PsyError::DidNotConverge { iterations: 200, .. })
        ));
    }

    #[test]
    fn ferrel_converges_for_cold_air() {
        let config = SolverConfig::default();
        let cases = [
            (10.0, 50.0, 5.6353),
            (10.0, 30.0, 3.7075),
            (8.0, 70.0, 5.6396),
            (5.0, 60.0, 2.1830),
            (2.0, 80.0, 0.7889),
            (0.0, 50.0, -2.8207),
            (5.0, 5.0, -2.0969),
        ];
        for (t, rh, expected) in cases {
            let wb = calculate_wet_bulb_temperature(&c(t), rh, &atm(), &config).unwrap();
            assert!((wb.value() - expected).abs() < 1e-3, "{t} °C / {rh} %: {wb:?}");
        }
    }

    #[test]
    fn unrelaxed_ferrel_reports_non_convergence_when_cold() {
        let config = SolverConfig {
            ferrel_relaxation: 1.0,
            ..SolverConfig::default()
        };
        assert!(matches!(
            calculate_wet_bulb_temperature(&c(10.0), 50.0, &atm(), &config),
            Err(PsyError::DidNotConverge { .. })
        ));
        // above the unstable region the plain update still converges
        let wb = calculate_wet_bulb_temperature(&c(30.0), 50.0, &atm(), &config).unwrap();
        assert!((wb.value() - 22.1417).abs() < 1e-3);
    }

    #[test]
    fn input_validation() {
        let config = SolverConfig::default();
        let gauge = Pressure::new(0.0, "Pa", false).unwrap();
        assert!(matches!(
            calculate_wet_bulb_temperature(&c(30.0), 50.0, &gauge, &config),
            Err(PsyError::InvalidArgument { .. })
        ));
        assert!(matches!(
            wet_bulb_temperature(&c(30.0), 120.0, &atm(), &config),
            Err(PsyError::InvalidValue { .. })
        ));
        assert!(matches!(
            wet_bulb_temperature(&c(151.0), 50.0, &atm(), &config),
            Err(PsyError::OutOfRange { .. })
        ));
        let broken = SolverConfig {
            max_iterations: 0,
            ..SolverConfig::default()
        };
        assert!(matches!(
            calculate_wet_bulb_temperature(&c(30.0), 50.0, &atm(), &broken),
            Err(PsyError::InvalidArgument { .. })
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::properties::dew_point;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn ferrel_lies_between_dew_point_and_dry_bulb(t in 1.0_f64..55.0, rh in 10.0_f64..95.0) {
            let config = SolverConfig::default();
            let temperature = Temperature::celsius(t).unwrap();
            let p = Pressure::pascal(101_325.0).unwrap();
            let wb = calculate_wet_bulb_temperature(&temperature, rh, &p, &config).unwrap();
            let dp = dew_point(&temperature, rh).unwrap();
            prop_assert!(wb.value() < t);
            prop_assert!(wb.value() > dp.value());
        }
    }
}
