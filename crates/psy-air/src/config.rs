//! Solver configuration.

use psy_core::{PsyError, PsyResult};
use serde::{Deserialize, Serialize};

/// Wet-bulb solver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Iteration cap shared by both wet-bulb solvers
    pub max_iterations: usize,
    /// Ferrel solver stops when successive estimates differ by less than this (°C)
    pub ferrel_tolerance: f64,
    /// Under-relaxation factor of the Ferrel update, in (0, 1]
    pub ferrel_relaxation: f64,
    /// Half-width of the accepted relative humidity band around 100 % (line solver)
    pub line_rh_band: f64,
    /// Line solver stops when the trial/dew-point gap drops below this (°C)
    pub line_gap_tolerance: f64,
    /// Largest expected difference between the two solvers (°C)
    pub agreement_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            ferrel_tolerance: 1e-6,
            ferrel_relaxation: 0.5,
            line_rh_band: 0.5,
            line_gap_tolerance: 1e-5,
            agreement_tolerance: 0.5,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> PsyResult<()> {
        if self.max_iterations == 0 {
            return Err(PsyError::invalid_argument("max_iterations must be at least 1"));
        }
        if !(self.ferrel_relaxation > 0.0 && self.ferrel_relaxation <= 1.0) {
            return Err(PsyError::invalid_argument(format!(
                "ferrel_relaxation must be in (0, 1], got {}",
                self.ferrel_relaxation
            )));
        }
        let positive = [
            ("ferrel_tolerance", self.ferrel_tolerance),
            ("line_rh_band", self.line_rh_band),
            ("line_gap_tolerance", self.line_gap_tolerance),
            ("agreement_tolerance", self.agreement_tolerance),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PsyError::invalid_argument(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = SolverConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_iterations, 10_000);
    }

    #[test]
    fn rejects_zero_iterations_and_bad_tolerances() {
        let config = SolverConfig {
            max_iterations: 0,
            ..SolverConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SolverConfig {
            ferrel_tolerance: -1.0,
            ..SolverConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SolverConfig {
            line_rh_band: f64::NAN,
            ..SolverConfig::default()
        };
        assert!(config.validate().is_err());

        for relaxation in [0.0, 1.5, f64::NAN] {
            let config = SolverConfig {
                ferrel_relaxation: relaxation,
                ..SolverConfig::default()
            };
            assert!(config.validate().is_err(), "{relaxation}");
        }
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config: SolverConfig = serde_yaml::from_str("max_iterations: 50\n").unwrap();
        assert_eq!(config.max_iterations, 50);
        assert_eq!(config.ferrel_tolerance, 1e-6);
        assert_eq!(config.agreement_tolerance, 0.5);
        assert_eq!(config.ferrel_relaxation, 0.5);
    }
}
