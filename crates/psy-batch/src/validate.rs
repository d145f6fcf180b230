//! Batch file validation logic.

use crate::quantity::{parse_pressure, parse_temperature};
use crate::schema::{BatchFile, StateDef};
use psy_core::ensure_relative_humidity;
use std::collections::HashSet;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_batch(batch: &BatchFile) -> Result<(), ValidationError> {
    if batch.version != LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: batch.version,
        });
    }

    batch
        .solver
        .validate()
        .map_err(|e| ValidationError::InvalidValue {
            field: "solver".to_string(),
            value: format!("{:?}", batch.solver),
            reason: e.to_string(),
        })?;

    let mut ids = HashSet::new();
    for state in &batch.states {
        if !ids.insert(&state.id) {
            return Err(ValidationError::DuplicateId {
                id: state.id.clone(),
                context: "states".to_string(),
            });
        }
        validate_state(state)?;
    }
    Ok(())
}

fn validate_state(state: &StateDef) -> Result<(), ValidationError> {
    let invalid = |field: &str, value: String, reason: String| ValidationError::InvalidValue {
        field: format!("states[{}].{}", state.id, field),
        value,
        reason,
    };

    if state.id.trim().is_empty() {
        return Err(invalid(
            "id",
            state.id.clone(),
            "state id must not be empty".to_string(),
        ));
    }
    parse_temperature(&state.dry_bulb)
        .map_err(|e| invalid("dry_bulb", state.dry_bulb.clone(), e.to_string()))?;
    parse_pressure(&state.pressure, state.gauge)
        .map_err(|e| invalid("pressure", state.pressure.clone(), e.to_string()))?;
    ensure_relative_humidity(state.rh)
        .map_err(|e| invalid("rh", state.rh.to_string(), e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use psy_air::SolverConfig;

    fn state(id: &str) -> StateDef {
        StateDef {
            id: id.to_string(),
            dry_bulb: "30 C".to_string(),
            rh: 50.0,
            pressure: "1 atm".to_string(),
            gauge: false,
        }
    }

    fn batch(states: Vec<StateDef>) -> BatchFile {
        BatchFile {
            version: LATEST_VERSION,
            solver: SolverConfig::default(),
            states,
        }
    }

    #[test]
    fn accepts_well_formed_batch() {
        assert!(validate_batch(&batch(vec![state("a"), state("b")])).is_ok());
        assert!(validate_batch(&batch(vec![])).is_ok());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = validate_batch(&batch(vec![state("a"), state("a")])).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateId { ref id, .. } if id == "a"));
    }

    #[test]
    fn rejects_other_versions() {
        let mut b = batch(vec![]);
        b.version = 2;
        assert!(matches!(
            validate_batch(&b),
            Err(ValidationError::UnsupportedVersion { version: 2 })
        ));
    }

    #[test]
    fn rejects_unparseable_quantities() {
        let mut s = state("bad-unit");
        s.pressure = "1 furlong".to_string();
        let err = validate_batch(&batch(vec![s])).unwrap_err();
        assert!(err.to_string().contains("states[bad-unit].pressure"));

        let mut s = state("cold");
        s.dry_bulb = "-300 C".to_string();
        assert!(validate_batch(&batch(vec![s])).is_err());

        let mut s = state("wet");
        s.rh = 120.0;
        assert!(validate_batch(&batch(vec![s])).is_err());

        assert!(validate_batch(&batch(vec![state(" ")])).is_err());
    }

    #[test]
    fn rejects_broken_solver_block() {
        let mut b = batch(vec![state("a")]);
        b.solver.max_iterations = 0;
        let err = validate_batch(&b).unwrap_err();
        assert!(err.to_string().contains("solver"));
    }
}
