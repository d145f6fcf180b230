//! Parallel evaluation of batch states.

use psy_air::{HumidAirProperties, SolverConfig, evaluate};
use psy_core::{PsyError, PsyResult};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::quantity::{parse_pressure, parse_temperature};
use crate::schema::{BatchFile, StateDef};

/// Result for one state; a failed state does not abort the batch.
#[derive(Debug, Clone, PartialEq)]
pub struct StateOutcome {
    pub id: String,
    pub result: PsyResult<HumidAirProperties>,
}

pub fn evaluate_state(state: &StateDef, config: &SolverConfig) -> PsyResult<HumidAirProperties> {
    let dry_bulb = parse_temperature(&state.dry_bulb)?;
    let pressure = parse_pressure(&state.pressure, state.gauge)?;
    evaluate(&dry_bulb, state.rh, &pressure, config)
}

/// Evaluate every state in parallel, preserving file order.
pub fn run_batch(batch: &BatchFile) -> Vec<StateOutcome> {
    info!(states = batch.states.len(), "running batch");
    let outcomes: Vec<StateOutcome> = batch
        .states
        .par_iter()
        .map(|state| StateOutcome {
            id: state.id.clone(),
            result: evaluate_state(state, &batch.solver),
        })
        .collect();

    for outcome in &outcomes {
        if let Err(err) = &outcome.result {
            warn!(id = %outcome.id, error = %err, "state failed");
        }
    }
    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    info!(succeeded = outcomes.len() - failed, failed, "batch finished");
    outcomes
}

/// Serializable view of a finished batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failed: usize,
    pub states: Vec<StateRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StateRecord {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HumidAirProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchReport {
    pub fn from_outcomes(outcomes: &[StateOutcome]) -> Self {
        let states: Vec<StateRecord> = outcomes
            .iter()
            .map(|outcome| match &outcome.result {
                Ok(props) => StateRecord {
                    id: outcome.id.clone(),
                    properties: Some(props.clone()),
                    error: None,
                },
                Err(err) => StateRecord {
                    id: outcome.id.clone(),
                    properties: None,
                    error: Some(err.to_string()),
                },
            })
            .collect();
        let failed = states.iter().filter(|s| s.error.is_some()).count();
        Self {
            succeeded: states.len() - failed,
            failed,
            states,
        }
    }
}

/// First failure, if any; handy when a caller wants all-or-nothing.
pub fn first_error(outcomes: &[StateOutcome]) -> Option<(&str, &PsyError)> {
    outcomes.iter().find_map(|o| match &o.result {
        Err(err) => Some((o.id.as_str(), err)),
        Ok(_) => None,
    })
}
