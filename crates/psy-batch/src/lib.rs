//! psy-batch: YAML batch files of humid-air states, evaluated in parallel.

pub mod quantity;
pub mod run;
pub mod schema;
pub mod validate;

pub use quantity::{parse_pressure, parse_temperature, split_quantity};
pub use run::{BatchReport, StateOutcome, StateRecord, evaluate_state, first_error, run_batch};
pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, validate_batch};

use psy_air::SolverConfig;
use std::path::Path;

pub type BatchResult<T> = Result<T, BatchError>;

#[derive(thiserror::Error, Debug)]
pub enum BatchError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Property error: {0}")]
    Property(#[from] psy_core::PsyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn parse_yaml(content: &str) -> BatchResult<BatchFile> {
    let batch: BatchFile = serde_yaml::from_str(content)?;
    validate_batch(&batch)?;
    Ok(batch)
}

pub fn load_yaml(path: &Path) -> BatchResult<BatchFile> {
    let content = std::fs::read_to_string(path)?;
    parse_yaml(&content)
}

/// Solver settings on their own, e.g. for a `--config` flag.
pub fn load_solver_config(path: &Path) -> BatchResult<SolverConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: SolverConfig = serde_yaml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

pub fn to_json(outcomes: &[StateOutcome]) -> BatchResult<String> {
    Ok(serde_json::to_string_pretty(&BatchReport::from_outcomes(
        outcomes,
    ))?)
}

pub fn save_json(path: &Path, outcomes: &[StateOutcome]) -> BatchResult<()> {
    std::fs::write(path, to_json(outcomes)?)?;
    Ok(())
}
