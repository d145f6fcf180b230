use thiserror::Error;

pub type PsyResult<T> = Result<T, PsyError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PsyError {
    #[error("Invalid argument: {what}")]
    InvalidArgument { what: String },

    #[error("Unknown physical quantity '{name}'")]
    UnknownQuantity { name: String },

    #[error("'{unit}' is not a valid unit of {quantity}")]
    InvalidUnit { unit: String, quantity: String },

    #[error("Invalid value for {what}: {value}")]
    InvalidValue { what: &'static str, value: f64 },

    #[error("Value out of range for {what}: {value}")]
    OutOfRange { what: &'static str, value: f64 },

    #[error("{what} did not converge after {iterations} iterations")]
    DidNotConverge {
        what: &'static str,
        iterations: usize,
    },
}

impl PsyError {
    pub fn invalid_argument(what: impl Into<String>) -> Self {
        Self::InvalidArgument { what: what.into() }
    }

    pub fn invalid_unit(unit: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self::InvalidUnit {
            unit: unit.into(),
            quantity: quantity.into(),
        }
    }
}
