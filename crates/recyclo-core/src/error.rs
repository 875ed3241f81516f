//! Error types for the Recyclo model.
use thiserror::Error;

use crate::types::Parameter;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("invalid parameter {field}: {constraint} (got {value})")] InvalidParameter { field: Parameter, constraint: &'static str, value: f64 },
    #[error("degenerate parameters at cycle {cycle}: blend-decay denominator vanished at step {step}")] DegenerateParameters { cycle: u32, step: u32 },
}

impl ModelError {
    /// The offending input field, if this is a validation failure.
    pub fn field(&self) -> Option<Parameter> {
        match self {
            Self::InvalidParameter { field, .. } => Some(*field),
            Self::DegenerateParameters { .. } => None,
        }
    }

    /// The cycle at which the computation broke down, if it got that far.
    pub fn cycle(&self) -> Option<u32> {
        match self {
            Self::InvalidParameter { .. } => None,
            Self::DegenerateParameters { cycle, .. } => Some(*cycle),
        }
    }
}
