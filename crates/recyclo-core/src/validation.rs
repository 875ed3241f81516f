//! Domain checks for model inputs.
//!
//! Every check runs before any computation. Fields are checked in the order
//! `W, R, p, n, l, T_0` and the first violation is reported.

use crate::constants::{MAX_CYCLES, MIN_CYCLES};
use crate::error::ModelError;
use crate::types::{ModelParams, Parameter};

const UNIT_INTERVAL: &str = "must lie within [0, 1]";
const NON_NEGATIVE: &str = "must be a finite, non-negative number";
const AT_LEAST_ONE: &str = "must be at least 1";

/// Constraint reported when `n` leaves no room for the look-ahead step.
pub const CYCLES_TOO_LARGE: &str = "must be below 4294967295";

/// Check that a real-valued input is finite and `>= 0`.
fn check_non_negative(field: Parameter, value: f64) -> Result<(), ModelError> {
    // NaN fails both comparisons and lands here too.
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ModelError::InvalidParameter {
            field,
            constraint: NON_NEGATIVE,
            value,
        })
    }
}

/// Check that a fraction lies in the closed unit interval.
fn check_fraction(field: Parameter, value: f64) -> Result<(), ModelError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ModelError::InvalidParameter {
            field,
            constraint: UNIT_INTERVAL,
            value,
        })
    }
}

/// Validate all six inputs against their declared domains.
///
/// ```
/// use recyclo_core::types::{ModelParams, Parameter};
/// use recyclo_core::validation::validate_params;
///
/// assert!(validate_params(&ModelParams::default()).is_ok());
///
/// let bad = ModelParams { recycled_fraction: 1.5, ..ModelParams::default() };
/// let err = validate_params(&bad).unwrap_err();
/// assert_eq!(err.field(), Some(Parameter::RecycledFraction));
/// ```
pub fn validate_params(params: &ModelParams) -> Result<(), ModelError> {
    check_non_negative(Parameter::TotalWeight, params.total_weight)?;
    check_fraction(Parameter::RecycledFraction, params.recycled_fraction)?;
    check_fraction(Parameter::PropertyLoss, params.property_loss)?;
    if params.cycles < MIN_CYCLES {
        return Err(ModelError::InvalidParameter {
            field: Parameter::Cycles,
            constraint: AT_LEAST_ONE,
            value: f64::from(params.cycles),
        });
    }
    if params.cycles > MAX_CYCLES {
        return Err(ModelError::InvalidParameter {
            field: Parameter::Cycles,
            constraint: CYCLES_TOO_LARGE,
            value: f64::from(params.cycles),
        });
    }
    check_fraction(Parameter::MaterialLoss, params.material_loss)?;
    check_non_negative(Parameter::InitialThickness, params.initial_thickness)?;
    Ok(())
}

impl ModelParams {
    /// See [`validate_params`].
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_params(self)
    }
}
