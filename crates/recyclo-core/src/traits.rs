//! Trait interfaces for the Recyclo model.
//!
//! [`FlowModel`] is the contract between the recurrence engine
//! (recyclo-model implements) and its consumers (report rendering, the CLI).

use crate::error::ModelError;
use crate::types::{FlowTable, ModelParams};

/// Pure computation of a per-cycle material-flow table.
///
/// Implementations hold no mutable state. Every call is independent, so a
/// single model can be shared freely across threads.
pub trait FlowModel: Send + Sync {
    /// Blend-decay denominator `denom(step)` for the given parameters.
    ///
    /// Returns [`ModelError::DegenerateParameters`] when the denominator is
    /// zero or not finite. The reported cycle equals `step`.
    fn blend_denominator(&self, params: &ModelParams, step: u32) -> Result<f64, ModelError>;

    /// Validate `params` and compute the full table for cycles `0..=n`.
    ///
    /// All-or-nothing: on error no partial table is produced.
    fn compute(&self, params: &ModelParams) -> Result<FlowTable, ModelError>;

    /// Cumulative savings after the final cycle.
    ///
    /// Default implementation runs [`compute`](Self::compute).
    fn total_cumulative_savings(&self, params: &ModelParams) -> Result<f64, ModelError> {
        Ok(self.compute(params)?.final_cumulative_savings())
    }
}
