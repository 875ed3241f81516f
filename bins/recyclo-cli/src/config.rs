//! Parameter resolution for the command line.
//!
//! A run starts from [`ModelParams::default`], or from a JSON parameter file
//! when `--params` is given, and then applies any individual flags on top.
//! Range checks are left to the engine so the error names the model field.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use recyclo_core::error::ModelError;
use serde::Deserialize;
use recyclo_core::types::{ModelParams, Parameter};

/// Model inputs shared by every computing subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    /// JSON parameter file; missing fields use the defaults.
    #[arg(long, value_name = "FILE")]
    pub params: Option<PathBuf>,

    /// Total weight W in kg.
    #[arg(long, allow_negative_numbers = true)]
    pub weight: Option<f64>,

    /// Recycled fraction R (0 to 1).
    #[arg(long, allow_negative_numbers = true)]
    pub recycled_fraction: Option<f64>,

    /// Property loss per cycle p (0 to 1).
    #[arg(long, allow_negative_numbers = true)]
    pub property_loss: Option<f64>,

    /// Number of recycling cycles n.
    #[arg(long, allow_negative_numbers = true)]
    pub cycles: Option<i64>,

    /// Material loss fraction l (0 to 1).
    #[arg(long, allow_negative_numbers = true)]
    pub material_loss: Option<f64>,

    /// Initial thickness T_0.
    #[arg(long, allow_negative_numbers = true)]
    pub initial_thickness: Option<f64>,
}

impl ParamArgs {
    /// Build the parameter set for this invocation.
    pub fn resolve(&self) -> Result<ModelParams> {
        let mut params = match &self.params {
            Some(path) => load_params(path)?,
            None => ModelParams::default(),
        };

        if let Some(w) = self.weight {
            params.total_weight = w;
        }
        if let Some(r) = self.recycled_fraction {
            params.recycled_fraction = r;
        }
        if let Some(p) = self.property_loss {
            params.property_loss = p;
        }
        if let Some(n) = self.cycles {
            params.cycles = cycle_count(n as f64)?;
        }
        if let Some(l) = self.material_loss {
            params.material_loss = l;
        }
        if let Some(t) = self.initial_thickness {
            params.initial_thickness = t;
        }
        Ok(params)
    }
}

/// Parameter file contents. `cycles` is read as a plain number so negative
/// and fractional counts are reported against `n` rather than as JSON errors.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct ParamsFile {
    total_weight: Option<f64>,
    recycled_fraction: Option<f64>,
    property_loss: Option<f64>,
    cycles: Option<f64>,
    material_loss: Option<f64>,
    initial_thickness: Option<f64>,
}

impl ParamsFile {
    fn overlay(self, mut params: ModelParams) -> Result<ModelParams, ModelError> {
        if let Some(w) = self.total_weight {
            params.total_weight = w;
        }
        if let Some(r) = self.recycled_fraction {
            params.recycled_fraction = r;
        }
        if let Some(p) = self.property_loss {
            params.property_loss = p;
        }
        if let Some(n) = self.cycles {
            params.cycles = cycle_count(n)?;
        }
        if let Some(l) = self.material_loss {
            params.material_loss = l;
        }
        if let Some(t) = self.initial_thickness {
            params.initial_thickness = t;
        }
        Ok(params)
    }
}

/// Narrow a user-supplied cycle count to the model's `u32`.
fn cycle_count(n: f64) -> Result<u32, ModelError> {
    let constraint = if !n.is_finite() || n.fract() != 0.0 {
        "must be a whole number"
    } else if n < 0.0 {
        "must be at least 1"
    } else if n > f64::from(u32::MAX) {
        "must fit in 32 bits"
    } else {
        return Ok(n as u32);
    };
    Err(ModelError::InvalidParameter {
        field: Parameter::Cycles,
        constraint,
        value: n,
    })
}

/// Read a [`ModelParams`] from a JSON file; missing fields use the defaults.
///
/// A cycle count that cannot be narrowed fails with a [`ModelError`] naming
/// `n`, the same error the `--cycles` flag produces.
pub fn load_params(path: &Path) -> Result<ModelParams> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read parameter file: {}", path.display()))?;
    let file: ParamsFile = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid parameter file: {}", path.display()))?;
    Ok(file.overlay(ModelParams::default())?)
}
