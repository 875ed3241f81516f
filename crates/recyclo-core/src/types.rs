//! Parameter and result types for the material-flow model.
//!
//! [`ModelParams`] carries the six scalar inputs. The engine turns them into a
//! [`FlowTable`]: one [`CycleRecord`] per cycle `0..=n`, in cycle order.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::constants::{
    COLUMN_COUNT, DEFAULT_CYCLES, DEFAULT_INITIAL_THICKNESS, DEFAULT_MATERIAL_LOSS,
    DEFAULT_PROPERTY_LOSS, DEFAULT_RECYCLED_FRACTION, DEFAULT_TOTAL_WEIGHT,
};

/// Identifies one of the six model inputs.
///
/// `Display` prints the symbol used in the model equations.
///
/// ```
/// use recyclo_core::types::Parameter;
/// assert_eq!(Parameter::RecycledFraction.to_string(), "R");
/// assert_eq!(Parameter::InitialThickness.to_string(), "T_0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    /// `W`: total weight.
    TotalWeight,
    /// `R`: recycled fraction.
    RecycledFraction,
    /// `p`: property loss per cycle.
    PropertyLoss,
    /// `n`: number of cycles.
    Cycles,
    /// `l`: material loss fraction.
    MaterialLoss,
    /// `T_0`: initial thickness.
    InitialThickness,
}

impl Parameter {
    /// All parameters in validation order.
    pub const ALL: [Parameter; 6] = [
        Self::TotalWeight,
        Self::RecycledFraction,
        Self::PropertyLoss,
        Self::Cycles,
        Self::MaterialLoss,
        Self::InitialThickness,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::TotalWeight => "W",
            Self::RecycledFraction => "R",
            Self::PropertyLoss => "p",
            Self::Cycles => "n",
            Self::MaterialLoss => "l",
            Self::InitialThickness => "T_0",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Inputs to a single model run.
///
/// Missing fields in a serialized parameter set fall back to [`Default`],
/// which matches the stock calculator settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    /// `W`, kilograms. Must be finite and non-negative.
    pub total_weight: f64,
    /// `R`, in `[0, 1]`.
    pub recycled_fraction: f64,
    /// `p`, in `[0, 1]`.
    pub property_loss: f64,
    /// `n`, at least 1.
    pub cycles: u32,
    /// `l`, in `[0, 1]`.
    pub material_loss: f64,
    /// `T_0`. Must be finite and non-negative.
    pub initial_thickness: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            total_weight: DEFAULT_TOTAL_WEIGHT,
            recycled_fraction: DEFAULT_RECYCLED_FRACTION,
            property_loss: DEFAULT_PROPERTY_LOSS,
            cycles: DEFAULT_CYCLES,
            material_loss: DEFAULT_MATERIAL_LOSS,
            initial_thickness: DEFAULT_INITIAL_THICKNESS,
        }
    }
}

impl ModelParams {
    /// `pc = 1 - p`: fraction of the property kept through one cycle.
    pub fn property_retention(&self) -> f64 {
        1.0 - self.property_loss
    }

    /// `1 - l`: fraction of used material that is collected.
    pub fn collection_rate(&self) -> f64 {
        1.0 - self.material_loss
    }

    /// Number of records a successful run produces (`n + 1`).
    pub fn record_count(&self) -> usize {
        (self.cycles as usize).saturating_add(1)
    }

    /// Raw value of a parameter, widened to `f64`.
    pub fn value_of(&self, param: Parameter) -> f64 {
        match param {
            Parameter::TotalWeight => self.total_weight,
            Parameter::RecycledFraction => self.recycled_fraction,
            Parameter::PropertyLoss => self.property_loss,
            Parameter::Cycles => f64::from(self.cycles),
            Parameter::MaterialLoss => self.material_loss,
            Parameter::InitialThickness => self.initial_thickness,
        }
    }
}

/// Material quantities for one cycle. Weights are in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CycleRecord {
    pub cycle: u32,
    pub property_of_raw_material: f64,
    pub thickness: f64,
    pub material_used: f64,
    pub material_collected: f64,
    pub property_of_collected: f64,
    /// Collected material fed back as recycled input to the next cycle.
    pub recycled_material: f64,
    pub downcycled_material: f64,
    pub raw_material_saved_x1: f64,
    pub raw_material_saved_x2: f64,
    pub total_savings: f64,
    pub cumulative_savings: f64,
}

/// One output column of a [`FlowTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Cycle,
    PropertyOfRawMaterial,
    Thickness,
    MaterialUsed,
    MaterialCollected,
    PropertyOfCollected,
    RecycledMaterial,
    DowncycledMaterial,
    RawMaterialSavedX1,
    RawMaterialSavedX2,
    TotalSavings,
    CumulativeSavings,
}

impl Column {
    /// All columns in table order.
    pub const ALL: [Column; COLUMN_COUNT] = [
        Self::Cycle,
        Self::PropertyOfRawMaterial,
        Self::Thickness,
        Self::MaterialUsed,
        Self::MaterialCollected,
        Self::PropertyOfCollected,
        Self::RecycledMaterial,
        Self::DowncycledMaterial,
        Self::RawMaterialSavedX1,
        Self::RawMaterialSavedX2,
        Self::TotalSavings,
        Self::CumulativeSavings,
    ];

    /// Machine-readable header used for delimited output.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Cycle => "cycle",
            Self::PropertyOfRawMaterial => "property_of_raw_material",
            Self::Thickness => "thickness",
            Self::MaterialUsed => "material_used",
            Self::MaterialCollected => "material_collected",
            Self::PropertyOfCollected => "property_of_collected",
            Self::RecycledMaterial => "recycled_material",
            Self::DowncycledMaterial => "downcycled_material",
            Self::RawMaterialSavedX1 => "raw_material_saved_x1",
            Self::RawMaterialSavedX2 => "raw_material_saved_x2",
            Self::TotalSavings => "total_savings",
            Self::CumulativeSavings => "cumulative_savings",
        }
    }

    /// Human-readable header, with units.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cycle => "Cycle",
            Self::PropertyOfRawMaterial => "Property of Raw Material",
            Self::Thickness => "Thickness",
            Self::MaterialUsed => "Material Used (kg)",
            Self::MaterialCollected => "Material Collected (kg)",
            Self::PropertyOfCollected => "Property of Collected",
            Self::RecycledMaterial => "Recycled Material (kg)",
            Self::DowncycledMaterial => "Downcycled Material (kg)",
            Self::RawMaterialSavedX1 => "Raw Material Saved for X1 (kg)",
            Self::RawMaterialSavedX2 => "Raw Material Saved for X2 (kg)",
            Self::TotalSavings => "Total Savings (kg)",
            Self::CumulativeSavings => "Cumulative Savings (kg)",
        }
    }

    /// Read this column from a record.
    pub fn value(&self, record: &CycleRecord) -> f64 {
        match self {
            Self::Cycle => f64::from(record.cycle),
            Self::PropertyOfRawMaterial => record.property_of_raw_material,
            Self::Thickness => record.thickness,
            Self::MaterialUsed => record.material_used,
            Self::MaterialCollected => record.material_collected,
            Self::PropertyOfCollected => record.property_of_collected,
            Self::RecycledMaterial => record.recycled_material,
            Self::DowncycledMaterial => record.downcycled_material,
            Self::RawMaterialSavedX1 => record.raw_material_saved_x1,
            Self::RawMaterialSavedX2 => record.raw_material_saved_x2,
            Self::TotalSavings => record.total_savings,
            Self::CumulativeSavings => record.cumulative_savings,
        }
    }
}

/// Ordered, immutable result of a model run.
///
/// Record `i` always describes cycle `i`. There is no way to mutate a table
/// once it is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FlowTable {
    records: Vec<CycleRecord>,
}

impl FlowTable {
    /// Wrap a finished record sequence.
    ///
    /// Returns `None` unless the sequence is non-empty and its `cycle`
    /// fields run exactly `0, 1, ..., len - 1`.
    pub fn from_records(records: Vec<CycleRecord>) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let ordered = records
            .iter()
            .enumerate()
            .all(|(i, r)| r.cycle as usize == i);
        ordered.then_some(Self { records })
    }

    pub fn records(&self) -> &[CycleRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CycleRecord> {
        self.records.iter()
    }

    /// Number of records, `n + 1`.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a table produced by the engine.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The cycle count `n` this table was computed for.
    pub fn cycles(&self) -> u32 {
        self.records.last().map_or(0, |r| r.cycle)
    }

    pub fn get(&self, cycle: usize) -> Option<&CycleRecord> {
        self.records.get(cycle)
    }

    pub fn last(&self) -> Option<&CycleRecord> {
        self.records.last()
    }

    /// All values of one column, in cycle order.
    pub fn column(&self, column: Column) -> Vec<f64> {
        self.records.iter().map(|r| column.value(r)).collect()
    }

    /// Cumulative savings at the final cycle.
    pub fn final_cumulative_savings(&self) -> f64 {
        self.records.last().map_or(0.0, |r| r.cumulative_savings)
    }
}

/// Append-only builder used while the recurrence runs.
///
/// Earlier records stay readable so later cycles can refer back to them.
#[derive(Debug, Default)]
pub struct FlowTableBuilder {
    records: Vec<CycleRecord>,
}

impl FlowTableBuilder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Cycle index the next pushed record must carry.
    pub fn next_cycle(&self) -> u32 {
        self.records.len() as u32
    }

    /// A record pushed earlier, by cycle index.
    pub fn get(&self, cycle: u32) -> Option<&CycleRecord> {
        self.records.get(cycle as usize)
    }

    /// Append a fully computed record.
    pub fn push(&mut self, record: CycleRecord) {
        debug_assert_eq!(
            record.cycle,
            self.next_cycle(),
            "records must be pushed in cycle order"
        );
        self.records.push(record);
    }

    pub fn finish(self) -> FlowTable {
        FlowTable {
            records: self.records,
        }
    }
}

impl Index<usize> for FlowTable {
    type Output = CycleRecord;

    fn index(&self, cycle: usize) -> &CycleRecord {
        &self.records[cycle]
    }
}

impl<'a> IntoIterator for &'a FlowTable {
    type Item = &'a CycleRecord;
    type IntoIter = std::slice::Iter<'a, CycleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
