//! Model constants. Weights are in kilograms, fractions are in `[0, 1]`.

/// Default total weight `W` in kilograms.
pub const DEFAULT_TOTAL_WEIGHT: f64 = 1000.0;

/// Default recycled fraction `R`.
pub const DEFAULT_RECYCLED_FRACTION: f64 = 0.5;

/// Default property loss per cycle `p`.
pub const DEFAULT_PROPERTY_LOSS: f64 = 0.2;

/// Default number of recycling cycles `n`.
pub const DEFAULT_CYCLES: u32 = 10;

/// Default material loss fraction `l`.
pub const DEFAULT_MATERIAL_LOSS: f64 = 0.2;

/// Default initial thickness `T_0`.
pub const DEFAULT_INITIAL_THICKNESS: f64 = 1.0;

/// Smallest accepted cycle count.
pub const MIN_CYCLES: u32 = 1;

/// Largest accepted cycle count; the look-ahead step `n + 1` must fit in `u32`.
pub const MAX_CYCLES: u32 = u32::MAX - 1;

/// Upper bound on records reserved before a run starts.
pub const PREALLOCATED_RECORDS: usize = 1024;

/// Property of the raw material entering cycle 0 (pure virgin material).
pub const VIRGIN_PROPERTY: f64 = 1.0;

/// Number of columns in a rendered flow table.
pub const COLUMN_COUNT: usize = 12;
