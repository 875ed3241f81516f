//! Shared test helpers for integration tests.

use recyclo_core::types::ModelParams;

/// Relative tolerance for comparisons against reference values.
pub const REL_TOL: f64 = 1e-9;

/// Build a parameter set, keeping the default weight and thickness.
pub fn scenario(r: f64, p: f64, n: u32, l: f64) -> ModelParams {
    ModelParams {
        recycled_fraction: r,
        property_loss: p,
        cycles: n,
        material_loss: l,
        ..ModelParams::default()
    }
}

/// True when `actual` is within [`REL_TOL`] of `expected` (absolute near zero).
pub fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= REL_TOL * expected.abs().max(1.0)
}

/// Assert [`approx`] with a readable message.
#[track_caller]
pub fn assert_approx(actual: f64, expected: f64, what: &str) {
    assert!(
        approx(actual, expected),
        "{what}: got {actual}, expected {expected}"
    );
}
