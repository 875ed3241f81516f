//! Blend-decay denominator.
//!
//! After `k` cycles of blending a recycled fraction `R` (which lost `p` of its
//! property on every pass) with virgin material, the blend retains
//!
//! ```text
//! denom(k) = (1 - R) * (1 - q^k) / (1 - q) + q^k,    q = R * (1 - p)
//! ```
//!
//! of the virgin property. This is the closed form of `d_k = (1 - R) + q * d_{k-1}`
//! with `d_0 = 1`. `R^k` and `(1 - p)^k` are evaluated with `powf` at every
//! step rather than accumulated across steps.

use recyclo_core::error::ModelError;

/// Evaluate `denom(step)` without checking the result.
///
/// At the removable singularity `R * (1 - p) == 1` the geometric term
/// `(1 - q^k) / (1 - q)` is replaced by its limit `k`.
pub fn denominator(recycled_fraction: f64, property_loss: f64, step: u32) -> f64 {
    let r = recycled_fraction;
    let retention = 1.0 - property_loss;
    let k = f64::from(step);

    let decay = r.powf(k) * retention.powf(k);
    let q = r * retention;
    if q == 1.0 {
        return (1.0 - r) * k + decay;
    }
    (1.0 - r) * (1.0 - decay) / (1.0 - q) + decay
}

/// Evaluate `denom(step)`, failing when the model is undefined.
///
/// A zero or non-finite denominator yields
/// [`ModelError::DegenerateParameters`] tagged with `cycle` (the cycle whose
/// record needed this value) and `step`.
pub fn checked_denominator(
    recycled_fraction: f64,
    property_loss: f64,
    step: u32,
    cycle: u32,
) -> Result<f64, ModelError> {
    let d = denominator(recycled_fraction, property_loss, step);
    if d == 0.0 || !d.is_finite() {
        return Err(ModelError::DegenerateParameters { cycle, step });
    }
    Ok(d)
}
