//! # recyclo-model — Discrete-time material-flow engine for mechanical recycling.
//!
//! All calculations use `f64` arithmetic and are fully deterministic.
//!
//! This crate implements the per-cycle recurrence:
//! - **Blend-decay denominator**: the effective property of a blend of
//!   recycled and virgin material after `k` cycles, evaluated in closed form
//!   with direct exponentiation at every step.
//! - **Thickness compensation**: thickness scales inversely with the blended
//!   property so the part still performs as the virgin one did.
//! - **Look-ahead recycling**: the recycled quantity of cycle `i` is sized by
//!   the thickness of cycle `i + 1`.
//! - **Savings accounting**: per-cycle and cumulative raw material saved.

pub mod blend;
pub mod engine;

pub use blend::{checked_denominator, denominator};
pub use engine::{recycling_model, RecyclingEngine};
