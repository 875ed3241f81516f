//! Integration test suite for Recyclo.
//!
//! Exercises the engine end to end through the public trait and checks the
//! rendered reports against the computed tables.

pub mod helpers;
