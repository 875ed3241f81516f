//! # recyclo-core
//! Foundation types and traits for the Recyclo material-flow model.

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
pub mod validation;
