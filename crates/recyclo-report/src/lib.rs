//! # recyclo-report — Presentation of computed flow tables.
//!
//! - [`table`]: delimited, aligned and JSON renderings of a [`FlowTable`].
//! - [`chart`]: the three standard charts (total savings, cumulative
//!   savings, material flow) as data series and as plain-text bar charts.
//!
//! [`FlowTable`]: recyclo_core::types::FlowTable

pub mod chart;
pub mod error;
pub mod table;

pub use chart::Chart;
pub use error::ReportError;
pub use table::OutputFormat;
