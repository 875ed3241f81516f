//! Errors raised while rendering reports.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("json: {0}")] Json(#[from] serde_json::Error),
    #[error("unknown output format: {0}")] UnknownFormat(String),
    #[error("unknown chart: {0}")] UnknownChart(String),
    #[error("chart width must be at least 1")] ZeroWidth,
}
