//! Text renderings of a [`FlowTable`].

use std::fmt;
use std::str::FromStr;

use recyclo_core::types::{Column, CycleRecord, FlowTable};

use crate::error::ReportError;

/// Output encoding for a flow table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Comma-separated, header of column keys.
    #[default]
    Csv,
    /// Tab-separated, header of column keys.
    Tsv,
    /// Pretty-printed JSON array of records.
    Json,
    /// Right-aligned columns with human-readable labels.
    Table,
}

impl OutputFormat {
    /// Render `table` in this format.
    pub fn render(self, table: &FlowTable) -> Result<String, ReportError> {
        match self {
            Self::Csv => Ok(render_delimited(table, ',')),
            Self::Tsv => Ok(render_delimited(table, '\t')),
            Self::Json => render_json(table),
            Self::Table => Ok(render_aligned(table, DEFAULT_PRECISION)),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            _ => Err(ReportError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
            Self::Table => "table",
        })
    }
}

/// Decimal places used by [`OutputFormat::Table`].
pub const DEFAULT_PRECISION: usize = 4;

/// Format one cell. The cycle column is an integer, everything else uses the
/// shortest representation that parses back to the same `f64`.
fn cell(column: Column, record: &CycleRecord) -> String {
    match column {
        Column::Cycle => record.cycle.to_string(),
        _ => column.value(record).to_string(),
    }
}

/// One header row of column keys, then one row per cycle.
pub fn render_delimited(table: &FlowTable, delimiter: char) -> String {
    let sep = delimiter.to_string();
    let mut out = Column::ALL
        .iter()
        .map(|c| c.key())
        .collect::<Vec<_>>()
        .join(&sep);
    out.push('\n');

    for record in table {
        let row = Column::ALL
            .iter()
            .map(|&c| cell(c, record))
            .collect::<Vec<_>>()
            .join(&sep);
        out.push_str(&row);
        out.push('\n');
    }
    out
}

/// Fixed-precision table with labelled, right-aligned columns.
pub fn render_aligned(table: &FlowTable, precision: usize) -> String {
    let rows: Vec<Vec<String>> = table
        .iter()
        .map(|record| {
            Column::ALL
                .iter()
                .map(|&c| match c {
                    Column::Cycle => record.cycle.to_string(),
                    _ => format!("{:.*}", precision, c.value(record)),
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = Column::ALL
        .iter()
        .enumerate()
        .map(|(i, c)| {
            rows.iter()
                .map(|row| row[i].len())
                .chain(std::iter::once(c.label().len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = Column::ALL
        .iter()
        .zip(&widths)
        .map(|(c, &w)| format!("{:>w$}", c.label()))
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(v, &w)| format!("{v:>w$}"))
            .collect();
        out.push_str(&line.join("  "));
        out.push('\n');
    }
    out
}

/// Pretty JSON array, one object per cycle.
pub fn render_json(table: &FlowTable) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(table)?)
}
