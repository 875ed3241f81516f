//! The three standard charts of a model run.
//!
//! Each chart plots one or more table columns against the cycle index. The
//! data is exposed as [`Series`] so any plotting front end can draw it;
//! [`render_text`] draws a horizontal bar chart for terminals.

use std::fmt;
use std::str::FromStr;

use recyclo_core::types::{Column, FlowTable};

use crate::error::ReportError;

/// Default bar width, in characters, for [`render_text`].
pub const DEFAULT_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chart {
    /// Total savings per cycle.
    TotalSavings,
    /// Running sum of total savings.
    CumulativeSavings,
    /// Used, collected, recycled and downcycled material per cycle.
    MaterialFlow,
}

/// One plotted line: `(cycle, value)` points in cycle order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: &'static str,
    pub points: Vec<(u32, f64)>,
}

impl Series {
    fn max_abs(&self) -> f64 {
        self.points.iter().map(|(_, v)| v.abs()).fold(0.0, f64::max)
    }
}

impl Chart {
    pub const ALL: [Chart; 3] = [Self::TotalSavings, Self::CumulativeSavings, Self::MaterialFlow];

    pub fn title(&self) -> &'static str {
        match self {
            Self::TotalSavings => "Total Savings per Cycle",
            Self::CumulativeSavings => "Cumulative Savings over Cycles",
            Self::MaterialFlow => "Material Flow over Cycles",
        }
    }

    pub fn y_label(&self) -> &'static str {
        match self {
            Self::TotalSavings => "Total Savings (kg)",
            Self::CumulativeSavings => "Cumulative Savings (kg)",
            Self::MaterialFlow => "Material (kg)",
        }
    }

    /// Plotted columns with their legend names.
    pub fn columns(&self) -> &'static [(Column, &'static str)] {
        match self {
            Self::TotalSavings => &[(Column::TotalSavings, "Total Savings")],
            Self::CumulativeSavings => &[(Column::CumulativeSavings, "Cumulative Savings")],
            Self::MaterialFlow => &[
                (Column::MaterialUsed, "Material Used"),
                (Column::MaterialCollected, "Material Collected"),
                (Column::RecycledMaterial, "Recycled Material"),
                (Column::DowncycledMaterial, "Downcycled Material"),
            ],
        }
    }

    /// Extract the plotted series from a table.
    pub fn series(&self, table: &FlowTable) -> Vec<Series> {
        self.columns()
            .iter()
            .map(|&(column, name)| Series {
                name,
                points: table.iter().map(|r| (r.cycle, column.value(r))).collect(),
            })
            .collect()
    }
}

impl FromStr for Chart {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "total-savings" => Ok(Self::TotalSavings),
            "cumulative-savings" => Ok(Self::CumulativeSavings),
            "material-flow" => Ok(Self::MaterialFlow),
            _ => Err(ReportError::UnknownChart(s.to_string())),
        }
    }
}

impl fmt::Display for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TotalSavings => "total-savings",
            Self::CumulativeSavings => "cumulative-savings",
            Self::MaterialFlow => "material-flow",
        })
    }
}

/// Draw `chart` as horizontal bars, one row per cycle and series.
///
/// All series share one scale: the largest absolute value spans `width`
/// characters. Negative values are drawn with `-` instead of `#`.
pub fn render_text(chart: Chart, table: &FlowTable, width: usize) -> Result<String, ReportError> {
    if width == 0 {
        return Err(ReportError::ZeroWidth);
    }

    let series = chart.series(table);
    let scale = series.iter().map(Series::max_abs).fold(0.0, f64::max);
    let cycle_width = table.cycles().to_string().len();

    let mut out = format!("{}\n{} vs Cycle\n", chart.title(), chart.y_label());
    for s in &series {
        out.push_str(&format!("\n[{}]\n", s.name));
        for &(cycle, value) in &s.points {
            let len = if scale > 0.0 {
                (value.abs() / scale * width as f64).round() as usize
            } else {
                0
            };
            let glyph = if value < 0.0 { "-" } else { "#" };
            out.push_str(&format!(
                "{cycle:>cycle_width$} | {:<width$} {value:.2}\n",
                glyph.repeat(len.min(width))
            ));
        }
    }
    Ok(out)
}
