//! recyclo — Command-line interface for the Recyclo material-flow model.
//!
//! Computes the per-cycle recycling table for a parameter set and prints it
//! as delimited text, JSON, an aligned table, or a text chart.

mod config;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use recyclo_core::traits::FlowModel;
use recyclo_core::types::{FlowTable, ModelParams};
use recyclo_model::RecyclingEngine;
use recyclo_report::chart::{self, Chart, DEFAULT_WIDTH};
use recyclo_report::OutputFormat;
use tracing::info;

use crate::config::ParamArgs;

/// Mechanical recycling calculator.
#[derive(Parser, Debug)]
#[command(name = "recyclo")]
#[command(version, about = "Material flow and savings over repeated recycling cycles")]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the flow table and print it.
    Run(RunArgs),
    /// Compute the flow table and draw one chart.
    Chart(ChartArgs),
    /// Print the default parameter set as JSON.
    Defaults,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    params: ParamArgs,

    /// Output format: csv, tsv, json or table.
    #[arg(short, long, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct ChartArgs {
    /// Chart to draw: total-savings, cumulative-savings or material-flow.
    chart: Chart,

    #[command(flatten)]
    params: ParamArgs,

    /// Width of the longest bar, in characters.
    #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
    width: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format);

    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Chart(args) => draw_chart(args),
        Commands::Defaults => defaults(),
    }
}

/// Resolve parameters and run the engine.
fn compute(args: &ParamArgs) -> Result<FlowTable> {
    let params = args.resolve()?;
    info!(?params, "running model");
    let table = RecyclingEngine::new().compute(&params)?;
    info!(
        records = table.len(),
        cumulative_savings = table.final_cumulative_savings(),
        "model complete"
    );
    Ok(table)
}

/// Print the flow table.
fn run(args: RunArgs) -> Result<()> {
    let table = compute(&args.params)?;
    let out = args
        .format
        .render(&table)
        .with_context(|| format!("Failed to render {} output", args.format))?;
    print!("{out}");
    Ok(())
}

/// Print one text chart.
fn draw_chart(args: ChartArgs) -> Result<()> {
    let table = compute(&args.params)?;
    let out = chart::render_text(args.chart, &table, args.width)
        .with_context(|| format!("Failed to draw chart {}", args.chart))?;
    print!("{out}");
    Ok(())
}

/// Print the default parameter set.
fn defaults() -> Result<()> {
    let json = serde_json::to_string_pretty(&ModelParams::default())
        .context("Failed to serialize default parameters")?;
    println!("{json}");
    Ok(())
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Logs go to stderr so stdout carries only the rendered output. Pass
/// `format = "json"` for structured JSON lines; any other value gives
/// human-readable text. `RUST_LOG` takes precedence over `level_str`.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
