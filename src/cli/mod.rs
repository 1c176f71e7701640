//! Command-line parsing for the health-metrics charting tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the chart/statistics code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::COL_SPO2;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "vitals", version, about = "Health Metrics Charts (spreadsheet-based)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the spreadsheet CSV, render the chart suite, and export summary statistics.
    Run(RunArgs),
    /// Print and export the descriptive statistics of one column.
    Summary(SummaryArgs),
    /// Write a synthetic sample CSV with the spreadsheet's layout.
    Sample(SampleArgs),
}

/// Options for the full charting run.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Spreadsheet CSV export URL (defaults to VITALS_DATA_URL or the built-in sheet).
    #[arg(long, conflicts_with = "input")]
    pub url: Option<String>,

    /// Read the CSV from a local file instead of fetching it.
    #[arg(short = 'i', long)]
    pub input: Option<PathBuf>,

    /// Directory the chart PNGs are written to.
    #[arg(long, default_value = "charts")]
    pub charts_dir: PathBuf,

    /// Directory the summary CSV files are written to.
    #[arg(long, default_value = "summaries")]
    pub summaries_dir: PathBuf,

    /// Number of histogram bins.
    #[arg(long, default_value_t = 20)]
    pub bins: usize,

    /// Number of evenly spaced prediction points on the regression curve.
    #[arg(long, default_value_t = 100)]
    pub curve_points: usize,
}

/// Options for the single-column summary.
#[derive(Debug, Parser, Clone)]
pub struct SummaryArgs {
    /// Spreadsheet CSV export URL (defaults to VITALS_DATA_URL or the built-in sheet).
    #[arg(long, conflicts_with = "input")]
    pub url: Option<String>,

    /// Read the CSV from a local file instead of fetching it.
    #[arg(short = 'i', long)]
    pub input: Option<PathBuf>,

    /// Column to describe.
    #[arg(short = 'c', long, default_value = COL_SPO2)]
    pub column: String,

    /// Directory the summary CSV file is written to.
    #[arg(long, default_value = "summaries")]
    pub summaries_dir: PathBuf,
}

/// Options for sample generation.
#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Output CSV path.
    #[arg(short = 'o', long, default_value = "sample_vitals.csv")]
    pub out: PathBuf,

    /// Number of rows to generate.
    #[arg(long, default_value_t = 240)]
    pub rows: usize,

    /// Random seed for reproducible samples.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}
