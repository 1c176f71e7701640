//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the spreadsheet CSV (remote or local)
//! - renders the chart suite
//! - prints and exports descriptive statistics
//! - generates synthetic sample CSVs

use clap::Parser;

use crate::chart::ChartStyle;
use crate::cli::{Command, RunArgs, SampleArgs, SummaryArgs};
use crate::error::AppError;
use crate::io::IngestOptions;

pub mod pipeline;

/// Entry point for the `vitals` binary.
pub fn run() -> Result<(), AppError> {
    env_logger::init();

    // We want `vitals` and `vitals -i data.csv` to behave like `vitals run ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Summary(args) => handle_summary(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args);
    let out = pipeline::run(&config)?;

    for table in &out.summary_tables {
        println!("{table}");
    }
    println!("{}", crate::report::format_run_report(&out.report));
    Ok(())
}

fn handle_summary(args: SummaryArgs) -> Result<(), AppError> {
    let source = data_source(args.url.as_deref(), args.input.as_ref());
    let ingest = pipeline::load_dataset(&source, &IngestOptions::default())?;
    for err in &ingest.row_errors {
        log::warn!("line {}: {}", err.line, err.message);
    }

    let (path, table) =
        pipeline::summarize_column(&ingest.dataset, &args.column, &args.summaries_dir)?;
    println!("{table}");
    println!("Wrote {}", path.display());
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    crate::data::generate_sample_csv(&args.out, args.rows, args.seed)?;
    println!("Wrote {} sample rows to {}", args.rows, args.out.display());
    Ok(())
}

pub fn run_config_from_args(args: &RunArgs) -> pipeline::RunConfig {
    pipeline::RunConfig {
        source: data_source(args.url.as_deref(), args.input.as_ref()),
        charts_dir: args.charts_dir.clone(),
        summaries_dir: args.summaries_dir.clone(),
        bins: args.bins,
        curve_points: args.curve_points,
        ingest: IngestOptions::default(),
        style: ChartStyle::default(),
    }
}

fn data_source(url: Option<&str>, input: Option<&std::path::PathBuf>) -> pipeline::DataSource {
    match input {
        Some(path) => pipeline::DataSource::File(path.clone()),
        None => pipeline::DataSource::Url(crate::data::resolve_url(url)),
    }
}

/// Rewrite argv so `vitals` defaults to `vitals run`.
///
/// Rules:
/// - `vitals`                      -> `vitals run`
/// - `vitals -i data.csv ...`      -> `vitals run -i data.csv ...`
/// - `vitals --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "summary" | "sample");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "run flags".
    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
