//! Shared charting pipeline used by the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! CSV load -> chart suite -> descriptive statistics export
//!
//! The CLI layer stays focused on argument handling and printing.

use std::fs;
use std::path::{Path, PathBuf};

use crate::chart::{self, ChartStyle};
use crate::data::fetch_csv;
use crate::domain::{COL_BPSYS, COL_CAUSE, COL_HEART_RATE, COL_SPO2, Dataset};
use crate::error::AppError;
use crate::io::{IngestOptions, IngestedData, parse_dataset, read_dataset_file, write_summary_csv};
use crate::report::{RunReport, SkippedChart, format_summary_table};
use crate::stats::describe;

/// Where the pipeline reads its CSV from.
#[derive(Debug, Clone)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    /// Source label for logs and the run report.
    pub fn describe(&self) -> String {
        match self {
            DataSource::Url(url) => url.clone(),
            DataSource::File(path) => path.display().to_string(),
        }
    }
}

/// Everything a `vitals run` needs to know.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: DataSource,
    pub charts_dir: PathBuf,
    pub summaries_dir: PathBuf,
    pub bins: usize,
    pub curve_points: usize,
    pub ingest: IngestOptions,
    pub style: ChartStyle,
}

/// All computed outputs of a single `vitals run`.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub dataset: Dataset,
    pub report: RunReport,
    pub summary_tables: Vec<String>,
}

/// Load and parse the CSV from the configured source.
pub fn load_dataset(
    source: &DataSource,
    options: &IngestOptions,
) -> Result<IngestedData, AppError> {
    match source {
        DataSource::Url(url) => {
            let text = fetch_csv(url)?;
            parse_dataset(&text, options)
        }
        DataSource::File(path) => read_dataset_file(path, options),
    }
}

/// Execute the full charting pipeline and return the computed outputs.
///
/// Charts whose columns are missing or unusable are skipped with a warning;
/// the run fails only on configuration errors, rendering failures, or when
/// nothing at all could be produced.
pub fn run(config: &RunConfig) -> Result<RunOutput, AppError> {
    if config.bins == 0 {
        return Err(AppError::new(2, "Histogram needs at least one bin."));
    }
    if config.curve_points < 2 {
        return Err(AppError::new(
            2,
            "The prediction grid needs at least 2 points.",
        ));
    }

    // 1) Load and parse the CSV.
    let ingest = load_dataset(&config.source, &config.ingest)?;
    for err in &ingest.row_errors {
        log::warn!("line {}: {}", err.line, err.message);
    }
    log::info!(
        "loaded {} rows ({} usable) from {}",
        ingest.rows_read,
        ingest.rows_used,
        config.source.describe()
    );

    let mut report = RunReport {
        source: config.source.describe(),
        rows_read: ingest.rows_read,
        rows_used: ingest.rows_used,
        row_errors: ingest.row_errors.len(),
        ..RunReport::default()
    };
    let data = &ingest.dataset;
    let style = &config.style;

    // 2) Render the chart suite.
    fs::create_dir_all(&config.charts_dir).map_err(|e| {
        AppError::new(
            4,
            format!("Failed to create `{}`: {e}", config.charts_dir.display()),
        )
    })?;
    let dir = config.charts_dir.as_path();

    attempt_chart(&mut report, dir, "violin_heart_rate_by_cause", |path| {
        chart::render_violin(
            data,
            COL_CAUSE,
            COL_HEART_RATE,
            None,
            false,
            "Heart Rate by Cause of Respiratory Imbalance",
            style,
            path,
        )
    })?;
    attempt_chart(&mut report, dir, "violin_oxygen_saturation_by_cause", |path| {
        chart::render_violin(
            data,
            COL_CAUSE,
            COL_SPO2,
            None,
            false,
            "Oxygen Saturation by Cause of Respiratory Imbalance",
            style,
            path,
        )
    })?;
    attempt_chart(&mut report, dir, "hist_heart_rate_by_cause", |path| {
        chart::render_histogram(
            data,
            COL_HEART_RATE,
            Some(COL_CAUSE),
            config.bins,
            "Heart Rate Distribution by Cause",
            style,
            path,
        )
    })?;
    attempt_chart(&mut report, dir, "hist_oxygen_saturation_by_cause", |path| {
        chart::render_histogram(
            data,
            COL_SPO2,
            Some(COL_CAUSE),
            config.bins,
            "Oxygen Saturation Distribution by Cause",
            style,
            path,
        )
    })?;
    attempt_chart(&mut report, dir, "kde_heart_rate_by_cause", |path| {
        chart::render_kde(
            data,
            COL_HEART_RATE,
            Some(COL_CAUSE),
            "Heart Rate Density by Cause",
            style,
            path,
        )
    })?;
    attempt_chart(&mut report, dir, "kde_oxygen_saturation_by_cause", |path| {
        chart::render_kde(
            data,
            COL_SPO2,
            Some(COL_CAUSE),
            "Oxygen Saturation Density by Cause",
            style,
            path,
        )
    })?;
    attempt_chart(&mut report, dir, "regression_bpsys_vs_heart_rate_deg3", |path| {
        chart::render_regression(
            data,
            COL_HEART_RATE,
            COL_BPSYS,
            config.curve_points,
            "Systolic Blood Pressure vs Heart Rate (degree-3 fit)",
            style,
            path,
        )
    })?;
    attempt_chart(
        &mut report,
        dir,
        "regression_oxygen_saturation_vs_heart_rate_deg3",
        |path| {
            chart::render_regression(
                data,
                COL_HEART_RATE,
                COL_SPO2,
                config.curve_points,
                "Oxygen Saturation vs Heart Rate (degree-3 fit)",
                style,
                path,
            )
        },
    )?;
    attempt_chart(&mut report, dir, "box_bpsys_by_cause", |path| {
        chart::render_boxplot(
            data,
            COL_CAUSE,
            COL_BPSYS,
            "Systolic Blood Pressure by Cause",
            style,
            path,
        )
    })?;
    attempt_chart(&mut report, dir, "box_heart_rate_by_cause", |path| {
        chart::render_boxplot(
            data,
            COL_CAUSE,
            COL_HEART_RATE,
            "Heart Rate by Cause",
            style,
            path,
        )
    })?;
    attempt_chart(&mut report, dir, "bar_bpsys_by_cause", |path| {
        chart::render_barplot(
            data,
            COL_CAUSE,
            COL_BPSYS,
            "Mean Systolic Blood Pressure by Cause",
            style,
            path,
        )
    })?;
    attempt_chart(&mut report, dir, "bar_heart_rate_by_cause", |path| {
        chart::render_barplot(
            data,
            COL_CAUSE,
            COL_HEART_RATE,
            "Mean Heart Rate by Cause",
            style,
            path,
        )
    })?;

    // 3) Descriptive statistics, printed by the caller and exported as CSV.
    let mut summary_tables = Vec::new();
    for column in [COL_HEART_RATE, COL_SPO2] {
        match summarize_column(data, column, &config.summaries_dir) {
            Ok((path, table)) => {
                summary_tables.push(table);
                report.summaries.push(path);
            }
            Err(e) => {
                log::error!("summary for `{column}` failed: {e}");
                report.summary_failures.push(format!("{column}: {e}"));
            }
        }
    }

    // 4) A run that produced nothing usable is a failure.
    if report.is_empty() {
        return Err(AppError::new(3, "No charts or summaries could be produced."));
    }

    Ok(RunOutput {
        dataset: ingest.dataset,
        report,
        summary_tables,
    })
}

/// Describe one column, returning the written CSV path and the printable
/// statistics table.
pub fn summarize_column(
    dataset: &Dataset,
    column: &str,
    out_dir: &Path,
) -> Result<(PathBuf, String), AppError> {
    let values = dataset
        .numeric_values(column)
        .ok_or_else(|| AppError::new(3, format!("Column `{column}` is missing or not numeric.")))?;
    if values.is_empty() {
        return Err(AppError::new(
            3,
            format!("Column `{column}` has no usable values."),
        ));
    }
    let summary = describe(&values);
    let path = write_summary_csv(out_dir, column, &summary)?;
    Ok((path, format_summary_table(column, &summary)))
}

/// Render one chart into `dir`, downgrading data errors to a skip entry.
fn attempt_chart(
    report: &mut RunReport,
    dir: &Path,
    name: &str,
    render: impl FnOnce(&Path) -> Result<(), AppError>,
) -> Result<(), AppError> {
    let path = dir.join(format!("{name}.png"));
    match render(&path) {
        Ok(()) => {
            log::info!("wrote {}", path.display());
            report.charts.push(path);
            Ok(())
        }
        Err(e) if e.exit_code() == 3 => {
            log::warn!("skipping {name}: {e}");
            report.skipped.push(SkippedChart {
                name: name.to_string(),
                reason: e.to_string(),
            });
            Ok(())
        }
        Err(e) => Err(e),
    }
}
