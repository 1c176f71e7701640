//! Summary CSV export.
//!
//! Each summarized column gets its own one-row file named
//! `summary_<column>_spss.csv`, with the statistic names as the header. The
//! layout is meant to be easy to open in spreadsheets or feed to downstream
//! scripts.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::stats::Summary;

/// One summary row as written to the CSV export.
///
/// Statistics that are undefined for the sample size serialize as empty
/// cells rather than a literal `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub variance: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub skewness: Option<f64>,
    pub kurtosis: Option<f64>,
}

impl SummaryRecord {
    pub fn new(column: &str, summary: &Summary) -> Self {
        Self {
            column: column.to_string(),
            count: summary.count,
            mean: finite(summary.mean),
            std: finite(summary.std),
            variance: finite(summary.variance),
            min: finite(summary.min),
            max: finite(summary.max),
            skewness: finite(summary.skewness),
            kurtosis: finite(summary.kurtosis),
        }
    }
}

fn finite(v: f64) -> Option<f64> {
    if v.is_finite() { Some(v) } else { None }
}

/// Write the summary CSV for `column` into `dir`, creating it if needed.
///
/// Returns the path of the written file.
pub fn write_summary_csv(dir: &Path, column: &str, summary: &Summary) -> Result<PathBuf, AppError> {
    fs::create_dir_all(dir).map_err(|e| {
        AppError::new(
            4,
            format!("Failed to create summary directory '{}': {e}", dir.display()),
        )
    })?;

    let path = dir.join(format!("summary_{column}_spss.csv"));
    let mut writer = csv::Writer::from_path(&path).map_err(|e| {
        AppError::new(
            4,
            format!("Failed to create summary CSV '{}': {e}", path.display()),
        )
    })?;

    writer
        .serialize(SummaryRecord::new(column, summary))
        .map_err(|e| {
            AppError::new(
                4,
                format!("Failed to write summary CSV '{}': {e}", path.display()),
            )
        })?;
    writer.flush().map_err(|e| {
        AppError::new(
            4,
            format!("Failed to flush summary CSV '{}': {e}", path.display()),
        )
    })?;

    Ok(path)
}
