//! CSV ingest and normalization.
//!
//! This module turns a raw spreadsheet export into a typed [`Dataset`].
//!
//! Design goals:
//! - **Column typing**: a column is numeric when every non-empty cell parses
//!   as a number, text otherwise
//! - **Decimal-comma repair** for the oxygen saturation column (`"98,6"`)
//! - **Row-level tolerance**: malformed CSV rows are skipped and reported,
//!   never silently dropped
//! - **Separation of concerns**: no chart or statistics logic here

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{COL_SPO2, Column, Dataset};
use crate::error::AppError;

/// Parsing conventions for the run.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Column whose cells may use a decimal comma instead of a point.
    ///
    /// The source spreadsheet stores oxygen saturation as text like `"98,6"`;
    /// cells in this column are repaired to `98.6` before parsing. The column
    /// must exist, and every non-empty cell in it must parse after repair.
    pub decimal_comma_column: String,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            decimal_comma_column: COL_SPO2.to_string(),
        }
    }
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: the typed dataset + counters + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub dataset: Dataset,
    pub rows_read: usize,
    pub rows_used: usize,
    pub row_errors: Vec<RowError>,
}

/// Parse CSV text into a [`Dataset`].
pub fn parse_dataset(text: &str, options: &IngestOptions) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::new(3, format!("Failed to read CSV headers: {e}")))?
        .iter()
        .map(normalize_header_name)
        .collect();

    ensure_unique_headers(&headers)?;

    if !headers.iter().any(|h| h == &options.decimal_comma_column) {
        return Err(AppError::new(
            3,
            format!("Missing required column `{}`.", options.decimal_comma_column),
        ));
    }

    let mut rows: Vec<StringRecord> = Vec::new();
    let mut lines: Vec<usize> = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        match result {
            Ok(record) => {
                rows.push(record);
                lines.push(line);
            }
            Err(e) => row_errors.push(RowError {
                line,
                message: format!("CSV parse error: {e}"),
            }),
        }
    }

    let rows_used = rows.len();
    if rows_used == 0 {
        return Err(AppError::new(3, "No data rows found in the CSV input."));
    }

    let mut columns = Vec::new();
    for (col_idx, name) in headers.iter().enumerate() {
        // Unnamed columns (trailing separators, spreadsheet padding) carry no
        // addressable data; drop them.
        if name.is_empty() {
            continue;
        }
        let cells: Vec<&str> = rows
            .iter()
            .map(|record| record.get(col_idx).unwrap_or(""))
            .collect();

        if *name == options.decimal_comma_column {
            let values = parse_decimal_comma_column(name, &cells, &lines)?;
            columns.push(Column::numeric(name.clone(), values));
        } else {
            columns.push(build_column(name, &cells));
        }
    }

    Ok(IngestedData {
        dataset: Dataset::new(columns),
        rows_read,
        rows_used,
        row_errors,
    })
}

/// Read and parse a CSV file from disk.
pub fn read_dataset_file(path: &Path, options: &IngestOptions) -> Result<IngestedData, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::new(2, format!("Failed to read CSV '{}': {e}", path.display())))?;
    parse_dataset(&text, options)
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿Patient_ID"). If we don't strip it, column lookups
    // silently miss the first column.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn ensure_unique_headers(headers: &[String]) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for name in headers {
        if name.is_empty() {
            continue;
        }
        if !seen.insert(name.as_str()) {
            return Err(AppError::new(
                3,
                format!("Duplicate column `{name}` in CSV header."),
            ));
        }
    }
    Ok(())
}

fn parse_decimal_comma_column(
    name: &str,
    cells: &[&str],
    lines: &[usize],
) -> Result<Vec<Option<f64>>, AppError> {
    let mut values = Vec::with_capacity(cells.len());
    for (cell, line) in cells.iter().zip(lines.iter()) {
        if cell.is_empty() {
            values.push(None);
            continue;
        }
        match cell.replace(',', ".").parse::<f64>() {
            Ok(v) if v.is_finite() => values.push(Some(v)),
            Ok(_) => values.push(None),
            Err(_) => {
                return Err(AppError::new(
                    3,
                    format!("Invalid `{name}` value '{cell}' on line {line}."),
                ));
            }
        }
    }
    Ok(values)
}

fn build_column(name: &str, cells: &[&str]) -> Column {
    let mut numeric = Vec::with_capacity(cells.len());
    for cell in cells {
        if cell.is_empty() {
            numeric.push(None);
            continue;
        }
        match cell.parse::<f64>() {
            Ok(v) if v.is_finite() => numeric.push(Some(v)),
            Ok(_) => numeric.push(None),
            Err(_) => {
                return Column::text(name, cells.iter().map(|c| c.to_string()).collect());
            }
        }
    }
    Column::numeric(name, numeric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::COL_HEART_RATE;

    const SAMPLE: &str = "\
Causes_Respiratory_Imbalance,Heart_Rate,Oxygen_Saturation
Asthma,96,\"98,6\"
COPD,88,95.2
Asthma,102,\"91,4\"
";

    #[test]
    fn parses_types_and_repairs_decimal_commas() {
        let data = parse_dataset(SAMPLE, &IngestOptions::default()).unwrap();
        assert_eq!(data.rows_read, 3);
        assert_eq!(data.rows_used, 3);
        assert!(data.row_errors.is_empty());

        let ds = &data.dataset;
        assert_eq!(ds.n_rows(), 3);
        assert!(ds.text_values("Causes_Respiratory_Imbalance").is_some());
        assert_eq!(ds.numeric_values(COL_HEART_RATE).unwrap(), vec![96.0, 88.0, 102.0]);
        assert_eq!(
            ds.numeric_values(COL_SPO2).unwrap(),
            vec![98.6, 95.2, 91.4]
        );
    }

    #[test]
    fn strips_bom_from_first_header() {
        let text = "\u{feff}Oxygen_Saturation,Heart_Rate\n\"97,0\",80\n";
        let data = parse_dataset(text, &IngestOptions::default()).unwrap();
        assert!(data.dataset.has_column(COL_SPO2));
        assert_eq!(data.dataset.numeric_values(COL_SPO2).unwrap(), vec![97.0]);
    }

    #[test]
    fn missing_normalized_column_is_a_load_error() {
        let text = "Heart_Rate\n96\n";
        let err = parse_dataset(text, &IngestOptions::default()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("Oxygen_Saturation"));
    }

    #[test]
    fn unparseable_decimal_comma_cell_reports_its_line() {
        let text = "Oxygen_Saturation\n\"98,6\"\nabc\n";
        let err = parse_dataset(text, &IngestOptions::default()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("line 3"), "got: {err}");
    }

    #[test]
    fn duplicate_header_is_rejected() {
        let text = "Oxygen_Saturation,Heart_Rate,Heart_Rate\n\"98,6\",80,81\n";
        let err = parse_dataset(text, &IngestOptions::default()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("Heart_Rate"));
    }

    #[test]
    fn headers_without_rows_is_a_load_error() {
        let err = parse_dataset("Oxygen_Saturation,Heart_Rate\n", &IngestOptions::default())
            .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn one_text_cell_makes_the_whole_column_text() {
        let text = "Oxygen_Saturation,Status\n\"98,6\",stable\n\"95,0\",7\n";
        let data = parse_dataset(text, &IngestOptions::default()).unwrap();
        let status = data.dataset.text_values("Status").unwrap();
        assert_eq!(status, &["stable".to_string(), "7".to_string()]);
    }

    #[test]
    fn empty_and_non_finite_cells_become_gaps() {
        let text = "Oxygen_Saturation,Heart_Rate\n\"98,6\",\n\"95,0\",NaN\n\"97,1\",88\n";
        let data = parse_dataset(text, &IngestOptions::default()).unwrap();
        let hr = data.dataset.numeric_slice(COL_HEART_RATE).unwrap();
        assert_eq!(hr, &[None, None, Some(88.0)]);
    }

    #[test]
    fn unnamed_trailing_column_is_dropped() {
        let text = "Oxygen_Saturation,Heart_Rate,\n\"98,6\",80,x\n";
        let data = parse_dataset(text, &IngestOptions::default()).unwrap();
        assert_eq!(data.dataset.column_names(), vec![COL_SPO2, COL_HEART_RATE]);
    }
}
