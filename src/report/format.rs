//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the stats and chart code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use std::path::PathBuf;

use crate::stats::Summary;

/// A chart the pipeline decided not to render, with the reason why.
#[derive(Debug, Clone)]
pub struct SkippedChart {
    pub name: String,
    pub reason: String,
}

/// Everything one pipeline run produced, for the end-of-run summary.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub source: String,
    pub rows_read: usize,
    pub rows_used: usize,
    pub row_errors: usize,
    pub charts: Vec<PathBuf>,
    pub skipped: Vec<SkippedChart>,
    pub summaries: Vec<PathBuf>,
    pub summary_failures: Vec<String>,
}

impl RunReport {
    /// True when the run produced no chart and no summary file.
    pub fn is_empty(&self) -> bool {
        self.charts.is_empty() && self.summaries.is_empty()
    }
}

/// Format the descriptive-statistics table for one column.
///
/// Statistics that are undefined for the sample (for example skewness of a
/// two-value sample) print as blanks, mirroring the CSV export.
pub fn format_summary_table(column: &str, summary: &Summary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Descriptive statistics: {column}\n"));
    out.push_str(&format!("{:<12} {:>14}\n", "statistic", "value"));
    out.push_str(&format!("{:-<12} {:-<14}\n", "", ""));
    out.push_str(&format!("{:<12} {:>14}\n", "count", summary.count));
    for (name, value) in [
        ("mean", summary.mean),
        ("std", summary.std),
        ("variance", summary.variance),
        ("min", summary.min),
        ("max", summary.max),
        ("skewness", summary.skewness),
        ("kurtosis", summary.kurtosis),
    ] {
        out.push_str(&format!("{:<12} {:>14}\n", name, fmt_stat(value)));
    }
    out
}

/// Format the full end-of-run summary (source, row counts, produced files).
pub fn format_run_report(report: &RunReport) -> String {
    let mut out = String::new();

    out.push_str("=== vitals - Health Metrics Charts ===\n");
    out.push_str(&format!("Source: {}\n", report.source));
    out.push_str(&format!(
        "Rows: {} read | {} used | {} rejected\n",
        report.rows_read, report.rows_used, report.row_errors
    ));

    out.push_str("\nCharts written:\n");
    if report.charts.is_empty() {
        out.push_str("- (none)\n");
    }
    for path in &report.charts {
        out.push_str(&format!("- {}\n", path.display()));
    }

    if !report.skipped.is_empty() {
        out.push_str("\nCharts skipped:\n");
        for skip in &report.skipped {
            out.push_str(&format!("- {}: {}\n", skip.name, skip.reason));
        }
    }

    if !report.summaries.is_empty() {
        out.push_str("\nSummary files:\n");
        for path in &report.summaries {
            out.push_str(&format!("- {}\n", path.display()));
        }
    }
    if !report.summary_failures.is_empty() {
        out.push_str("\nSummary failures:\n");
        for failure in &report.summary_failures {
            out.push_str(&format!("- {failure}\n"));
        }
    }

    out
}

fn fmt_stat(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.4}")
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::describe;

    #[test]
    fn summary_table_blanks_undefined_statistics() {
        let summary = describe(&[42.0]);
        let table = format_summary_table("Heart_Rate", &summary);

        assert!(table.starts_with("Descriptive statistics: Heart_Rate\n"));
        let count_line = table.lines().find(|l| l.starts_with("count")).unwrap();
        assert!(count_line.ends_with(" 1"));
        let mean_line = table.lines().find(|l| l.starts_with("mean")).unwrap();
        assert!(mean_line.ends_with("42.0000"));
        // A single value has no spread, so std prints blank.
        let std_line = table.lines().find(|l| l.starts_with("std")).unwrap();
        assert_eq!(std_line.trim_end(), "std");
    }

    #[test]
    fn summary_table_prints_all_eight_statistics() {
        let summary = describe(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let table = format_summary_table("BPSYS", &summary);
        for name in [
            "count", "mean", "std", "variance", "min", "max", "skewness", "kurtosis",
        ] {
            assert!(table.lines().any(|l| l.starts_with(name)), "missing {name}");
        }
        assert!(table.contains("2.5000"), "variance row: {table}");
    }

    #[test]
    fn run_report_lists_outcomes() {
        let report = RunReport {
            source: "sample_vitals.csv".to_string(),
            rows_read: 240,
            rows_used: 238,
            row_errors: 2,
            charts: vec![PathBuf::from("charts/violin_heart_rate_by_cause.png")],
            skipped: vec![SkippedChart {
                name: "box_bpsys_by_cause".to_string(),
                reason: "Column `BPSYS` is missing.".to_string(),
            }],
            summaries: vec![PathBuf::from("summaries/summary_Heart_Rate_spss.csv")],
            summary_failures: vec![],
        };

        let text = format_run_report(&report);
        assert!(text.starts_with("=== vitals - Health Metrics Charts ===\n"));
        assert!(text.contains("Rows: 240 read | 238 used | 2 rejected"));
        assert!(text.contains("- charts/violin_heart_rate_by_cause.png"));
        assert!(text.contains("- box_bpsys_by_cause: Column `BPSYS` is missing."));
        assert!(text.contains("- summaries/summary_Heart_Rate_spss.csv"));
        assert!(!text.contains("Summary failures"));
        assert!(!report.is_empty());
    }

    #[test]
    fn run_report_marks_empty_chart_list() {
        let report = RunReport {
            source: "input.csv".to_string(),
            ..RunReport::default()
        };
        let text = format_run_report(&report);
        assert!(text.contains("Charts written:\n- (none)"));
        assert!(report.is_empty());
    }
}
