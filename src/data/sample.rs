//! Synthetic patient sample generation.
//!
//! Generates a CSV with the same shape as the remote spreadsheet so the chart
//! suite can be exercised offline. The oxygen saturation column is written
//! with decimal commas (`"94,3"`), exactly the quirk the loader repairs.

use std::path::Path;

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{COL_BPSYS, COL_CAUSE, COL_HEART_RATE, COL_SPO2};
use crate::error::AppError;

/// Per-cause generating parameters:
/// (name, heart-rate mean, heart-rate sd, SpO2 mean, SpO2 sd).
const CAUSES: [(&str, f64, f64, f64, f64); 5] = [
    ("Asthma", 96.0, 12.0, 94.0, 2.5),
    ("COPD", 92.0, 10.0, 89.0, 3.5),
    ("Pneumonia", 104.0, 14.0, 91.0, 3.0),
    ("Hyperventilation", 112.0, 16.0, 97.0, 1.5),
    ("Sleep Apnea", 84.0, 9.0, 92.0, 3.0),
];

/// Write a synthetic sample CSV with `rows` data rows.
///
/// Causes cycle round-robin so every group is populated even for small row
/// counts. The same seed always produces the same file.
pub fn generate_sample_csv(path: &Path, rows: usize, seed: u64) -> Result<(), AppError> {
    if rows == 0 {
        return Err(AppError::new(2, "Sample row count must be > 0."));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let bp_noise = Normal::new(0.0, 6.0)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AppError::new(
            4,
            format!("Failed to create sample CSV '{}': {e}", path.display()),
        )
    })?;
    writer
        .write_record([COL_CAUSE, COL_HEART_RATE, COL_SPO2, COL_BPSYS])
        .map_err(|e| AppError::new(4, format!("Failed to write sample CSV header: {e}")))?;

    for i in 0..rows {
        let (cause, hr_mean, hr_sd, spo2_mean, spo2_sd) = CAUSES[i % CAUSES.len()];
        let hr = sample_normal(&mut rng, hr_mean, hr_sd)?;
        let spo2 = sample_normal(&mut rng, spo2_mean, spo2_sd)?.clamp(70.0, 100.0);
        // Systolic pressure tracks heart rate with idiosyncratic noise.
        let bpsys = 85.0 + 0.32 * hr + bp_noise.sample(&mut rng);

        writer
            .write_record([
                cause.to_string(),
                format!("{hr:.0}"),
                format_decimal_comma(spo2),
                format!("{bpsys:.0}"),
            ])
            .map_err(|e| AppError::new(4, format!("Failed to write sample CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(4, format!("Failed to flush sample CSV: {e}")))?;

    Ok(())
}

fn sample_normal(rng: &mut StdRng, mean: f64, sd: f64) -> Result<f64, AppError> {
    let dist = Normal::new(mean, sd)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;
    Ok(dist.sample(rng))
}

/// One decimal place with a decimal comma, like the source spreadsheet.
fn format_decimal_comma(v: f64) -> String {
    format!("{v:.1}").replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{IngestOptions, read_dataset_file};

    #[test]
    fn same_seed_same_file() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        let c = dir.path().join("c.csv");

        generate_sample_csv(&a, 50, 42).unwrap();
        generate_sample_csv(&b, 50, 42).unwrap();
        generate_sample_csv(&c, 50, 43).unwrap();

        let bytes_a = std::fs::read(&a).unwrap();
        let bytes_b = std::fs::read(&b).unwrap();
        let bytes_c = std::fs::read(&c).unwrap();
        assert_eq!(bytes_a, bytes_b);
        assert_ne!(bytes_a, bytes_c);
    }

    #[test]
    fn generated_file_round_trips_through_the_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.csv");
        generate_sample_csv(&path, 25, 7).unwrap();

        let data = read_dataset_file(&path, &IngestOptions::default()).unwrap();
        assert_eq!(data.rows_used, 25);
        assert!(data.row_errors.is_empty());

        let ds = &data.dataset;
        assert_eq!(
            ds.column_names(),
            vec![COL_CAUSE, COL_HEART_RATE, COL_SPO2, COL_BPSYS]
        );
        // Round-robin over 5 causes: 25 rows means 5 per cause.
        let groups = ds.grouped_values(COL_CAUSE, COL_HEART_RATE).unwrap();
        assert_eq!(groups.len(), 5);
        assert!(groups.iter().all(|(_, v)| v.len() == 5));

        let spo2 = ds.numeric_values(COL_SPO2).unwrap();
        assert_eq!(spo2.len(), 25);
        assert!(spo2.iter().all(|v| (70.0..=100.0).contains(v)));
    }

    #[test]
    fn zero_rows_is_a_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = generate_sample_csv(&dir.path().join("x.csv"), 0, 1).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn decimal_comma_formatting() {
        assert_eq!(format_decimal_comma(94.25), "94,2");
        assert_eq!(format_decimal_comma(100.0), "100,0");
    }
}
