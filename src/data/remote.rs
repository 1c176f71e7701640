//! Remote spreadsheet access.
//!
//! The source of record is a Google Sheets export URL that serves the patient
//! table as CSV. The URL can be overridden per run with `--url` or the
//! `VITALS_DATA_URL` environment variable (a `.env` file works too).

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::AppError;

/// Default spreadsheet export URL.
pub const DEFAULT_DATA_URL: &str = "https://docs.google.com/spreadsheets/d/1PfVcZ2QYo9BAbwvU5Em7tCsAL9dVs_9f6TEWAYAlXlw/export?format=csv&gid=879458484";

/// Environment variable consulted when `--url` is not given.
pub const DATA_URL_ENV: &str = "VITALS_DATA_URL";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolve the data URL: CLI flag first, then environment, then the default.
pub fn resolve_url(flag: Option<&str>) -> String {
    if let Some(url) = flag {
        return url.to_string();
    }
    dotenvy::dotenv().ok();
    std::env::var(DATA_URL_ENV).unwrap_or_else(|_| DEFAULT_DATA_URL.to_string())
}

/// Download the spreadsheet as CSV text.
pub fn fetch_csv(url: &str) -> Result<String, AppError> {
    let client = Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| AppError::new(3, format!("Failed to build HTTP client: {e}")))?;

    let resp = client
        .get(url)
        .send()
        .map_err(|e| AppError::new(3, format!("Failed to fetch spreadsheet: {e}")))?;

    if !resp.status().is_success() {
        return Err(AppError::new(
            3,
            format!("Spreadsheet request failed with status {}.", resp.status()),
        ));
    }

    resp.text()
        .map_err(|e| AppError::new(3, format!("Failed to read spreadsheet response: {e}")))
}
