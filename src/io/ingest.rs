//! Observation CSV ingest.
//!
//! A fitted curve's observed domain comes from the temperatures it was fitted on.
//! When those live in the original data file rather than the curve JSON, we read
//! them from a CSV with a `temp` (or `temperature`) column; a `rate` column is
//! read when present but is not needed by extraction.
//!
//! Rows with an unparseable or non-finite temperature are skipped and reported.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Parsed observations.
#[derive(Debug, Clone, Default)]
pub struct Observations {
    pub temps: Vec<f64>,
    /// Rates aligned with `temps` (`None` when the column is missing or blank).
    pub rates: Vec<Option<f64>>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load observations from a CSV file.
pub fn load_observations(path: &Path) -> Result<Observations, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_observations(file)
}

/// Parse observations from any CSV reader.
pub fn read_observations<R: Read>(reader: R) -> Result<Observations, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let Some(&temp_idx) = header_map.get("temp").or_else(|| header_map.get("temperature")) else {
        return Err(AppError::new(2, "CSV is missing a 'temp' column."));
    };
    let rate_idx = header_map.get("rate").copied();

    let mut out = Observations::default();
    for (idx, result) in reader.records().enumerate() {
        // +2: records start after the header, lines are 1-based.
        let line = idx + 2;
        out.rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                out.row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let temp = match record.get(temp_idx).map(str::parse::<f64>) {
            Some(Ok(t)) if t.is_finite() => t,
            Some(Ok(t)) => {
                out.row_errors.push(RowError {
                    line,
                    message: format!("non-finite temp {t}"),
                });
                continue;
            }
            Some(Err(e)) => {
                out.row_errors.push(RowError {
                    line,
                    message: format!("invalid temp: {e}"),
                });
                continue;
            }
            None => {
                out.row_errors.push(RowError {
                    line,
                    message: "missing temp".to_string(),
                });
                continue;
            }
        };

        let rate = rate_idx
            .and_then(|i| record.get(i))
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<f64>().ok());

        out.temps.push(temp);
        out.rates.push(rate);
    }

    Ok(out)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_ascii_lowercase(), i))
        .collect()
}
