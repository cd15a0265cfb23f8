//! Export derived-parameter bundles.
//!
//! - CSV: one row per curve, empty cell for undefined parameters
//! - JSON: an array of `{ id, model, params }` objects, `null` for undefined

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::domain::DerivedParams;
use crate::error::AppError;

/// One extracted curve, labelled for export.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedRow {
    pub id: String,
    pub model: String,
    /// `None` when extraction failed for the whole curve.
    pub params: Option<DerivedParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Write bundles as CSV.
pub fn write_params_csv<W: Write>(out: W, rows: &[ExtractedRow]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec!["id", "model"];
    header.extend(DerivedParams::NAMES);
    header.push("error");
    writer
        .write_record(&header)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for row in rows {
        let mut record = vec![row.id.clone(), row.model.clone()];
        match &row.params {
            Some(p) => record.extend(
                p.entries()
                    .iter()
                    .map(|(_, v)| v.map(|v| format!("{v:.6}")).unwrap_or_default()),
            ),
            None => record.extend(std::iter::repeat_n(String::new(), DerivedParams::NAMES.len())),
        }
        record.push(row.error.clone().unwrap_or_default());
        writer
            .write_record(&record)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write bundles as CSV to `path`.
pub fn export_params_csv(path: &Path, rows: &[ExtractedRow]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_params_csv(file, rows)
}

/// Render bundles as pretty JSON.
pub fn params_json(rows: &[ExtractedRow]) -> Result<String, AppError> {
    serde_json::to_string_pretty(rows).map_err(|e| AppError::new(2, format!("Failed to serialize JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ExtractedRow {
        ExtractedRow {
            id: "c1".into(),
            model: "gaussian_1987".into(),
            params: Some(DerivedParams {
                topt: Some(25.0),
                rmax: Some(2.0),
                ..DerivedParams::default()
            }),
            error: None,
        }
    }

    #[test]
    fn csv_leaves_undefined_cells_empty() {
        let mut buf = Vec::new();
        write_params_csv(&mut buf, &[row()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("id,model,rmax,topt,ctmin"));
        assert_eq!(
            lines.next().unwrap(),
            "c1,gaussian_1987,2.000000,25.000000,,,,,,,,,,,,"
        );
    }

    #[test]
    fn csv_quotes_fields_containing_delimiters() {
        let failed = ExtractedRow {
            id: "site A, rep 2".into(),
            model: "pawar_2018".into(),
            params: None,
            error: Some("model produced no finite values on [0, 30]".into()),
        };
        let mut buf = Vec::new();
        write_params_csv(&mut buf, &[failed]).unwrap();

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(record.len(), DerivedParams::NAMES.len() + 3);
        assert_eq!(&record[0], "site A, rep 2");
        assert_eq!(&record[1], "pawar_2018");
        assert_eq!(&record[record.len() - 1], "model produced no finite values on [0, 30]");
    }

    #[test]
    fn json_uses_null_for_undefined() {
        let json = params_json(&[row()]).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v[0]["params"]["topt"], 25.0);
        assert!(v[0]["params"]["ctmax"].is_null());
        assert!(v[0].get("error").is_none());
    }
}
