//! Read/write curve JSON files.
//!
//! Curve JSON is the portable representation of a fitted curve produced by an
//! external fitting routine:
//!
//! ```json
//! { "model": "sharpeschoolhigh_1981",
//!   "params": { "r_tref": 1.2, "e": 0.6, "eh": 3.1, "th": 33.0, "tref": 20.0 },
//!   "temps": [4, 10, 16, 22, 28, 34] }
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{FittedCurve, ModelRegistry};

/// A saved fitted curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveFile {
    /// Optional label used in reports and exports.
    #[serde(default)]
    pub id: Option<String>,
    pub model: String,
    pub params: BTreeMap<String, f64>,
    /// Temperatures of the observations the curve was fitted on.
    #[serde(default)]
    pub temps: Vec<f64>,
}

impl CurveFile {
    /// Resolve the family and build the curve.
    pub fn to_curve(&self, registry: &ModelRegistry) -> Result<FittedCurve, AppError> {
        Ok(registry.build(&self.model, self.params.clone(), self.temps.clone())?)
    }
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid curve JSON '{}': {e}", path.display())))?;
    Ok(curve)
}

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, curve: &CurveFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create curve JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, curve).map_err(|e| AppError::new(2, format!("Failed to write curve JSON: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurveModel, ModelFamily};

    #[test]
    fn parses_minimal_curve_json() {
        let json = r#"{"model":"gaussian_1987","params":{"rmax":2.0,"topt":25.0,"a":5.0},"temps":[10,20,30]}"#;
        let file: CurveFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.id, None);
        let curve = file.to_curve(&ModelRegistry::standard()).unwrap();
        assert_eq!(curve.family(), ModelFamily::Gaussian1987);
        assert_eq!(curve.observed_temps(), &[10.0, 20.0, 30.0]);
    }

    #[test]
    fn unknown_model_maps_to_exit_code_3() {
        let file = CurveFile {
            id: None,
            model: "nope".into(),
            params: BTreeMap::new(),
            temps: vec![],
        };
        let err = file.to_curve(&ModelRegistry::standard()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn write_then_read() {
        let path = std::env::temp_dir().join(format!("tpc_curve_{}.json", std::process::id()));
        let file = CurveFile {
            id: Some("c1".into()),
            model: "quadratic_2008".into(),
            params: [("a".to_string(), -1.0), ("b".to_string(), 0.5), ("c".to_string(), -0.01)].into(),
            temps: vec![0.0, 40.0],
        };
        write_curve_json(&path, &file).unwrap();
        let back = read_curve_json(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(back, file);
    }
}
