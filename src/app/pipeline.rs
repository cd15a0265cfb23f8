//! Shared "extraction pipeline" logic used by the `params` and `batch` commands.
//!
//! curve JSON -> (optional observation CSV) -> fitted curve -> bundle
//!
//! The commands can then focus on presentation (tables vs JSON vs CSV).

use std::path::{Path, PathBuf};

use log::warn;

use crate::domain::{DerivedParams, ExtractConfig, ObservedDomain};
use crate::error::{AppError, ExtractError};
use crate::extract::{assemble, assemble_batch};
use crate::io::{CurveFile, ExtractedRow, load_observations, read_curve_json};
use crate::models::{CurveModel, FittedCurve, ModelRegistry};

/// Outputs of extracting a single curve.
#[derive(Debug, Clone)]
pub struct CurveRun {
    pub row: ExtractedRow,
    pub fitted: Vec<(String, f64)>,
    pub domain: Option<ObservedDomain>,
}

/// Load one curve, optionally overriding its observed temps from a CSV.
pub fn load_curve(
    registry: &ModelRegistry,
    curve_path: &Path,
    data_path: Option<&Path>,
) -> Result<(CurveFile, FittedCurve), AppError> {
    let file = read_curve_json(curve_path)?;
    let mut curve = file.to_curve(registry)?;

    if let Some(path) = data_path {
        let obs = load_observations(path)?;
        for err in &obs.row_errors {
            warn!("{}:{}: {}", path.display(), err.line, err.message);
        }
        curve = curve.with_temps(obs.temps);
    }

    Ok((file, curve))
}

/// Extract one curve. Whole-curve failures are returned as errors.
pub fn run_single(
    registry: &ModelRegistry,
    curve_path: &Path,
    data_path: Option<&Path>,
    config: &ExtractConfig,
) -> Result<CurveRun, AppError> {
    let (file, curve) = load_curve(registry, curve_path, data_path)?;
    let params = assemble(&curve, config)?;

    Ok(CurveRun {
        row: to_row(&file, curve_path, Ok(params)),
        fitted: curve.parameters().iter().map(|(k, v)| (k.clone(), *v)).collect(),
        domain: curve.observed_domain().ok(),
    })
}

/// Extract many curves in parallel.
///
/// Files that cannot be read or built, and curves whose extraction fails, become
/// rows with `error` set; the rest of the batch is unaffected.
pub fn run_batch(registry: &ModelRegistry, paths: &[PathBuf], config: &ExtractConfig) -> Result<Vec<ExtractedRow>, AppError> {
    config.validate()?;

    let mut rows: Vec<Option<ExtractedRow>> = vec![None; paths.len()];
    let mut loaded: Vec<(usize, CurveFile, FittedCurve)> = Vec::new();

    for (i, path) in paths.iter().enumerate() {
        match read_curve_json(path).and_then(|file| {
            let curve = file.to_curve(registry)?;
            Ok((file, curve))
        }) {
            Ok((file, curve)) => loaded.push((i, file, curve)),
            Err(err) => {
                warn!("{}: {err}", path.display());
                rows[i] = Some(ExtractedRow {
                    id: default_id(path),
                    model: String::new(),
                    params: None,
                    error: Some(err.to_string()),
                });
            }
        }
    }

    let curves: Vec<FittedCurve> = loaded.iter().map(|(_, _, c)| c.clone()).collect();
    let results = assemble_batch(&curves, config);

    for ((i, file, _), result) in loaded.iter().zip(results) {
        rows[*i] = Some(to_row(file, &paths[*i], result));
    }

    Ok(rows.into_iter().flatten().collect())
}

fn to_row(file: &CurveFile, path: &Path, result: Result<DerivedParams, ExtractError>) -> ExtractedRow {
    let (params, error) = match result {
        Ok(p) => (Some(p), None),
        Err(e) => (None, Some(e.to_string())),
    };
    ExtractedRow {
        id: file.id.clone().unwrap_or_else(|| default_id(path)),
        model: file.model.clone(),
        params,
        error,
    }
}

fn default_id(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::write_curve_json;

    fn tmp(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tpc_pipeline_{}_{name}", std::process::id()))
    }

    #[test]
    fn batch_isolates_bad_files() {
        let good = tmp("good.json");
        let empty = tmp("empty.json");
        let missing = tmp("missing.json");
        write_curve_json(
            &good,
            &CurveFile {
                id: None,
                model: "gaussian_1987".into(),
                params: [("rmax".to_string(), 2.0), ("topt".to_string(), 25.0), ("a".to_string(), 4.0)].into(),
                temps: (10..=35).map(f64::from).collect(),
            },
        )
        .unwrap();
        write_curve_json(
            &empty,
            &CurveFile {
                id: Some("no-temps".into()),
                model: "gaussian_1987".into(),
                params: [("rmax".to_string(), 2.0), ("topt".to_string(), 25.0), ("a".to_string(), 4.0)].into(),
                temps: vec![],
            },
        )
        .unwrap();

        let registry = ModelRegistry::standard();
        let paths = vec![good.clone(), missing, empty.clone()];
        let rows = run_batch(&registry, &paths, &ExtractConfig::default()).unwrap();
        std::fs::remove_file(&good).ok();
        std::fs::remove_file(&empty).ok();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].id, format!("tpc_pipeline_{}_good", std::process::id()));
        let p = rows[0].params.as_ref().unwrap();
        assert_eq!(p.topt, Some(25.0));
        assert_eq!(p.rmax, Some(2.0));
        assert!(rows[1].error.is_some());
        assert_eq!(rows[2].id, "no-temps");
        assert!(rows[2].params.is_none());
    }

    #[test]
    fn data_csv_overrides_temps() {
        let curve = tmp("override.json");
        let data = tmp("override.csv");
        write_curve_json(
            &curve,
            &CurveFile {
                id: None,
                model: "quadratic_2008".into(),
                params: [("a".to_string(), -100.0), ("b".to_string(), 10.0), ("c".to_string(), -0.2)].into(),
                temps: vec![0.0, 1.0],
            },
        )
        .unwrap();
        std::fs::write(&data, "temp,rate\n5,1\n45,2\n").unwrap();

        let run = run_single(&ModelRegistry::standard(), &curve, Some(&data), &ExtractConfig::default()).unwrap();
        std::fs::remove_file(&curve).ok();
        std::fs::remove_file(&data).ok();

        assert_eq!(run.domain, Some(ObservedDomain { min: 5.0, max: 45.0 }));
        // -100 + 10t - 0.2t^2 peaks at t = 25.
        assert_eq!(run.row.params.unwrap().topt, Some(25.0));
    }
}
