//! Parallel extraction over many curves.
//!
//! Extraction calls share nothing but the read-only config, so a batch (e.g. the
//! refitted curves of a bootstrap) is a plain parallel map.

use rayon::prelude::*;

use crate::domain::{DerivedParams, ExtractConfig};
use crate::error::ExtractError;
use crate::extract::assembler::assemble;
use crate::models::CurveModel;

/// Assemble every curve in parallel. Output order matches `models`.
pub fn assemble_batch<M>(models: &[M], config: &ExtractConfig) -> Vec<Result<DerivedParams, ExtractError>>
where
    M: CurveModel + Sync,
{
    models.par_iter().map(|m| assemble(m, config)).collect()
}

/// How often each bundle entry was defined across a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coverage {
    pub total: usize,
    pub failed: usize,
    /// `(name, defined_count)` in export order.
    pub defined: Vec<(&'static str, usize)>,
}

pub fn coverage<E>(results: &[Result<DerivedParams, E>]) -> Coverage {
    let mut defined: Vec<(&'static str, usize)> = DerivedParams::NAMES.iter().map(|&n| (n, 0)).collect();
    let mut failed = 0;
    for result in results {
        match result {
            Ok(params) => {
                for (slot, (_, value)) in defined.iter_mut().zip(params.entries()) {
                    if value.is_some() {
                        slot.1 += 1;
                    }
                }
            }
            Err(_) => failed += 1,
        }
    }
    Coverage {
        total: results.len(),
        failed,
        defined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FnCurve;

    #[test]
    fn batch_preserves_order_and_matches_serial() {
        let temps: Vec<f64> = (0..=40).map(f64::from).collect();
        let models: Vec<_> = (0..6)
            .map(|k| {
                let peak = 20.0 + k as f64;
                FnCurve::new(move |t: f64| 50.0 - (t - peak).powi(2), temps.clone())
            })
            .collect();
        let cfg = ExtractConfig::default();

        let results = assemble_batch(&models, &cfg);
        assert_eq!(results.len(), models.len());
        for (k, (result, model)) in results.iter().zip(&models).enumerate() {
            let params = result.as_ref().unwrap();
            assert_eq!(params.topt, Some(20.0 + k as f64));
            assert_eq!(params, &assemble(model, &cfg).unwrap());
        }
    }

    #[test]
    fn coverage_counts_defined_entries() {
        let ok = DerivedParams {
            topt: Some(1.0),
            rmax: Some(2.0),
            ..DerivedParams::default()
        };
        let results = vec![Ok(ok.clone()), Ok(ok), Err(ExtractError::InvalidGrid("x".into()))];
        let cov = coverage(&results);
        assert_eq!(cov.total, 3);
        assert_eq!(cov.failed, 1);
        assert_eq!(cov.defined[0], ("rmax", 2));
        assert_eq!(cov.defined[2], ("ctmin", 0));
    }
}
