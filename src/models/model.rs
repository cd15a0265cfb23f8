//! Fitted curve models.
//!
//! The extraction engine only needs three things from a fitted curve:
//! - evaluate `rate(temp)`
//! - the fitted-parameter mapping (and any derived parameter it carries directly)
//! - the temperatures it was fitted on
//!
//! `CurveModel` captures exactly that. `FittedCurve` implements it for the
//! built-in families; `FnCurve` wraps an arbitrary closure.

use std::collections::BTreeMap;

use crate::domain::{ObservedDomain, ParamName};
use crate::error::{ExtractError, ModelError};
use crate::models::ModelFamily;

/// A fitted temperature -> rate curve.
pub trait CurveModel {
    /// Predicted rate at `temp`. May be non-finite outside the model's valid domain.
    fn evaluate(&self, temp: f64) -> f64;

    /// Fitted parameters by name.
    fn parameters(&self) -> &BTreeMap<String, f64>;

    /// Temperatures of the observations used for fitting.
    fn observed_temps(&self) -> &[f64];

    fn observed_domain(&self) -> Result<ObservedDomain, ExtractError> {
        ObservedDomain::from_temps(self.observed_temps())
    }

    /// Derived parameter carried as a fitted term, if any.
    fn explicit(&self, _name: ParamName) -> Option<f64> {
        None
    }
}

/// A curve from one of the built-in families with fitted coefficients.
#[derive(Debug, Clone)]
pub struct FittedCurve {
    family: ModelFamily,
    params: BTreeMap<String, f64>,
    coefs: Vec<f64>,
    temps: Vec<f64>,
}

impl FittedCurve {
    /// Build a curve, resolving every coefficient the family needs from `params`.
    ///
    /// Extra entries in `params` are kept (they show up in `parameters()`) but
    /// ignored by evaluation.
    pub fn new(
        family: ModelFamily,
        params: BTreeMap<String, f64>,
        temps: Vec<f64>,
    ) -> Result<Self, ModelError> {
        let coefs = family
            .param_names()
            .iter()
            .map(|&name| match params.get(name) {
                Some(v) if v.is_finite() => Ok(*v),
                _ => Err(ModelError::MissingParameter {
                    model: family.name(),
                    name,
                }),
            })
            .collect::<Result<Vec<f64>, ModelError>>()?;

        Ok(Self {
            family,
            params,
            coefs,
            temps,
        })
    }

    pub fn family(&self) -> ModelFamily {
        self.family
    }

    /// Same curve, refitted on different observation temperatures.
    pub fn with_temps(mut self, temps: Vec<f64>) -> Self {
        self.temps = temps;
        self
    }
}

impl CurveModel for FittedCurve {
    fn evaluate(&self, temp: f64) -> f64 {
        self.family.evaluate(temp, &self.coefs)
    }

    fn parameters(&self) -> &BTreeMap<String, f64> {
        &self.params
    }

    fn observed_temps(&self) -> &[f64] {
        &self.temps
    }

    fn explicit(&self, name: ParamName) -> Option<f64> {
        self.family.explicit(name, &self.coefs)
    }
}

/// A curve backed by an arbitrary closure.
///
/// Useful for curves fitted elsewhere and for synthetic test curves.
pub struct FnCurve<F> {
    f: F,
    params: BTreeMap<String, f64>,
    temps: Vec<f64>,
    explicit: Vec<(ParamName, f64)>,
}

impl<F> FnCurve<F>
where
    F: Fn(f64) -> f64,
{
    pub fn new(f: F, temps: Vec<f64>) -> Self {
        Self {
            f,
            params: BTreeMap::new(),
            temps,
            explicit: Vec::new(),
        }
    }

    pub fn with_params(mut self, params: BTreeMap<String, f64>) -> Self {
        self.params = params;
        self
    }

    /// Declare a derived parameter the closure carries as a fitted term.
    pub fn with_explicit(mut self, name: ParamName, value: f64) -> Self {
        self.explicit.retain(|(n, _)| *n != name);
        self.explicit.push((name, value));
        self
    }
}

impl<F> CurveModel for FnCurve<F>
where
    F: Fn(f64) -> f64,
{
    fn evaluate(&self, temp: f64) -> f64 {
        (self.f)(temp)
    }

    fn parameters(&self) -> &BTreeMap<String, f64> {
        &self.params
    }

    fn observed_temps(&self) -> &[f64] {
        &self.temps
    }

    fn explicit(&self, name: ParamName) -> Option<f64> {
        self.explicit.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn fitted_curve_requires_every_coefficient() {
        let err = FittedCurve::new(
            ModelFamily::Gaussian1987,
            params(&[("rmax", 1.0), ("topt", 25.0)]),
            vec![10.0, 20.0],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::MissingParameter {
                model: "gaussian_1987",
                name: "a"
            }
        );
    }

    #[test]
    fn fitted_curve_rejects_non_finite_coefficient() {
        let err = FittedCurve::new(
            ModelFamily::Quadratic2008,
            params(&[("a", 1.0), ("b", f64::NAN), ("c", 0.0)]),
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::MissingParameter { name: "b", .. }));
    }

    #[test]
    fn fitted_curve_evaluates_and_exposes_explicit_terms() {
        let curve = FittedCurve::new(
            ModelFamily::Gaussian1987,
            params(&[("rmax", 2.0), ("topt", 25.0), ("a", 4.0), ("note", 7.0)]),
            vec![10.0, 30.0],
        )
        .unwrap();
        assert!((curve.evaluate(25.0) - 2.0).abs() < 1e-12);
        assert_eq!(curve.explicit(ParamName::Topt), Some(25.0));
        assert_eq!(curve.parameters().len(), 4);
        assert_eq!(curve.observed_domain().unwrap().max, 30.0);
    }

    #[test]
    fn fn_curve_explicit_overrides() {
        let c = FnCurve::new(|t: f64| t, vec![0.0, 1.0])
            .with_explicit(ParamName::Rmax, 1.0)
            .with_explicit(ParamName::Rmax, 2.0);
        assert_eq!(c.explicit(ParamName::Rmax), Some(2.0));
        assert_eq!(c.explicit(ParamName::Topt), None);
        assert_eq!(c.evaluate(3.0), 3.0);
    }
}
