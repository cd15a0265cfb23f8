//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during extraction
//! - exported to JSON/CSV
//! - aggregated by callers that re-run extraction on many refitted curves

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// Boltzmann constant in eV/K.
pub const BOLTZMANN_EV: f64 = 8.62e-5;

/// Offset from degrees Celsius to Kelvin.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Fitted parameters a model family may expose directly.
///
/// When a family carries one of these as a fitted term, the assembler copies it
/// instead of estimating it numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamName {
    Topt,
    Rmax,
    E,
    Eh,
    Th,
}

/// Which thermal limit a boundary search is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Critical thermal minimum: search below `topt`.
    Low,
    /// Critical thermal maximum: search above `topt`.
    High,
}

/// Which limb of the curve a local regression uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Points at or below `topt`.
    Rising,
    /// Points at or above `topt`.
    Falling,
}

/// Range of temperatures the curve was fitted on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservedDomain {
    pub min: f64,
    pub max: f64,
}

impl ObservedDomain {
    /// Domain spanned by the finite values in `temps`.
    ///
    /// `InsufficientData` when no temperature is finite.
    pub fn from_temps(temps: &[f64]) -> Result<Self, ExtractError> {
        let mut finite = temps.iter().copied().filter(|t| t.is_finite());
        let Some(first) = finite.next() else {
            return Err(ExtractError::InsufficientData { needed: 1, found: 0 });
        };
        let (min, max) = finite.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
        Ok(Self { min, max })
    }

    pub fn contains(&self, temp: f64) -> bool {
        temp >= self.min && temp <= self.max
    }
}

/// Numeric knobs of the extraction engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Step of the grid used to locate `topt`/`rmax` and for local regressions.
    pub coarse_step: f64,
    /// Step of the extrapolation grid used for `ctmin`/`ctmax`.
    pub fine_step: f64,
    /// How far past the observed domain the boundary search extrapolates.
    pub extrapolation: f64,
    /// Fraction of `rmax` used when the curve never crosses zero.
    pub threshold_fraction: f64,
    /// Fraction of `rmax` defining the thermal performance breadth.
    pub breadth_level: f64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            coarse_step: 1.0,
            fine_step: 0.001,
            extrapolation: 50.0,
            threshold_fraction: 0.05,
            breadth_level: 0.8,
        }
    }
}

impl ExtractConfig {
    pub fn validate(&self) -> Result<(), ExtractError> {
        for (name, step) in [("coarse_step", self.coarse_step), ("fine_step", self.fine_step)] {
            if !(step.is_finite() && step > 0.0) {
                return Err(ExtractError::InvalidGrid(format!("{name} must be finite and > 0, got {step}")));
            }
        }
        if !(self.extrapolation.is_finite() && self.extrapolation >= 0.0) {
            return Err(ExtractError::InvalidGrid(format!(
                "extrapolation must be finite and >= 0, got {}",
                self.extrapolation
            )));
        }
        for (name, frac) in [
            ("threshold_fraction", self.threshold_fraction),
            ("breadth_level", self.breadth_level),
        ] {
            if !(frac.is_finite() && (0.0..=1.0).contains(&frac)) {
                return Err(ExtractError::InvalidGrid(format!("{name} must lie in [0, 1], got {frac}")));
            }
        }
        Ok(())
    }
}

/// Derived parameters of one fitted curve.
///
/// `None` means "not estimable for this model/data combination".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedParams {
    pub rmax: Option<f64>,
    pub topt: Option<f64>,
    pub ctmin: Option<f64>,
    pub ctmax: Option<f64>,
    /// Activation energy (eV) of the rising limb.
    pub e: Option<f64>,
    /// Deactivation energy (eV) of the falling limb.
    pub eh: Option<f64>,
    /// Temperature at which half the enzymes are deactivated.
    pub th: Option<f64>,
    pub q10: Option<f64>,
    pub thermal_safety_margin: Option<f64>,
    pub thermal_tolerance: Option<f64>,
    pub breadth: Option<f64>,
    pub thermal_performance_breadth: Option<f64>,
    pub skewness: Option<f64>,
}

impl DerivedParams {
    /// Column names in export order.
    pub const NAMES: [&'static str; 13] = [
        "rmax",
        "topt",
        "ctmin",
        "ctmax",
        "e",
        "eh",
        "th",
        "q10",
        "thermal_safety_margin",
        "thermal_tolerance",
        "breadth",
        "thermal_performance_breadth",
        "skewness",
    ];

    /// `(name, value)` pairs in export order.
    pub fn entries(&self) -> [(&'static str, Option<f64>); 13] {
        let values = [
            self.rmax,
            self.topt,
            self.ctmin,
            self.ctmax,
            self.e,
            self.eh,
            self.th,
            self.q10,
            self.thermal_safety_margin,
            self.thermal_tolerance,
            self.breadth,
            self.thermal_performance_breadth,
            self.skewness,
        ];
        let mut out = [("", None); 13];
        for (slot, entry) in out.iter_mut().zip(Self::NAMES.into_iter().zip(values)) {
            *slot = entry;
        }
        out
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries().into_iter().find(|(n, _)| *n == name).and_then(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observed_domain_ignores_non_finite() {
        let d = ObservedDomain::from_temps(&[f64::NAN, 12.0, 4.0, f64::INFINITY, 30.0]).unwrap();
        assert_eq!(d, ObservedDomain { min: 4.0, max: 30.0 });
        assert!(d.contains(4.0) && d.contains(30.0) && !d.contains(30.5));
    }

    #[test]
    fn observed_domain_requires_a_finite_temp() {
        let err = ObservedDomain::from_temps(&[f64::NAN]).unwrap_err();
        assert_eq!(err, ExtractError::InsufficientData { needed: 1, found: 0 });
        assert_eq!(err.to_string(), "insufficient data: need 1 points, found 0");
    }

    #[test]
    fn default_config_is_valid() {
        ExtractConfig::default().validate().unwrap();
        let bad = ExtractConfig {
            fine_step: 0.0,
            ..ExtractConfig::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn entries_follow_names() {
        let p = DerivedParams {
            topt: Some(25.0),
            ..DerivedParams::default()
        };
        assert_eq!(p.get("topt"), Some(25.0));
        assert_eq!(p.get("ctmax"), None);
        assert_eq!(p.entries()[1].0, "topt");
    }
}
