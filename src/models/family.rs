//! Rate equations for the supported thermal performance curve families.
//!
//! Each family is a closed-form `rate(temp)` over a positional coefficient slice
//! whose order is given by [`ModelFamily::param_names`]. Formulas are evaluated
//! as written; values outside a family's valid domain come back as NaN/∞ and are
//! tagged invalid by the sampler rather than patched here.

use crate::domain::ParamName;
use crate::math::{boltzmann_factor, inverse_kt};

/// Supported model families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelFamily {
    Quadratic2008,
    Gaussian1987,
    Weibull1995,
    SharpeSchoolHigh1981,
    Pawar2018,
    Lactin2_1995,
    Briere2_1999,
    Ratkowsky1983,
}

impl ModelFamily {
    pub const ALL: [ModelFamily; 8] = [
        ModelFamily::Quadratic2008,
        ModelFamily::Gaussian1987,
        ModelFamily::Weibull1995,
        ModelFamily::SharpeSchoolHigh1981,
        ModelFamily::Pawar2018,
        ModelFamily::Lactin2_1995,
        ModelFamily::Briere2_1999,
        ModelFamily::Ratkowsky1983,
    ];

    /// Registry name, e.g. `sharpeschoolhigh_1981`.
    pub fn name(self) -> &'static str {
        match self {
            ModelFamily::Quadratic2008 => "quadratic_2008",
            ModelFamily::Gaussian1987 => "gaussian_1987",
            ModelFamily::Weibull1995 => "weibull_1995",
            ModelFamily::SharpeSchoolHigh1981 => "sharpeschoolhigh_1981",
            ModelFamily::Pawar2018 => "pawar_2018",
            ModelFamily::Lactin2_1995 => "lactin2_1995",
            ModelFamily::Briere2_1999 => "briere2_1999",
            ModelFamily::Ratkowsky1983 => "ratkowsky_1983",
        }
    }

    /// Coefficient names in positional order.
    pub fn param_names(self) -> &'static [&'static str] {
        match self {
            ModelFamily::Quadratic2008 => &["a", "b", "c"],
            ModelFamily::Gaussian1987 => &["rmax", "topt", "a"],
            ModelFamily::Weibull1995 => &["a", "topt", "b", "c"],
            ModelFamily::SharpeSchoolHigh1981 => &["r_tref", "e", "eh", "th", "tref"],
            ModelFamily::Pawar2018 => &["r_tref", "e", "eh", "topt", "tref"],
            ModelFamily::Lactin2_1995 => &["a", "b", "tmax", "delta_t"],
            ModelFamily::Briere2_1999 => &["tmin", "tmax", "a", "b"],
            ModelFamily::Ratkowsky1983 => &["tmin", "tmax", "a", "b"],
        }
    }

    /// Evaluate the rate equation.
    ///
    /// # Panics
    /// Panics if `p` is shorter than `self.param_names().len()`. `FittedCurve`
    /// always resolves a full coefficient vector.
    pub fn evaluate(self, temp: f64, p: &[f64]) -> f64 {
        match self {
            ModelFamily::Quadratic2008 => p[0] + p[1] * temp + p[2] * temp * temp,
            ModelFamily::Gaussian1987 => {
                let z = (temp - p[1]).abs() / p[2];
                p[0] * (-0.5 * z * z).exp()
            }
            ModelFamily::Weibull1995 => {
                let (a, topt, b, c) = (p[0], p[1], p[2], p[3]);
                let r = (c - 1.0) / c;
                let inner = (temp - topt) / b + r.powf(1.0 / c);
                a * r.powf((1.0 - c) / c) * inner.powf(c - 1.0) * (-inner.powf(c) + r).exp()
            }
            ModelFamily::SharpeSchoolHigh1981 => {
                let (r_tref, e, eh, th, tref) = (p[0], p[1], p[2], p[3], p[4]);
                let deactivation = (eh * (inverse_kt(th) - inverse_kt(temp))).exp();
                r_tref * boltzmann_factor(e, temp, tref) / (1.0 + deactivation)
            }
            ModelFamily::Pawar2018 => {
                let (r_tref, e, eh, topt, tref) = (p[0], p[1], p[2], p[3], p[4]);
                let deactivation = (eh * (inverse_kt(topt) - inverse_kt(temp))).exp();
                r_tref * boltzmann_factor(e, temp, tref) / (1.0 + e / (eh - e) * deactivation)
            }
            ModelFamily::Lactin2_1995 => {
                let (a, b, tmax, delta_t) = (p[0], p[1], p[2], p[3]);
                (a * temp).exp() - (a * tmax - (tmax - temp) / delta_t).exp() + b
            }
            ModelFamily::Briere2_1999 => {
                let (tmin, tmax, a, b) = (p[0], p[1], p[2], p[3]);
                a * temp * (temp - tmin) * (tmax - temp).powf(1.0 / b)
            }
            ModelFamily::Ratkowsky1983 => {
                let (tmin, tmax, a, b) = (p[0], p[1], p[2], p[3]);
                if temp < tmin || temp > tmax {
                    return 0.0;
                }
                let v = a * (temp - tmin) * (1.0 - (b * (temp - tmax)).exp());
                v * v
            }
        }
    }

    /// Fitted value of a derived parameter the family carries as a coefficient.
    pub fn explicit(self, name: ParamName, p: &[f64]) -> Option<f64> {
        match (self, name) {
            (ModelFamily::Gaussian1987, ParamName::Rmax) => Some(p[0]),
            (ModelFamily::Gaussian1987, ParamName::Topt) => Some(p[1]),
            (ModelFamily::Weibull1995, ParamName::Rmax) => Some(p[0]),
            (ModelFamily::Weibull1995, ParamName::Topt) => Some(p[1]),
            (ModelFamily::SharpeSchoolHigh1981, ParamName::E) => Some(p[1]),
            (ModelFamily::SharpeSchoolHigh1981, ParamName::Eh) => Some(p[2]),
            (ModelFamily::SharpeSchoolHigh1981, ParamName::Th) => Some(p[3]),
            (ModelFamily::Pawar2018, ParamName::E) => Some(p[1]),
            (ModelFamily::Pawar2018, ParamName::Eh) => Some(p[2]),
            (ModelFamily::Pawar2018, ParamName::Topt) => Some(p[3]),
            _ => None,
        }
    }
}

impl std::fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaussian_peaks_at_topt() {
        let p = [2.0, 25.0, 5.0];
        assert!((ModelFamily::Gaussian1987.evaluate(25.0, &p) - 2.0).abs() < 1e-12);
        assert!(ModelFamily::Gaussian1987.evaluate(30.0, &p) < 2.0);
    }

    #[test]
    fn weibull_equals_a_at_topt() {
        let p = [1.5, 30.0, 10.0, 3.0];
        let y = ModelFamily::Weibull1995.evaluate(30.0, &p);
        assert!((y - 1.5).abs() < 1e-9, "y={y}");
    }

    #[test]
    fn briere_is_not_finite_above_tmax() {
        let p = [5.0, 35.0, 2e-4, 2.0];
        assert!(ModelFamily::Briere2_1999.evaluate(20.0, &p) > 0.0);
        assert!(ModelFamily::Briere2_1999.evaluate(36.0, &p).is_nan());
    }

    #[test]
    fn ratkowsky_is_zero_outside_limits() {
        let p = [5.0, 40.0, 0.05, 0.3];
        assert_eq!(ModelFamily::Ratkowsky1983.evaluate(4.0, &p), 0.0);
        assert_eq!(ModelFamily::Ratkowsky1983.evaluate(41.0, &p), 0.0);
        assert!(ModelFamily::Ratkowsky1983.evaluate(30.0, &p) > 0.0);
    }

    #[test]
    fn sharpe_schoolfield_equals_half_arrhenius_at_th() {
        let p = [1.0, 0.6, 3.0, 32.0, 20.0];
        let y = ModelFamily::SharpeSchoolHigh1981.evaluate(32.0, &p);
        let arrhenius = boltzmann_factor(0.6, 32.0, 20.0);
        assert!((y - arrhenius / 2.0).abs() < 1e-12);
    }

    #[test]
    fn explicit_params_follow_family() {
        let p = [1.0, 0.6, 3.0, 32.0, 20.0];
        assert_eq!(ModelFamily::SharpeSchoolHigh1981.explicit(ParamName::Th, &p), Some(32.0));
        assert_eq!(ModelFamily::SharpeSchoolHigh1981.explicit(ParamName::Topt, &p), None);
        assert_eq!(ModelFamily::Quadratic2008.explicit(ParamName::Rmax, &[0.0; 3]), None);
    }

    #[test]
    fn every_family_has_distinct_name() {
        let mut names: Vec<_> = ModelFamily::ALL.iter().map(|f| f.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ModelFamily::ALL.len());
    }
}
