//! Slope parameters from local log-linear regressions.
//!
//! One limb of the sampled curve is kept (at/below `topt` for the rising limb,
//! at/above for the falling limb) and `ln(rate)` is regressed on a transformed
//! temperature:
//!
//! - `InverseKT`: `x = 1/(k (T + 273.15))`, slope `-E` on the rising limb
//!   (activation energy) and `+Eh` on the falling limb (deactivation energy)
//! - `Linear`: `x = T`, slope `ln(Q10) / 10`

use log::debug;

use crate::domain::Side;
use crate::error::ExtractError;
use crate::extract::sampler::SampleGrid;
use crate::math::{fit_line, inverse_kt, q10_from_slope};

/// Minimum points on a limb for a regression with a residual degree of freedom.
pub const MIN_REGRESSION_POINTS: usize = 3;

/// Temperature axis of the regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    InverseKT,
    Linear,
}

impl Transform {
    fn apply(self, temp: f64) -> f64 {
        match self {
            Transform::InverseKT => inverse_kt(temp),
            Transform::Linear => temp,
        }
    }
}

/// Slope of `ln(rate)` against the transformed temperature on one limb.
///
/// - `InsufficientData` if the limb has fewer than [`MIN_REGRESSION_POINTS`] points.
/// - `Ok(None)` if fewer than that many have a positive rate (log undefined) or the
///   fit is degenerate.
pub fn estimate_slope(
    grid: &SampleGrid,
    topt: f64,
    side: Side,
    transform: Transform,
) -> Result<Option<f64>, ExtractError> {
    let limb: Vec<(f64, f64)> = grid
        .valid()
        .filter(|&(temp, _)| match side {
            Side::Rising => temp <= topt,
            Side::Falling => temp >= topt,
        })
        .collect();

    if limb.len() < MIN_REGRESSION_POINTS {
        return Err(ExtractError::InsufficientData {
            needed: MIN_REGRESSION_POINTS,
            found: limb.len(),
        });
    }

    let (x, y): (Vec<f64>, Vec<f64>) = limb
        .iter()
        .filter(|&&(_, rate)| rate > 0.0)
        .map(|&(temp, rate)| (transform.apply(temp), rate.ln()))
        .unzip();

    if x.len() < MIN_REGRESSION_POINTS {
        debug!(
            "{side:?} limb: only {} of {} rates are positive, slope undefined",
            x.len(),
            limb.len()
        );
        return Ok(None);
    }

    Ok(fit_line(&x, &y).map(|fit| fit.slope).filter(|s| s.is_finite()))
}

/// Activation energy (eV) of the rising limb.
pub fn activation_energy(grid: &SampleGrid, topt: f64) -> Result<Option<f64>, ExtractError> {
    Ok(estimate_slope(grid, topt, Side::Rising, Transform::InverseKT)?.map(|slope| -slope))
}

/// Deactivation energy (eV) of the falling limb.
pub fn deactivation_energy(grid: &SampleGrid, topt: f64) -> Result<Option<f64>, ExtractError> {
    estimate_slope(grid, topt, Side::Falling, Transform::InverseKT)
}

/// Q10 of the rising limb.
pub fn q10(grid: &SampleGrid, topt: f64) -> Result<Option<f64>, ExtractError> {
    Ok(estimate_slope(grid, topt, Side::Rising, Transform::Linear)?.map(q10_from_slope))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::boltzmann_factor;

    fn grid(temps: impl Iterator<Item = f64>, f: impl Fn(f64) -> f64) -> SampleGrid {
        SampleGrid::from_pairs(temps.map(|t| (t, f(t))))
    }

    #[test]
    fn recovers_arrhenius_activation_energy() {
        let g = grid((0..=30).map(f64::from), |t| 2.0 * boltzmann_factor(0.65, t, 20.0));
        let e = activation_energy(&g, 30.0).unwrap().unwrap();
        assert!((e - 0.65).abs() < 1e-8, "e={e}");
    }

    #[test]
    fn recovers_deactivation_energy_on_falling_limb() {
        // Pure exponential decay in 1/kT above topt.
        let g = grid((20..=40).map(f64::from), |t| boltzmann_factor(-2.5, t, 30.0));
        let eh = deactivation_energy(&g, 30.0).unwrap().unwrap();
        assert!((eh - 2.5).abs() < 1e-8, "eh={eh}");
    }

    #[test]
    fn recovers_q10() {
        let g = grid((0..=20).map(f64::from), |t| 3f64.powf(t / 10.0));
        let q = q10(&g, 20.0).unwrap().unwrap();
        assert!((q - 3.0).abs() < 1e-9, "q10={q}");
    }

    #[test]
    fn two_point_limb_is_insufficient() {
        let g = grid((24..=40).map(f64::from), |t| 10.0 - (t - 25.0).abs());
        let err = activation_energy(&g, 25.0).unwrap_err();
        assert_eq!(err, ExtractError::InsufficientData { needed: 3, found: 2 });
    }

    #[test]
    fn non_positive_limb_is_undefined() {
        let g = grid((0..=10).map(f64::from), |t| t - 20.0);
        assert_eq!(activation_energy(&g, 10.0).unwrap(), None);
    }

    #[test]
    fn invalid_samples_do_not_count() {
        let g = grid((0..=4).map(f64::from), |t| if t < 2.5 { f64::NAN } else { t });
        let err = q10(&g, 4.0).unwrap_err();
        assert_eq!(err, ExtractError::InsufficientData { needed: 3, found: 2 });
    }
}
