//! Critical thermal limits (`ctmin`, `ctmax`).
//!
//! Starting from `topt`, the search walks outward on a fine grid that extends
//! `extrapolation` units past the observed domain:
//!
//! 1. the nearest point where the rate has fallen to `<= 0`
//! 2. failing that, the nearest point where it is `<= threshold_fraction * rmax`
//! 3. failing that, the limit is undefined
//!
//! Step 2 exists for families whose tails are asymptotic (Sharpe–Schoolfield,
//! Gaussian) and never reach zero. The threshold uses the `rmax` that anchors the
//! rest of the bundle, not a maximum recomputed on the extrapolation grid.

use log::debug;

use crate::domain::{Direction, ExtractConfig, ObservedDomain};
use crate::error::ExtractError;
use crate::extract::sampler::{SampleGrid, sample_valid};
use crate::models::CurveModel;

/// Which rule produced a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryRule {
    ZeroCrossing,
    Threshold,
}

/// A located thermal limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub temp: f64,
    pub rule: BoundaryRule,
}

/// Grid bounds for the extrapolated search in `direction`.
pub fn extrapolation_bounds(domain: ObservedDomain, direction: Direction, extrapolation: f64) -> (f64, f64) {
    match direction {
        Direction::High => (domain.min, domain.max + extrapolation),
        Direction::Low => (domain.min - extrapolation, domain.max),
    }
}

/// Locate `ctmax` (`Direction::High`) or `ctmin` (`Direction::Low`).
///
/// Returns `Ok(None)` when neither rule finds a qualifying point and
/// `EmptyGrid` when the model is non-finite across the whole extrapolation grid.
pub fn locate_boundary<M: CurveModel + ?Sized>(
    model: &M,
    topt: f64,
    rmax: f64,
    domain: ObservedDomain,
    direction: Direction,
    config: &ExtractConfig,
) -> Result<Option<Boundary>, ExtractError> {
    let (start, end) = extrapolation_bounds(domain, direction, config.extrapolation);
    let grid = sample_valid(model, start, end, config.fine_step)?;
    Ok(boundary_on_grid(&grid, topt, rmax, direction, config.threshold_fraction))
}

/// Apply the zero-crossing / threshold rules to an already sampled grid.
pub fn boundary_on_grid(
    grid: &SampleGrid,
    topt: f64,
    rmax: f64,
    direction: Direction,
    threshold_fraction: f64,
) -> Option<Boundary> {
    if let Some(temp) = nearest_at_or_below(grid, topt, direction, 0.0) {
        return Some(Boundary {
            temp,
            rule: BoundaryRule::ZeroCrossing,
        });
    }

    let threshold = threshold_fraction * rmax;
    if !threshold.is_finite() {
        return None;
    }
    let temp = nearest_at_or_below(grid, topt, direction, threshold)?;
    debug!("{direction:?} limit: no zero crossing, using {threshold_fraction} * rmax threshold at {temp}");
    Some(Boundary {
        temp,
        rule: BoundaryRule::Threshold,
    })
}

/// Nearest grid temperature beyond `topt` whose rate is `<= limit`.
fn nearest_at_or_below(grid: &SampleGrid, topt: f64, direction: Direction, limit: f64) -> Option<f64> {
    let mut hits = grid.valid().filter(|&(_, rate)| rate <= limit).map(|(temp, _)| temp);
    match direction {
        // Grid temperatures increase, so the first hit above topt is the nearest.
        Direction::High => hits.find(|&temp| temp > topt),
        Direction::Low => hits.rev().find(|&temp| temp < topt),
    }
}
