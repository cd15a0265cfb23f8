//! Assemble the full derived-parameter bundle for one curve.
//!
//! Order of work:
//! 1. observed domain + coarse grid
//! 2. `topt`/`rmax` (explicit if the family carries them, else grid maximum)
//! 3. thermal limits on the extrapolation grid, anchored at `topt`/`rmax`
//! 4. slope parameters from local regressions on the coarse grid
//! 5. differences and breadths
//!
//! Only step 2 can fail the whole call. Every later parameter is computed
//! independently and recorded as `None` when it cannot be estimated.

use log::debug;

use crate::domain::{DerivedParams, Direction, ExtractConfig, ObservedDomain, ParamName};
use crate::error::ExtractError;
use crate::extract::boundary::locate_boundary;
use crate::extract::extremum::{Optimum, locate_max};
use crate::extract::regression::{activation_energy, deactivation_energy, q10};
use crate::extract::sampler::{SampleGrid, sample, sample_valid};
use crate::models::CurveModel;

/// Derive every parameter of `model`.
///
/// For a valid configuration this fails only with:
/// - `InsufficientData` if the model has no finite observed temperature
/// - `EmptyGrid` if `topt`/`rmax` cannot be located on the coarse grid
///
/// `InvalidGrid` is a configuration error: knobs rejected by
/// [`ExtractConfig::validate`], or a `coarse_step` too fine for the observed span.
/// It is raised before the model is evaluated.
pub fn assemble<M: CurveModel + ?Sized>(model: &M, config: &ExtractConfig) -> Result<DerivedParams, ExtractError> {
    config.validate()?;
    let domain = model.observed_domain()?;
    let coarse = sample(model, domain.min, domain.max, config.coarse_step)?;
    let Optimum { topt, rmax } = resolve_optimum(model, &coarse, domain)?;

    let ctmin = recover(
        "ctmin",
        locate_boundary(model, topt, rmax, domain, Direction::Low, config).map(|b| b.map(|b| b.temp)),
    );
    let ctmax = recover(
        "ctmax",
        locate_boundary(model, topt, rmax, domain, Direction::High, config).map(|b| b.map(|b| b.temp)),
    );

    let e = explicit_or(model, ParamName::E, || recover("e", activation_energy(&coarse, topt)));
    let eh = explicit_or(model, ParamName::Eh, || recover("eh", deactivation_energy(&coarse, topt)));
    let th = model.explicit(ParamName::Th).filter(|v| v.is_finite());
    let q10 = recover("q10", q10(&coarse, topt));
    let thermal_performance_breadth = recover(
        "thermal_performance_breadth",
        performance_breadth(model, topt, rmax, domain, config),
    );

    let breadth = diff(ctmax, ctmin);
    Ok(DerivedParams {
        rmax: Some(rmax),
        topt: Some(topt),
        ctmin,
        ctmax,
        e,
        eh,
        th,
        q10,
        thermal_safety_margin: diff(ctmax, Some(topt)),
        thermal_tolerance: breadth,
        breadth,
        thermal_performance_breadth,
        skewness: diff(e, eh),
    })
}

/// `topt`/`rmax`, preferring values the model carries explicitly.
///
/// An explicit `topt` outside the observed domain is ignored in favour of the
/// grid maximum; every later parameter is anchored at `topt`.
fn resolve_optimum<M: CurveModel + ?Sized>(
    model: &M,
    coarse: &SampleGrid,
    domain: ObservedDomain,
) -> Result<Optimum, ExtractError> {
    let topt = model.explicit(ParamName::Topt).filter(|v| v.is_finite());
    let rmax = model.explicit(ParamName::Rmax).filter(|v| v.is_finite());

    let topt = match topt {
        Some(t) if !domain.contains(t) => {
            debug!("explicit topt {t} outside [{}, {}], using grid maximum", domain.min, domain.max);
            None
        }
        other => other,
    };

    match (topt, rmax) {
        (Some(topt), Some(rmax)) => Ok(Optimum { topt, rmax }),
        (Some(topt), None) => {
            let at_topt = model.evaluate(topt);
            if at_topt.is_finite() {
                Ok(Optimum { topt, rmax: at_topt })
            } else {
                Ok(Optimum {
                    topt,
                    rmax: locate_max(coarse)?.rmax,
                })
            }
        }
        (None, Some(rmax)) => Ok(Optimum {
            topt: locate_max(coarse)?.topt,
            rmax,
        }),
        (None, None) => locate_max(coarse),
    }
}

/// Width of the contiguous region around `topt` where the rate stays at or
/// above `breadth_level * rmax`, sampled over the observed domain.
pub fn performance_breadth<M: CurveModel + ?Sized>(
    model: &M,
    topt: f64,
    rmax: f64,
    domain: ObservedDomain,
    config: &ExtractConfig,
) -> Result<Option<f64>, ExtractError> {
    let grid = sample_valid(model, domain.min, domain.max, config.fine_step)?;
    let level = config.breadth_level * rmax;
    let points = grid.points();

    // Anchor on the grid point nearest topt.
    let Some(center) = points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (a.temp - topt).abs().total_cmp(&(b.temp - topt).abs()))
        .map(|(i, _)| i)
    else {
        return Ok(None);
    };
    let above = |i: usize| points[i].value.rate().is_some_and(|r| r >= level);
    if !above(center) {
        return Ok(None);
    }

    let mut lo = center;
    while lo > 0 && above(lo - 1) {
        lo -= 1;
    }
    let mut hi = center;
    while hi + 1 < points.len() && above(hi + 1) {
        hi += 1;
    }
    Ok(Some(points[hi].temp - points[lo].temp))
}

fn explicit_or<M: CurveModel + ?Sized>(model: &M, name: ParamName, estimate: impl FnOnce() -> Option<f64>) -> Option<f64> {
    match model.explicit(name).filter(|v| v.is_finite()) {
        Some(v) => Some(v),
        None => estimate(),
    }
}

/// Turn a per-parameter failure into an undefined entry.
fn recover(name: &str, result: Result<Option<f64>, ExtractError>) -> Option<f64> {
    match result {
        Ok(Some(v)) if v.is_finite() => Some(v),
        Ok(_) => {
            debug!("{name}: not estimable");
            None
        }
        Err(err) => {
            debug!("{name}: {err}");
            None
        }
    }
}

fn diff(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some(a? - b?).filter(|v| v.is_finite())
}
