//! Dense evaluation grids.
//!
//! Every derived parameter is read off a curve evaluated on an evenly spaced
//! temperature grid. Two grids are used per extraction:
//!
//! - a coarse grid (default step 1.0) over the observed domain, for `topt`/`rmax`
//!   and the local regressions
//! - a fine grid (default step 0.001) extended past the observed domain, for the
//!   thermal limits
//!
//! Temperatures are generated as `start + i * step`. Repeated addition would
//! drift by several ulps per step and, at 0.001 over 100+ units, visibly shift
//! the grid.

use crate::error::ExtractError;
use crate::models::CurveModel;

/// Upper bound on grid size; anything larger is a misconfigured step.
const MAX_GRID_POINTS: usize = 50_000_000;

/// Relative slack so that `end` is included despite rounding in `(end - start) / step`.
const END_EPS: f64 = 1e-9;

/// A model evaluation, tagged valid only when finite.
///
/// Invalid samples are kept in the grid (so indices line up with temperatures)
/// but never reach comparisons or arithmetic downstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleValue {
    Valid(f64),
    Invalid,
}

impl SampleValue {
    pub fn from_rate(rate: f64) -> Self {
        if rate.is_finite() {
            SampleValue::Valid(rate)
        } else {
            SampleValue::Invalid
        }
    }

    pub fn rate(self) -> Option<f64> {
        match self {
            SampleValue::Valid(r) => Some(r),
            SampleValue::Invalid => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub temp: f64,
    pub value: SampleValue,
}

/// Ordered `(temp, value)` samples with strictly increasing temperatures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleGrid {
    points: Vec<SamplePoint>,
}

impl SampleGrid {
    /// Build a grid from raw `(temp, rate)` pairs, tagging non-finite rates.
    ///
    /// Pairs must already be sorted by strictly increasing temperature.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let points: Vec<SamplePoint> = pairs
            .into_iter()
            .map(|(temp, rate)| SamplePoint {
                temp,
                value: SampleValue::from_rate(rate),
            })
            .collect();
        debug_assert!(points.windows(2).all(|w| w[0].temp < w[1].temp));
        Self { points }
    }

    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Valid `(temp, rate)` pairs in temperature order.
    pub fn valid(&self) -> impl DoubleEndedIterator<Item = (f64, f64)> + '_ {
        self.points
            .iter()
            .filter_map(|p| p.value.rate().map(|r| (p.temp, r)))
    }

    pub fn valid_len(&self) -> usize {
        self.valid().count()
    }

    fn bounds(&self) -> (f64, f64) {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) => (a.temp, b.temp),
            _ => (f64::NAN, f64::NAN),
        }
    }

    /// `EmptyGrid` when no sample is valid.
    pub fn require_valid(self) -> Result<Self, ExtractError> {
        if self.valid().next().is_none() {
            let (start, end) = self.bounds();
            return Err(ExtractError::EmptyGrid { start, end });
        }
        Ok(self)
    }
}

/// Grid temperatures `start, start + step, ..., <= end`.
pub fn grid_temps(start: f64, end: f64, step: f64) -> Result<Vec<f64>, ExtractError> {
    if !(start.is_finite() && end.is_finite()) || end < start {
        return Err(ExtractError::InvalidGrid(format!(
            "bounds must be finite with start <= end, got [{start}, {end}]"
        )));
    }
    if !(step.is_finite() && step > 0.0) {
        return Err(ExtractError::InvalidGrid(format!("step must be finite and > 0, got {step}")));
    }

    let span = (end - start) / step;
    if span >= MAX_GRID_POINTS as f64 {
        return Err(ExtractError::InvalidGrid(format!(
            "[{start}, {end}] at step {step} exceeds {MAX_GRID_POINTS} points"
        )));
    }
    let n = (span + END_EPS * span.max(1.0)).floor() as usize;

    Ok((0..=n).map(|i| start + i as f64 * step).collect())
}

/// Evaluate `model` on the grid `[start, end]` at `step`.
///
/// Non-finite evaluations are tagged [`SampleValue::Invalid`].
pub fn sample<M: CurveModel + ?Sized>(
    model: &M,
    start: f64,
    end: f64,
    step: f64,
) -> Result<SampleGrid, ExtractError> {
    let temps = grid_temps(start, end, step)?;
    Ok(SampleGrid::from_pairs(
        temps.into_iter().map(|t| (t, model.evaluate(t))),
    ))
}

/// Like [`sample`], but fails with `EmptyGrid` if no evaluation is finite.
pub fn sample_valid<M: CurveModel + ?Sized>(
    model: &M,
    start: f64,
    end: f64,
    step: f64,
) -> Result<SampleGrid, ExtractError> {
    sample(model, start, end, step)?.require_valid()
}
