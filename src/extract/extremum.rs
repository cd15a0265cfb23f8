//! Optimum location on a sampled curve.

use crate::error::ExtractError;
use crate::extract::sampler::SampleGrid;

/// Location of the sampled maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Optimum {
    pub topt: f64,
    pub rmax: f64,
}

/// Find `(topt, rmax)` on a grid.
///
/// When several points share the exact maximum rate (flat tops, coarse grids),
/// `topt` is the mean of their temperatures.
pub fn locate_max(grid: &SampleGrid) -> Result<Optimum, ExtractError> {
    let mut rmax = f64::NEG_INFINITY;
    let mut temp_sum = 0.0;
    let mut ties = 0usize;

    for (temp, rate) in grid.valid() {
        if rate > rmax {
            rmax = rate;
            temp_sum = temp;
            ties = 1;
        } else if rate == rmax {
            temp_sum += temp;
            ties += 1;
        }
    }

    if ties == 0 {
        let (start, end) = match (grid.points().first(), grid.points().last()) {
            (Some(a), Some(b)) => (a.temp, b.temp),
            _ => (f64::NAN, f64::NAN),
        };
        return Err(ExtractError::EmptyGrid { start, end });
    }

    Ok(Optimum {
        topt: temp_sum / ties as f64,
        rmax,
    })
}
