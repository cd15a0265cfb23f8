//! Ordinary least squares.
//!
//! The local regressions in this crate are tiny straight-line fits
//!
//! ```text
//! minimize Σ (y_i - (a + b x_i))^2
//! ```
//!
//! over a few dozen grid points. We solve them through SVD rather than the normal
//! equations: the design columns can be nearly collinear when the transformed
//! temperature axis (e.g. `1/kT`) barely varies over a short limb.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Fitted straight line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub intercept: f64,
    pub slope: f64,
}

/// Fit a straight line through `(x_i, y_i)`.
///
/// Returns `None` for fewer than two points, mismatched lengths, or a degenerate
/// (constant) `x`.
pub fn fit_line(x: &[f64], y: &[f64]) -> Option<LineFit> {
    let n = x.len();
    if n < 2 || y.len() != n {
        return None;
    }
    let x_min = x.iter().copied().fold(f64::INFINITY, f64::min);
    let x_max = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !(x_max - x_min > 0.0) {
        return None;
    }

    // Center x so the intercept column stays well conditioned against tiny ranges.
    let x_mean = x.iter().sum::<f64>() / n as f64;
    let design = DMatrix::from_fn(n, 2, |i, j| if j == 0 { 1.0 } else { x[i] - x_mean });
    let obs = DVector::from_column_slice(y);

    let beta = solve_least_squares(&design, &obs)?;
    let slope = beta[1];
    Some(LineFit {
        intercept: beta[0] - slope * x_mean,
        slope,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn fit_line_recovers_exact_line_on_narrow_range() {
        // Same scale as 1/kT over a 10 °C limb.
        let x: Vec<f64> = (0..10).map(|i| 39.0 + i as f64 * 0.01).collect();
        let y: Vec<f64> = x.iter().map(|v| 5.0 - 0.65 * v).collect();
        let fit = fit_line(&x, &y).unwrap();
        assert!((fit.slope + 0.65).abs() < 1e-8, "slope={}", fit.slope);
        assert!((fit.intercept - 5.0).abs() < 1e-6, "intercept={}", fit.intercept);
    }

    #[test]
    fn fit_line_rejects_degenerate_input() {
        assert!(fit_line(&[1.0], &[1.0]).is_none());
        assert!(fit_line(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).is_none());
        assert!(fit_line(&[1.0, 2.0], &[1.0]).is_none());
    }
}
