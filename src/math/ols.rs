//! Least squares solver.
//!
//! Solves `minimize Σ (y_i - x_i^T β)^2` for a tall design matrix. SVD handles
//! the non-square system directly (nalgebra's `QR::solve` is for square
//! systems only and panics otherwise).

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Progressively looser tolerances for near-singular designs.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Least squares fit of a degree-`degree` polynomial; coefficients lowest order first.
pub fn polyfit(xs: &[f64], ys: &[f64], degree: usize) -> Option<Vec<f64>> {
    let n = xs.len();
    if n != ys.len() || n <= degree {
        return None;
    }

    let x = DMatrix::from_fn(n, degree + 1, |i, j| xs[i].powi(j as i32));
    let y = DVector::from_column_slice(ys);
    solve_least_squares(&x, &y).map(|beta| beta.iter().copied().collect())
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
    fn polyfit_degree_one_recovers_line() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys: Vec<f64> = xs.iter().map(|x| 10.0 - 4.0 * x).collect();
        let coeffs = polyfit(&xs, &ys, 1).unwrap();
        assert!((coeffs[0] - 10.0).abs() < 1e-9);
        assert!((coeffs[1] + 4.0).abs() < 1e-9);
    }

    #[test]
    fn polyfit_needs_more_points_than_degree() {
        assert!(polyfit(&[1.0], &[2.0], 1).is_none());
        assert!(polyfit(&[1.0, 2.0], &[2.0], 1).is_none());
    }
}
