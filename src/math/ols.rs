//! Least squares solver.
//!
//! Each regression chart solves one small linear problem of the form:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! Implementation choices:
//! - We use SVD to solve the least-squares problem robustly even when the
//!   design matrix is tall (more rows than columns).
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic for
//!   non-square matrices.)
//! - The parameter dimension is tiny (4 columns for a cubic), so SVD cost is
//!   negligible next to PNG encoding.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    // SVD solve with a relaxed tolerance to handle near-singular matrices.
    // A cubic basis over a narrow x-range produces nearly collinear columns,
    // so we try progressively looser tolerances before giving up.
    let svd = x.clone().svd(true, true);

    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::poly;

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
    fn least_squares_recovers_cubic_coefficients() {
        let xs: Vec<f64> = (0..8).map(|i| i as f64).collect();
        let truth = [1.5, -0.5, 0.25, 0.1];
        let ys: Vec<f64> = xs.iter().map(|&x| poly::eval(&truth, x)).collect();

        let x = poly::design_matrix(&xs, 3);
        let y = DVector::from_vec(ys);
        let beta = solve_least_squares(&x, &y).unwrap();

        for (got, want) in beta.iter().zip(truth.iter()) {
            assert!((got - want).abs() < 1e-8, "got {got}, want {want}");
        }
    }
}
