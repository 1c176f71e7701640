//! Polynomial basis construction and evaluation.
//!
//! The regression charts fit
//!
//! `y = β0 + β1·x + β2·x² + β3·x³`
//!
//! which is linear in β, so the fit reduces to a single least-squares solve
//! over a Vandermonde-style design matrix with rows `[1, x, x², x³]`.
//!
//! Numerical notes:
//! - Row powers are built by running product, so each row costs `degree`
//!   multiplications and stays exact for integral inputs.
//! - Evaluation uses Horner's rule instead of forming powers explicitly.

use nalgebra::DMatrix;

/// Build the design matrix with rows `[1, x, x², …, x^degree]`.
pub fn design_matrix(xs: &[f64], degree: usize) -> DMatrix<f64> {
    let cols = degree + 1;
    let mut m = DMatrix::zeros(xs.len(), cols);
    for (row, &x) in xs.iter().enumerate() {
        let mut pow = 1.0;
        for col in 0..cols {
            m[(row, col)] = pow;
            pow *= x;
        }
    }
    m
}

/// Evaluate a polynomial with coefficients in ascending-degree order.
pub fn eval(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn design_matrix_rows_are_powers() {
        let m = design_matrix(&[2.0, -1.0], 3);
        assert_eq!(m.nrows(), 2);
        assert_eq!(m.ncols(), 4);
        assert_eq!(m[(0, 0)], 1.0);
        assert_eq!(m[(0, 1)], 2.0);
        assert_eq!(m[(0, 2)], 4.0);
        assert_eq!(m[(0, 3)], 8.0);
        assert_eq!(m[(1, 3)], -1.0);
    }

    #[test]
    fn eval_matches_direct_computation() {
        // 1 + 2x - x^3 at x = 3
        let coeffs = [1.0, 2.0, 0.0, -1.0];
        assert!((eval(&coeffs, 3.0) - (1.0 + 6.0 - 27.0)).abs() < 1e-12);
        assert_eq!(eval(&[], 5.0), 0.0);
    }
}
