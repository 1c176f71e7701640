//! Cubic polynomial fit for the regression charts.
//!
//! Given paired observations `(x_i, y_i)` we solve an ordinary least-squares
//! problem over the basis `{1, x, x², x³}` and keep the coefficients plus the
//! observed x-range, so the curve can later be evaluated on an evenly spaced
//! prediction grid across exactly the span of the data.

use nalgebra::DVector;

use crate::error::AppError;
use crate::math::{design_matrix, eval, solve_least_squares};

/// Polynomial degree used by the regression charts.
pub const REGRESSION_DEGREE: usize = 3;

/// A fitted polynomial plus the x-range it was fitted over.
#[derive(Debug, Clone)]
pub struct PolyFit {
    coefficients: Vec<f64>,
    x_min: f64,
    x_max: f64,
    n_obs: usize,
}

impl PolyFit {
    /// Fit a degree-3 polynomial to the pairs.
    ///
    /// Pairs with a non-finite member are dropped first. Fails with exit
    /// code 3 when fewer than four usable pairs remain or all x values
    /// coincide, and with exit code 4 when the solve itself fails.
    pub fn fit(pairs: &[(f64, f64)]) -> Result<Self, AppError> {
        let clean: Vec<(f64, f64)> = pairs
            .iter()
            .copied()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect();

        if clean.len() < REGRESSION_DEGREE + 1 {
            return Err(AppError::new(
                3,
                format!(
                    "Need at least {} observations for a degree-{} fit, got {}.",
                    REGRESSION_DEGREE + 1,
                    REGRESSION_DEGREE,
                    clean.len()
                ),
            ));
        }

        let xs: Vec<f64> = clean.iter().map(|(x, _)| *x).collect();
        let ys: Vec<f64> = clean.iter().map(|(_, y)| *y).collect();

        let x_min = xs.iter().copied().fold(f64::INFINITY, f64::min);
        let x_max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if x_min == x_max {
            return Err(AppError::new(
                3,
                "All x values coincide; the regression curve is undefined.",
            ));
        }

        let x = design_matrix(&xs, REGRESSION_DEGREE);
        let y = DVector::from_vec(ys);
        let beta = solve_least_squares(&x, &y).ok_or_else(|| {
            AppError::new(4, "Least-squares solve failed: design matrix is too ill-conditioned.")
        })?;

        Ok(Self {
            coefficients: beta.iter().copied().collect(),
            x_min,
            x_max,
            n_obs: clean.len(),
        })
    }

    /// Coefficients in ascending-degree order (`β0..β3`).
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn n_obs(&self) -> usize {
        self.n_obs
    }

    /// Observed x-range the fit covers.
    pub fn x_range(&self) -> (f64, f64) {
        (self.x_min, self.x_max)
    }

    /// Evaluate the fitted polynomial at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        eval(&self.coefficients, x)
    }

    /// Evaluate the fit on `points` evenly spaced x values spanning the
    /// observed range, endpoints inclusive.
    pub fn curve(&self, points: usize) -> Vec<(f64, f64)> {
        match points {
            0 => Vec::new(),
            1 => vec![(self.x_min, self.predict(self.x_min))],
            _ => {
                let step = (self.x_max - self.x_min) / (points - 1) as f64;
                (0..points)
                    .map(|i| {
                        let x = self.x_min + step * i as f64;
                        (x, self.predict(x))
                    })
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_cubic() {
        let truth = [2.0, -1.0, 0.5, 0.125];
        let pairs: Vec<(f64, f64)> = (0..12)
            .map(|i| {
                let x = i as f64;
                (x, eval(&truth, x))
            })
            .collect();

        let fit = PolyFit::fit(&pairs).unwrap();
        assert_eq!(fit.n_obs(), 12);
        for (got, want) in fit.coefficients().iter().zip(truth.iter()) {
            assert!((got - want).abs() < 1e-6, "got {got}, want {want}");
        }
        assert!((fit.predict(3.5) - eval(&truth, 3.5)).abs() < 1e-6);
    }

    #[test]
    fn curve_spans_observed_range_evenly() {
        let pairs: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, i as f64 * 2.0)).collect();
        let fit = PolyFit::fit(&pairs).unwrap();

        let curve = fit.curve(100);
        assert_eq!(curve.len(), 100);
        assert!((curve[0].0 - 0.0).abs() < 1e-12);
        assert!((curve[99].0 - 9.0).abs() < 1e-12);

        let step = curve[1].0 - curve[0].0;
        for w in curve.windows(2) {
            assert!((w[1].0 - w[0].0 - step).abs() < 1e-9);
        }
    }

    #[test]
    fn drops_non_finite_pairs_before_fitting() {
        let mut pairs: Vec<(f64, f64)> = (0..8).map(|i| (i as f64, 1.0 + i as f64)).collect();
        pairs.push((f64::NAN, 3.0));
        pairs.push((4.0, f64::INFINITY));

        let fit = PolyFit::fit(&pairs).unwrap();
        assert_eq!(fit.n_obs(), 8);
    }

    #[test]
    fn too_few_points_is_a_data_error() {
        let err = PolyFit::fit(&[(1.0, 2.0), (2.0, 3.0), (3.0, 4.0)]).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn zero_x_spread_is_a_data_error() {
        let pairs = [(5.0, 1.0), (5.0, 2.0), (5.0, 3.0), (5.0, 4.0)];
        let err = PolyFit::fit(&pairs).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
