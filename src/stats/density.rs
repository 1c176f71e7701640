//! Gaussian kernel density estimation.
//!
//! Bandwidth follows Silverman's rule of thumb, `h = 1.06·σ·n^(-1/5)`, with σ
//! the sample standard deviation. The estimate at grid point `x` is then
//!
//! ```text
//! f(x) = 1 / (n·h·√(2π)) · Σ exp(-((x - vᵢ)/h)² / 2)
//! ```
//!
//! A sample with fewer than two values, or with zero spread, has no usable
//! bandwidth; callers get `None` and are expected to skip the curve.

use crate::stats::describe;

/// Silverman's rule-of-thumb bandwidth.
///
/// Returns `None` when the sample is too small or has zero spread.
pub fn silverman_bandwidth(values: &[f64]) -> Option<f64> {
    let summary = describe(values);
    if summary.count < 2 {
        return None;
    }
    let sigma = summary.std;
    if !sigma.is_finite() || sigma <= 0.0 {
        return None;
    }
    Some(1.06 * sigma * (summary.count as f64).powf(-0.2))
}

/// Evaluate the Gaussian KDE of `values` at each grid point.
pub fn kde_density(values: &[f64], bandwidth: f64, grid: &[f64]) -> Vec<f64> {
    let n = values.len() as f64;
    let norm = 1.0 / (n * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    grid.iter()
        .map(|&x| {
            let sum: f64 = values
                .iter()
                .map(|&v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum();
            norm * sum
        })
        .collect()
}

/// Density curve over an evenly spaced grid padded 10% beyond the data range.
///
/// Returns `None` when no bandwidth can be estimated or fewer than two grid
/// points are requested.
pub fn kde_curve(values: &[f64], points: usize) -> Option<Vec<(f64, f64)>> {
    if points < 2 {
        return None;
    }
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let bandwidth = silverman_bandwidth(&finite)?;

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let pad = (max - min) * 0.1;
    let lo = min - pad;
    let hi = max + pad;

    let step = (hi - lo) / (points - 1) as f64;
    let grid: Vec<f64> = (0..points).map(|i| lo + step * i as f64).collect();
    let density = kde_density(&finite, bandwidth, &grid);
    Some(grid.into_iter().zip(density).collect())
}
