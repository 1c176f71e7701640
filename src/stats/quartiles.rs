//! Quantiles and box-and-whisker statistics.
//!
//! Quantiles use linear interpolation between order statistics (the "type 7"
//! estimator most statistics packages default to): for a sorted sample of
//! size `n`, quantile `q` sits at rank `h = (n - 1)·q` and interpolates
//! between the neighboring order statistics.

/// Interpolated quantile of an ascending-sorted slice.
///
/// Returns NaN for an empty slice; `q` is clamped to `[0, 1]`.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let q = q.clamp(0.0, 1.0);
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    let frac = h - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Quartiles plus whisker reach and the points beyond it.
///
/// Whiskers extend to the most extreme observations still within
/// `1.5 × IQR` of the box; everything outside is an outlier.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

/// Box statistics over the finite values, or `None` when none are finite.
pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let lo_fence = q1 - 1.5 * iqr;
    let hi_fence = q3 + 1.5 * iqr;

    let mut whisker_low = q1;
    let mut whisker_high = q3;
    let mut outliers = Vec::new();
    for &v in &sorted {
        if v < lo_fence || v > hi_fence {
            outliers.push(v);
        } else {
            whisker_low = whisker_low.min(v);
            whisker_high = whisker_high.max(v);
        }
    }

    Some(BoxStats {
        q1,
        median,
        q3,
        whisker_low,
        whisker_high,
        outliers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantile_interpolates_between_order_statistics() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile(&sorted, 0.0), 1.0);
        assert_eq!(quantile(&sorted, 0.25), 2.0);
        assert_eq!(quantile(&sorted, 0.5), 3.0);
        assert_eq!(quantile(&sorted, 1.0), 5.0);

        let even = [1.0, 2.0, 3.0, 4.0];
        assert!((quantile(&even, 0.5) - 2.5).abs() < 1e-12);
        assert!(quantile(&[], 0.5).is_nan());
    }

    #[test]
    fn box_stats_flags_points_beyond_the_fences() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0];
        let b = box_stats(&values).unwrap();
        assert!((b.q1 - 3.25).abs() < 1e-12);
        assert!((b.median - 5.5).abs() < 1e-12);
        assert!((b.q3 - 7.75).abs() < 1e-12);
        assert_eq!(b.whisker_low, 1.0);
        assert_eq!(b.whisker_high, 9.0);
        assert_eq!(b.outliers, vec![100.0]);
    }

    #[test]
    fn box_stats_of_single_value_collapses() {
        let b = box_stats(&[42.0]).unwrap();
        assert_eq!(b.q1, 42.0);
        assert_eq!(b.median, 42.0);
        assert_eq!(b.q3, 42.0);
        assert_eq!(b.whisker_low, 42.0);
        assert_eq!(b.whisker_high, 42.0);
        assert!(b.outliers.is_empty());
    }

    #[test]
    fn box_stats_needs_a_finite_value() {
        assert!(box_stats(&[]).is_none());
        assert!(box_stats(&[f64::NAN, f64::INFINITY]).is_none());
    }
}
