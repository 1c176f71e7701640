//! Moment-based summary statistics.
//!
//! Conventions match the usual statistics packages:
//!
//! - variance and standard deviation use the `n - 1` denominator
//! - skewness is the adjusted Fisher-Pearson coefficient `G1`
//! - kurtosis is unbiased *excess* kurtosis `G2` (normal distribution = 0)
//!
//! Statistics that are undefined for the sample size are reported as NaN:
//! variance/std need `n >= 2`, skewness `n >= 3`, kurtosis `n >= 4`. A sample
//! with zero spread gets skewness and kurtosis of exactly `0.0` rather than a
//! 0/0 NaN, again matching the common packages.

/// Descriptive statistics for one numeric sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    pub skewness: f64,
    pub kurtosis: f64,
}

/// Compute the eight summary statistics over the finite values of `values`.
pub fn describe(values: &[f64]) -> Summary {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let n = finite.len();
    if n == 0 {
        return Summary {
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            variance: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            skewness: f64::NAN,
            kurtosis: f64::NAN,
        };
    }

    let nf = n as f64;
    let mean = finite.iter().sum::<f64>() / nf;

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut s2 = 0.0;
    let mut s3 = 0.0;
    let mut s4 = 0.0;
    for &v in &finite {
        min = min.min(v);
        max = max.max(v);
        let d = v - mean;
        let d2 = d * d;
        s2 += d2;
        s3 += d2 * d;
        s4 += d2 * d2;
    }

    let variance = if n >= 2 { s2 / (nf - 1.0) } else { f64::NAN };
    let std = variance.sqrt();

    let skewness = if n < 3 {
        f64::NAN
    } else if s2 == 0.0 {
        0.0
    } else {
        let m2 = s2 / nf;
        let m3 = s3 / nf;
        let g1 = m3 / m2.powf(1.5);
        g1 * (nf * (nf - 1.0)).sqrt() / (nf - 2.0)
    };

    let kurtosis = if n < 4 {
        f64::NAN
    } else if s2 == 0.0 {
        0.0
    } else {
        let a = nf * (nf + 1.0) / ((nf - 1.0) * (nf - 2.0) * (nf - 3.0));
        let b = 3.0 * (nf - 1.0) * (nf - 1.0) / ((nf - 2.0) * (nf - 3.0));
        a * s4 / (variance * variance) - b
    };

    Summary {
        count: n,
        mean,
        std,
        variance,
        min,
        max,
        skewness,
        kurtosis,
    }
}
