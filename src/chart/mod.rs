//! Chart rendering.
//!
//! Each renderer is a pure function: dataset in, one PNG out. Styling comes
//! from an explicit [`ChartStyle`] argument instead of process-global theme
//! state, so renderers can run in any order (or in parallel) without
//! affecting each other.
//!
//! - distribution shapes (violin, histogram, KDE) in `distribution`
//! - per-category boxes and bars in `categorical`
//! - scatter + fitted cubic in `regression`

pub mod categorical;
pub mod distribution;
pub mod regression;
pub mod style;

pub use categorical::*;
pub use distribution::*;
pub use regression::*;
pub use style::*;

use crate::error::AppError;

/// Outer margin in pixels.
pub(crate) const MARGIN: u32 = 30;
/// Tick label strip below the plot area, in pixels.
pub(crate) const X_LABEL_AREA: u32 = 110;
/// Tick label strip left of the plot area, in pixels.
pub(crate) const Y_LABEL_AREA: u32 = 150;

/// Wrap a backend error with chart context.
pub(crate) fn chart_error(context: &str, err: impl std::fmt::Display) -> AppError {
    AppError::new(4, format!("Failed to render {context}: {err}"))
}

/// Range over the finite inputs, padded 5% on both sides.
///
/// A degenerate (single-point) range is widened around the value so axes
/// always have positive extent. Returns `None` when nothing is finite.
pub(crate) fn padded_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values {
        if v.is_finite() {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return None;
    }
    if lo == hi {
        let pad = if lo == 0.0 { 0.5 } else { lo.abs() * 0.05 };
        return Some((lo - pad, hi + pad));
    }
    let pad = (hi - lo) * 0.05;
    Some((lo - pad, hi + pad))
}

/// Tick label for a categorical x axis laid out on integer positions.
///
/// Integer ticks get the category name, anything between ticks gets an empty
/// label.
pub(crate) fn category_label(x: &f64, names: &[String]) -> String {
    let idx = x.round();
    if (x - idx).abs() > 0.01 || idx < 0.0 {
        return String::new();
    }
    names.get(idx as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_range_pads_five_percent() {
        let (lo, hi) = padded_range([10.0, 20.0].into_iter()).unwrap();
        assert!((lo - 9.5).abs() < 1e-12);
        assert!((hi - 20.5).abs() < 1e-12);
    }

    #[test]
    fn padded_range_widens_degenerate_input() {
        let (lo, hi) = padded_range(std::iter::once(4.0)).unwrap();
        assert!(lo < 4.0 && hi > 4.0);

        let (lo, hi) = padded_range(std::iter::once(0.0)).unwrap();
        assert!(lo < 0.0 && hi > 0.0);

        assert!(padded_range(std::iter::empty()).is_none());
        assert!(padded_range(std::iter::once(f64::NAN)).is_none());
    }

    #[test]
    fn category_label_only_marks_integer_ticks() {
        let names = vec!["Asthma".to_string(), "COPD".to_string()];
        assert_eq!(category_label(&0.0, &names), "Asthma");
        assert_eq!(category_label(&1.0, &names), "COPD");
        assert_eq!(category_label(&0.5, &names), "");
        assert_eq!(category_label(&-1.0, &names), "");
        assert_eq!(category_label(&2.0, &names), "");
    }
}
