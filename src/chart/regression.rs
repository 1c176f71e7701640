//! Scatter plus fitted-curve renderer.
//!
//! The observations are drawn as foreground dots, the cubic fit as a line in
//! the first palette color, evaluated on an evenly spaced prediction grid
//! across the observed x-range.

use std::path::Path;

use plotters::prelude::*;

use crate::chart::{
    ChartStyle, MARGIN, X_LABEL_AREA, Y_LABEL_AREA, chart_error, ensure_fonts, padded_range,
};
use crate::domain::Dataset;
use crate::error::AppError;
use crate::fit::PolyFit;

/// Render `y_col` against `x_col` with a degree-3 least-squares curve.
///
/// `curve_points` sets the resolution of the prediction grid and must be at
/// least two so the curve has an extent.
pub fn render_regression(
    dataset: &Dataset,
    x_col: &str,
    y_col: &str,
    curve_points: usize,
    title: &str,
    style: &ChartStyle,
    out_path: &Path,
) -> Result<(), AppError> {
    if curve_points < 2 {
        return Err(AppError::new(
            2,
            "The prediction grid needs at least 2 points.",
        ));
    }
    ensure_fonts()?;
    let pairs = dataset.paired_values(x_col, y_col).ok_or_else(|| {
        AppError::new(
            3,
            format!("Column `{x_col}` or `{y_col}` is missing or not numeric."),
        )
    })?;
    let fit = PolyFit::fit(&pairs)?;
    let curve = fit.curve(curve_points);

    let no_data = || AppError::new(3, "No usable rows for the chart.");
    let x_range = padded_range(pairs.iter().map(|(x, _)| *x)).ok_or_else(no_data)?;
    let y_range = padded_range(
        pairs
            .iter()
            .map(|(_, y)| *y)
            .chain(curve.iter().map(|(_, y)| *y)),
    )
    .ok_or_else(no_data)?;

    draw_regression(
        out_path, style, title, x_col, y_col, &pairs, &curve, x_range, y_range,
    )
    .map_err(|e| chart_error("regression chart", e))
}

#[allow(clippy::too_many_arguments)]
fn draw_regression(
    out_path: &Path,
    style: &ChartStyle,
    title: &str,
    x_col: &str,
    y_col: &str,
    pairs: &[(f64, f64)],
    curve: &[(f64, f64)],
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(out_path, (style.width_px, style.height_px)).into_drawing_area();
    root.fill(&style.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, style.title_font())
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;

    chart
        .configure_mesh()
        .x_label_formatter(&|v| format!("{v:.1}"))
        .y_label_formatter(&|v| format!("{v:.1}"))
        .x_desc(x_col)
        .y_desc(y_col)
        .axis_style(style.foreground.stroke_width(2))
        .label_style(style.label_font())
        .axis_desc_style(style.axis_desc_font())
        .bold_line_style(style.grid.mix(0.6))
        .light_line_style(style.grid.mix(0.2))
        .draw()?;

    let fg = style.foreground;
    chart
        .draw_series(
            pairs
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 8, fg.filled())),
        )?
        .label("Observed")
        .legend(move |(x, y)| Circle::new((x + 12, y), 8, fg.filled()));

    let line = style.series_color(0);
    chart
        .draw_series(LineSeries::new(
            curve.iter().copied(),
            line.stroke_width(8),
        ))?
        .label("Degree-3 fit")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], line.stroke_width(8)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(style.background.mix(0.6))
        .border_style(&style.foreground)
        .label_font(style.legend_font())
        .draw()?;

    root.present()?;
    Ok(())
}
