//! Per-category renderers: box-and-whisker plots and mean bars.
//!
//! Both charts place one category per integer x position, in the order the
//! categories first appear in the dataset.

use std::path::Path;

use plotters::prelude::*;

use crate::chart::{
    ChartStyle, MARGIN, X_LABEL_AREA, Y_LABEL_AREA, category_label, chart_error, ensure_fonts,
    padded_range,
};
use crate::domain::Dataset;
use crate::error::AppError;
use crate::stats::{BoxStats, box_stats, describe};

fn missing_columns(group_col: &str, value_col: &str) -> AppError {
    AppError::new(
        3,
        format!("Column `{group_col}` or `{value_col}` is missing or not numeric."),
    )
}

/// Render one box per level of `group_col`, with 1.5 IQR whiskers and the
/// observations beyond them drawn as open circles.
pub fn render_boxplot(
    dataset: &Dataset,
    group_col: &str,
    value_col: &str,
    title: &str,
    style: &ChartStyle,
    out_path: &Path,
) -> Result<(), AppError> {
    ensure_fonts()?;
    let groups = dataset
        .grouped_values(group_col, value_col)
        .ok_or_else(|| missing_columns(group_col, value_col))?;

    let mut boxes: Vec<(String, BoxStats)> = Vec::new();
    for (name, values) in &groups {
        if let Some(stats) = box_stats(values) {
            boxes.push((name.clone(), stats));
        }
    }
    if boxes.is_empty() {
        return Err(AppError::new(3, "No usable rows for the chart."));
    }

    let y_range = padded_range(groups.iter().flat_map(|(_, vs)| vs.iter().copied()))
        .ok_or_else(|| AppError::new(3, "No usable rows for the chart."))?;
    let names: Vec<String> = boxes.iter().map(|(name, _)| name.clone()).collect();
    let x_range = (-0.6, names.len() as f64 - 0.4);

    draw_boxplot(
        out_path, style, title, group_col, value_col, &names, &boxes, x_range, y_range,
    )
    .map_err(|e| chart_error("box plot", e))
}

#[allow(clippy::too_many_arguments)]
fn draw_boxplot(
    out_path: &Path,
    style: &ChartStyle,
    title: &str,
    group_col: &str,
    value_col: &str,
    names: &[String],
    boxes: &[(String, BoxStats)],
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
        .disable_x_mesh()
        .x_labels(names.len().max(2))
        .x_label_formatter(&|x| category_label(x, names))
        .x_desc(group_col)
        .y_desc(value_col)
        .axis_style(style.foreground.stroke_width(2))
        .label_style(style.label_font())
        .axis_desc_style(style.axis_desc_font())
        .bold_line_style(style.grid.mix(0.6))
        .light_line_style(style.grid.mix(0.2))
        .draw()?;

    for (i, (_, stats)) in boxes.iter().enumerate() {
        let x = i as f64;
        let color = style.series_color(i);

        chart.draw_series(std::iter::once(PathElement::new(
            vec![(x, stats.q3), (x, stats.whisker_high)],
            style.foreground.stroke_width(3),
        )))?;
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(x, stats.whisker_low), (x, stats.q1)],
            style.foreground.stroke_width(3),
        )))?;
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(x - 0.15, stats.whisker_high), (x + 0.15, stats.whisker_high)],
            style.foreground.stroke_width(3),
        )))?;
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(x - 0.15, stats.whisker_low), (x + 0.15, stats.whisker_low)],
            style.foreground.stroke_width(3),
        )))?;

        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - 0.3, stats.q1), (x + 0.3, stats.q3)],
            color.mix(0.5).filled(),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - 0.3, stats.q1), (x + 0.3, stats.q3)],
            color.stroke_width(3),
        )))?;
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(x - 0.3, stats.median), (x + 0.3, stats.median)],
            style.foreground.stroke_width(6),
        )))?;

        chart.draw_series(
            stats
                .outliers
                .iter()
                .map(|&v| Circle::new((x, v), 7, style.foreground.stroke_width(3))),
        )?;
    }

    root.present()?;
    Ok(())
}

/// Render the mean of `value_col` per level of `group_col` as solid bars
/// anchored at zero.
pub fn render_barplot(
    dataset: &Dataset,
    group_col: &str,
    value_col: &str,
    title: &str,
    style: &ChartStyle,
    out_path: &Path,
) -> Result<(), AppError> {
    ensure_fonts()?;
    let groups = dataset
        .grouped_values(group_col, value_col)
        .ok_or_else(|| missing_columns(group_col, value_col))?;
    if groups.is_empty() {
        return Err(AppError::new(3, "No usable rows for the chart."));
    }

    let means: Vec<(String, f64)> = groups
        .iter()
        .map(|(name, values)| (name.clone(), describe(values).mean))
        .collect();

    let y_range = padded_range(
        means
            .iter()
            .map(|(_, mean)| *mean)
            .chain(std::iter::once(0.0)),
    )
    .ok_or_else(|| AppError::new(3, "No usable rows for the chart."))?;
    let names: Vec<String> = means.iter().map(|(name, _)| name.clone()).collect();
    let x_range = (-0.6, names.len() as f64 - 0.4);

    draw_barplot(
        out_path, style, title, group_col, value_col, &names, &means, x_range, y_range,
    )
    .map_err(|e| chart_error("bar plot", e))
}

#[allow(clippy::too_many_arguments)]
fn draw_barplot(
    out_path: &Path,
    style: &ChartStyle,
    title: &str,
    group_col: &str,
    value_col: &str,
    names: &[String],
    means: &[(String, f64)],
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
        .disable_x_mesh()
        .x_labels(names.len().max(2))
        .x_label_formatter(&|x| category_label(x, names))
        .x_desc(group_col)
        .y_desc(value_col)
        .axis_style(style.foreground.stroke_width(2))
        .label_style(style.label_font())
        .axis_desc_style(style.axis_desc_font())
        .bold_line_style(style.grid.mix(0.6))
        .light_line_style(style.grid.mix(0.2))
        .draw()?;

    for (i, (_, mean)) in means.iter().enumerate() {
        let x = i as f64;
        let color = style.series_color(i);
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - 0.4, 0.0), (x + 0.4, *mean)],
            color.filled(),
        )))?;
    }

    root.present()?;
    Ok(())
}
