//! Distribution-shape renderers: violin, histogram, and KDE.
//!
//! The three charts share one data preparation step: rows are bucketed by an
//! optional group column and an optional hue column, keeping only rows whose
//! requested labels are present and whose value is finite. Each renderer then
//! turns the buckets into its own geometry.

use std::path::Path;

use plotters::prelude::*;

use crate::chart::{
    ChartStyle, MARGIN, X_LABEL_AREA, Y_LABEL_AREA, category_label, chart_error, ensure_fonts,
    padded_range,
};
use crate::domain::Dataset;
use crate::error::AppError;
use crate::stats::{BoxStats, box_stats, kde_curve, kde_density, silverman_bandwidth};

/// Grid resolution of a violin silhouette.
const VIOLIN_GRID: usize = 100;
/// Grid resolution of a standalone density curve.
const KDE_POINTS: usize = 200;

/// Finite values bucketed by `(group, hue)`.
#[derive(Debug)]
struct BucketedRows {
    group_names: Vec<String>,
    hue_levels: Vec<String>,
    /// Indexed `values[group][hue]`.
    values: Vec<Vec<Vec<f64>>>,
}

fn label_index(names: &mut Vec<String>, name: &str) -> usize {
    match names.iter().position(|n| n == name) {
        Some(i) => i,
        None => {
            names.push(name.to_string());
            names.len() - 1
        }
    }
}

/// Bucket the rows of `value_col` by the labels of the requested columns.
///
/// A row counts only when its value is finite and every requested label is
/// non-empty. Groups and levels keep first-appearance order. Passing `None`
/// for a label column collapses that axis to a single unnamed bucket.
fn bucket_rows(
    dataset: &Dataset,
    group_col: Option<&str>,
    value_col: &str,
    hue_col: Option<&str>,
) -> Result<BucketedRows, AppError> {
    let cells = dataset.numeric_slice(value_col).ok_or_else(|| {
        AppError::new(
            3,
            format!("Column `{value_col}` is missing or not numeric."),
        )
    })?;
    let group_labels = match group_col {
        Some(name) => Some(
            dataset
                .category_values(name)
                .ok_or_else(|| AppError::new(3, format!("Column `{name}` is missing.")))?,
        ),
        None => None,
    };
    let hue_labels = match hue_col {
        Some(name) => Some(
            dataset
                .category_values(name)
                .ok_or_else(|| AppError::new(3, format!("Column `{name}` is missing.")))?,
        ),
        None => None,
    };

    let mut group_names: Vec<String> = Vec::new();
    let mut hue_levels: Vec<String> = Vec::new();
    let mut rows: Vec<(usize, usize, f64)> = Vec::new();
    for (row, cell) in cells.iter().enumerate() {
        let value = match cell {
            Some(v) if v.is_finite() => *v,
            _ => continue,
        };
        let group = match &group_labels {
            Some(labels) => match labels.get(row) {
                Some(label) if !label.is_empty() => label.as_str(),
                _ => continue,
            },
            None => "",
        };
        let hue = match &hue_labels {
            Some(labels) => match labels.get(row) {
                Some(label) if !label.is_empty() => label.as_str(),
                _ => continue,
            },
            None => "",
        };
        let g = label_index(&mut group_names, group);
        let h = label_index(&mut hue_levels, hue);
        rows.push((g, h, value));
    }

    if rows.is_empty() {
        return Err(AppError::new(3, "No usable rows for the chart."));
    }

    let mut values = vec![vec![Vec::new(); hue_levels.len()]; group_names.len()];
    for (g, h, v) in rows {
        values[g][h].push(v);
    }
    Ok(BucketedRows {
        group_names,
        hue_levels,
        values,
    })
}

#[derive(Clone, Copy)]
enum ViolinSide {
    Both,
    Left,
    Right,
}

/// One violin to estimate, before densities are computed.
struct ViolinCell {
    x_center: f64,
    max_half_width: f64,
    side: ViolinSide,
    color_index: usize,
    legend_label: Option<String>,
    name: String,
    values: Vec<f64>,
}

/// A violin with its density silhouette resolved.
struct Silhouette {
    x_center: f64,
    side: ViolinSide,
    color_index: usize,
    label: Option<String>,
    ys: Vec<f64>,
    halves: Vec<f64>,
    stats: Option<BoxStats>,
}

impl Silhouette {
    fn inner_offset(&self) -> f64 {
        match self.side {
            ViolinSide::Both => 0.0,
            ViolinSide::Left => -0.04,
            ViolinSide::Right => 0.04,
        }
    }

    /// Outline of the silhouette as a closed ring of data-space points.
    fn ring(&self) -> Vec<(f64, f64)> {
        let n = self.ys.len();
        let mut points = Vec::with_capacity(2 * n);
        if n == 0 {
            return points;
        }
        match self.side {
            ViolinSide::Both => {
                for i in 0..n {
                    points.push((self.x_center - self.halves[i], self.ys[i]));
                }
                for i in (0..n).rev() {
                    points.push((self.x_center + self.halves[i], self.ys[i]));
                }
            }
            ViolinSide::Left => {
                for i in 0..n {
                    points.push((self.x_center - self.halves[i], self.ys[i]));
                }
                points.push((self.x_center, self.ys[n - 1]));
                points.push((self.x_center, self.ys[0]));
            }
            ViolinSide::Right => {
                for i in 0..n {
                    points.push((self.x_center + self.halves[i], self.ys[i]));
                }
                points.push((self.x_center, self.ys[n - 1]));
                points.push((self.x_center, self.ys[0]));
            }
        }
        points
    }
}

/// Render violins of `value_col` per level of `group_col`.
///
/// With a hue column, each group position holds one violin per hue level;
/// `split` instead draws half-violins back to back and requires exactly two
/// hue levels. Violins whose bucket cannot support a density estimate are
/// skipped with a warning.
#[allow(clippy::too_many_arguments)]
pub fn render_violin(
    dataset: &Dataset,
    group_col: &str,
    value_col: &str,
    hue_col: Option<&str>,
    split: bool,
    title: &str,
    style: &ChartStyle,
    out_path: &Path,
) -> Result<(), AppError> {
    ensure_fonts()?;
    let bucket = bucket_rows(dataset, Some(group_col), value_col, hue_col)?;
    let n_groups = bucket.group_names.len();
    let n_levels = bucket.hue_levels.len();

    let mut cells: Vec<ViolinCell> = Vec::new();
    match hue_col {
        None => {
            for (g, group) in bucket.values.iter().enumerate() {
                cells.push(ViolinCell {
                    x_center: g as f64,
                    max_half_width: 0.4,
                    side: ViolinSide::Both,
                    color_index: g,
                    legend_label: None,
                    name: bucket.group_names[g].clone(),
                    values: group[0].clone(),
                });
            }
        }
        Some(hue) if split => {
            if n_levels != 2 {
                return Err(AppError::new(
                    3,
                    format!("Split violins need exactly 2 levels of `{hue}`, found {n_levels}."),
                ));
            }
            for (g, group) in bucket.values.iter().enumerate() {
                for (l, values) in group.iter().enumerate() {
                    cells.push(ViolinCell {
                        x_center: g as f64,
                        max_half_width: 0.4,
                        side: if l == 0 {
                            ViolinSide::Left
                        } else {
                            ViolinSide::Right
                        },
                        color_index: l,
                        legend_label: Some(bucket.hue_levels[l].clone()),
                        name: format!("{} / {}", bucket.group_names[g], bucket.hue_levels[l]),
                        values: values.clone(),
                    });
                }
            }
        }
        Some(_) => {
            let slot = 0.8 / n_levels as f64;
            for (g, group) in bucket.values.iter().enumerate() {
                for (l, values) in group.iter().enumerate() {
                    cells.push(ViolinCell {
                        x_center: g as f64 - 0.4 + (l as f64 + 0.5) * slot,
                        max_half_width: slot / 2.0 * 0.9,
                        side: ViolinSide::Both,
                        color_index: l,
                        legend_label: Some(bucket.hue_levels[l].clone()),
                        name: format!("{} / {}", bucket.group_names[g], bucket.hue_levels[l]),
                        values: values.clone(),
                    });
                }
            }
        }
    }

    let mut silhouettes: Vec<Silhouette> = Vec::new();
    for cell in cells {
        let Some(bandwidth) = silverman_bandwidth(&cell.values) else {
            log::warn!(
                "violin: skipping {}: not enough spread to estimate a density",
                cell.name
            );
            continue;
        };
        let data_lo = cell.values.iter().copied().fold(f64::INFINITY, f64::min);
        let data_hi = cell
            .values
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let lo = data_lo - 2.0 * bandwidth;
        let hi = data_hi + 2.0 * bandwidth;
        let step = (hi - lo) / (VIOLIN_GRID - 1) as f64;
        let ys: Vec<f64> = (0..VIOLIN_GRID).map(|i| lo + step * i as f64).collect();
        let density = kde_density(&cell.values, bandwidth, &ys);
        let max_d = density.iter().copied().fold(0.0f64, f64::max);
        if !max_d.is_finite() || max_d <= 0.0 {
            log::warn!("violin: skipping {}: estimated density is flat", cell.name);
            continue;
        }
        let halves: Vec<f64> = density
            .iter()
            .map(|d| d / max_d * cell.max_half_width)
            .collect();
        let stats = box_stats(&cell.values);
        silhouettes.push(Silhouette {
            x_center: cell.x_center,
            side: cell.side,
            color_index: cell.color_index,
            label: cell.legend_label,
            ys,
            halves,
            stats,
        });
    }

    let no_violin = || AppError::new(3, format!("No violin could be drawn for `{value_col}`."));
    if silhouettes.is_empty() {
        return Err(no_violin());
    }
    let y_range = padded_range(
        silhouettes
            .iter()
            .flat_map(|s| [s.ys[0], s.ys[s.ys.len() - 1]]),
    )
    .ok_or_else(no_violin)?;
    let x_range = (-0.6, n_groups as f64 - 0.4);

    draw_violin(
        out_path,
        style,
        title,
        group_col,
        value_col,
        &bucket.group_names,
        &silhouettes,
        hue_col.is_some(),
        x_range,
        y_range,
    )
    .map_err(|e| chart_error("violin chart", e))
}

#[allow(clippy::too_many_arguments)]
fn draw_violin(
    out_path: &Path,
    style: &ChartStyle,
    title: &str,
    group_col: &str,
    value_col: &str,
    group_names: &[String],
    silhouettes: &[Silhouette],
    with_legend: bool,
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
        .x_labels(group_names.len().max(2))
        .x_label_formatter(&|x| category_label(x, group_names))
        .x_desc(group_col)
        .y_desc(value_col)
        .axis_style(style.foreground.stroke_width(2))
        .label_style(style.label_font())
        .axis_desc_style(style.axis_desc_font())
        .bold_line_style(style.grid.mix(0.6))
        .light_line_style(style.grid.mix(0.2))
        .draw()?;

    let mut seen_levels: Vec<String> = Vec::new();
    for sil in silhouettes {
        let color = style.series_color(sil.color_index);
        let ring = sil.ring();

        let series = chart.draw_series(std::iter::once(Polygon::new(
            ring.clone(),
            color.mix(0.55).filled(),
        )))?;
        if with_legend {
            if let Some(level) = &sil.label {
                if !seen_levels.iter().any(|s| s == level) {
                    seen_levels.push(level.clone());
                    series.label(level.as_str()).legend(move |(x, y)| {
                        Rectangle::new([(x, y - 6), (x + 24, y + 6)], color.filled())
                    });
                }
            }
        }

        let mut outline = ring;
        if let Some(first) = outline.first().copied() {
            outline.push(first);
        }
        chart.draw_series(std::iter::once(PathElement::new(
            outline,
            color.stroke_width(3),
        )))?;

        if let Some(stats) = &sil.stats {
            let sx = sil.x_center + sil.inner_offset();
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(sx, stats.whisker_low), (sx, stats.whisker_high)],
                style.foreground.stroke_width(4),
            )))?;
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(sx, stats.q1), (sx, stats.q3)],
                style.foreground.stroke_width(10),
            )))?;
            chart.draw_series(std::iter::once(Circle::new(
                (sx, stats.median),
                8,
                style.background.filled(),
            )))?;
        }
    }

    if with_legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(style.background.mix(0.6))
            .border_style(&style.foreground)
            .label_font(style.legend_font())
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Render a histogram of `value_col` with `bins` equal-width bins.
///
/// With a hue column, one translucent bar series per hue level shares the
/// global bin edges so the levels can be compared directly.
pub fn render_histogram(
    dataset: &Dataset,
    value_col: &str,
    hue_col: Option<&str>,
    bins: usize,
    title: &str,
    style: &ChartStyle,
    out_path: &Path,
) -> Result<(), AppError> {
    if bins == 0 {
        return Err(AppError::new(2, "Histogram needs at least one bin."));
    }
    ensure_fonts()?;
    let bucket = bucket_rows(dataset, None, value_col, hue_col)?;

    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for values in &bucket.values[0] {
        for &v in values {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut counts: Vec<Vec<usize>> = vec![vec![0; bins]; bucket.hue_levels.len()];
    for (l, values) in bucket.values[0].iter().enumerate() {
        for &v in values {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[l][idx] += 1;
        }
    }
    let max_count = counts.iter().flatten().copied().max().unwrap_or(1);

    draw_histogram(
        out_path,
        style,
        title,
        value_col,
        &bucket.hue_levels,
        &counts,
        lo,
        width,
        hue_col.is_some(),
        (lo, hi),
        (0.0, max_count as f64 * 1.05),
    )
    .map_err(|e| chart_error("histogram", e))
}

#[allow(clippy::too_many_arguments)]
fn draw_histogram(
    out_path: &Path,
    style: &ChartStyle,
    title: &str,
    value_col: &str,
    levels: &[String],
    counts: &[Vec<usize>],
    lo: f64,
    bin_width: f64,
    with_legend: bool,
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
        .y_label_formatter(&|v| format!("{v:.0}"))
        .x_desc(value_col)
        .y_desc("Count")
        .axis_style(style.foreground.stroke_width(2))
        .label_style(style.label_font())
        .axis_desc_style(style.axis_desc_font())
        .bold_line_style(style.grid.mix(0.6))
        .light_line_style(style.grid.mix(0.2))
        .draw()?;

    for (l, level_counts) in counts.iter().enumerate() {
        let color = style.series_color(l);
        let series = chart.draw_series(
            level_counts
                .iter()
                .enumerate()
                .filter(|&(_, &c)| c > 0)
                .map(|(b, &c)| {
                    let x0 = lo + bin_width * b as f64;
                    Rectangle::new(
                        [(x0, 0.0), (x0 + bin_width, c as f64)],
                        color.mix(0.55).filled(),
                    )
                }),
        )?;
        if with_legend {
            series.label(levels[l].as_str()).legend(move |(x, y)| {
                Rectangle::new([(x, y - 6), (x + 24, y + 6)], color.filled())
            });
        }
        chart.draw_series(
            level_counts
                .iter()
                .enumerate()
                .filter(|&(_, &c)| c > 0)
                .map(|(b, &c)| {
                    let x0 = lo + bin_width * b as f64;
                    Rectangle::new(
                        [(x0, 0.0), (x0 + bin_width, c as f64)],
                        color.stroke_width(2),
                    )
                }),
        )?;
    }

    if with_legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(style.background.mix(0.6))
            .border_style(&style.foreground)
            .label_font(style.legend_font())
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Render kernel density curves of `value_col`, one per hue level.
///
/// Levels whose bucket cannot support a density estimate are skipped with a
/// warning; the chart fails only when no curve at all can be drawn.
pub fn render_kde(
    dataset: &Dataset,
    value_col: &str,
    hue_col: Option<&str>,
    title: &str,
    style: &ChartStyle,
    out_path: &Path,
) -> Result<(), AppError> {
    ensure_fonts()?;
    let bucket = bucket_rows(dataset, None, value_col, hue_col)?;

    let mut curves: Vec<(usize, Vec<(f64, f64)>)> = Vec::new();
    for (l, values) in bucket.values[0].iter().enumerate() {
        match kde_curve(values, KDE_POINTS) {
            Some(points) => curves.push((l, points)),
            None => {
                let name = if bucket.hue_levels[l].is_empty() {
                    value_col
                } else {
                    bucket.hue_levels[l].as_str()
                };
                log::warn!("kde: skipping {name}: not enough spread to estimate a density");
            }
        }
    }

    let no_curve = || {
        AppError::new(
            3,
            format!("No density curve could be drawn for `{value_col}`."),
        )
    };
    if curves.is_empty() {
        return Err(no_curve());
    }

    let mut x_lo = f64::INFINITY;
    let mut x_hi = f64::NEG_INFINITY;
    let mut y_hi = 0.0f64;
    for (_, points) in &curves {
        x_lo = x_lo.min(points[0].0);
        x_hi = x_hi.max(points[points.len() - 1].0);
        for &(_, d) in points {
            y_hi = y_hi.max(d);
        }
    }
    if !y_hi.is_finite() || y_hi <= 0.0 {
        return Err(no_curve());
    }

    draw_kde(
        out_path,
        style,
        title,
        value_col,
        &bucket.hue_levels,
        &curves,
        hue_col.is_some(),
        (x_lo, x_hi),
        (0.0, y_hi * 1.05),
    )
    .map_err(|e| chart_error("density chart", e))
}

#[allow(clippy::too_many_arguments)]
fn draw_kde(
    out_path: &Path,
    style: &ChartStyle,
    title: &str,
    value_col: &str,
    levels: &[String],
    curves: &[(usize, Vec<(f64, f64)>)],
    with_legend: bool,
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
        .y_label_formatter(&|v| format!("{v:.3}"))
        .x_desc(value_col)
        .y_desc("Density")
        .axis_style(style.foreground.stroke_width(2))
        .label_style(style.label_font())
        .axis_desc_style(style.axis_desc_font())
        .bold_line_style(style.grid.mix(0.6))
        .light_line_style(style.grid.mix(0.2))
        .draw()?;

    for (l, points) in curves {
        let color = style.series_color(*l);
        let series = chart.draw_series(
            AreaSeries::new(points.iter().copied(), 0.0, color.mix(0.35).filled())
                .border_style(color.stroke_width(6)),
        )?;
        if with_legend {
            series.label(levels[*l].as_str()).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 24, y)], color.stroke_width(6))
            });
        }
    }

    if with_legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(style.background.mix(0.6))
            .border_style(&style.foreground)
            .label_font(style.legend_font())
            .draw()?;
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Column;

    fn small_style() -> ChartStyle {
        ChartStyle {
            width_px: 640,
            height_px: 400,
            ..ChartStyle::default()
        }
    }

    fn vitals() -> Dataset {
        let mut cause = Vec::new();
        let mut shift = Vec::new();
        let mut grade = Vec::new();
        let mut hr = Vec::new();
        for i in 0..80 {
            cause.push(["Asthma", "COPD"][i % 2].to_string());
            shift.push(["day", "night"][(i / 2) % 2].to_string());
            grade.push(["a", "b", "c"][i % 3].to_string());
            let lift = if i % 2 == 0 { 20.0 } else { 0.0 };
            hr.push(Some(60.0 + i as f64 * 0.5 + lift));
        }
        Dataset::new(vec![
            Column::text("cause", cause),
            Column::text("shift", shift),
            Column::text("grade", grade),
            Column::numeric("hr", hr),
        ])
    }

    #[test]
    fn bucket_rows_keeps_first_appearance_order() {
        let b = bucket_rows(&vitals(), Some("cause"), "hr", Some("shift")).unwrap();
        assert_eq!(b.group_names, ["Asthma", "COPD"]);
        assert_eq!(b.hue_levels, ["day", "night"]);
        assert_eq!(b.values.len(), 2);
        assert_eq!(b.values[0].len(), 2);
        assert_eq!(b.values[0][0].len(), 20);
        assert_eq!(b.values[1][1].len(), 20);
    }

    #[test]
    fn bucket_rows_skips_rows_with_blank_labels() {
        let ds = Dataset::new(vec![
            Column::text(
                "g",
                vec!["x".to_string(), String::new(), "y".to_string()],
            ),
            Column::numeric("v", vec![Some(1.0), Some(2.0), Some(3.0)]),
        ]);
        let b = bucket_rows(&ds, Some("g"), "v", None).unwrap();
        assert_eq!(b.group_names, ["x", "y"]);
        assert_eq!(b.values[0][0], vec![1.0]);
        assert_eq!(b.values[1][0], vec![3.0]);
    }

    #[test]
    fn bucket_rows_rejects_missing_columns() {
        let err = bucket_rows(&vitals(), Some("cause"), "nope", None).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        let err = bucket_rows(&vitals(), Some("nope"), "hr", None).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn violin_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("violin.png");
        render_violin(
            &vitals(),
            "cause",
            "hr",
            None,
            false,
            "Heart rate by cause",
            &small_style(),
            &path,
        )
        .unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn split_violin_writes_png_with_two_levels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("split.png");
        render_violin(
            &vitals(),
            "cause",
            "hr",
            Some("shift"),
            true,
            "Heart rate by cause and shift",
            &small_style(),
            &path,
        )
        .unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn split_violin_rejects_three_levels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("split.png");
        let err = render_violin(
            &vitals(),
            "cause",
            "hr",
            Some("grade"),
            true,
            "Heart rate",
            &small_style(),
            &path,
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn violin_without_spread_fails() {
        let ds = Dataset::new(vec![
            Column::text("g", vec!["x".to_string(), "x".to_string()]),
            Column::numeric("v", vec![Some(5.0), Some(5.0)]),
        ]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("violin.png");
        let err = render_violin(
            &ds,
            "g",
            "v",
            None,
            false,
            "Flat",
            &small_style(),
            &path,
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn histogram_writes_png_with_hue() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hist.png");
        render_histogram(
            &vitals(),
            "hr",
            Some("cause"),
            20,
            "Heart rate",
            &small_style(),
            &path,
        )
        .unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn histogram_rejects_zero_bins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hist.png");
        let err = render_histogram(
            &vitals(),
            "hr",
            None,
            0,
            "Heart rate",
            &small_style(),
            &path,
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn kde_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kde.png");
        render_kde(
            &vitals(),
            "hr",
            Some("cause"),
            "Heart rate density",
            &small_style(),
            &path,
        )
        .unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn kde_without_spread_fails() {
        let ds = Dataset::new(vec![Column::numeric(
            "v",
            vec![Some(3.0), Some(3.0), Some(3.0)],
        )]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kde.png");
        let err = render_kde(&ds, "v", None, "Flat", &small_style(), &path).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
