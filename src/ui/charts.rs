//! The ten dashboard charts.
//!
//! Every builder takes the immutable dataset plus the currently visible
//! row indices and derives its own per-frame geometry. Charts never
//! mutate state; anything expensive enough to cache lives in
//! [`crate::state::Aggregates`] instead.

use std::collections::BTreeMap;

use eframe::egui::{Align2, Color32, RichText, Stroke, Ui, Vec2b};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, LineStyle, Plot, PlotPoint, Points,
    Polygon, Text,
};

use crate::color;
use crate::data::aggregate::{self, CorrelationMatrix};
use crate::data::model::{Column, WineDataset, WineType};

const CHART_HEIGHT: f32 = 270.0;

/// Steel blue for the single-series trend chart.
const TREND_COLOR: Color32 = Color32::from_rgb(70, 130, 180);

/// Visible indices split per wine type, skipping types with no rows.
fn type_groups(dataset: &WineDataset, indices: &[usize]) -> Vec<(WineType, Vec<usize>)> {
    WineType::ALL
        .into_iter()
        .map(|wine_type| {
            let rows = indices
                .iter()
                .copied()
                .filter(|&i| dataset.samples[i].wine_type == wine_type)
                .collect::<Vec<_>>();
            (wine_type, rows)
        })
        .filter(|(_, rows)| !rows.is_empty())
        .collect()
}

/// Deterministic pseudo-jitter in `[-0.5, 0.5)` keyed on the row index,
/// so strip charts do not shimmer between frames.
fn jitter(index: usize) -> f64 {
    let h = (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    (h >> 11) as f64 / (1u64 << 53) as f64 - 0.5
}

fn empty_note(ui: &mut Ui) {
    ui.weak("No samples match the current filters.");
}

fn min_max(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Chart 1: grouped bar chart of sample counts per quality score, one bar
/// group per wine type, with the count printed above each bar.
pub fn quality_distribution(ui: &mut Ui, dataset: &WineDataset, indices: &[usize]) {
    ui.strong("1. Quality Distribution");
    if indices.is_empty() {
        empty_note(ui);
        return;
    }

    let groups = type_groups(dataset, indices);
    let slot = 0.8 / groups.len() as f64;

    let mut charts = Vec::new();
    let mut labels = Vec::new();
    for (gi, (wine_type, rows)) in groups.iter().enumerate() {
        let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
        for &i in rows {
            *counts.entry(dataset.samples[i].quality).or_default() += 1;
        }

        let offset = (gi as f64 + 0.5) * slot - 0.4;
        let bars = counts
            .iter()
            .map(|(&q, &c)| Bar::new(f64::from(q) + offset, c as f64).width(slot * 0.9))
            .collect::<Vec<_>>();
        for (&q, &c) in &counts {
            labels.push(
                Text::new(
                    PlotPoint::new(f64::from(q) + offset, c as f64),
                    RichText::new(c.to_string()).size(9.0),
                )
                .anchor(Align2::CENTER_BOTTOM),
            );
        }
        charts.push(
            BarChart::new(bars)
                .color(color::wine_color(*wine_type))
                .name(wine_type.label()),
        );
    }

    Plot::new("quality_distribution")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("quality score")
        .y_axis_label("samples")
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
            for label in labels {
                plot_ui.text(label);
            }
        });
}

/// Chart 2: box plots of alcohol per quality score, side by side per type.
pub fn alcohol_by_quality(ui: &mut Ui, dataset: &WineDataset, indices: &[usize]) {
    ui.strong("2. Alcohol vs. Quality");
    if indices.is_empty() {
        empty_note(ui);
        return;
    }

    let groups = type_groups(dataset, indices);
    let slot = 0.8 / groups.len() as f64;

    let mut plots = Vec::new();
    for (gi, (wine_type, rows)) in groups.iter().enumerate() {
        let offset = (gi as f64 + 0.5) * slot - 0.4;
        let mut by_quality: BTreeMap<u8, Vec<f64>> = BTreeMap::new();
        for &i in rows {
            let sample = &dataset.samples[i];
            by_quality
                .entry(sample.quality)
                .or_default()
                .push(sample.alcohol);
        }

        let elems = by_quality
            .iter()
            .filter_map(|(&q, values)| {
                let stats = aggregate::box_stats(values)?;
                Some(
                    BoxElem::new(
                        f64::from(q) + offset,
                        BoxSpread::new(
                            stats.lower_whisker,
                            stats.q1,
                            stats.median,
                            stats.q3,
                            stats.upper_whisker,
                        ),
                    )
                    .box_width(slot * 0.7)
                    .whisker_width(slot * 0.4),
                )
            })
            .collect::<Vec<_>>();
        plots.push(
            BoxPlot::new(elems)
                .color(color::wine_color(*wine_type))
                .name(wine_type.label()),
        );
    }

    Plot::new("alcohol_by_quality")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("quality score")
        .y_axis_label("alcohol (% vol)")
        .show(ui, |plot_ui| {
            for plot in plots {
                plot_ui.box_plot(plot);
            }
        });
}

/// Chart 3: density against fixed acidity, one point cloud and one dashed
/// least-squares trend line per wine type.
pub fn density_vs_acidity(ui: &mut Ui, dataset: &WineDataset, indices: &[usize]) {
    ui.strong("3. Density vs. Fixed Acidity");
    if indices.is_empty() {
        empty_note(ui);
        return;
    }

    let mut scatters = Vec::new();
    let mut trends = Vec::new();
    for (wine_type, rows) in type_groups(dataset, indices) {
        let pairs = rows
            .iter()
            .map(|&i| {
                let sample = &dataset.samples[i];
                (sample.fixed_acidity, sample.density)
            })
            .collect::<Vec<_>>();

        scatters.push(
            Points::new(pairs.iter().map(|&(x, y)| [x, y]).collect::<Vec<_>>())
                .radius(1.6)
                .color(color::wine_color(wine_type))
                .name(wine_type.label()),
        );
        if let Some((slope, intercept)) = aggregate::linear_fit(&pairs) {
            let (x_lo, x_hi) = min_max(pairs.iter().map(|&(x, _)| x)).unwrap_or((0.0, 1.0));
            trends.push(
                Line::new(vec![
                    [x_lo, slope * x_lo + intercept],
                    [x_hi, slope * x_hi + intercept],
                ])
                .color(color::wine_color(wine_type))
                .width(2.0)
                .style(LineStyle::Dashed { length: 8.0 })
                .name(wine_type.label()),
            );
        }
    }

    Plot::new("density_vs_acidity")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("fixed acidity (g/dm³)")
        .y_axis_label("density (g/cm³)")
        .show(ui, |plot_ui| {
            for points in scatters {
                plot_ui.points(points);
            }
            for line in trends {
                plot_ui.line(line);
            }
        });
}

/// Chart 4: violin plot of volatile acidity per wine type. The violin
/// outline is a mirrored kernel density curve; a slim box plot sits inside.
pub fn volatile_acidity_spread(ui: &mut Ui, dataset: &WineDataset, indices: &[usize]) {
    ui.strong("4. Volatile Acidity Spread");
    if indices.is_empty() {
        empty_note(ui);
        return;
    }

    let groups = type_groups(dataset, indices);
    let mut violins = Vec::new();
    let mut boxes = Vec::new();
    let mut value_range: Option<(f64, f64)> = None;

    for (gi, (wine_type, rows)) in groups.iter().enumerate() {
        let x0 = gi as f64;
        let values = aggregate::column_values(dataset, rows, Column::VolatileAcidity);
        if let Some((lo, hi)) = min_max(values.iter().copied()) {
            let (acc_lo, acc_hi) = value_range.unwrap_or((lo, hi));
            value_range = Some((acc_lo.min(lo), acc_hi.max(hi)));
        }

        let curve = aggregate::kde_curve(&values, 80);
        if !curve.is_empty() {
            let peak = curve.iter().map(|p| p[1]).fold(0.0_f64, f64::max);
            let half_width = 0.38 / peak;
            let mut outline = Vec::with_capacity(curve.len() * 2);
            for p in &curve {
                outline.push([x0 - p[1] * half_width, p[0]]);
            }
            for p in curve.iter().rev() {
                outline.push([x0 + p[1] * half_width, p[0]]);
            }
            violins.push(
                Polygon::new(outline)
                    .fill_color(color::wine_fill(*wine_type))
                    .stroke(Stroke::new(1.0, color::wine_color(*wine_type))),
            );
        }

        if let Some(stats) = aggregate::box_stats(&values) {
            boxes.push(
                BoxElem::new(
                    x0,
                    BoxSpread::new(
                        stats.lower_whisker,
                        stats.q1,
                        stats.median,
                        stats.q3,
                        stats.upper_whisker,
                    ),
                )
                .box_width(0.08)
                .whisker_width(0.04)
                .fill(Color32::from_gray(30))
                .stroke(Stroke::new(1.0, Color32::GRAY)),
            );
        }
    }

    let (lo, hi) = value_range.unwrap_or((0.0, 1.0));
    let label_y = lo - (hi - lo).max(0.1) * 0.08;
    let type_labels = groups
        .iter()
        .enumerate()
        .map(|(gi, (wine_type, _))| {
            Text::new(
                PlotPoint::new(gi as f64, label_y),
                RichText::new(wine_type.label()).size(11.0),
            )
            .anchor(Align2::CENTER_TOP)
        })
        .collect::<Vec<_>>();

    Plot::new("volatile_acidity_spread")
        .height(CHART_HEIGHT)
        .show_axes(Vec2b::new(false, true))
        .include_x(-0.7)
        .include_x(groups.len() as f64 - 0.3)
        .include_y(label_y - (hi - lo).max(0.1) * 0.05)
        .y_axis_label("volatile acidity (g/dm³)")
        .show(ui, |plot_ui| {
            for violin in violins {
                plot_ui.polygon(violin);
            }
            plot_ui.box_plot(BoxPlot::new(boxes));
            for label in type_labels {
                plot_ui.text(label);
            }
        });
}

/// Chart 5: kernel density estimate of pH per wine type, filled to zero.
pub fn ph_density(ui: &mut Ui, dataset: &WineDataset, indices: &[usize]) {
    ui.strong("5. pH Level Density");
    if indices.is_empty() {
        empty_note(ui);
        return;
    }

    let mut lines = Vec::new();
    for (wine_type, rows) in type_groups(dataset, indices) {
        let values = aggregate::column_values(dataset, &rows, Column::Ph);
        let curve = aggregate::kde_curve(&values, 160);
        if curve.is_empty() {
            continue;
        }
        lines.push(
            Line::new(curve)
                .color(color::wine_color(wine_type))
                .width(1.8)
                .fill(0.0)
                .name(wine_type.label()),
        );
    }
    if lines.is_empty() {
        empty_note(ui);
        return;
    }

    Plot::new("ph_density")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("pH")
        .y_axis_label("density")
        .show(ui, |plot_ui| {
            for line in lines {
                plot_ui.line(line);
            }
        });
}

/// Chart 6: sulphates against chlorides, colored by quality score. Marker
/// radius encodes alcohol, quantized into four buckets so points group into
/// a manageable number of plot items.
pub fn sulphates_vs_chlorides(ui: &mut Ui, dataset: &WineDataset, indices: &[usize]) {
    ui.strong("6. Sulphates vs. Chlorides");
    if indices.is_empty() {
        empty_note(ui);
        return;
    }

    let (alc_lo, alc_hi) =
        min_max(indices.iter().map(|&i| dataset.samples[i].alcohol)).unwrap_or((0.0, 1.0));

    let mut buckets: BTreeMap<(u8, u8), Vec<[f64; 2]>> = BTreeMap::new();
    for &i in indices {
        let sample = &dataset.samples[i];
        let t = if alc_hi > alc_lo {
            (sample.alcohol - alc_lo) / (alc_hi - alc_lo)
        } else {
            0.5
        };
        let bucket = ((t * 4.0) as u8).min(3);
        buckets
            .entry((sample.quality, bucket))
            .or_default()
            .push([sample.sulphates, sample.chlorides]);
    }

    Plot::new("sulphates_vs_chlorides")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("sulphates (g/dm³)")
        .y_axis_label("chlorides (g/dm³)")
        .show(ui, |plot_ui| {
            for ((quality, bucket), points) in buckets {
                plot_ui.points(
                    Points::new(points)
                        .radius(1.2 + f32::from(bucket) * 1.1)
                        .color(color::quality_color(
                            quality,
                            dataset.quality_min,
                            dataset.quality_max,
                        ))
                        .name(format!("quality {quality}")),
                );
            }
        });
}

/// Chart 7: stacked histogram of total sulfur dioxide with a horizontal
/// marginal box plot per wine type floating above the bars.
pub fn total_sulfur_histogram(ui: &mut Ui, dataset: &WineDataset, indices: &[usize]) {
    ui.strong("7. Total Sulfur Dioxide per Type");
    if indices.is_empty() {
        empty_note(ui);
        return;
    }

    let all_values = aggregate::column_values(dataset, indices, Column::TotalSulfurDioxide);
    let Some((lo, hi)) = min_max(all_values.iter().copied()) else {
        empty_note(ui);
        return;
    };
    if hi <= lo {
        empty_note(ui);
        return;
    }

    let bins = aggregate::sturges_bins(all_values.len());
    let bin_width = (hi - lo) / bins as f64;
    let groups = type_groups(dataset, indices);

    let mut charts: Vec<BarChart> = Vec::new();
    let mut stacked_totals = vec![0.0_f64; bins];
    let mut group_values = Vec::new();
    for (gi, (wine_type, rows)) in groups.iter().enumerate() {
        let values = aggregate::column_values(dataset, rows, Column::TotalSulfurDioxide);
        let histogram = aggregate::histogram(&values, (lo, hi), bins);
        for (bi, &(_, count)) in histogram.iter().enumerate() {
            stacked_totals[bi] += count as f64;
        }

        let bars = histogram
            .iter()
            .map(|&(center, count)| Bar::new(center, count as f64).width(bin_width * 0.95))
            .collect::<Vec<_>>();
        let mut chart = BarChart::new(bars)
            .color(color::wine_color(*wine_type))
            .name(wine_type.label());
        if gi > 0 {
            let below = charts.iter().collect::<Vec<_>>();
            chart = chart.stack_on(&below);
        }
        charts.push(chart);
        group_values.push(values);
    }

    // Marginal boxes hover above the tallest stack.
    let peak = stacked_totals.iter().copied().fold(0.0_f64, f64::max);
    let mut marginals = Vec::new();
    for (gi, (wine_type, _)) in groups.iter().enumerate() {
        if let Some(stats) = aggregate::box_stats(&group_values[gi]) {
            let level = peak * (1.12 + 0.10 * gi as f64);
            marginals.push(
                BoxPlot::new(vec![BoxElem::new(
                    level,
                    BoxSpread::new(
                        stats.lower_whisker,
                        stats.q1,
                        stats.median,
                        stats.q3,
                        stats.upper_whisker,
                    ),
                )
                .box_width(peak * 0.06)
                .whisker_width(peak * 0.03)])
                .horizontal()
                .color(color::wine_color(*wine_type)),
            );
        }
    }

    Plot::new("total_sulfur_histogram")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("total sulfur dioxide (mg/dm³)")
        .y_axis_label("samples")
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
            for marginal in marginals {
                plot_ui.box_plot(marginal);
            }
        });
}

/// Chart 8: jittered strip plot of residual sugar per wine type, points
/// colored by quality score.
pub fn residual_sugar_strip(ui: &mut Ui, dataset: &WineDataset, indices: &[usize]) {
    ui.strong("8. Residual Sugar Comparison");
    if indices.is_empty() {
        empty_note(ui);
        return;
    }

    let groups = type_groups(dataset, indices);
    let mut by_quality: BTreeMap<u8, Vec<[f64; 2]>> = BTreeMap::new();
    let mut value_range: Option<(f64, f64)> = None;
    for (gi, (_, rows)) in groups.iter().enumerate() {
        let x0 = gi as f64;
        for &i in rows {
            let sample = &dataset.samples[i];
            by_quality
                .entry(sample.quality)
                .or_default()
                .push([x0 + jitter(i) * 0.6, sample.residual_sugar]);
            let (lo, hi) = value_range.unwrap_or((sample.residual_sugar, sample.residual_sugar));
            value_range = Some((lo.min(sample.residual_sugar), hi.max(sample.residual_sugar)));
        }
    }

    let (lo, hi) = value_range.unwrap_or((0.0, 1.0));
    let label_y = lo - (hi - lo).max(0.1) * 0.08;
    let type_labels = groups
        .iter()
        .enumerate()
        .map(|(gi, (wine_type, _))| {
            Text::new(
                PlotPoint::new(gi as f64, label_y),
                RichText::new(wine_type.label()).size(11.0),
            )
            .anchor(Align2::CENTER_TOP)
        })
        .collect::<Vec<_>>();

    Plot::new("residual_sugar_strip")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .show_axes(Vec2b::new(false, true))
        .include_x(-0.7)
        .include_x(groups.len() as f64 - 0.3)
        .include_y(label_y - (hi - lo).max(0.1) * 0.05)
        .y_axis_label("residual sugar (g/dm³)")
        .show(ui, |plot_ui| {
            for (quality, points) in by_quality {
                plot_ui.points(
                    Points::new(points)
                        .radius(1.5)
                        .color(color::quality_color(
                            quality,
                            dataset.quality_min,
                            dataset.quality_max,
                        ))
                        .name(format!("quality {quality}")),
                );
            }
            for label in type_labels {
                plot_ui.text(label);
            }
        });
}

/// Chart 9: mean free sulfur dioxide per quality score as a filled area
/// line, computed once per filter change in [`crate::state::Aggregates`].
pub fn sulfur_trend(ui: &mut Ui, trend: &[(u8, f64)]) {
    ui.strong("9. Free Sulfur Dioxide Trend");
    if trend.is_empty() {
        empty_note(ui);
        return;
    }

    let points = trend
        .iter()
        .map(|&(quality, mean)| [f64::from(quality), mean])
        .collect::<Vec<_>>();

    Plot::new("sulfur_trend")
        .height(CHART_HEIGHT)
        .x_axis_label("quality score")
        .y_axis_label("mean free sulfur dioxide (mg/dm³)")
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points.clone())
                    .color(TREND_COLOR)
                    .width(2.0)
                    .fill(0.0),
            );
            plot_ui.points(Points::new(points).radius(3.0).color(TREND_COLOR));
        });
}

/// Chart 10: correlation heatmap over all twelve numeric columns. Cells are
/// unit polygons on a diverging blue-white-red scale; undefined coefficients
/// render gray. Axis labels and optional per-cell annotations are plot text.
pub fn correlation_heatmap(ui: &mut Ui, matrix: &CorrelationMatrix, annotate: bool) {
    ui.strong("10. Correlation Heatmap");
    if matrix.is_empty() {
        empty_note(ui);
        return;
    }

    let n = matrix.len();
    Plot::new("correlation_heatmap")
        .height(CHART_HEIGHT * 1.3)
        .show_axes(Vec2b::new(false, false))
        .show_grid(Vec2b::new(false, false))
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-4.5)
        .include_x(n as f64 + 0.3)
        .include_y(-1.6)
        .include_y(n as f64 + 0.3)
        .show(ui, |plot_ui| {
            for i in 0..n {
                // Row 0 at the top, matching the usual matrix orientation.
                let y0 = (n - 1 - i) as f64;
                for j in 0..n {
                    let r = matrix.get(i, j);
                    let x0 = j as f64;
                    plot_ui.polygon(
                        Polygon::new(vec![
                            [x0, y0],
                            [x0 + 1.0, y0],
                            [x0 + 1.0, y0 + 1.0],
                            [x0, y0 + 1.0],
                        ])
                        .fill_color(color::diverging_color(r))
                        .stroke(Stroke::NONE),
                    );
                    if annotate {
                        let label = if r.is_nan() {
                            "n/a".to_owned()
                        } else {
                            format!("{r:.2}")
                        };
                        let text_color = if r.is_nan() {
                            Color32::from_gray(230)
                        } else if r.abs() > 0.5 {
                            Color32::WHITE
                        } else {
                            Color32::from_gray(25)
                        };
                        plot_ui.text(
                            Text::new(
                                PlotPoint::new(x0 + 0.5, y0 + 0.5),
                                RichText::new(label).size(8.0).color(text_color),
                            )
                            .anchor(Align2::CENTER_CENTER),
                        );
                    }
                }
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(-0.15, y0 + 0.5),
                        RichText::new(matrix.columns[i].label()).size(9.0),
                    )
                    .anchor(Align2::RIGHT_CENTER),
                );
            }
            for j in 0..n {
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(j as f64 + 0.5, -0.15),
                        RichText::new(matrix.columns[j].short_label()).size(9.0),
                    )
                    .anchor(Align2::CENTER_TOP),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::WineSample;

    fn toy_dataset() -> WineDataset {
        WineDataset::from_samples(vec![
            WineSample::for_tests(WineType::Red, 5),
            WineSample::for_tests(WineType::Red, 7),
            WineSample::for_tests(WineType::White, 6),
        ])
    }

    #[test]
    fn type_groups_splits_and_skips_empty() {
        let dataset = toy_dataset();
        let groups = type_groups(&dataset, &[0, 1, 2]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], (WineType::Red, vec![0, 1]));
        assert_eq!(groups[1], (WineType::White, vec![2]));

        let red_only = type_groups(&dataset, &[0, 1]);
        assert_eq!(red_only.len(), 1);
        assert_eq!(red_only[0].0, WineType::Red);
    }

    #[test]
    fn jitter_is_deterministic_and_bounded() {
        for i in 0..1000 {
            let j = jitter(i);
            assert!((-0.5..0.5).contains(&j), "jitter {j} out of range");
            assert_eq!(j, jitter(i));
        }
        assert_ne!(jitter(1), jitter(2));
    }

    #[test]
    fn min_max_handles_empty_and_order() {
        assert_eq!(min_max(Vec::<f64>::new()), None);
        assert_eq!(min_max(vec![3.0, -1.0, 2.0]), Some((-1.0, 3.0)));
    }
}
