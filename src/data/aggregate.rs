//! Descriptive statistics over a filtered view of the dataset.
//!
//! Every function here is pure and total: it reads `(&WineDataset, &[usize])`
//! and returns a value. Undefined aggregates (empty view, zero variance) come
//! back as `None` or `f64::NAN`, never as a panic, so the charts can decide
//! how to render the gap.

use std::collections::BTreeMap;

use super::model::{Column, WineDataset};

/// Summed squared deviations below this are treated as zero variance.
const VARIANCE_FLOOR: f64 = 1e-12;

// ---------------------------------------------------------------------------
// Column views
// ---------------------------------------------------------------------------

/// Collect one column of the filtered view.
pub fn column_values(dataset: &WineDataset, indices: &[usize], column: Column) -> Vec<f64> {
    indices
        .iter()
        .map(|&i| column.value(&dataset.samples[i]))
        .collect()
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub mean: f64,
    pub median: f64,
}

/// Mean and median of one column over the filtered view, `None` when the
/// view is empty.
pub fn summary_stats(
    dataset: &WineDataset,
    indices: &[usize],
    column: Column,
) -> Option<SummaryStats> {
    let values = column_values(dataset, indices, column);
    Some(SummaryStats {
        mean: mean(&values)?,
        median: median(&values)?,
    })
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    Some(if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    })
}

// ---------------------------------------------------------------------------
// Grouped mean (quality is the only discrete column)
// ---------------------------------------------------------------------------

/// Mean of `value_column` per distinct quality score in the filtered view,
/// ascending by score, each score exactly once. Empty view ⇒ empty vec.
pub fn mean_by_quality(
    dataset: &WineDataset,
    indices: &[usize],
    value_column: Column,
) -> Vec<(u8, f64)> {
    let mut groups: BTreeMap<u8, (f64, usize)> = BTreeMap::new();
    for &i in indices {
        let sample = &dataset.samples[i];
        let entry = groups.entry(sample.quality).or_insert((0.0, 0));
        entry.0 += value_column.value(sample);
        entry.1 += 1;
    }
    groups
        .into_iter()
        .map(|(quality, (sum, n))| (quality, sum / n as f64))
        .collect()
}

// ---------------------------------------------------------------------------
// Correlation matrix
// ---------------------------------------------------------------------------

/// Pairwise Pearson coefficients over a fixed column list. `values[i][j]`
/// correlates `columns[i]` with `columns[j]`; the matrix is symmetric with
/// 1.0 on the diagonal, except that any pair involving a zero-variance (or
/// empty) column is `f64::NAN`.
#[derive(Debug, Clone, Default)]
pub struct CorrelationMatrix {
    pub columns: Vec<Column>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient at (row, col); both must be `< len()`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }
}

pub fn correlation_matrix(
    dataset: &WineDataset,
    indices: &[usize],
    columns: &[Column],
) -> CorrelationMatrix {
    let series: Vec<Vec<f64>> = columns
        .iter()
        .map(|&c| column_values(dataset, indices, c))
        .collect();

    let n = columns.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = if i == j {
                if has_variance(&series[i]) {
                    1.0
                } else {
                    f64::NAN
                }
            } else {
                pearson(&series[i], &series[j])
            };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        columns: columns.to_vec(),
        values,
    }
}

/// Pearson correlation coefficient; `NaN` when either side is empty or has
/// no variance.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.is_empty() {
        return f64::NAN;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= VARIANCE_FLOOR || var_y <= VARIANCE_FLOOR {
        return f64::NAN;
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}

fn has_variance(values: &[f64]) -> bool {
    match mean(values) {
        Some(m) => values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() > VARIANCE_FLOOR,
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Box statistics (quartiles + Tukey whiskers)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStats {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
}

/// Five-number box summary: quartiles by linear interpolation, whiskers at
/// the furthest observation within 1.5·IQR of the box.
pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q1 = percentile(&sorted, 0.25);
    let median = percentile(&sorted, 0.50);
    let q3 = percentile(&sorted, 0.75);
    let reach = 1.5 * (q3 - q1);

    let lower_fence = q1 - reach;
    let upper_fence = q3 + reach;
    let lower_whisker = sorted
        .iter()
        .copied()
        .find(|v| *v >= lower_fence)
        .unwrap_or(sorted[0]);
    let upper_whisker = sorted
        .iter()
        .rev()
        .copied()
        .find(|v| *v <= upper_fence)
        .unwrap_or(sorted[sorted.len() - 1]);

    Some(BoxStats {
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
    })
}

/// Linear-interpolation percentile of an already sorted, non-empty slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = p * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let t = rank - lo as f64;
        sorted[lo] * (1.0 - t) + sorted[hi] * t
    }
}

// ---------------------------------------------------------------------------
// Kernel density estimate
// ---------------------------------------------------------------------------

/// Gaussian KDE sampled on an even grid, as `[value, density]` pairs.
///
/// Bandwidth is Silverman's rule (`1.06 · σ · n^(-1/5)`); the grid spans the
/// data extended by three bandwidths on each side. Degenerate input (fewer
/// than two points, or zero spread) yields an empty curve.
pub fn kde_curve(values: &[f64], points: usize) -> Vec<[f64; 2]> {
    if values.len() < 2 || points < 2 {
        return Vec::new();
    }
    let n = values.len() as f64;
    let m = values.iter().sum::<f64>() / n;
    let std_dev = (values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / n).sqrt();
    if std_dev <= f64::EPSILON {
        return Vec::new();
    }

    let bandwidth = 1.06 * std_dev * n.powf(-0.2);
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min) - 3.0 * bandwidth;
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max) + 3.0 * bandwidth;
    let step = (hi - lo) / (points - 1) as f64;
    let norm = n * bandwidth * (2.0 * std::f64::consts::PI).sqrt();

    (0..points)
        .map(|i| {
            let x = lo + step * i as f64;
            let density: f64 = values
                .iter()
                .map(|&v| {
                    let u = (x - v) / bandwidth;
                    (-0.5 * u * u).exp()
                })
                .sum::<f64>()
                / norm;
            [x, density]
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Ordinary least squares
// ---------------------------------------------------------------------------

/// Least-squares `(slope, intercept)` through the points; `None` when there
/// are fewer than two points or the x values carry no variance.
pub fn linear_fit(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for &(x, y) in points {
        let dx = x - mean_x;
        sxx += dx * dx;
        sxy += dx * (y - mean_y);
    }
    if sxx <= VARIANCE_FLOOR {
        return None;
    }
    let slope = sxy / sxx;
    Some((slope, mean_y - slope * mean_x))
}

// ---------------------------------------------------------------------------
// Histograms
// ---------------------------------------------------------------------------

/// Bin counts over `[range.0, range.1]` as `(bin_center, count)` pairs.
///
/// The range is fixed by the caller so several series (e.g. red and white)
/// can share bins. Values outside the range are ignored; a value exactly on
/// the upper edge lands in the last bin.
pub fn histogram(values: &[f64], range: (f64, f64), bins: usize) -> Vec<(f64, usize)> {
    let (lo, hi) = range;
    if bins == 0 || !(hi > lo) {
        return Vec::new();
    }
    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        if v < lo || v > hi {
            continue;
        }
        let bin = (((v - lo) / width) as usize).min(bins - 1);
        counts[bin] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, c)| (lo + width * (i as f64 + 0.5), c))
        .collect()
}

/// Sturges' bin-count rule: `⌈log2 n⌉ + 1`.
pub fn sturges_bins(n: usize) -> usize {
    if n <= 1 {
        1
    } else {
        (n as f64).log2().ceil() as usize + 1
    }
}

#[cfg(test)]
mod tests {
    use super::super::model::{WineSample, WineType};
    use super::*;

    fn toy_dataset() -> WineDataset {
        // (type, quality, alcohol) — alcohol varies, ph is set to track
        // alcohol exactly (r = 1), density is constant (no variance).
        let rows = [
            (WineType::Red, 5, 10.0),
            (WineType::Red, 7, 12.0),
            (WineType::White, 5, 11.0),
            (WineType::White, 9, 14.0),
        ];
        let samples = rows
            .into_iter()
            .map(|(t, q, alcohol)| {
                let mut s = WineSample::for_tests(t, q);
                s.alcohol = alcohol;
                s.ph = 2.0 * alcohol;
                s.density = 0.995;
                s
            })
            .collect();
        WineDataset::from_samples(samples)
    }

    fn all_indices(ds: &WineDataset) -> Vec<usize> {
        (0..ds.len()).collect()
    }

    #[test]
    fn mean_and_median_of_small_slices() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), Some(2.5));
        assert_eq!(mean(&[]), None);
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn summary_stats_over_a_view() {
        let ds = toy_dataset();

        let stats = summary_stats(&ds, &all_indices(&ds), Column::Alcohol).unwrap();
        assert!((stats.mean - 11.75).abs() < 1e-12);
        assert!((stats.median - 11.5).abs() < 1e-12);

        // Subset view: only the two red samples.
        let stats = summary_stats(&ds, &[0, 1], Column::Alcohol).unwrap();
        assert!((stats.mean - 11.0).abs() < 1e-12);
    }

    #[test]
    fn summary_stats_of_empty_view_is_none() {
        let ds = toy_dataset();
        assert_eq!(summary_stats(&ds, &[], Column::Alcohol), None);
    }

    #[test]
    fn grouped_mean_keys_are_distinct_qualities_ascending() {
        let ds = toy_dataset();

        let trend = mean_by_quality(&ds, &all_indices(&ds), Column::Alcohol);
        let keys: Vec<u8> = trend.iter().map(|(q, _)| *q).collect();
        assert_eq!(keys, vec![5, 7, 9]);

        // Quality 5 group is the mean of samples 0 and 2.
        assert!((trend[0].1 - 10.5).abs() < 1e-12);
        assert!((trend[1].1 - 12.0).abs() < 1e-12);
        assert!((trend[2].1 - 14.0).abs() < 1e-12);
    }

    #[test]
    fn grouped_mean_respects_the_view() {
        let ds = toy_dataset();
        // The quality-range filter [5, 7] keeps indices 0, 1, 2.
        let trend = mean_by_quality(&ds, &[0, 1, 2], Column::Alcohol);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].0, 5);
        assert!((trend[0].1 - 10.5).abs() < 1e-12);
    }

    #[test]
    fn grouped_mean_of_empty_view_is_empty() {
        let ds = toy_dataset();
        assert!(mean_by_quality(&ds, &[], Column::Alcohol).is_empty());
    }

    #[test]
    fn pearson_detects_perfect_correlation() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-10);

        let y_neg = [5.0, 4.0, 3.0, 2.0, 1.0];
        assert!((pearson(&x, &y_neg) + 1.0).abs() < 1e-10);
    }

    #[test]
    fn pearson_is_nan_without_variance() {
        assert!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_nan());
        assert!(pearson(&[], &[]).is_nan());
    }

    #[test]
    fn correlation_matrix_is_symmetric_with_unit_diagonal() {
        let ds = toy_dataset();
        let columns = [Column::Alcohol, Column::Ph, Column::Density];
        let m = correlation_matrix(&ds, &all_indices(&ds), &columns);

        assert_eq!(m.len(), 3);
        // ph is 2 × alcohol, so they correlate perfectly.
        assert!((m.get(0, 1) - 1.0).abs() < 1e-10);
        // Symmetry is exact (mirrored assignment).
        for i in 0..m.len() {
            for j in 0..m.len() {
                let a = m.get(i, j);
                let b = m.get(j, i);
                assert!(a == b || (a.is_nan() && b.is_nan()));
            }
        }
        // Unit diagonal for varying columns, NaN for the constant one.
        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.get(1, 1), 1.0);
        assert!(m.get(2, 2).is_nan());
        assert!(m.get(0, 2).is_nan());
    }

    #[test]
    fn correlation_matrix_of_empty_view_is_all_nan() {
        let ds = toy_dataset();
        let m = correlation_matrix(&ds, &[], &[Column::Alcohol, Column::Ph]);
        for i in 0..m.len() {
            for j in 0..m.len() {
                assert!(m.get(i, j).is_nan());
            }
        }
    }

    #[test]
    fn box_stats_quartiles_and_whiskers() {
        let values: Vec<f64> = (1..=8).map(f64::from).collect();
        let b = box_stats(&values).unwrap();

        assert!((b.q1 - 2.75).abs() < 1e-12);
        assert!((b.median - 4.5).abs() < 1e-12);
        assert!((b.q3 - 6.25).abs() < 1e-12);
        // No outliers: whiskers sit on the extremes.
        assert_eq!(b.lower_whisker, 1.0);
        assert_eq!(b.upper_whisker, 8.0);
    }

    #[test]
    fn box_stats_whiskers_exclude_outliers() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 100.0];
        let b = box_stats(&values).unwrap();
        // Upper fence is q3 + 1.5·IQR = 11.5; 100 is outside it.
        assert_eq!(b.upper_whisker, 7.0);
    }

    #[test]
    fn box_stats_of_empty_slice_is_none() {
        assert_eq!(box_stats(&[]), None);
    }

    #[test]
    fn kde_mass_is_close_to_one() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let curve = kde_curve(&values, 200);
        assert_eq!(curve.len(), 200);

        // Trapezoidal integral of the density over the grid.
        let mut mass = 0.0;
        for w in curve.windows(2) {
            mass += 0.5 * (w[0][1] + w[1][1]) * (w[1][0] - w[0][0]);
        }
        assert!((mass - 1.0).abs() < 0.03, "mass = {mass}");
    }

    #[test]
    fn kde_peaks_near_the_center_of_symmetric_data() {
        let values = [4.0, 5.0, 6.0];
        let curve = kde_curve(&values, 301);
        let peak = curve
            .iter()
            .copied()
            .fold([f64::NAN, f64::NEG_INFINITY], |best, p| {
                if p[1] > best[1] {
                    p
                } else {
                    best
                }
            });
        assert!((peak[0] - 5.0).abs() < 0.1, "peak at {}", peak[0]);
    }

    #[test]
    fn kde_of_degenerate_input_is_empty() {
        assert!(kde_curve(&[], 100).is_empty());
        assert!(kde_curve(&[1.0], 100).is_empty());
        assert!(kde_curve(&[2.0, 2.0, 2.0], 100).is_empty());
    }

    #[test]
    fn linear_fit_recovers_an_exact_line() {
        let points = [(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)];
        let (slope, intercept) = linear_fit(&points).unwrap();
        assert!((slope - 2.0).abs() < 1e-12);
        assert!((intercept - 1.0).abs() < 1e-12);
    }

    #[test]
    fn linear_fit_is_none_when_underdetermined() {
        assert_eq!(linear_fit(&[]), None);
        assert_eq!(linear_fit(&[(1.0, 2.0)]), None);
        // Vertical line: no x variance.
        assert_eq!(linear_fit(&[(1.0, 2.0), (1.0, 5.0)]), None);
    }

    #[test]
    fn histogram_counts_and_edge_inclusion() {
        let values = [0.0, 0.5, 1.0, 1.5, 2.0];
        let bins = histogram(&values, (0.0, 2.0), 4);

        let counts: Vec<usize> = bins.iter().map(|(_, c)| *c).collect();
        assert_eq!(counts, vec![1, 1, 1, 2]); // 2.0 falls into the last bin
        assert_eq!(counts.iter().sum::<usize>(), values.len());

        let centers: Vec<f64> = bins.iter().map(|(c, _)| *c).collect();
        assert_eq!(centers, vec![0.25, 0.75, 1.25, 1.75]);
    }

    #[test]
    fn histogram_ignores_values_outside_the_range() {
        let bins = histogram(&[-1.0, 0.5, 3.0], (0.0, 2.0), 2);
        let total: usize = bins.iter().map(|(_, c)| *c).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn sturges_bin_counts() {
        assert_eq!(sturges_bins(0), 1);
        assert_eq!(sturges_bins(1), 1);
        assert_eq!(sturges_bins(100), 8);
    }
}
