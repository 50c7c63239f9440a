//! Chart descriptions.
//!
//! A spec holds everything needed to draw a chart (binned counts, quartiles,
//! points, matrix cells) plus its caption. Specs are plain data: building the
//! same spec from the same table always gives an equal value, and any backend
//! (text, SVG, PNG) can draw it.

use serde::Serialize;

use crate::stats::descriptive::percentile;
use crate::stats::CorrelationMatrix;

/// Chart families produced by the selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChartKind {
    Heatmap,
    Histogram,
    BoxPlot,
    CountPlot,
    ScatterPlot,
}

impl ChartKind {
    /// Caption prefix for this kind
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Heatmap => "Correlation Heatmap",
            ChartKind::Histogram => "Histogram",
            ChartKind::BoxPlot => "Boxplot",
            ChartKind::CountPlot => "Count Plot",
            ChartKind::ScatterPlot => "Scatter Plot",
        }
    }

    /// `"<kind> of <column>"`
    pub fn caption_of(&self, column: &str) -> String {
        format!("{} of {}", self.label(), column)
    }

    /// `"<kind>: <x> vs <y>"`
    pub fn caption_vs(&self, x: &str, y: &str) -> String {
        format!("{}: {} vs {}", self.label(), x, y)
    }
}

/// One histogram bin covering `[lower, upper)`; the last bin also includes `upper`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram with a kernel density overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramSpec {
    pub title: String,
    pub column: String,
    pub bins: Vec<Bin>,
    /// `(x, expected count)` samples of the density curve, scaled to the bin counts
    pub density: Vec<(f64, f64)>,
}

impl HistogramSpec {
    pub fn new(column: &str, values: &[f64], bins: usize, density_points: usize) -> Self {
        let bins = compute_bins(values, bins);
        let bin_width = bins.first().map(|b| b.upper - b.lower).unwrap_or(0.0);
        let density = compute_density(values, density_points)
            .into_iter()
            .map(|(x, d)| (x, d * values.len() as f64 * bin_width))
            .collect();

        Self {
            title: ChartKind::Histogram.caption_of(column),
            column: column.to_string(),
            bins,
            density,
        }
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

fn compute_bins(data: &[f64], bins: usize) -> Vec<Bin> {
    if data.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut min = data.iter().cloned().fold(f64::INFINITY, f64::min);
    let mut max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    // A constant column is centred in a unit-wide range
    if max == min {
        min -= 0.5;
        max += 0.5;
    }

    let bin_width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &value in data {
        let bin_idx = ((value - min) / bin_width).floor() as usize;
        counts[bin_idx.min(bins - 1)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| Bin {
            lower: min + i as f64 * bin_width,
            upper: if i + 1 == bins {
                max
            } else {
                min + (i + 1) as f64 * bin_width
            },
            count,
        })
        .collect()
}

/// Gaussian kernel density over `[min, max]` using Silverman's rule of thumb.
///
/// Empty when fewer than two distinct values exist.
pub(crate) fn compute_density(data: &[f64], n_points: usize) -> Vec<(f64, f64)> {
    if data.len() < 2 || n_points < 2 {
        return Vec::new();
    }

    let min_val = data.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_val = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max_val - min_val;
    if range <= 0.0 {
        return Vec::new();
    }

    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let std_dev = (data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n).sqrt();
    let h = (1.06 * std_dev * n.powf(-0.2)).max(range * 0.01);

    let step = range / (n_points - 1) as f64;
    (0..n_points)
        .map(|i| {
            let x = min_val + i as f64 * step;
            let density = data
                .iter()
                .map(|&xi| {
                    let u = (x - xi) / h;
                    (-0.5 * u * u).exp() / ((2.0 * std::f64::consts::PI).sqrt() * h)
                })
                .sum::<f64>()
                / n;
            (x, density)
        })
        .collect()
}

/// Quartiles, whiskers and outliers of one numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    /// Lowest value within 1.5 IQR of Q1
    pub whisker_low: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Highest value within 1.5 IQR of Q3
    pub whisker_high: f64,
    pub iqr: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// `None` for empty input
    pub fn from_data(data: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.total_cmp(b));

        let n = sorted.len();
        let q1 = percentile(&sorted, 0.25);
        let median = percentile(&sorted, 0.5);
        let q3 = percentile(&sorted, 0.75);
        let iqr = q3 - q1;

        let lower_fence = q1 - 1.5 * iqr;
        let upper_fence = q3 + 1.5 * iqr;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&x| x >= lower_fence)
            .unwrap_or(sorted[0]);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&x| x <= upper_fence)
            .unwrap_or(sorted[n - 1]);

        let outliers = sorted
            .iter()
            .copied()
            .filter(|&x| x < lower_fence || x > upper_fence)
            .collect();

        Some(Self {
            whisker_low,
            q1,
            median,
            q3,
            whisker_high,
            iqr,
            outliers,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotSpec {
    pub title: String,
    pub column: String,
    /// `None` when the column has no values
    pub stats: Option<BoxStats>,
}

impl BoxPlotSpec {
    pub fn new(column: &str, values: &[f64]) -> Self {
        Self {
            title: ChartKind::BoxPlot.caption_of(column),
            column: column.to_string(),
            stats: BoxStats::from_data(values),
        }
    }
}

/// Category frequencies, bars ordered by descending count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartSpec {
    pub title: String,
    pub column: String,
    pub labels: Vec<String>,
    pub counts: Vec<usize>,
    /// Category label rotation in degrees
    pub label_rotation: f64,
}

impl BarChartSpec {
    /// `entries` must already be ordered by descending count
    pub fn new(column: &str, entries: &[(String, usize)], label_rotation: f64) -> Self {
        Self {
            title: ChartKind::CountPlot.caption_of(column),
            column: column.to_string(),
            labels: entries.iter().map(|(l, _)| l.clone()).collect(),
            counts: entries.iter().map(|(_, c)| *c).collect(),
            label_rotation,
        }
    }
}

/// Points of two numeric columns; rows missing either value are left out
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSpec {
    pub title: String,
    pub x_column: String,
    pub y_column: String,
    pub points: Vec<(f64, f64)>,
}

impl ScatterSpec {
    pub fn new(x_column: &str, y_column: &str, x: &[Option<f64>], y: &[Option<f64>]) -> Self {
        let points = x
            .iter()
            .zip(y.iter())
            .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
            .collect();
        Self {
            title: ChartKind::ScatterPlot.caption_vs(x_column, y_column),
            x_column: x_column.to_string(),
            y_column: y_column.to_string(),
            points,
        }
    }
}

/// Annotated correlation matrix on a diverging palette over [-1, 1]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapSpec {
    pub title: String,
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
    pub annotate: bool,
}

impl HeatmapSpec {
    pub fn from_correlation(matrix: &CorrelationMatrix) -> Self {
        Self {
            title: ChartKind::Heatmap.label().to_string(),
            columns: matrix.columns.clone(),
            values: matrix.values.clone(),
            annotate: true,
        }
    }
}

/// Any chart the selector can propose
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "chart", rename_all = "snake_case")]
pub enum ChartSpec {
    Heatmap(HeatmapSpec),
    Histogram(HistogramSpec),
    BoxPlot(BoxPlotSpec),
    BarChart(BarChartSpec),
    Scatter(ScatterSpec),
}

impl ChartSpec {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartSpec::Heatmap(_) => ChartKind::Heatmap,
            ChartSpec::Histogram(_) => ChartKind::Histogram,
            ChartSpec::BoxPlot(_) => ChartKind::BoxPlot,
            ChartSpec::BarChart(_) => ChartKind::CountPlot,
            ChartSpec::Scatter(_) => ChartKind::ScatterPlot,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Heatmap(s) => &s.title,
            ChartSpec::Histogram(s) => &s.title,
            ChartSpec::BoxPlot(s) => &s.title,
            ChartSpec::BarChart(s) => &s.title,
            ChartSpec::Scatter(s) => &s.title,
        }
    }
}
