//! Chart implementations for text-based visualization

use super::{Chart, ChartConfig, ChartStyle};
use crate::vis::spec::{BarChartSpec, BoxPlotSpec, HeatmapSpec, HistogramSpec, ScatterSpec};

fn title_line(output: &mut String, title: &Option<String>, width: usize) {
    if let Some(ref title) = title {
        output.push_str(&format!("{:^width$}\n\n", title, width = width));
    }
}

fn bar_char(style: ChartStyle) -> char {
    match style {
        ChartStyle::Ascii => '#',
        ChartStyle::Unicode => '█',
    }
}

// ============================================================================
// Histogram
// ============================================================================

/// Horizontal histogram with the density curve marked on each bar row
#[derive(Debug, Clone)]
pub struct Histogram<'a> {
    spec: &'a HistogramSpec,
    config: ChartConfig,
    style: ChartStyle,
}

impl<'a> Histogram<'a> {
    pub fn new(spec: &'a HistogramSpec, config: ChartConfig) -> Self {
        Self {
            spec,
            config,
            style: ChartStyle::default(),
        }
    }

    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    /// Density value at the centre of a bin, scaled to counts
    fn density_at(&self, x: f64) -> Option<f64> {
        let curve = &self.spec.density;
        let first = curve.first()?;
        let last = curve.last()?;
        if x <= first.0 {
            return Some(first.1);
        }
        if x >= last.0 {
            return Some(last.1);
        }
        curve.windows(2).find_map(|w| {
            let (x0, y0) = w[0];
            let (x1, y1) = w[1];
            if x >= x0 && x <= x1 {
                let t = if x1 > x0 { (x - x0) / (x1 - x0) } else { 0.0 };
                Some(y0 + t * (y1 - y0))
            } else {
                None
            }
        })
    }

    fn density_marker(&self) -> char {
        match self.style {
            ChartStyle::Ascii => '*',
            ChartStyle::Unicode => '●',
        }
    }
}

impl Chart for Histogram<'_> {
    fn render(&self) -> String {
        if self.spec.bins.is_empty() {
            return String::from("No data to display");
        }

        let mut output = String::new();
        let bar_width = self.config.width.saturating_sub(24).max(1);
        let density_max = self
            .spec
            .density
            .iter()
            .map(|&(_, d)| d)
            .fold(0.0f64, f64::max);
        let scale_max = (self.spec.max_count() as f64).max(density_max).max(1.0);

        title_line(&mut output, &self.config.title, self.config.width);

        for bin in &self.spec.bins {
            let bar_len = (bin.count as f64 / scale_max * bar_width as f64).round() as usize;
            let mut cells: Vec<char> = std::iter::repeat(bar_char(self.style))
                .take(bar_len)
                .chain(std::iter::repeat(' '))
                .take(bar_width)
                .collect();

            let centre = (bin.lower + bin.upper) / 2.0;
            if let Some(d) = self.density_at(centre) {
                let pos = (d / scale_max * bar_width as f64).round() as usize;
                let pos = pos.min(bar_width - 1);
                cells[pos] = self.density_marker();
            }

            let bar: String = cells.into_iter().collect();
            output.push_str(&format!(
                "{:>8.2}-{:<8.2} │{}│ {}\n",
                bin.lower, bin.upper, bar, bin.count
            ));
        }

        if let Some(ref label) = self.config.x_label {
            output.push_str(&format!("{:^width$}\n", label, width = self.config.width));
        }

        output
    }
}

// ============================================================================
// Box Plot
// ============================================================================

/// Single horizontal box with whiskers and outlier marks
#[derive(Debug, Clone)]
pub struct BoxPlot<'a> {
    spec: &'a BoxPlotSpec,
    config: ChartConfig,
}

impl<'a> BoxPlot<'a> {
    pub fn new(spec: &'a BoxPlotSpec, config: ChartConfig) -> Self {
        Self { spec, config }
    }
}

impl Chart for BoxPlot<'_> {
    fn render(&self) -> String {
        let stats = match &self.spec.stats {
            Some(stats) => stats,
            None => return String::from("No data to display"),
        };

        let width = self.config.width.max(10);
        let lo = stats
            .outliers
            .iter()
            .cloned()
            .fold(stats.whisker_low, f64::min);
        let hi = stats
            .outliers
            .iter()
            .cloned()
            .fold(stats.whisker_high, f64::max);
        let range = if hi == lo {
            1.0
        } else {
            hi - lo
        };
        let pos = |v: f64| (((v - lo) / range) * (width - 1) as f64).round() as usize;

        let mut line = vec![' '; width];
        let (wl, q1, med, q3, wh) = (
            pos(stats.whisker_low),
            pos(stats.q1),
            pos(stats.median),
            pos(stats.q3),
            pos(stats.whisker_high),
        );
        for cell in line.iter_mut().take(q1).skip(wl) {
            *cell = '─';
        }
        for cell in line.iter_mut().take(wh + 1).skip(q3) {
            *cell = '─';
        }
        for cell in line.iter_mut().take(q3).skip(q1) {
            *cell = '▒';
        }
        line[wl] = '├';
        line[wh] = '┤';
        line[q1] = '[';
        line[q3] = ']';
        line[med] = '┃';
        for &o in &stats.outliers {
            line[pos(o)] = 'o';
        }

        let mut output = String::new();
        title_line(&mut output, &self.config.title, width);
        output.push_str(&line.into_iter().collect::<String>());
        output.push('\n');
        output.push_str(&format!(
            "{:<w$.2}{:>8.2}\n",
            lo,
            hi,
            w = width.saturating_sub(8)
        ));
        output.push_str(&format!(
            "Q1 {:.2}  median {:.2}  Q3 {:.2}  outliers {}\n",
            stats.q1,
            stats.median,
            stats.q3,
            stats.outliers.len()
        ));
        output
    }
}

// ============================================================================
// Bar Chart
// ============================================================================

/// Bar orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarOrientation {
    /// Vertical bars with rotated category labels
    #[default]
    Vertical,
    /// Horizontal bars with labels on the left
    Horizontal,
}

/// Count plot of a categorical column
#[derive(Debug, Clone)]
pub struct BarChart<'a> {
    spec: &'a BarChartSpec,
    config: ChartConfig,
    orientation: BarOrientation,
    /// Max label width
    label_width: usize,
}

impl<'a> BarChart<'a> {
    pub fn new(spec: &'a BarChartSpec, config: ChartConfig) -> Self {
        Self {
            spec,
            config,
            orientation: BarOrientation::default(),
            label_width: 12,
        }
    }

    pub fn with_orientation(mut self, orientation: BarOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    fn max_count(&self) -> usize {
        self.spec.counts.iter().copied().max().unwrap_or(0)
    }

    fn render_horizontal(&self) -> String {
        let mut output = String::new();
        let max_val = self.max_count();
        let bar_width = self.config.width.saturating_sub(self.label_width + 10).max(1);

        title_line(&mut output, &self.config.title, self.config.width);

        for (label, &count) in self.spec.labels.iter().zip(self.spec.counts.iter()) {
            let bar_len = if max_val > 0 {
                (count as f64 / max_val as f64 * bar_width as f64).round() as usize
            } else {
                0
            };
            let bar: String = std::iter::repeat('█').take(bar_len).collect();
            let truncated_label: String = label.chars().take(self.label_width).collect();

            output.push_str(&format!(
                "{:>label_width$} │{:<bar_width$}│ {}\n",
                truncated_label,
                bar,
                count,
                label_width = self.label_width,
                bar_width = bar_width
            ));
        }

        output
    }

    /// Bars are three characters wide. Labels run down and to the right from
    /// their bar, one row per character, which approximates the configured
    /// rotation; with a rotation of zero they are printed flat and truncated.
    fn render_vertical(&self) -> String {
        let mut output = String::new();
        let max_val = self.max_count();
        let height = self.config.height.max(1);
        let bars = self.spec.labels.len();

        title_line(&mut output, &self.config.title, (bars * 4).max(self.config.width));

        let normalized: Vec<usize> = self
            .spec
            .counts
            .iter()
            .map(|&v| {
                if max_val > 0 {
                    (v as f64 / max_val as f64 * height as f64).round() as usize
                } else {
                    0
                }
            })
            .collect();

        for row in (0..height).rev() {
            let mut line = String::new();
            for &bar_height in &normalized {
                if bar_height > row {
                    line.push_str(" ██");
                } else {
                    line.push_str("   ");
                }
            }
            output.push_str(line.trim_end());
            output.push('\n');
        }

        output.push_str(&"───".repeat(bars));
        output.push('\n');

        let labels: Vec<Vec<char>> = self
            .spec
            .labels
            .iter()
            .map(|l| l.chars().take(self.label_width).collect())
            .collect();

        if self.spec.label_rotation.abs() < f64::EPSILON {
            let mut line = String::new();
            for label in &labels {
                let abbrev: String = label.iter().take(2).collect();
                line.push_str(&format!(" {:<2}", abbrev));
            }
            output.push_str(line.trim_end());
            output.push('\n');
        } else {
            // Diagonal labels: character k of bar i lands on row k, column 3*i + 1 + k
            let rows = labels.iter().map(|l| l.len()).max().unwrap_or(0);
            let line_width = bars * 3 + rows + 1;
            for k in 0..rows {
                let mut line = vec![' '; line_width];
                for (i, label) in labels.iter().enumerate() {
                    if let Some(&c) = label.get(k) {
                        line[3 * i + 1 + k] = c;
                    }
                }
                let text: String = line.into_iter().collect();
                output.push_str(text.trim_end());
                output.push('\n');
            }
        }

        output
    }
}

impl Chart for BarChart<'_> {
    fn render(&self) -> String {
        if self.spec.counts.is_empty() {
            return String::from("No data to display");
        }

        match self.orientation {
            BarOrientation::Horizontal => self.render_horizontal(),
            BarOrientation::Vertical => self.render_vertical(),
        }
    }
}

// ============================================================================
// Scatter Plot
// ============================================================================

/// Scatter plot for two-dimensional data
#[derive(Debug, Clone)]
pub struct ScatterPlot<'a> {
    spec: &'a ScatterSpec,
    config: ChartConfig,
    point_char: char,
}

impl<'a> ScatterPlot<'a> {
    pub fn new(spec: &'a ScatterSpec, config: ChartConfig) -> Self {
        Self {
            spec,
            config,
            point_char: '●',
        }
    }
}

impl Chart for ScatterPlot<'_> {
    fn render(&self) -> String {
        if self.spec.points.is_empty() {
            return String::from("No data to display");
        }

        let height = self.config.height.max(2);
        let width = self.config.width.max(10);
        let points = &self.spec.points;

        let x_min = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
        let x_max = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
        let y_min = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let y_max = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

        let x_range = if x_max == x_min {
            1.0
        } else {
            x_max - x_min
        };
        let y_range = if y_max == y_min {
            1.0
        } else {
            y_max - y_min
        };

        let mut grid = vec![vec![' '; width]; height];
        for &(x, y) in points {
            let px = ((x - x_min) / x_range * (width - 1) as f64).round() as usize;
            let py = ((y - y_min) / y_range * (height - 1) as f64).round() as usize;
            grid[py.min(height - 1)][px.min(width - 1)] = self.point_char;
        }

        let mut output = String::new();
        title_line(&mut output, &self.config.title, width + 8);

        if let Some(ref label) = self.config.y_label {
            output.push_str(&format!("{}\n", label));
        }
        for row in (0..height).rev() {
            let y_val = y_min + (row as f64 / (height - 1) as f64) * y_range;
            output.push_str(&format!("{:>6.1} │", y_val));
            output.extend(grid[row].iter());
            output.push('\n');
        }

        output.push_str("       └");
        output.push_str(&"─".repeat(width));
        output.push('\n');
        output.push_str(&format!(
            "        {:<width$.1}{:>8.1}\n",
            x_min,
            x_max,
            width = width - 8
        ));
        if let Some(ref label) = self.config.x_label {
            output.push_str(&format!("        {:^width$}\n", label, width = width));
        }

        output
    }
}

// ============================================================================
// Heatmap
// ============================================================================

/// Annotated correlation grid; cell shade follows |r|, sign shown by the value
#[derive(Debug, Clone)]
pub struct Heatmap<'a> {
    spec: &'a HeatmapSpec,
    config: ChartConfig,
}

impl<'a> Heatmap<'a> {
    const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

    pub fn new(spec: &'a HeatmapSpec, config: ChartConfig) -> Self {
        Self { spec, config }
    }

    fn shade(value: f64) -> char {
        let level = (value.abs() * (Self::SHADES.len() - 1) as f64).round() as usize;
        Self::SHADES[level.min(Self::SHADES.len() - 1)]
    }
}

impl Chart for Heatmap<'_> {
    fn render(&self) -> String {
        if self.spec.columns.is_empty() {
            return String::from("No data to display");
        }

        let label_width = self
            .spec
            .columns
            .iter()
            .map(|c| c.chars().count())
            .max()
            .unwrap_or(0)
            .min(12);
        let cell_width = 8;
        let truncate = |s: &str, n: usize| s.chars().take(n).collect::<String>();

        let mut output = String::new();
        title_line(
            &mut output,
            &self.config.title,
            label_width + 1 + cell_width * self.spec.columns.len(),
        );

        output.push_str(&" ".repeat(label_width + 1));
        for name in &self.spec.columns {
            output.push_str(&format!("{:>w$}", truncate(name, cell_width - 1), w = cell_width));
        }
        output.push('\n');

        for (name, row) in self.spec.columns.iter().zip(&self.spec.values) {
            output.push_str(&format!("{:<w$} ", truncate(name, label_width), w = label_width));
            for value in row {
                let cell = match value {
                    Some(v) if self.spec.annotate => {
                        format!("{}{:>6.2}", Self::shade(*v), v)
                    }
                    Some(v) => Self::shade(*v).to_string().repeat(7),
                    None => format!("{:>7}", "NaN"),
                };
                output.push_str(&format!("{:>w$}", cell, w = cell_width));
            }
            output.push('\n');
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vis::spec::{BoxPlotSpec, HistogramSpec};

    fn config(title: &str) -> ChartConfig {
        ChartConfig {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_histogram_render() {
        let data = vec![1.0, 2.0, 2.0, 3.0, 3.0, 3.0, 4.0, 4.0, 5.0];
        let spec = HistogramSpec::new("x", &data, 5, 50);
        let output = Histogram::new(&spec, config(&spec.title)).render();
        assert!(output.contains("Histogram of x"));
        assert!(output.contains('█'));
        assert!(output.contains('●'));
        // title, blank line, one row per bin
        assert_eq!(output.lines().count(), 2 + 5);
    }

    #[test]
    fn test_histogram_ascii_style() {
        let spec = HistogramSpec::new("x", &[1.0, 2.0, 3.0], 3, 10);
        let output = Histogram::new(&spec, ChartConfig::default())
            .with_style(ChartStyle::Ascii)
            .render();
        assert!(output.contains('#'));
        assert!(!output.contains('█'));
    }

    #[test]
    fn test_histogram_empty() {
        let spec = HistogramSpec::new("x", &[], 5, 50);
        let output = Histogram::new(&spec, ChartConfig::default()).render();
        assert!(output.contains("No data"));
    }

    #[test]
    fn test_boxplot_render() {
        let spec = BoxPlotSpec::new("x", &[1.0, 2.0, 3.0, 4.0, 100.0]);
        let output = BoxPlot::new(&spec, config(&spec.title)).render();
        assert!(output.contains("Boxplot of x"));
        assert!(output.contains('┃'));
        assert!(output.contains('o'));
        assert!(output.contains("outliers 1"));
    }

    #[test]
    fn test_bar_chart_rotated_labels() {
        let spec = BarChartSpec::new(
            "fruit",
            &[("apple".to_string(), 3), ("kiwi".to_string(), 1)],
            45.0,
        );
        let output = BarChart::new(&spec, config(&spec.title)).render();
        assert!(output.contains("Count Plot of fruit"));
        let lines: Vec<&str> = output.lines().collect();
        // First label row holds the first letter of each label
        let baseline = lines.iter().position(|l| l.starts_with('─')).unwrap();
        assert_eq!(lines[baseline + 1], " a  k");
        assert_eq!(lines[baseline + 2], "  p  i");
    }

    #[test]
    fn test_bar_chart_horizontal() {
        let spec = BarChartSpec::new(
            "c",
            &[("A".to_string(), 20), ("B".to_string(), 10)],
            45.0,
        );
        let output = BarChart::new(&spec, ChartConfig::default())
            .with_orientation(BarOrientation::Horizontal)
            .render();
        assert!(output.contains("A │"));
        assert!(output.contains("│ 20"));
    }

    #[test]
    fn test_scatter_plot() {
        let spec = ScatterSpec::new(
            "a",
            "b",
            &[Some(1.0), Some(2.0), Some(3.0)],
            &[Some(1.0), Some(4.0), Some(2.0)],
        );
        let output = ScatterPlot::new(&spec, config(&spec.title)).render();
        assert!(output.contains("Scatter Plot: a vs b"));
        assert_eq!(output.matches('●').count(), 3);
    }

    #[test]
    fn test_heatmap_annotations() {
        let spec = HeatmapSpec {
            title: "Correlation Heatmap".to_string(),
            columns: vec!["a".to_string(), "b".to_string()],
            values: vec![vec![Some(1.0), Some(-0.5)], vec![Some(-0.5), Some(1.0)]],
            annotate: true,
        };
        let output = Heatmap::new(&spec, config(&spec.title)).render();
        assert!(output.contains("1.00"));
        assert!(output.contains("-0.50"));
        assert!(output.contains('█'));
    }
}
