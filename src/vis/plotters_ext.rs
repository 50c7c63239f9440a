//! Plotters-based chart rendering
//!
//! Draws the same chart specs as the text renderer into PNG or SVG output.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::{Error, Result};
use crate::vis::spec::{
    BarChartSpec, BoxPlotSpec, ChartSpec, HeatmapSpec, HistogramSpec, ScatterSpec,
};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    /// PNG image
    PNG,
    /// SVG document
    SVG,
}

impl OutputType {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => Ok(OutputType::PNG),
            Some("svg") => Ok(OutputType::SVG),
            _ => Err(Error::Visualization(format!(
                "unsupported chart output: {}",
                path.display()
            ))),
        }
    }
}

/// Plot settings
#[derive(Debug, Clone)]
pub struct PlotSettings {
    /// Image width (pixels)
    pub width: u32,
    /// Image height (pixels)
    pub height: u32,
    /// Draw the background mesh
    pub show_grid: bool,
    /// Primary series color followed by the overlay color
    pub color_palette: Vec<(u8, u8, u8)>,
}

impl Default for PlotSettings {
    fn default() -> Self {
        PlotSettings {
            width: 800,
            height: 600,
            show_grid: true,
            color_palette: vec![
                (0, 123, 255),   // blue
                (255, 99, 71),   // red
                (46, 204, 113),  // green
                (255, 193, 7),   // yellow
            ],
        }
    }
}

impl PlotSettings {
    fn color(&self, idx: usize) -> RGBColor {
        let (r, g, b) = self
            .color_palette
            .get(idx)
            .or_else(|| self.color_palette.first())
            .copied()
            .unwrap_or((0, 0, 0));
        RGBColor(r, g, b)
    }
}

/// Render a chart to `path`, picking PNG or SVG from the extension
pub fn render_to_file<P: AsRef<Path>>(spec: &ChartSpec, path: P, settings: &PlotSettings) -> Result<()> {
    let path = path.as_ref();
    let size = (settings.width, settings.height);
    match OutputType::from_path(path)? {
        OutputType::PNG => draw(BitMapBackend::new(path, size).into_drawing_area(), spec, settings),
        OutputType::SVG => draw(SVGBackend::new(path, size).into_drawing_area(), spec, settings),
    }
}

/// Render a chart to an in-memory SVG document
pub fn render_svg_string(spec: &ChartSpec, settings: &PlotSettings) -> Result<String> {
    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, (settings.width, settings.height))
            .into_drawing_area();
        draw(root, spec, settings)?;
    }
    Ok(buffer)
}

fn draw<DB>(root: DrawingArea<DB, Shift>, spec: &ChartSpec, settings: &PlotSettings) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    match spec {
        ChartSpec::Histogram(s) => draw_histogram(&root, s, settings)?,
        ChartSpec::BoxPlot(s) => draw_boxplot(&root, s, settings)?,
        ChartSpec::BarChart(s) => draw_bar_chart(&root, s, settings)?,
        ChartSpec::Scatter(s) => draw_scatter(&root, s, settings)?,
        ChartSpec::Heatmap(s) => draw_heatmap(&root, s)?,
    }
    root.present()?;
    Ok(())
}

fn draw_histogram<DB>(
    root: &DrawingArea<DB, Shift>,
    spec: &HistogramSpec,
    settings: &PlotSettings,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (first, last) = match (spec.bins.first(), spec.bins.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(Error::Visualization(format!("{}: no values", spec.title))),
    };

    let bin_width = first.upper - first.lower;
    let density_max = spec.density.iter().map(|&(_, d)| d).fold(0.0f64, f64::max);
    let y_max = (spec.max_count() as f64).max(density_max).max(1.0);

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(
            (first.lower - bin_width * 0.1)..(last.upper + bin_width * 0.1),
            0.0..(y_max * 1.1),
        )?;

    if settings.show_grid {
        chart
            .configure_mesh()
            .x_labels(10)
            .y_labels(10)
            .x_label_formatter(&|v| format!("{:.1}", v))
            .y_label_formatter(&|v| format!("{:.1}", v))
            .x_desc(&spec.column)
            .y_desc("Count")
            .draw()?;
    }

    let color = settings.color(0);
    chart.draw_series(spec.bins.iter().map(|bin| {
        Rectangle::new([(bin.lower, 0.0), (bin.upper, bin.count as f64)], color.filled())
    }))?;

    if !spec.density.is_empty() {
        chart.draw_series(LineSeries::new(
            spec.density.iter().copied(),
            settings.color(1).stroke_width(2),
        ))?;
    }

    Ok(())
}

fn draw_boxplot<DB>(
    root: &DrawingArea<DB, Shift>,
    spec: &BoxPlotSpec,
    settings: &PlotSettings,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let stats = spec
        .stats
        .as_ref()
        .ok_or_else(|| Error::Visualization(format!("{}: no values", spec.title)))?;

    let lo = stats.outliers.iter().cloned().fold(stats.whisker_low, f64::min);
    let hi = stats.outliers.iter().cloned().fold(stats.whisker_high, f64::max);
    let pad = ((hi - lo) * 0.1).max(0.5);

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(0.0..2.0, (lo - pad)..(hi + pad))?;

    if settings.show_grid {
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(0)
            .y_desc(&spec.column)
            .draw()?;
    }

    let color = settings.color(0);
    chart.draw_series(std::iter::once(Rectangle::new(
        [(0.6, stats.q1), (1.4, stats.q3)],
        color.mix(0.4).filled(),
    )))?;
    chart.draw_series(std::iter::once(Rectangle::new(
        [(0.6, stats.q1), (1.4, stats.q3)],
        color.stroke_width(2),
    )))?;

    for segment in [
        [(0.6, stats.median), (1.4, stats.median)],
        [(1.0, stats.whisker_low), (1.0, stats.q1)],
        [(1.0, stats.q3), (1.0, stats.whisker_high)],
        [(0.8, stats.whisker_low), (1.2, stats.whisker_low)],
        [(0.8, stats.whisker_high), (1.2, stats.whisker_high)],
    ] {
        chart.draw_series(LineSeries::new(segment, &BLACK))?;
    }

    chart.draw_series(
        stats
            .outliers
            .iter()
            .map(|&y| Circle::new((1.0, y), 3, settings.color(1).filled())),
    )?;

    Ok(())
}

fn draw_bar_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    spec: &BarChartSpec,
    settings: &PlotSettings,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let n = spec.counts.len();
    if n == 0 {
        return Err(Error::Visualization(format!("{}: no values", spec.title)));
    }
    let max_count = spec.counts.iter().copied().max().unwrap_or(0).max(1) as f64;

    let transform = label_transform(spec.label_rotation);
    let label_area = match transform {
        FontTransform::None | FontTransform::Rotate180 => 60,
        _ => 100,
    };

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(label_area)
        .y_label_area_size(40)
        .build_cartesian_2d(0.0..n as f64, 0.0..(max_count * 1.1))?;

    let label_at = |v: &f64| {
        let idx = v.floor();
        if idx >= 0.0 && (v - idx - 0.5).abs() < 1e-6 {
            spec.labels.get(idx as usize).cloned().unwrap_or_default()
        } else {
            String::new()
        }
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(2 * n + 1)
        .x_label_style(("sans-serif", 12).into_font().transform(transform))
        .x_label_formatter(&label_at)
        .y_desc("Count")
        .draw()?;

    let color = settings.color(0);
    chart.draw_series(spec.counts.iter().enumerate().map(|(i, &count)| {
        let x = i as f64;
        Rectangle::new([(x + 0.1, 0.0), (x + 0.9, count as f64)], color.filled())
    }))?;

    Ok(())
}

fn draw_scatter<DB>(
    root: &DrawingArea<DB, Shift>,
    spec: &ScatterSpec,
    settings: &PlotSettings,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    if spec.points.is_empty() {
        return Err(Error::Visualization(format!("{}: no complete rows", spec.title)));
    }

    let bounds = |f: fn(&(f64, f64)) -> f64| {
        let min = spec.points.iter().map(f).fold(f64::INFINITY, f64::min);
        let max = spec.points.iter().map(f).fold(f64::NEG_INFINITY, f64::max);
        let pad = ((max - min) * 0.05).max(0.5);
        (min - pad)..(max + pad)
    };

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(bounds(|p| p.0), bounds(|p| p.1))?;

    if settings.show_grid {
        chart
            .configure_mesh()
            .x_desc(&spec.x_column)
            .y_desc(&spec.y_column)
            .draw()?;
    }

    let color = settings.color(0);
    chart.draw_series(
        spec.points
            .iter()
            .map(|&p| Circle::new(p, 3, color.filled())),
    )?;

    Ok(())
}

/// Diverging blue-white-red palette over [-1, 1]
fn diverging_color(value: f64) -> RGBColor {
    let t = value.clamp(-1.0, 1.0);
    let fade = |c: u8| (255.0 - (255.0 - c as f64) * t.abs()).round() as u8;
    if t < 0.0 {
        RGBColor(fade(59), fade(76), fade(192))
    } else {
        RGBColor(fade(180), fade(4), fade(38))
    }
}

fn draw_heatmap<DB>(root: &DrawingArea<DB, Shift>, spec: &HeatmapSpec) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let n = spec.columns.len();
    if n == 0 {
        return Err(Error::Visualization(format!("{}: no columns", spec.title)));
    }

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..n as f64, 0.0..n as f64)?;

    // Row 0 is drawn at the top
    let label_at = |v: &f64, flip: bool| {
        let idx = v.floor();
        if idx >= 0.0 && (v - idx - 0.5).abs() < 1e-6 {
            let i = idx as usize;
            let i = if flip { n.wrapping_sub(i + 1) } else { i };
            spec.columns.get(i).cloned().unwrap_or_default()
        } else {
            String::new()
        }
    };
    let x_label = |v: &f64| label_at(v, false);
    let y_label = |v: &f64| label_at(v, true);

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(2 * n + 1)
        .y_labels(2 * n + 1)
        .x_label_formatter(&x_label)
        .y_label_formatter(&y_label)
        .draw()?;

    for (i, row) in spec.values.iter().enumerate() {
        let y = (n - i - 1) as f64;
        chart.draw_series(row.iter().enumerate().map(|(j, value)| {
            let color = value.map(diverging_color).unwrap_or(RGBColor(220, 220, 220));
            Rectangle::new([(j as f64, y), (j as f64 + 1.0, y + 1.0)], color.filled())
        }))?;

        if spec.annotate {
            chart.draw_series(row.iter().enumerate().map(|(j, value)| {
                let text = value
                    .map(|v| format!("{:.2}", v))
                    .unwrap_or_else(|| "NaN".to_string());
                Text::new(
                    text,
                    (j as f64 + 0.4, y + 0.55),
                    ("sans-serif", 14).into_font(),
                )
            }))?;
        }
    }

    Ok(())
}

/// Font transform for a counter-clockwise label rotation in degrees.
///
/// Plotters only rotates text in quarter turns (clockwise), so the angle is
/// rounded to the nearest one; 45 degrees reads upward like 90.
fn label_transform(rotation: f64) -> FontTransform {
    match ((rotation / 90.0).round() as i64).rem_euclid(4) {
        0 => FontTransform::None,
        1 => FontTransform::Rotate270,
        2 => FontTransform::Rotate180,
        _ => FontTransform::Rotate90,
    }
}
