//! Text-based chart rendering
//!
//! Draws chart specs as Unicode text so they can be shown in a terminal:
//! histograms with a density overlay, boxplots, count plots, scatter plots and
//! annotated correlation heatmaps.

mod charts;

pub use charts::{BarChart, BarOrientation, BoxPlot, Heatmap, Histogram, ScatterPlot};

use crate::config::ChartOptions;
use crate::vis::spec::ChartSpec;

/// Chart rendering trait
pub trait Chart {
    /// Render the chart to a string
    fn render(&self) -> String;

    /// Render to stdout
    fn display(&self) {
        println!("{}", self.render());
    }
}

/// Common chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Chart width in characters
    pub width: usize,
    /// Chart height in characters
    pub height: usize,
    /// Title for the chart
    pub title: Option<String>,
    /// X-axis label
    pub x_label: Option<String>,
    /// Y-axis label
    pub y_label: Option<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 15,
            title: None,
            x_label: None,
            y_label: None,
        }
    }
}

impl ChartConfig {
    fn from_options(options: &ChartOptions, title: &str) -> Self {
        Self {
            width: options.width,
            height: options.height,
            title: Some(title.to_string()),
            ..Default::default()
        }
    }
}

/// Chart style options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartStyle {
    /// Simple ASCII characters
    Ascii,
    /// Unicode block characters
    #[default]
    Unicode,
}

/// Render any chart spec as text using the configured dimensions
pub fn render_text(spec: &ChartSpec, options: &ChartOptions) -> String {
    let mut config = ChartConfig::from_options(options, spec.title());
    match spec {
        ChartSpec::Heatmap(s) => Heatmap::new(s, config).render(),
        ChartSpec::Histogram(s) => {
            config.x_label = Some(s.column.clone());
            Histogram::new(s, config).render()
        }
        ChartSpec::BoxPlot(s) => BoxPlot::new(s, config).render(),
        ChartSpec::BarChart(s) => BarChart::new(s, config).render(),
        ChartSpec::Scatter(s) => {
            config.x_label = Some(s.x_column.clone());
            config.y_label = Some(s.y_column.clone());
            ScatterPlot::new(s, config).render()
        }
    }
}
