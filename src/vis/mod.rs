//! Chart selection and rendering
//!
//! [`select`] decides which charts a column selection gets and builds their
//! [`spec`]s. Specs are drawn as terminal text by [`ascii`], or as PNG/SVG by
//! `plotters_ext` when the `visualization` feature is enabled.

pub mod ascii;
pub mod select;
pub mod spec;

#[cfg(feature = "visualization")]
pub mod plotters_ext;

pub use self::ascii::{render_text, Chart, ChartConfig, ChartStyle};
pub use self::select::{BivariateAnalysis, ChartSelector, UnivariateAnalysis, BIVARIATE_NOTICE};
pub use self::spec::{
    BarChartSpec, Bin, BoxPlotSpec, BoxStats, ChartKind, ChartSpec, HeatmapSpec, HistogramSpec,
    ScatterSpec,
};

#[cfg(feature = "visualization")]
pub use self::plotters_ext::{render_svg_string, render_to_file, OutputType, PlotSettings};
