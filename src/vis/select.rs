//! Chart selection driven by column classification.
//!
//! | selection                  | result                                   |
//! |----------------------------|------------------------------------------|
//! | one numeric column         | summary, histogram (+ density), boxplot  |
//! | one categorical column     | value counts, count plot                 |
//! | two numeric columns        | scatter plot                             |
//! | two columns, not both numeric | notice, no chart                      |

use log::debug;
use serde::Serialize;

use crate::column::ColumnKind;
use crate::config::ChartOptions;
use crate::dataframe::DataFrame;
use crate::error::Result;
use crate::stats::{self, CorrelationMatrix, NumericSummary, ValueCounts};
use crate::vis::spec::{BarChartSpec, BoxPlotSpec, ChartSpec, HeatmapSpec, HistogramSpec, ScatterSpec};

/// Shown instead of a chart when a bivariate selection is not fully numeric
pub const BIVARIATE_NOTICE: &str = "Bivariate analysis requires both columns to be numeric.";

/// Result of selecting a single column
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum UnivariateAnalysis {
    Numeric {
        column: String,
        summary: NumericSummary,
        histogram: HistogramSpec,
        boxplot: BoxPlotSpec,
    },
    Categorical {
        column: String,
        value_counts: ValueCounts,
        bar_chart: BarChartSpec,
    },
}

impl UnivariateAnalysis {
    pub fn kind(&self) -> ColumnKind {
        match self {
            UnivariateAnalysis::Numeric { .. } => ColumnKind::Numeric,
            UnivariateAnalysis::Categorical { .. } => ColumnKind::Categorical,
        }
    }

    pub fn column(&self) -> &str {
        match self {
            UnivariateAnalysis::Numeric { column, .. } => column,
            UnivariateAnalysis::Categorical { column, .. } => column,
        }
    }

    /// Charts in display order
    pub fn charts(&self) -> Vec<ChartSpec> {
        match self {
            UnivariateAnalysis::Numeric {
                histogram, boxplot, ..
            } => vec![
                ChartSpec::Histogram(histogram.clone()),
                ChartSpec::BoxPlot(boxplot.clone()),
            ],
            UnivariateAnalysis::Categorical { bar_chart, .. } => {
                vec![ChartSpec::BarChart(bar_chart.clone())]
            }
        }
    }
}

/// Result of selecting two columns
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BivariateAnalysis {
    Scatter(ScatterSpec),
    NotBothNumeric {
        x_column: String,
        y_column: String,
        notice: String,
    },
}

impl BivariateAnalysis {
    pub fn chart(&self) -> Option<ChartSpec> {
        match self {
            BivariateAnalysis::Scatter(spec) => Some(ChartSpec::Scatter(spec.clone())),
            BivariateAnalysis::NotBothNumeric { .. } => None,
        }
    }

    pub fn notice(&self) -> Option<&str> {
        match self {
            BivariateAnalysis::Scatter(_) => None,
            BivariateAnalysis::NotBothNumeric { notice, .. } => Some(notice),
        }
    }
}

/// Picks and builds the charts for a column selection
#[derive(Debug, Clone, Default)]
pub struct ChartSelector {
    options: ChartOptions,
}

impl ChartSelector {
    pub fn new(options: ChartOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// Charts for a single column. Fails with `UnknownColumn` for absent names.
    pub fn univariate(&self, df: &DataFrame, column: &str) -> Result<UnivariateAnalysis> {
        let col = df.column(column)?;
        let kind = col.kind();
        debug!("univariate selection '{}' is {}", column, kind);

        let analysis = match col.numeric_values() {
            Some(values) => UnivariateAnalysis::Numeric {
                column: column.to_string(),
                summary: stats::descriptive::describe_impl(&values),
                histogram: HistogramSpec::new(
                    column,
                    &values,
                    self.options.histogram_bins,
                    self.options.density_points,
                ),
                boxplot: BoxPlotSpec::new(column, &values),
            },
            None => {
                let value_counts = stats::value_counts(df, column)?;
                let bar_chart =
                    BarChartSpec::new(column, &value_counts.entries, self.options.label_rotation);
                UnivariateAnalysis::Categorical {
                    column: column.to_string(),
                    value_counts,
                    bar_chart,
                }
            }
        };
        Ok(analysis)
    }

    /// Scatter plot of `x` against `y` when both are numeric, a notice otherwise.
    ///
    /// `x` and `y` may name the same column.
    pub fn bivariate(&self, df: &DataFrame, x: &str, y: &str) -> Result<BivariateAnalysis> {
        let x_col = df.column(x)?;
        let y_col = df.column(y)?;

        match (x_col.as_f64_options(), y_col.as_f64_options()) {
            (Some(xs), Some(ys)) => Ok(BivariateAnalysis::Scatter(ScatterSpec::new(x, y, &xs, &ys))),
            _ => {
                debug!("bivariate selection '{}' / '{}' is not fully numeric", x, y);
                Ok(BivariateAnalysis::NotBothNumeric {
                    x_column: x.to_string(),
                    y_column: y.to_string(),
                    notice: BIVARIATE_NOTICE.to_string(),
                })
            }
        }
    }

    pub fn heatmap(&self, matrix: &CorrelationMatrix) -> HeatmapSpec {
        HeatmapSpec::from_correlation(matrix)
    }
}
