//! Interactive session state.
//!
//! A [`Session`] holds at most one loaded table. Every upload replaces the
//! table and rebuilds the [`DatasetOverview`] from scratch; a failed upload
//! leaves the session empty. Column selections are answered from the current
//! table without modifying it.

use std::fmt::Write as _;
use std::path::Path;

use log::{debug, info, warn};
use serde::Serialize;

use crate::column::ColumnType;
use crate::config::{ChartOptions, EdaConfig};
use crate::dataframe::{DataFrame, Preview, TextTable};
use crate::error::{Error, Result};
use crate::io::{check_extension, read_csv_bytes};
use crate::stats::{self, CorrelationMatrix, MissingCounts, SummaryReport, NUMERIC_FIELDS};
use crate::vis::{
    render_text, BivariateAnalysis, ChartSelector, ChartSpec, HeatmapSpec, UnivariateAnalysis,
};

/// Shown in place of the heatmap when fewer than two numeric columns exist
pub const CORRELATION_ABSENT: &str =
    "Correlation heatmap requires at least two numeric columns.";

/// Everything shown for a freshly loaded table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetOverview {
    pub preview: Preview,
    pub shape: (usize, usize),
    pub dtypes: Vec<(String, ColumnType)>,
    pub summary: SummaryReport,
    pub missing: MissingCounts,
    /// Absent with fewer than two numeric columns
    pub correlation: Option<CorrelationMatrix>,
    pub heatmap: Option<HeatmapSpec>,
}

impl DatasetOverview {
    pub fn compute(df: &DataFrame, preview_rows: usize, selector: &ChartSelector) -> Self {
        let correlation = stats::correlation_matrix(df);
        let heatmap = correlation.as_ref().map(|m| selector.heatmap(m));

        Self {
            preview: df.head(preview_rows),
            shape: stats::shape(df),
            dtypes: df.dtypes(),
            summary: stats::summarize(df),
            missing: stats::missing_counts(df),
            correlation,
            heatmap,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// All overview sections as terminal text
    pub fn render(&self, options: &ChartOptions) -> String {
        let mut out = String::new();

        section(&mut out, "Dataset Preview", &self.preview.to_string());
        section(
            &mut out,
            "Dataset Shape",
            &format!("{} rows, {} columns\n", self.shape.0, self.shape.1),
        );

        let mut dtypes = TextTable::new(vec!["column".to_string(), "dtype".to_string()]);
        for (name, dtype) in &self.dtypes {
            dtypes.push_row(vec![name.clone(), dtype.dtype_name().to_string()]);
        }
        section(&mut out, "Data Types", &dtypes.to_string());

        section(&mut out, "Summary Statistics", &self.summary.to_string());
        section(&mut out, "Missing Values", &self.missing.to_string());

        match &self.heatmap {
            Some(heatmap) => section(
                &mut out,
                "Correlation Heatmap",
                &render_text(&ChartSpec::Heatmap(heatmap.clone()), options),
            ),
            None => section(
                &mut out,
                "Correlation Heatmap",
                &format!("{}\n", CORRELATION_ABSENT),
            ),
        }

        out
    }
}

fn section(out: &mut String, heading: &str, body: &str) {
    let _ = writeln!(out, "== {} ==", heading);
    out.push_str(body);
    if !body.ends_with('\n') {
        out.push('\n');
    }
    out.push('\n');
}

#[derive(Debug, Clone)]
struct LoadedTable {
    file_name: String,
    df: DataFrame,
    overview: DatasetOverview,
}

/// One user's view of the tool: config, chart selector and the current table
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: EdaConfig,
    selector: ChartSelector,
    loaded: Option<LoadedTable>,
}

impl Session {
    pub fn new(config: EdaConfig) -> Self {
        let selector = ChartSelector::new(config.charts.clone());
        Self {
            config,
            selector,
            loaded: None,
        }
    }

    pub fn config(&self) -> &EdaConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn dataframe(&self) -> Option<&DataFrame> {
        self.loaded.as_ref().map(|l| &l.df)
    }

    pub fn overview(&self) -> Option<&DatasetOverview> {
        self.loaded.as_ref().map(|l| &l.overview)
    }

    pub fn file_name(&self) -> Option<&str> {
        self.loaded.as_ref().map(|l| l.file_name.as_str())
    }

    /// Drop the current table
    pub fn clear(&mut self) {
        self.loaded = None;
    }

    /// Replace the current table with `bytes` parsed as CSV.
    ///
    /// On failure the session is left without a table.
    pub fn upload(&mut self, file_name: &str, bytes: &[u8]) -> Result<&DatasetOverview> {
        self.clear();

        let df = match check_extension(file_name).and_then(|_| read_csv_bytes(bytes, &self.config.csv)) {
            Ok(df) => df,
            Err(err) => {
                warn!("upload of '{}' failed: {}", file_name, err);
                return Err(err);
            }
        };

        let (rows, cols) = df.shape();
        info!("loaded '{}': {} rows, {} columns", file_name, rows, cols);

        let overview = DatasetOverview::compute(&df, self.config.preview_rows, &self.selector);
        let loaded = self.loaded.insert(LoadedTable {
            file_name: file_name.to_string(),
            df,
            overview,
        });
        Ok(&loaded.overview)
    }

    /// Read a file from disk and upload it
    pub fn upload_path<P: AsRef<Path>>(&mut self, path: P) -> Result<&DatasetOverview> {
        let path = path.as_ref();
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.clear();
                warn!("could not read '{}': {}", path.display(), err);
                return Err(err.into());
            }
        };
        let file_name = path.to_string_lossy().into_owned();
        self.upload(&file_name, &bytes)
    }

    fn table(&self, column: &str) -> Result<&DataFrame> {
        self.dataframe()
            .ok_or_else(|| Error::UnknownColumn(column.to_string()))
    }

    /// Charts and statistics for one column
    pub fn select_column(&self, name: &str) -> Result<UnivariateAnalysis> {
        let df = self.table(name)?;
        debug!("select column '{}'", name);
        self.selector.univariate(df, name)
    }

    /// Scatter plot or notice for a pair of columns
    pub fn compare(&self, x: &str, y: &str) -> Result<BivariateAnalysis> {
        let df = self.table(x)?;
        debug!("compare '{}' with '{}'", x, y);
        self.selector.bivariate(df, x, y)
    }

    pub fn render_overview(&self) -> Option<String> {
        self.overview().map(|o| o.render(self.selector.options()))
    }

    pub fn render_univariate(&self, analysis: &UnivariateAnalysis) -> String {
        let mut out = String::new();
        match analysis {
            UnivariateAnalysis::Numeric { column, summary, .. } => {
                let mut table = TextTable::new(vec![String::new(), column.clone()]);
                for field in NUMERIC_FIELDS {
                    let value = summary.field(field).unwrap_or_else(|| "NaN".to_string());
                    table.push_row(vec![field.to_string(), value]);
                }
                section(&mut out, &format!("Summary of {}", column), &table.to_string());
            }
            UnivariateAnalysis::Categorical {
                column,
                value_counts,
                ..
            } => {
                section(
                    &mut out,
                    &format!("Value Counts of {}", column),
                    &value_counts.to_string(),
                );
            }
        }

        for chart in analysis.charts() {
            section(&mut out, chart.title(), &render_text(&chart, self.selector.options()));
        }
        out
    }

    pub fn render_bivariate(&self, analysis: &BivariateAnalysis) -> String {
        match (analysis.chart(), analysis.notice()) {
            (Some(chart), _) => {
                let mut out = String::new();
                section(&mut out, chart.title(), &render_text(&chart, self.selector.options()));
                out
            }
            (None, Some(notice)) => format!("{}\n", notice),
            (None, None) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnKind;
    use crate::vis::BIVARIATE_NOTICE;

    const SAMPLE: &[u8] = b"id,color\n1,a\n2,b\n3,a\n";

    #[test]
    fn test_upload_builds_overview() {
        let mut session = Session::default();
        let overview = session.upload("sample.csv", SAMPLE).unwrap();
        assert_eq!(overview.shape, (3, 2));
        assert!(overview.correlation.is_none());
        assert_eq!(session.file_name(), Some("sample.csv"));
    }

    #[test]
    fn test_failed_upload_clears_table() {
        let mut session = Session::default();
        session.upload("sample.csv", SAMPLE).unwrap();

        let err = session.upload("empty.csv", b"").unwrap_err();
        assert!(matches!(err, Error::EmptyInput(_)));
        assert!(!session.is_loaded());
        assert!(session.render_overview().is_none());
    }

    #[test]
    fn test_rejects_other_extensions() {
        let mut session = Session::default();
        assert!(matches!(
            session.upload("sample.txt", SAMPLE),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn test_selection_without_table() {
        let session = Session::default();
        assert!(matches!(
            session.select_column("id"),
            Err(Error::UnknownColumn(_))
        ));
        assert!(matches!(
            session.compare("id", "color"),
            Err(Error::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_selection_dispatch() {
        let mut session = Session::default();
        session.upload("sample.csv", SAMPLE).unwrap();

        let id = session.select_column("id").unwrap();
        assert_eq!(id.kind(), ColumnKind::Numeric);
        let text = session.render_univariate(&id);
        assert!(text.contains("== Histogram of id =="));
        assert!(text.contains("== Boxplot of id =="));

        let pair = session.compare("id", "color").unwrap();
        assert_eq!(session.render_bivariate(&pair), format!("{}\n", BIVARIATE_NOTICE));
    }

    #[test]
    fn test_numeric_count_format_matches_report() {
        let mut session = Session::default();
        session.upload("sample.csv", SAMPLE).unwrap();

        let id = session.select_column("id").unwrap();
        let text = session.render_univariate(&id);
        let row: Vec<&str> = text
            .lines()
            .find(|l| l.starts_with("count"))
            .unwrap()
            .split_whitespace()
            .collect();
        assert_eq!(row, vec!["count", "3.0"]);

        let summary = &session.overview().unwrap().summary;
        assert_eq!(summary.get("id").unwrap().field("count").as_deref(), Some("3.0"));
    }

    #[test]
    fn test_overview_render_sections() {
        let mut session = Session::default();
        session.upload("sample.csv", SAMPLE).unwrap();
        let text = session.render_overview().unwrap();
        for heading in [
            "== Dataset Preview ==",
            "== Dataset Shape ==",
            "== Data Types ==",
            "== Summary Statistics ==",
            "== Missing Values ==",
            "== Correlation Heatmap ==",
        ] {
            assert!(text.contains(heading), "missing {}", heading);
        }
        assert!(text.contains("3 rows, 2 columns"));
        assert!(text.contains(CORRELATION_ABSENT));
    }

    #[test]
    fn test_overview_json() {
        let mut session = Session::default();
        let json = session.upload("sample.csv", SAMPLE).unwrap().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["shape"], serde_json::json!([3, 2]));
        assert!(value["correlation"].is_null());
    }
}
