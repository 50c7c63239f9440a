//! Whole-table descriptive statistics.
//!
//! Every function here is a pure function of the [`DataFrame`]: the same table
//! always yields the same report, and nothing is cached between calls.

pub mod descriptive;

use std::fmt;

use log::{debug, warn};
use serde::Serialize;

use crate::column::{Column, ColumnType};
use crate::dataframe::{DataFrame, TextTable};
use crate::error::Result;

const DATETIME_DISPLAY: &str = "%Y-%m-%d %H:%M:%S";

/// Report rows of a numeric summary, in display order
pub const NUMERIC_FIELDS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// `(rows, columns)` of the table
pub fn shape(df: &DataFrame) -> (usize, usize) {
    df.shape()
}

/// Statistics of a numeric column. `None` marks a statistic that does not apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    /// Number of present values
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation
    pub std: Option<f64>,
    pub min: Option<f64>,
    /// 25th percentile
    #[serde(rename = "25%")]
    pub q1: Option<f64>,
    /// 50th percentile
    #[serde(rename = "50%")]
    pub median: Option<f64>,
    /// 75th percentile
    #[serde(rename = "75%")]
    pub q3: Option<f64>,
    pub max: Option<f64>,
}

impl NumericSummary {
    pub(crate) fn empty() -> Self {
        Self {
            count: 0,
            mean: None,
            std: None,
            min: None,
            q1: None,
            median: None,
            q3: None,
            max: None,
        }
    }

    /// Text of one report field, `None` where it does not apply
    pub fn field(&self, field: &str) -> Option<String> {
        let float = |v: Option<f64>| v.map(|v| format!("{:.6}", v));
        match field {
            "count" => Some(format!("{:.1}", self.count as f64)),
            "mean" => float(self.mean),
            "std" => float(self.std),
            "min" => float(self.min),
            "25%" => float(self.q1),
            "50%" => float(self.median),
            "75%" => float(self.q3),
            "max" => float(self.max),
            _ => None,
        }
    }
}

/// Statistics of a categorical column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSummary {
    /// Number of present values
    pub count: usize,
    /// Number of distinct present values
    pub unique: usize,
    /// Most frequent value
    pub top: Option<String>,
    /// Frequency of `top`
    pub freq: Option<usize>,
    /// Earliest timestamp, date-like columns only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    /// Latest timestamp, date-like columns only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ColumnStats {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
}

/// One column of a [`SummaryReport`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub dtype: ColumnType,
    pub stats: ColumnStats,
}

impl ColumnSummary {
    pub fn numeric(&self) -> Option<&NumericSummary> {
        match &self.stats {
            ColumnStats::Numeric(s) => Some(s),
            ColumnStats::Categorical(_) => None,
        }
    }

    pub fn categorical(&self) -> Option<&CategoricalSummary> {
        match &self.stats {
            ColumnStats::Categorical(s) => Some(s),
            ColumnStats::Numeric(_) => None,
        }
    }

    /// Text of one report field, `None` where it does not apply to this column
    pub fn field(&self, field: &str) -> Option<String> {
        match (&self.stats, field) {
            (ColumnStats::Numeric(s), _) => s.field(field),
            (ColumnStats::Categorical(s), "count") => Some(s.count.to_string()),
            (ColumnStats::Categorical(s), "unique") => Some(s.unique.to_string()),
            (ColumnStats::Categorical(s), "top") => s.top.clone(),
            (ColumnStats::Categorical(s), "freq") => s.freq.map(|f| f.to_string()),
            (ColumnStats::Categorical(s), "first") => s.first.clone(),
            (ColumnStats::Categorical(s), "last") => s.last.clone(),
            _ => None,
        }
    }
}

/// Per-column descriptive statistics for a whole table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub columns: Vec<ColumnSummary>,
}

impl SummaryReport {
    pub fn get(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Report rows present for this mix of column kinds
    pub fn fields(&self) -> Vec<&'static str> {
        let has_categorical = self.columns.iter().any(|c| c.categorical().is_some());
        let has_numeric = self.columns.iter().any(|c| c.numeric().is_some());
        let has_dates = self
            .columns
            .iter()
            .any(|c| c.categorical().map_or(false, |s| s.first.is_some()));

        let mut fields = vec!["count"];
        if has_categorical {
            fields.extend(["unique", "top", "freq"]);
        }
        if has_dates {
            fields.extend(["first", "last"]);
        }
        if has_numeric {
            fields.extend(&NUMERIC_FIELDS[1..]);
        }
        fields
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = TextTable::new(
            std::iter::once(String::new())
                .chain(self.columns.iter().map(|c| c.name.clone()))
                .collect(),
        );
        for field in self.fields() {
            table.push_row(
                std::iter::once(field.to_string())
                    .chain(
                        self.columns
                            .iter()
                            .map(|c| c.field(field).unwrap_or_else(|| "NaN".to_string())),
                    )
                    .collect(),
            );
        }
        write!(f, "{}", table)
    }
}

/// Summarize a single column
pub fn describe_column(name: &str, column: &Column) -> ColumnSummary {
    let stats = match column.numeric_values() {
        Some(values) => ColumnStats::Numeric(descriptive::describe_impl(&values)),
        None => ColumnStats::Categorical(categorical_summary(column)),
    };
    ColumnSummary {
        name: name.to_string(),
        dtype: column.column_type(),
        stats,
    }
}

fn categorical_summary(column: &Column) -> CategoricalSummary {
    let counts = descriptive::value_counts_impl(column.text_values());
    let (first, last) = match column {
        Column::DateTime(col) => match col.range() {
            Some((lo, hi)) => (
                Some(lo.format(DATETIME_DISPLAY).to_string()),
                Some(hi.format(DATETIME_DISPLAY).to_string()),
            ),
            None => (None, None),
        },
        _ => (None, None),
    };

    CategoricalSummary {
        count: column.count(),
        unique: counts.len(),
        top: counts.first().map(|(v, _)| v.clone()),
        freq: counts.first().map(|(_, c)| *c),
        first,
        last,
    }
}

/// Descriptive statistics for every column, in table order
pub fn summarize(df: &DataFrame) -> SummaryReport {
    let columns = df
        .iter()
        .map(|(name, column)| describe_column(name, column))
        .collect();
    debug!("summarized {} columns", df.column_count());
    SummaryReport { columns }
}

/// Number of missing cells per column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingCounts {
    pub counts: Vec<(String, usize)>,
}

impl MissingCounts {
    pub fn get(&self, name: &str) -> Option<usize> {
        self.counts.iter().find(|(n, _)| n == name).map(|(_, c)| *c)
    }

    /// Missing cells across the whole table
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, c)| c).sum()
    }
}

impl fmt::Display for MissingCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = TextTable::new(vec![String::new(), "missing".to_string()]);
        for (name, count) in &self.counts {
            table.push_row(vec![name.clone(), count.to_string()]);
        }
        write!(f, "{}", table)
    }
}

/// Count missing cells per column. Never fails.
pub fn missing_counts(df: &DataFrame) -> MissingCounts {
    MissingCounts {
        counts: df
            .iter()
            .map(|(name, column)| (name.to_string(), column.null_count()))
            .collect(),
    }
}

/// Pairwise Pearson correlations among numeric columns.
///
/// Square, symmetric, with 1.0 on the diagonal. An off-diagonal entry is
/// `None` when the pair shares fewer than two complete rows or one side is
/// constant over them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values[i][j]
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.len()).all(|i| (0..self.len()).all(|j| self.values[i][j] == self.values[j][i]))
    }
}

impl fmt::Display for CorrelationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = TextTable::new(
            std::iter::once(String::new())
                .chain(self.columns.iter().cloned())
                .collect(),
        );
        for (name, row) in self.columns.iter().zip(&self.values) {
            table.push_row(
                std::iter::once(name.clone())
                    .chain(row.iter().map(|v| match v {
                        Some(v) => format!("{:.6}", v),
                        None => "NaN".to_string(),
                    }))
                    .collect(),
            );
        }
        write!(f, "{}", table)
    }
}

/// Correlation matrix over numeric columns, absent with fewer than two of them
pub fn correlation_matrix(df: &DataFrame) -> Option<CorrelationMatrix> {
    let numeric: Vec<(String, Vec<Option<f64>>)> = df
        .numeric_column_names()
        .into_iter()
        .filter_map(|name| {
            let values = df.column(&name).ok()?.as_f64_options()?;
            Some((name, values))
        })
        .collect();

    if numeric.len() < 2 {
        warn!(
            "correlation matrix needs two numeric columns, found {}",
            numeric.len()
        );
        return None;
    }

    let n = numeric.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        values[i][i] = Some(1.0);
        for j in (i + 1)..n {
            let (x, y) = descriptive::pairwise_complete(&numeric[i].1, &numeric[j].1);
            let r = descriptive::correlation_impl(&x, &y);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Some(CorrelationMatrix {
        columns: numeric.into_iter().map(|(name, _)| name).collect(),
        values,
    })
}

/// Distinct present values of one column with their counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCounts {
    pub column: String,
    /// Most frequent first; ties in order of first appearance
    pub entries: Vec<(String, usize)>,
}

impl ValueCounts {
    pub fn get(&self, value: &str) -> Option<usize> {
        self.entries.iter().find(|(v, _)| v == value).map(|(_, c)| *c)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(v, _)| v.as_str()).collect()
    }
}

impl fmt::Display for ValueCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = TextTable::new(vec![self.column.clone(), "count".to_string()]);
        for (value, count) in &self.entries {
            table.push_row(vec![value.clone(), count.to_string()]);
        }
        write!(f, "{}", table)
    }
}

/// Value counts of the named column
pub fn value_counts(df: &DataFrame, name: &str) -> Result<ValueCounts> {
    let column = df.column(name)?;
    Ok(ValueCounts {
        column: name.to_string(),
        entries: descriptive::value_counts_impl(column.text_values()),
    })
}
