//! Numeric / categorical tagging of columns.
//!
//! Date-like columns are recognised at load time but tagged categorical: they
//! never enter numeric statistics, correlations or numeric charts.

use std::fmt;

use serde::Serialize;

use crate::column::Column;
use crate::dataframe::DataFrame;
use crate::error::Result;

/// The two classifications driving chart choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Categorical => write!(f, "categorical"),
        }
    }
}

impl Column {
    pub fn kind(&self) -> ColumnKind {
        if self.column_type().is_numeric() {
            ColumnKind::Numeric
        } else {
            ColumnKind::Categorical
        }
    }
}

/// Classify the named column of `df`.
///
/// Fails with `UnknownColumn` when `name` is not present.
pub fn classify(df: &DataFrame, name: &str) -> Result<ColumnKind> {
    Ok(df.column(name)?.kind())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{BooleanColumn, Float64Column, Int64Column, StringColumn};
    use crate::error::Error;

    fn frame() -> DataFrame {
        DataFrame::from_columns(vec![
            (
                "score".to_string(),
                Float64Column::new(vec![1.0, 2.0, 3.5, f64::NAN]).into(),
            ),
            ("id".to_string(), Int64Column::new(vec![1, 2, 3, 4]).into()),
            (
                "color".to_string(),
                StringColumn::new(vec!["red".into(), "blue".into(), "red".into(), "red".into()])
                    .into(),
            ),
            (
                "flag".to_string(),
                BooleanColumn::new(vec![true, false, true, true]).into(),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_numeric_columns() {
        let df = frame();
        assert_eq!(classify(&df, "score").unwrap(), ColumnKind::Numeric);
        assert_eq!(classify(&df, "id").unwrap(), ColumnKind::Numeric);
    }

    #[test]
    fn test_categorical_columns() {
        let df = frame();
        assert_eq!(classify(&df, "color").unwrap(), ColumnKind::Categorical);
        assert_eq!(classify(&df, "flag").unwrap(), ColumnKind::Categorical);
    }

    #[test]
    fn test_unknown_column() {
        let df = frame();
        assert!(matches!(classify(&df, "nope"), Err(Error::UnknownColumn(_))));
    }

    #[test]
    fn test_idempotent() {
        let df = frame();
        assert_eq!(classify(&df, "color").unwrap(), classify(&df, "color").unwrap());
    }
}
