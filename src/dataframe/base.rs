use std::collections::HashMap;
use std::fmt;

use crate::column::{Column, ColumnType};
use crate::dataframe::display::TextTable;
use crate::error::{Error, Result};

/// Immutable table of named, equally long columns.
///
/// A `DataFrame` is only built through [`DataFrame::from_columns`], which
/// enforces the uniform row count; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct DataFrame {
    names: Vec<String>,
    columns: Vec<Column>,
    positions: HashMap<String, usize>,
    row_count: usize,
}

impl DataFrame {
    /// Build a table from `(name, column)` pairs, keeping their order
    pub fn from_columns(columns: Vec<(String, Column)>) -> Result<Self> {
        let row_count = columns.first().map(|(_, c)| c.len()).unwrap_or(0);
        let mut names = Vec::with_capacity(columns.len());
        let mut data = Vec::with_capacity(columns.len());
        let mut positions = HashMap::with_capacity(columns.len());

        for (name, column) in columns {
            if column.len() != row_count {
                return Err(Error::InconsistentRowCount {
                    expected: row_count,
                    found: column.len(),
                });
            }
            if positions.insert(name.clone(), names.len()).is_some() {
                return Err(Error::DuplicateColumnName(name));
            }
            names.push(name);
            data.push(column);
        }

        Ok(DataFrame {
            names,
            columns: data,
            positions,
            row_count,
        })
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count, self.names.len())
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.names.len()
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.positions
            .get(name)
            .map(|&i| &self.columns[i])
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))
    }

    /// Columns in table order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.names
            .iter()
            .map(|n| n.as_str())
            .zip(self.columns.iter())
    }

    /// Names of the numeric (int64 / float64) columns in table order
    pub fn numeric_column_names(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, c)| c.column_type().is_numeric())
            .map(|(n, _)| n.to_string())
            .collect()
    }

    /// Column name to inferred type, in table order
    pub fn dtypes(&self) -> Vec<(String, ColumnType)> {
        self.iter()
            .map(|(n, c)| (n.to_string(), c.column_type()))
            .collect()
    }

    /// The first `n` rows
    pub fn head(&self, n: usize) -> Preview {
        let rows = (0..n.min(self.row_count))
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| c.display_value(row).unwrap_or_else(|| "NaN".to_string()))
                    .collect()
            })
            .collect();

        Preview {
            columns: self.names.clone(),
            rows,
        }
    }
}

/// Leading rows of a table rendered as text cells
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Preview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = TextTable::new(
            std::iter::once(String::new())
                .chain(self.columns.iter().cloned())
                .collect(),
        );
        for (i, row) in self.rows.iter().enumerate() {
            table.push_row(std::iter::once(i.to_string()).chain(row.iter().cloned()).collect());
        }
        write!(f, "{}", table)
    }
}

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head(self.row_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{Float64Column, Int64Column, StringColumn};

    fn sample() -> DataFrame {
        DataFrame::from_columns(vec![
            ("id".to_string(), Int64Column::new(vec![1, 2, 3]).into()),
            (
                "color".to_string(),
                StringColumn::new(vec!["a".into(), "b".into(), "a".into()]).into(),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_shape() {
        let df = sample();
        assert_eq!(df.shape(), (3, 2));
        assert_eq!(df.column_names(), &["id".to_string(), "color".to_string()]);
    }

    #[test]
    fn test_numeric_column_names() {
        assert_eq!(sample().numeric_column_names(), vec!["id".to_string()]);
    }

    #[test]
    fn test_inconsistent_row_count() {
        let result = DataFrame::from_columns(vec![
            ("a".to_string(), Int64Column::new(vec![1, 2]).into()),
            ("b".to_string(), Float64Column::new(vec![1.0]).into()),
        ]);
        assert!(matches!(
            result,
            Err(Error::InconsistentRowCount { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_duplicate_names() {
        let result = DataFrame::from_columns(vec![
            ("a".to_string(), Int64Column::new(vec![1]).into()),
            ("a".to_string(), Int64Column::new(vec![2]).into()),
        ]);
        assert!(matches!(result, Err(Error::DuplicateColumnName(_))));
    }

    #[test]
    fn test_head_limits_rows() {
        let df = sample();
        let preview = df.head(2);
        assert_eq!(preview.rows.len(), 2);
        assert_eq!(preview.rows[1], vec!["2".to_string(), "b".to_string()]);
        assert_eq!(df.head(10).rows.len(), 3);
    }

    #[test]
    fn test_unknown_column() {
        let df = sample();
        assert!(matches!(df.column("missing"), Err(Error::UnknownColumn(_))));
    }
}
