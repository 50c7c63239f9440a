use std::fmt::Debug;
use std::sync::Arc;

use serde::Serialize;

use crate::column::{BooleanColumn, DateTimeColumn, Float64Column, Int64Column, StringColumn};

/// Physical type of a column as inferred at load time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ColumnType {
    Int64,
    Float64,
    Boolean,
    DateTime,
    String,
}

impl ColumnType {
    /// Short dtype label used in reports
    pub fn dtype_name(&self) -> &'static str {
        match self {
            ColumnType::Int64 => "int64",
            ColumnType::Float64 => "float64",
            ColumnType::Boolean => "bool",
            ColumnType::DateTime => "datetime",
            ColumnType::String => "object",
        }
    }

    /// Whether values of this type enter numeric statistics
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Int64 | ColumnType::Float64)
    }
}

/// Operations every typed column provides
pub trait ColumnTrait: Debug + Send + Sync {
    /// Number of rows, missing cells included
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn column_type(&self) -> ColumnType;

    /// Whether the cell at `index` is missing. Out-of-range indices count as missing.
    fn is_null(&self, index: usize) -> bool;

    /// Textual form of the cell, `None` when missing
    fn display_value(&self, index: usize) -> Option<String>;

    fn null_count(&self) -> usize {
        (0..self.len()).filter(|&i| self.is_null(i)).count()
    }
}

/// A typed column
#[derive(Debug, Clone)]
pub enum Column {
    Int64(Int64Column),
    Float64(Float64Column),
    Boolean(BooleanColumn),
    DateTime(DateTimeColumn),
    String(StringColumn),
}

/// Bitmask tracking missing cells; a set bit marks a null
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMask {
    pub(crate) data: Arc<[u8]>,
    pub(crate) len: usize,
}

impl BitMask {
    /// Build a mask from per-row null flags
    pub fn from_bools(bools: &[bool]) -> Self {
        let length = bools.len();
        let bytes_needed = (length + 7) / 8;
        let mut data = vec![0u8; bytes_needed];

        for (i, &is_set) in bools.iter().enumerate() {
            if is_set {
                data[i / 8] |= 1 << (i % 8);
            }
        }

        Self {
            data: data.into(),
            len: length,
        }
    }

    /// Build a mask only when at least one flag is set
    pub fn from_nulls(nulls: &[bool]) -> Option<Self> {
        if nulls.iter().any(|&is_null| is_null) {
            Some(Self::from_bools(nulls))
        } else {
            None
        }
    }

    pub fn is_set(&self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        (self.data[index / 8] & (1 << (index % 8))) != 0
    }

    pub fn count_set(&self) -> usize {
        (0..self.len).filter(|&i| self.is_set(i)).count()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Column {
    fn inner(&self) -> &dyn ColumnTrait {
        match self {
            Column::Int64(col) => col,
            Column::Float64(col) => col,
            Column::Boolean(col) => col,
            Column::DateTime(col) => col,
            Column::String(col) => col,
        }
    }

    pub fn len(&self) -> usize {
        self.inner().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_type(&self) -> ColumnType {
        self.inner().column_type()
    }

    pub fn is_null(&self, index: usize) -> bool {
        self.inner().is_null(index)
    }

    pub fn null_count(&self) -> usize {
        self.inner().null_count()
    }

    /// Number of present cells
    pub fn count(&self) -> usize {
        self.len() - self.null_count()
    }

    pub fn display_value(&self, index: usize) -> Option<String> {
        self.inner().display_value(index)
    }

    /// Per-row numeric view; `None` for non-numeric columns
    pub fn as_f64_options(&self) -> Option<Vec<Option<f64>>> {
        match self {
            Column::Int64(col) => Some((0..col.len()).map(|i| col.get(i).map(|v| v as f64)).collect()),
            Column::Float64(col) => Some((0..col.len()).map(|i| col.get(i)).collect()),
            _ => None,
        }
    }

    /// Present numeric values in row order; `None` for non-numeric columns
    pub fn numeric_values(&self) -> Option<Vec<f64>> {
        self.as_f64_options()
            .map(|values| values.into_iter().flatten().collect())
    }

    /// Present cells in row order, rendered as text
    pub fn text_values(&self) -> Vec<String> {
        (0..self.len()).filter_map(|i| self.display_value(i)).collect()
    }
}

/// Render a float the way dataframe previews do: integral values keep one decimal
pub(crate) fn format_float(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

impl From<Int64Column> for Column {
    fn from(col: Int64Column) -> Self {
        Column::Int64(col)
    }
}

impl From<Float64Column> for Column {
    fn from(col: Float64Column) -> Self {
        Column::Float64(col)
    }
}

impl From<BooleanColumn> for Column {
    fn from(col: BooleanColumn) -> Self {
        Column::Boolean(col)
    }
}

impl From<DateTimeColumn> for Column {
    fn from(col: DateTimeColumn) -> Self {
        Column::DateTime(col)
    }
}

impl From<StringColumn> for Column {
    fn from(col: StringColumn) -> Self {
        Column::String(col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmask_from_bools() {
        let mask = BitMask::from_bools(&[false, true, false, false, false, false, false, false, true]);
        assert_eq!(mask.len(), 9);
        assert!(mask.is_set(1));
        assert!(mask.is_set(8));
        assert!(!mask.is_set(0));
        assert!(!mask.is_set(100));
        assert_eq!(mask.count_set(), 2);
    }

    #[test]
    fn test_from_nulls_skips_empty_mask() {
        assert!(BitMask::from_nulls(&[false, false]).is_none());
        assert!(BitMask::from_nulls(&[false, true]).is_some());
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(3.5), "3.5");
        assert_eq!(format_float(f64::NAN), "NaN");
    }

    #[test]
    fn test_numeric_view() {
        let col = Column::from(Int64Column::with_nulls(vec![1, 0, 3], vec![false, true, false]));
        assert_eq!(col.as_f64_options(), Some(vec![Some(1.0), None, Some(3.0)]));
        assert_eq!(col.numeric_values(), Some(vec![1.0, 3.0]));
        assert_eq!(col.count(), 2);

        let text = Column::from(StringColumn::new(vec!["a".to_string()]));
        assert!(text.numeric_values().is_none());
    }
}
