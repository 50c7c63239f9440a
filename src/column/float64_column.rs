use std::sync::Arc;

use crate::column::common::{format_float, BitMask, ColumnTrait, ColumnType};

/// Column of 64-bit floats. NaN cells are treated as missing.
#[derive(Debug, Clone)]
pub struct Float64Column {
    pub(crate) data: Arc<[f64]>,
    pub(crate) null_mask: Option<BitMask>,
}

impl Float64Column {
    pub fn new(data: Vec<f64>) -> Self {
        Self {
            data: data.into(),
            null_mask: None,
        }
    }

    /// Create a column whose `nulls[i] == true` cells are missing
    pub fn with_nulls(data: Vec<f64>, nulls: Vec<bool>) -> Self {
        Self {
            data: data.into(),
            null_mask: BitMask::from_nulls(&nulls),
        }
    }

    /// Value at `index`, `None` when missing or out of range
    pub fn get(&self, index: usize) -> Option<f64> {
        if self.is_null(index) {
            return None;
        }
        self.data.get(index).copied()
    }
}

impl ColumnTrait for Float64Column {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn column_type(&self) -> ColumnType {
        ColumnType::Float64
    }

    fn is_null(&self, index: usize) -> bool {
        match self.data.get(index) {
            None => true,
            Some(v) if v.is_nan() => true,
            Some(_) => self.null_mask.as_ref().map_or(false, |m| m.is_set(index)),
        }
    }

    fn display_value(&self, index: usize) -> Option<String> {
        self.get(index).map(format_float)
    }
}
