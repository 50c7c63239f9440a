use std::sync::Arc;

use crate::column::common::{BitMask, ColumnTrait, ColumnType};

/// Column of 64-bit integers
#[derive(Debug, Clone)]
pub struct Int64Column {
    pub(crate) data: Arc<[i64]>,
    pub(crate) null_mask: Option<BitMask>,
}

impl Int64Column {
    pub fn new(data: Vec<i64>) -> Self {
        Self {
            data: data.into(),
            null_mask: None,
        }
    }

    pub fn with_nulls(data: Vec<i64>, nulls: Vec<bool>) -> Self {
        Self {
            data: data.into(),
            null_mask: BitMask::from_nulls(&nulls),
        }
    }

    pub fn get(&self, index: usize) -> Option<i64> {
        if self.is_null(index) {
            return None;
        }
        self.data.get(index).copied()
    }
}

impl ColumnTrait for Int64Column {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn column_type(&self) -> ColumnType {
        ColumnType::Int64
    }

    fn is_null(&self, index: usize) -> bool {
        index >= self.data.len() || self.null_mask.as_ref().map_or(false, |m| m.is_set(index))
    }

    fn display_value(&self, index: usize) -> Option<String> {
        self.get(index).map(|v| v.to_string())
    }
}
