use std::sync::Arc;

use crate::column::common::{BitMask, ColumnTrait, ColumnType};

/// Column of free-form text
#[derive(Debug, Clone)]
pub struct StringColumn {
    pub(crate) data: Arc<[String]>,
    pub(crate) null_mask: Option<BitMask>,
}

impl StringColumn {
    pub fn new(data: Vec<String>) -> Self {
        Self {
            data: data.into(),
            null_mask: None,
        }
    }

    pub fn with_nulls(data: Vec<String>, nulls: Vec<bool>) -> Self {
        Self {
            data: data.into(),
            null_mask: BitMask::from_nulls(&nulls),
        }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        if self.is_null(index) {
            return None;
        }
        self.data.get(index).map(|s| s.as_str())
    }
}

impl ColumnTrait for StringColumn {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn column_type(&self) -> ColumnType {
        ColumnType::String
    }

    fn is_null(&self, index: usize) -> bool {
        index >= self.data.len() || self.null_mask.as_ref().map_or(false, |m| m.is_set(index))
    }

    fn display_value(&self, index: usize) -> Option<String> {
        self.get(index).map(|s| s.to_string())
    }
}
