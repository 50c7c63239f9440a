use std::sync::Arc;

use crate::column::common::{BitMask, ColumnTrait, ColumnType};

/// Column of booleans parsed from `true`/`false` text
#[derive(Debug, Clone)]
pub struct BooleanColumn {
    pub(crate) data: Arc<[bool]>,
    pub(crate) null_mask: Option<BitMask>,
}

impl BooleanColumn {
    pub fn new(data: Vec<bool>) -> Self {
        Self {
            data: data.into(),
            null_mask: None,
        }
    }

    pub fn with_nulls(data: Vec<bool>, nulls: Vec<bool>) -> Self {
        Self {
            data: data.into(),
            null_mask: BitMask::from_nulls(&nulls),
        }
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if self.is_null(index) {
            return None;
        }
        self.data.get(index).copied()
    }
}

impl ColumnTrait for BooleanColumn {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn column_type(&self) -> ColumnType {
        ColumnType::Boolean
    }

    fn is_null(&self, index: usize) -> bool {
        index >= self.data.len() || self.null_mask.as_ref().map_or(false, |m| m.is_set(index))
    }

    fn display_value(&self, index: usize) -> Option<String> {
        self.get(index)
            .map(|v| if v { "True".to_string() } else { "False".to_string() })
    }
}
