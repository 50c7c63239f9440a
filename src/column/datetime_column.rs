use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::column::common::{BitMask, ColumnTrait, ColumnType};

/// Column of date-like values.
///
/// The parsed timestamps are kept alongside the source text so that reports
/// show values exactly as they appeared in the upload.
#[derive(Debug, Clone)]
pub struct DateTimeColumn {
    pub(crate) data: Arc<[NaiveDateTime]>,
    pub(crate) raw: Arc<[String]>,
    pub(crate) null_mask: Option<BitMask>,
}

impl DateTimeColumn {
    /// `data`, `raw` and `nulls` must have equal length
    pub fn with_nulls(data: Vec<NaiveDateTime>, raw: Vec<String>, nulls: Vec<bool>) -> Self {
        Self {
            data: data.into(),
            raw: raw.into(),
            null_mask: BitMask::from_nulls(&nulls),
        }
    }

    pub fn get(&self, index: usize) -> Option<NaiveDateTime> {
        if self.is_null(index) {
            return None;
        }
        self.data.get(index).copied()
    }

    /// Earliest and latest present timestamps
    pub fn range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let mut present = (0..self.len()).filter_map(|i| self.get(i));
        let first = present.next()?;
        Some(present.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

impl ColumnTrait for DateTimeColumn {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn column_type(&self) -> ColumnType {
        ColumnType::DateTime
    }

    fn is_null(&self, index: usize) -> bool {
        index >= self.data.len() || self.null_mask.as_ref().map_or(false, |m| m.is_set(index))
    }

    fn display_value(&self, index: usize) -> Option<String> {
        if self.is_null(index) {
            return None;
        }
        self.raw.get(index).cloned()
    }
}
