mod boolean_column;
pub mod classify;
mod common;
mod datetime_column;
mod float64_column;
mod int64_column;
mod string_column;

pub use boolean_column::BooleanColumn;
pub use classify::{classify, ColumnKind};
pub use common::{BitMask, Column, ColumnTrait, ColumnType};
pub use datetime_column::DateTimeColumn;
pub use float64_column::Float64Column;
pub use int64_column::Int64Column;
pub use string_column::StringColumn;

