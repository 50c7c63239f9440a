// DataFrame implementation module
pub mod base;
pub mod display;

pub use base::{DataFrame, Preview};
pub use display::TextTable;
