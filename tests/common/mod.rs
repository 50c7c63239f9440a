//! Common test utilities module
//!
//! Provides shared utilities for tests including:
//! - Temporary CSV files with automatic cleanup
//! - Small sample datasets

#![allow(dead_code)]

pub mod test_utils;

pub use test_utils::{
    create_test_csv, mixed_csv, sample_csv, write_csv, TempCsv, SAMPLE_CSV,
};
