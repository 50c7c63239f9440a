//! Test utilities for temporary CSV files
//!
//! Files live in a `tempfile::TempDir` and are removed when the guard is dropped.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// The `id`/`color` table used by the end-to-end scenarios
pub const SAMPLE_CSV: &str = "id,color\n1,a\n2,b\n3,a\n";

/// RAII wrapper for a CSV file inside its own temporary directory
pub struct TempCsv {
    _dir: TempDir,
    path: PathBuf,
}

impl TempCsv {
    /// Get the path to the temporary file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Write `contents` (raw bytes allowed) to `<tmp>/<name>`
pub fn write_csv(name: &str, contents: impl AsRef<[u8]>) -> TempCsv {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write test CSV");
    TempCsv { _dir: dir, path }
}

/// Helper to create a test CSV file with given data
pub fn create_test_csv(headers: &[&str], rows: &[Vec<&str>]) -> TempCsv {
    let mut contents = headers.join(",");
    contents.push('\n');
    for row in rows {
        contents.push_str(&row.join(","));
        contents.push('\n');
    }
    write_csv("data.csv", contents)
}

pub fn sample_csv() -> TempCsv {
    write_csv("sample.csv", SAMPLE_CSV)
}

/// Numeric, categorical, boolean and date columns with a few missing cells
pub fn mixed_csv() -> TempCsv {
    create_test_csv(
        &["name", "age", "height", "member", "joined"],
        &[
            vec!["Alice", "30", "1.62", "true", "2021-01-04"],
            vec!["Bob", "", "1.80", "false", "2021-03-15"],
            vec!["Carol", "41", "1.75", "true", "2022-07-01"],
            vec!["Dave", "25", "NA", "true", "2023-11-30"],
        ],
    )
}
