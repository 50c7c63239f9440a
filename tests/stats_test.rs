mod common;

use common::{mixed_csv, SAMPLE_CSV};
use pandrs_eda::config::CsvOptions;
use pandrs_eda::io::{read_csv, read_csv_bytes};
use pandrs_eda::stats::{self, ColumnStats};
use pandrs_eda::{DataFrame, Error};

fn load(csv: &str) -> DataFrame {
    read_csv_bytes(csv.as_bytes(), &CsvOptions::default()).unwrap()
}

#[test]
fn test_shape_matches_source() {
    assert_eq!(stats::shape(&load(SAMPLE_CSV)), (3, 2));
    assert_eq!(stats::shape(&load("a\n1\n2\n3\n4\n5\n")), (5, 1));
}

#[test]
fn test_summary_sample_dataset() {
    let report = stats::summarize(&load(SAMPLE_CSV));

    let color = report.get("color").unwrap().categorical().unwrap();
    assert_eq!(color.count, 3);
    assert_eq!(color.unique, 2);
    assert_eq!(color.top.as_deref(), Some("a"));
    assert_eq!(color.freq, Some(2));

    let id = report.get("id").unwrap().numeric().unwrap();
    assert_eq!(id.count, 3);
    assert_eq!(id.mean, Some(2.0));
    assert_eq!(id.std, Some(1.0));
    assert_eq!(id.min, Some(1.0));
    assert_eq!(id.median, Some(2.0));
    assert_eq!(id.max, Some(3.0));
}

#[test]
fn test_summary_mixed_fields() {
    let report = stats::summarize(&load(SAMPLE_CSV));

    let color = report.get("color").unwrap();
    assert_eq!(color.field("mean"), None);
    assert_eq!(color.field("top").as_deref(), Some("a"));

    let id = report.get("id").unwrap();
    assert_eq!(id.field("top"), None);
    assert_eq!(id.field("mean").as_deref(), Some("2.000000"));

    // Not-applicable cells print as NaN, never as zero
    let text = report.to_string();
    let mean_row = text.lines().find(|l| l.starts_with("mean")).unwrap();
    assert!(mean_row.contains("NaN"));
    assert!(mean_row.contains("2.000000"));
}

#[test]
fn test_summary_dates_report_range() {
    let file = mixed_csv();
    let report = stats::summarize(&read_csv(file.path(), &CsvOptions::default()).unwrap());

    let joined = report.get("joined").unwrap().categorical().unwrap();
    assert_eq!(joined.first.as_deref(), Some("2021-01-04 00:00:00"));
    assert_eq!(joined.last.as_deref(), Some("2023-11-30 00:00:00"));
    assert!(report.fields().contains(&"first"));

    let member = report.get("member").unwrap();
    assert!(matches!(member.stats, ColumnStats::Categorical(_)));
    assert_eq!(member.categorical().unwrap().top.as_deref(), Some("True"));
}

#[test]
fn test_missing_counts() {
    let df = load("name,age\nAnn,30\nBen,\nCid,41\n");
    let missing = stats::missing_counts(&df);
    assert_eq!(missing.get("age"), Some(1));
    assert_eq!(missing.get("name"), Some(0));
    assert_eq!(missing.total(), 1);
}

#[test]
fn test_correlation_matrix_properties() {
    let df = load("x,y,z,label\n1,2,9,a\n2,4,7,b\n3,6,8,c\n4,8,1,d\n");
    let matrix = stats::correlation_matrix(&df).unwrap();

    assert_eq!(matrix.columns, vec!["x", "y", "z"]);
    assert!(matrix.is_symmetric());
    for name in &matrix.columns {
        assert_eq!(matrix.get(name, name), Some(1.0));
    }
    assert!((matrix.get("x", "y").unwrap() - 1.0).abs() < 1e-12);
    assert!(matrix.get("x", "z").unwrap() < 0.0);
    for row in &matrix.values {
        for v in row.iter().flatten() {
            assert!((-1.0..=1.0).contains(v));
        }
    }
}

#[test]
fn test_correlation_absent_with_one_numeric_column() {
    assert!(stats::correlation_matrix(&load(SAMPLE_CSV)).is_none());
}

#[test]
fn test_correlation_constant_column_is_undefined() {
    let df = load("a,b\n1,5\n2,5\n3,5\n");
    let matrix = stats::correlation_matrix(&df).unwrap();
    assert_eq!(matrix.get("a", "b"), None);
    assert_eq!(matrix.get("b", "b"), Some(1.0));
}

#[test]
fn test_correlation_uses_complete_pairs() {
    let df = load("a,b\n1,2\n2,\n3,6\n,8\n");
    let matrix = stats::correlation_matrix(&df).unwrap();
    assert!((matrix.get("a", "b").unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn test_value_counts() {
    let df = load(SAMPLE_CSV);
    let counts = stats::value_counts(&df, "color").unwrap();
    assert_eq!(counts.get("a"), Some(2));
    assert_eq!(counts.get("b"), Some(1));
    assert_eq!(counts.labels(), vec!["a", "b"]);

    assert!(matches!(
        stats::value_counts(&df, "shade"),
        Err(Error::UnknownColumn(_))
    ));
}

#[test]
fn test_pipeline_is_idempotent() {
    let df = load("x,y,c\n1.5,2,a\n2.5,1,b\n9,3,a\n,4,c\n");
    assert_eq!(stats::summarize(&df), stats::summarize(&df));
    assert_eq!(stats::correlation_matrix(&df), stats::correlation_matrix(&df));

    let again = load("x,y,c\n1.5,2,a\n2.5,1,b\n9,3,a\n,4,c\n");
    assert_eq!(stats::summarize(&df), stats::summarize(&again));
}

#[test]
fn test_correlation_small_scale_values() {
    let small = load("a,b\n1e-9,3e-9\n2e-9,1e-9\n3e-9,2e-9\n4e-9,5e-9\n");
    let scaled = load("a,b\n1,3\n2,1\n3,2\n4,5\n");

    let r_small = stats::correlation_matrix(&small).unwrap().get("a", "b").unwrap();
    let r_scaled = stats::correlation_matrix(&scaled).unwrap().get("a", "b").unwrap();
    assert!((r_small - 0.5291502622129182).abs() < 1e-9);
    assert!((r_small - r_scaled).abs() < 1e-9);
}

#[test]
fn test_correlation_infinite_values_are_undefined() {
    let df = load("a,b\n1,2\ninf,3\n3,5\n");
    let matrix = stats::correlation_matrix(&df).unwrap();

    assert_eq!(matrix.get("a", "b"), None);
    assert_eq!(matrix.get("b", "a"), None);
    assert!(matrix.is_symmetric());
    for row in &matrix.values {
        for v in row.iter().flatten() {
            assert!((-1.0..=1.0).contains(v));
        }
    }
}
