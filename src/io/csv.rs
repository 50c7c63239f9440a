use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use log::debug;

use crate::column::{
    BooleanColumn, Column, DateTimeColumn, Float64Column, Int64Column, StringColumn,
};
use crate::config::CsvOptions;
use crate::dataframe::DataFrame;
use crate::error::{Error, Result};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Read a CSV file into a DataFrame.
///
/// Only files with a `.csv` extension are accepted.
pub fn read_csv<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<DataFrame> {
    let path = path.as_ref();
    check_extension(&path.to_string_lossy())?;
    let bytes = fs::read(path)?;
    read_csv_bytes(&bytes, options)
}

/// Reject file names that do not end in `.csv` (case-insensitive)
pub fn check_extension(file_name: &str) -> Result<()> {
    let is_csv = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        Ok(())
    } else {
        Err(Error::Parse(format!("'{}' is not a .csv file", file_name)))
    }
}

/// Parse uploaded CSV bytes into a DataFrame, inferring a type per column
pub fn read_csv_bytes(bytes: &[u8], options: &CsvOptions) -> Result<DataFrame> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_header)
        .flexible(true)
        .trim(if options.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_reader(bytes);

    let mut records: Vec<StringRecord> = Vec::new();
    for result in rdr.records() {
        records.push(result?);
    }

    let headers: Vec<String> = if options.has_header {
        rdr.headers()?.iter().map(|h| h.to_string()).collect()
    } else {
        // Without a header row, names are generated from the widest record
        let width = records.iter().map(|r| r.len()).max().unwrap_or(0);
        (0..width).map(|i| format!("column_{}", i)).collect()
    };

    if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty() && records.is_empty()) {
        return Err(Error::EmptyInput("no columns to parse from file".into()));
    }
    if records.is_empty() {
        return Err(Error::EmptyInput("file has a header but no data rows".into()));
    }

    // Collect cells per column; short rows are padded with missing cells
    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::with_capacity(records.len()); headers.len()];
    for record in &records {
        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(Error::Parse(format!(
                "line {}: expected {} fields, saw {}",
                line,
                headers.len(),
                record.len()
            )));
        }
        for (i, column) in cells.iter_mut().enumerate() {
            let cell = record.get(i).filter(|c| !options.is_na(c)).map(|c| c.to_string());
            column.push(cell);
        }
    }

    let names = dedupe_headers(headers);
    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, values)| {
            let column = infer_column(values);
            debug!("column '{}' inferred as {}", name, column.column_type().dtype_name());
            (name, column)
        })
        .collect();

    let df = DataFrame::from_columns(columns)?;
    let (rows, cols) = df.shape();
    debug!("parsed CSV with {} rows and {} columns", rows, cols);
    Ok(df)
}

/// Blank header names become `Unnamed: <i>`; repeats get a `.1`, `.2`, ... suffix
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    headers
        .into_iter()
        .enumerate()
        .map(|(i, header)| {
            let base = if header.is_empty() {
                format!("Unnamed: {}", i)
            } else {
                header
            };
            let mut name = base.clone();
            let mut suffix = 1;
            while !seen.insert(name.clone()) {
                name = format!("{}.{}", base, suffix);
                suffix += 1;
            }
            name
        })
        .collect()
}

/// Pick the narrowest type every present cell parses as
pub(crate) fn infer_column(values: Vec<Option<String>>) -> Column {
    let nulls: Vec<bool> = values.iter().map(|v| v.is_none()).collect();
    let present: Vec<&str> = values.iter().flatten().map(|s| s.as_str()).collect();

    // A column with no values is numeric, as an all-NaN float column
    if present.is_empty() {
        return Float64Column::with_nulls(vec![f64::NAN; values.len()], nulls).into();
    }

    if present.iter().all(|s| s.parse::<i64>().is_ok()) {
        let data = values
            .iter()
            .map(|v| v.as_deref().and_then(|s| s.parse::<i64>().ok()).unwrap_or(0))
            .collect();
        return Int64Column::with_nulls(data, nulls).into();
    }

    if present.iter().all(|s| s.parse::<f64>().is_ok()) {
        let data = values
            .iter()
            .map(|v| v.as_deref().and_then(|s| s.parse::<f64>().ok()).unwrap_or(f64::NAN))
            .collect();
        return Float64Column::with_nulls(data, nulls).into();
    }

    if present.iter().all(|s| parse_bool(s).is_some()) {
        let data = values
            .iter()
            .map(|v| v.as_deref().and_then(parse_bool).unwrap_or(false))
            .collect();
        return BooleanColumn::with_nulls(data, nulls).into();
    }

    if present.iter().all(|s| parse_datetime(s).is_some()) {
        let data = values
            .iter()
            .map(|v| {
                v.as_deref()
                    .and_then(parse_datetime)
                    .unwrap_or_default()
            })
            .collect();
        let raw = values.iter().map(|v| v.clone().unwrap_or_default()).collect();
        return DateTimeColumn::with_nulls(data, raw, nulls).into();
    }

    let data = values.into_iter().map(|v| v.unwrap_or_default()).collect();
    StringColumn::with_nulls(data, nulls).into()
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
