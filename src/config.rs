//! Analysis configuration.
//!
//! Every field has a default, so an empty TOML or YAML document yields
//! [`EdaConfig::default`]. Only the fields being changed need to be written:
//!
//! ```toml
//! preview_rows = 10
//!
//! [charts]
//! histogram_bins = 30
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Cell texts treated as missing, matching the usual dataframe reader defaults
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// CSV reading options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    /// Field delimiter byte
    pub delimiter: u8,
    /// Whether the first record holds column names
    pub has_header: bool,
    /// Trim surrounding whitespace from every field
    pub trim: bool,
    /// Cell texts read as missing
    pub na_values: Vec<String>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            trim: true,
            na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CsvOptions {
    pub(crate) fn is_na(&self, cell: &str) -> bool {
        self.na_values.iter().any(|na| na == cell)
    }
}

/// Chart construction options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    /// Number of equal-width histogram bins
    pub histogram_bins: usize,
    /// Number of points sampled along the density curve
    pub density_points: usize,
    /// Rotation in degrees applied to bar chart category labels
    pub label_rotation: f64,
    /// Text chart width in characters
    pub width: usize,
    /// Text chart height in characters
    pub height: usize,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            histogram_bins: 20,
            density_points: 100,
            label_rotation: 45.0,
            width: 60,
            height: 15,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdaConfig {
    /// Rows shown in the dataset preview
    pub preview_rows: usize,
    pub csv: CsvOptions,
    pub charts: ChartOptions,
}

impl Default for EdaConfig {
    fn default() -> Self {
        Self {
            preview_rows: 5,
            csv: CsvOptions::default(),
            charts: ChartOptions::default(),
        }
    }
}

impl EdaConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()
    }

    /// Load from a `.toml`, `.yaml` or `.yml` file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&text),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            _ => Err(Error::Config(format!(
                "unsupported configuration file: {}",
                path.display()
            ))),
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }

    fn validate(self) -> Result<Self> {
        if self.charts.histogram_bins == 0 {
            return Err(Error::Config("charts.histogram_bins must be at least 1".into()));
        }
        if self.charts.density_points < 2 {
            return Err(Error::Config("charts.density_points must be at least 2".into()));
        }
        if self.charts.width < 10 || self.charts.height < 2 {
            return Err(Error::Config("charts.width/height are too small".into()));
        }
        Ok(self)
    }
}
