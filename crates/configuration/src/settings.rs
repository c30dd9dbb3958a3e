use chrono::NaiveDate;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional in the file; missing keys fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dataset: DatasetSettings,
    pub dashboard: DashboardSettings,
    pub logging: LoggingSettings,
}

/// Where the session's sales data is read from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatasetSettings {
    /// Path to the delimited sales file.
    pub path: PathBuf,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("supermarket_sales.csv"),
        }
    }
}

/// Parameters for the dashboard widgets.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// How many of the most recent records the quick insights sum.
    pub insights_window: usize,
    /// Rows shown in the data preview.
    pub preview_rows: usize,
    /// Start of the initial date range. Defaults to the first sale in the dataset.
    pub default_start: Option<NaiveDate>,
    /// End of the initial date range. Defaults to the last sale in the dataset.
    pub default_end: Option<NaiveDate>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            insights_window: 30,
            preview_rows: 5,
            default_start: None,
            default_end: None,
        }
    }
}

/// Log output settings. `RUST_LOG` takes precedence over `level` when set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
