use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Missing required column(s): {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Row {row}: cannot parse column '{column}' from {value:?}: {reason}")]
    Parse {
        row: usize,
        column: &'static str,
        value: String,
        reason: String,
    },

    #[error("Row {row}: invalid value {value:?} in column '{column}': {reason}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
        reason: String,
    },

    #[error("Failed to open dataset '{path}': {source}", path = .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl DatasetError {
    /// The 1-based data row (header excluded) a row-level error refers to.
    pub fn row(&self) -> Option<usize> {
        match self {
            DatasetError::Parse { row, .. } | DatasetError::InvalidValue { row, .. } => Some(*row),
            _ => None,
        }
    }
}
