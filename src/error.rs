//! Pipeline error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while preparing the dataset
#[derive(Error, Debug)]
pub enum PrepError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("column not found: {0}")]
    MissingColumn(String),

    #[error("malformed row index: {0}")]
    BadIndex(String),

    #[error("artifact missing after write: {}", .0.display())]
    WriteNotVerified(PathBuf),

    #[error("test fraction must be in (0, 1), got {0}")]
    InvalidTestFraction(f64),

    #[error("label '{label}' has only {count} row(s), cannot stratify")]
    StratumTooSmall { label: String, count: usize },

    #[error("predictor table has {x_rows} rows but target table has {y_rows}")]
    Misaligned { x_rows: usize, y_rows: usize },
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PrepError>;
