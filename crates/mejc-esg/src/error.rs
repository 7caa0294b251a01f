//! Export error type.

use thiserror::Error;

/// Failure writing the indicator export.
#[derive(Error, Debug)]
pub enum EsgExportError {
    /// CSV encoding failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Writing the output file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
