//! Export error type.

use thiserror::Error;

use mejc_core::PanelError;

/// Failure writing or re-reading an exported file.
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV encoding or decoding failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook generation failed.
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Writing the output file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Re-read records failed dataset validation.
    #[error(transparent)]
    Dataset(#[from] PanelError),
}
