//! # Error Types
//!
//! Structured error hierarchy for dataset loading and validation. All
//! errors use `thiserror` for derive-based `Display` and `Error`.
//!
//! Validation errors name the offending record and field so that a bad
//! resource file can be fixed without reading the loader.

use thiserror::Error;

/// Top-level error type for the governance panel core.
#[derive(Error, Debug)]
pub enum PanelError {
    /// A dataset parsed but violates a structural invariant.
    #[error("dataset validation error: {0}")]
    DatasetValidation(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The resource extension does not map to a supported format.
    #[error("unsupported data format: {0}")]
    UnsupportedFormat(String),

    /// A categorical label did not match any known variant.
    #[error("unknown {kind}: {value:?}")]
    UnknownLabel {
        /// Which category was being parsed (e.g. "dimension").
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for PanelError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for PanelError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
