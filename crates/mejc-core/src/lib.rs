//! # mejc-core — Foundational Types for the Governance Panel
//!
//! This crate is the leaf of the workspace. It defines the domain records
//! that every aggregator consumes, and the single path through which those
//! records enter the process: a structured resource (JSON or YAML) that is
//! parsed, validated, and then treated as immutable.
//!
//! ## Key Design Principles
//!
//! 1. **Closed categorical sets are enums.** `Dimension`, `ComplianceStatus`,
//!    `Priority`, and `Pillar` are exhaustive enums whose serde names are the
//!    labels used in the source data. No bare strings for categories.
//!
//! 2. **Data is a resource, not code.** The shipped MEJC datasets live in
//!    `data/*.json` and are embedded as defaults. Any other file with the
//!    same shape can be injected at startup.
//!
//! 3. **Malformed data aborts loading.** Unknown or missing fields,
//!    duplicate question codes and non-finite numbers are rejected by
//!    [`Validate`] before any aggregator sees the dataset.
//!
//! 4. **Memoization is explicit.** [`DatasetCache`] is an owned value keyed
//!    by path and invalidated by content digest. There is no global state.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `mejc-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod cache;
pub mod compliance;
pub mod dataset;
pub mod digest;
pub mod error;
pub mod esg;
pub mod timeseries;

pub use cache::{CacheStats, DatasetCache};
pub use compliance::{
    ComplianceRecord, ComplianceStatus, Dimension, Priority, QuestionId, DIMENSION_COUNT,
};
pub use dataset::{
    load_validated, parse_validated, ComplianceDataset, DataFormat, EsgDataset, StudyDataset,
    Validate,
};
pub use digest::{sha256_digest, ContentDigest};
pub use error::PanelError;
pub use esg::{Direction, EsgIndicator, MonthlyScores, Pillar, PILLAR_COUNT};
pub use timeseries::{CitedCorrelation, TimeSeriesMetric, TimeSeriesRow};
