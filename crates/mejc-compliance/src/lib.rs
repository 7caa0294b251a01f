//! # mejc-compliance — IG-SEST Conformity Aggregation
//!
//! Turns the validated question set from `mejc-core` into the numbers a
//! governance report shows: conformity rate overall and per dimension,
//! status split, non-conformities by priority, the first high-priority
//! gaps, and the distance to the EBSERH network benchmark.
//!
//! ## Design
//!
//! - [`FilterState`] is a conjunction of three set-membership predicates.
//!   An empty selection is a valid filter that matches nothing.
//! - Aggregation never fails. Zero records give a 0 % rate.
//! - [`compute_view`] is pure; the caller owns the dataset and the filter.
//! - Exports go through [`export`]: display-labelled CSV (re-readable
//!   with [`read_csv`]) and a three-sheet XLSX workbook.
//!
//! ## Crate Policy
//!
//! - Depends only on `mejc-core` within the workspace.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

pub mod error;
pub mod export;
pub mod filter;
pub mod metrics;
pub mod view;

pub use error::ExportError;
pub use export::{
    build_workbook, csv_file_name, read_csv, to_csv_bytes, to_xlsx_bytes, write_csv,
    write_csv_file, write_xlsx_file, xlsx_file_name, DISPLAY_COLUMNS, SHEET_NAMES,
};
pub use filter::FilterState;
pub use metrics::{
    by_dimension, high_priority_gaps, non_conformities_by_priority, status_distribution,
    ComplianceMetrics, DimensionMetrics, PriorityCount, StatusCount,
};
pub use view::{
    compute_view, BenchmarkComparison, ComplianceView, EBSERH_BENCHMARK, HIGH_PRIORITY_GAP_LIMIT,
};
