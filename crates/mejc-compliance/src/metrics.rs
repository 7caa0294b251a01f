//! # Conformity Metrics
//!
//! Counting over an already-filtered record slice. Every function here is
//! total: an empty input yields zero counts and a 0 % rate.

use serde::{Deserialize, Serialize};

use mejc_core::{ComplianceRecord, ComplianceStatus, Dimension, Priority};

/// Total, conforming and non-conforming counts with the conformity rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplianceMetrics {
    pub total: usize,
    pub conforming: usize,
    pub non_conforming: usize,
    /// `conforming / total × 100`, or 0 when `total` is 0.
    pub rate: f64,
}

impl ComplianceMetrics {
    /// Count `records`.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ComplianceRecord>,
    {
        let mut total = 0;
        let mut conforming = 0;
        for r in records {
            total += 1;
            if r.is_conforming() {
                conforming += 1;
            }
        }
        Self::from_counts(conforming, total - conforming)
    }

    /// Build from raw counts.
    pub fn from_counts(conforming: usize, non_conforming: usize) -> Self {
        let total = conforming + non_conforming;
        let rate = if total == 0 {
            0.0
        } else {
            conforming as f64 / total as f64 * 100.0
        };
        Self {
            total,
            conforming,
            non_conforming,
            rate,
        }
    }
}

/// Metrics for one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionMetrics {
    pub dimension: Dimension,
    #[serde(flatten)]
    pub metrics: ComplianceMetrics,
}

/// Per-dimension metrics for every dimension present in `records`, in
/// [`Dimension::all`] order.
///
/// The conforming / non-conforming pair doubles as the stacked-bar series.
pub fn by_dimension(records: &[&ComplianceRecord]) -> Vec<DimensionMetrics> {
    Dimension::all()
        .iter()
        .filter_map(|dim| {
            let mut rows = records.iter().filter(|r| r.dimension == *dim).peekable();
            rows.peek()?;
            Some(DimensionMetrics {
                dimension: *dim,
                metrics: ComplianceMetrics::from_records(rows.copied()),
            })
        })
        .collect()
}

/// Count of records with a given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: ComplianceStatus,
    pub count: usize,
}

/// Records per status, both statuses always present.
pub fn status_distribution(records: &[&ComplianceRecord]) -> Vec<StatusCount> {
    ComplianceStatus::all()
        .iter()
        .map(|status| StatusCount {
            status: *status,
            count: records.iter().filter(|r| r.status == *status).count(),
        })
        .collect()
}

/// Non-conformities at a given priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCount {
    pub priority: Priority,
    pub count: usize,
}

/// Non-conforming records per priority, Alta first, zeros included.
pub fn non_conformities_by_priority(records: &[&ComplianceRecord]) -> Vec<PriorityCount> {
    Priority::all()
        .iter()
        .map(|priority| PriorityCount {
            priority: *priority,
            count: records
                .iter()
                .filter(|r| !r.is_conforming() && r.priority == *priority)
                .count(),
        })
        .collect()
}

/// First `limit` non-conforming high-priority records, in input order.
pub fn high_priority_gaps<'a>(
    records: &[&'a ComplianceRecord],
    limit: usize,
) -> Vec<&'a ComplianceRecord> {
    records
        .iter()
        .copied()
        .filter(|r| !r.is_conforming() && r.priority == Priority::High)
        .take(limit)
        .collect()
}
