//! # Compliance View
//!
//! [`compute_view`] is the single entry point a presentation layer calls:
//! dataset plus filter in, every number the compliance report shows out.
//! It is pure, so re-running it after a filter change is the whole
//! refresh cycle.

use serde::{Deserialize, Serialize};

use mejc_core::{ComplianceDataset, ComplianceRecord};

use crate::filter::FilterState;
use crate::metrics::{
    by_dimension, high_priority_gaps, non_conformities_by_priority, status_distribution,
    ComplianceMetrics, DimensionMetrics, PriorityCount, StatusCount,
};

/// Conformity rate of the EBSERH hospital network, in percent.
pub const EBSERH_BENCHMARK: f64 = 95.65;

/// Number of high-priority gaps listed in the report.
pub const HIGH_PRIORITY_GAP_LIMIT: usize = 5;

/// Rate comparison against a reference network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    /// Reference rate.
    pub benchmark: f64,
    /// Filtered rate.
    pub rate: f64,
    /// `rate - benchmark`; negative when below the reference.
    pub delta: f64,
}

impl BenchmarkComparison {
    pub fn new(rate: f64, benchmark: f64) -> Self {
        Self {
            benchmark,
            rate,
            delta: rate - benchmark,
        }
    }
}

/// Everything the compliance report needs for one filter state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceView {
    pub filter: FilterState,
    pub metrics: ComplianceMetrics,
    pub dimensions: Vec<DimensionMetrics>,
    pub status_distribution: Vec<StatusCount>,
    pub non_conformities_by_priority: Vec<PriorityCount>,
    pub high_priority_gaps: Vec<ComplianceRecord>,
    pub benchmark: BenchmarkComparison,
    /// Filtered records in dataset order.
    pub records: Vec<ComplianceRecord>,
}

/// Compute the compliance report for `filter` over `dataset`.
pub fn compute_view(
    dataset: &ComplianceDataset,
    filter: &FilterState,
    benchmark: f64,
) -> ComplianceView {
    let rows = filter.apply(dataset.records());
    if rows.is_empty() && !dataset.is_empty() {
        tracing::warn!("filter selects no compliance records");
    }

    let metrics = ComplianceMetrics::from_records(rows.iter().copied());
    tracing::debug!(
        total = metrics.total,
        conforming = metrics.conforming,
        rate = metrics.rate,
        "computed compliance view"
    );

    ComplianceView {
        filter: filter.clone(),
        metrics,
        dimensions: by_dimension(&rows),
        status_distribution: status_distribution(&rows),
        non_conformities_by_priority: non_conformities_by_priority(&rows),
        high_priority_gaps: high_priority_gaps(&rows, HIGH_PRIORITY_GAP_LIMIT)
            .into_iter()
            .cloned()
            .collect(),
        benchmark: BenchmarkComparison::new(metrics.rate, benchmark),
        records: rows.into_iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mejc_core::{ComplianceStatus, Dimension, Priority};

    #[test]
    fn full_view_of_embedded_dataset() {
        let ds = ComplianceDataset::embedded().unwrap();
        let view = compute_view(&ds, &FilterState::all(), EBSERH_BENCHMARK);
        assert_eq!(view.metrics.total, 63);
        assert_eq!(view.records.len(), 63);
        assert_eq!(view.dimensions.len(), 5);
        assert_eq!(view.high_priority_gaps.len(), 5);
        assert!((view.benchmark.delta - (25.0 / 63.0 * 100.0 - 95.65)).abs() < 1e-9);
        assert!(view.benchmark.delta < 0.0);
    }

    #[test]
    fn empty_filter_gives_zero_view() {
        let ds = ComplianceDataset::embedded().unwrap();
        let view = compute_view(&ds, &FilterState::none(), EBSERH_BENCHMARK);
        assert_eq!(view.metrics.total, 0);
        assert_eq!(view.metrics.rate, 0.0);
        assert!(view.dimensions.is_empty());
        assert!(view.high_priority_gaps.is_empty());
        assert_eq!(view.benchmark.delta, -EBSERH_BENCHMARK);
        assert!(view.non_conformities_by_priority.iter().all(|c| c.count == 0));
    }

    #[test]
    fn sustainability_only() {
        let ds = ComplianceDataset::embedded().unwrap();
        let filter = FilterState::all().with_dimensions([Dimension::Sustainability]);
        let view = compute_view(&ds, &filter, EBSERH_BENCHMARK);
        assert_eq!(view.metrics.total, 3);
        assert_eq!(view.metrics.conforming, 0);
        assert_eq!(view.dimensions.len(), 1);
    }

    #[test]
    fn conforming_only_has_no_gaps() {
        let ds = ComplianceDataset::embedded().unwrap();
        let filter = FilterState::all()
            .with_statuses([ComplianceStatus::Conforming])
            .with_priorities([Priority::High, Priority::Medium]);
        let view = compute_view(&ds, &filter, EBSERH_BENCHMARK);
        assert!(view.high_priority_gaps.is_empty());
        assert_eq!(view.metrics.rate, 100.0);
    }

    #[test]
    fn custom_benchmark() {
        let ds = ComplianceDataset::embedded().unwrap();
        let view = compute_view(&ds, &FilterState::all(), 50.0);
        assert_eq!(view.benchmark.benchmark, 50.0);
    }

    #[test]
    fn view_serializes_to_json() {
        let ds = ComplianceDataset::embedded().unwrap();
        let view = compute_view(&ds, &FilterState::all(), EBSERH_BENCHMARK);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["metrics"]["total"], 63);
        assert_eq!(json["dimensions"][0]["dimension"], "Conselhos e Diretoria");
    }
}
