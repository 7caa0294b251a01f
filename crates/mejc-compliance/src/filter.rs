//! # Record Filter
//!
//! A filter is three independent selection sets, one per categorical
//! field. A record passes when its dimension, status and priority are each
//! in the corresponding set. An empty set matches nothing, the way an
//! unticked multiselect hides every row.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use mejc_core::{ComplianceRecord, ComplianceStatus, Dimension, Priority};

/// Selected values for each filterable field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub dimensions: BTreeSet<Dimension>,
    pub statuses: BTreeSet<ComplianceStatus>,
    pub priorities: BTreeSet<Priority>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::all()
    }
}

impl FilterState {
    /// Every value of every field selected.
    pub fn all() -> Self {
        Self {
            dimensions: Dimension::all().iter().copied().collect(),
            statuses: ComplianceStatus::all().iter().copied().collect(),
            priorities: Priority::all().iter().copied().collect(),
        }
    }

    /// Nothing selected.
    pub fn none() -> Self {
        Self {
            dimensions: BTreeSet::new(),
            statuses: BTreeSet::new(),
            priorities: BTreeSet::new(),
        }
    }

    /// Restrict to `dimensions`, keeping the other fields.
    pub fn with_dimensions(mut self, dimensions: impl IntoIterator<Item = Dimension>) -> Self {
        self.dimensions = dimensions.into_iter().collect();
        self
    }

    /// Restrict to `statuses`, keeping the other fields.
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = ComplianceStatus>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    /// Restrict to `priorities`, keeping the other fields.
    pub fn with_priorities(mut self, priorities: impl IntoIterator<Item = Priority>) -> Self {
        self.priorities = priorities.into_iter().collect();
        self
    }

    /// Whether `record` passes all three predicates.
    pub fn matches(&self, record: &ComplianceRecord) -> bool {
        self.dimensions.contains(&record.dimension)
            && self.statuses.contains(&record.status)
            && self.priorities.contains(&record.priority)
    }

    /// Records that pass, in dataset order.
    pub fn apply<'a>(&self, records: &'a [ComplianceRecord]) -> Vec<&'a ComplianceRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    /// Whether every field has every value selected.
    pub fn is_unrestricted(&self) -> bool {
        self.dimensions.len() == Dimension::all().len()
            && self.statuses.len() == ComplianceStatus::all().len()
            && self.priorities.len() == Priority::all().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mejc_core::ComplianceDataset;

    #[test]
    fn all_selects_whole_dataset() {
        let ds = ComplianceDataset::embedded().unwrap();
        let filter = FilterState::all();
        assert!(filter.is_unrestricted());
        assert_eq!(filter.apply(ds.records()).len(), ds.len());
    }

    #[test]
    fn empty_field_selects_nothing() {
        let ds = ComplianceDataset::embedded().unwrap();
        assert!(FilterState::none().apply(ds.records()).is_empty());
        let no_priority = FilterState::all().with_priorities([]);
        assert!(no_priority.apply(ds.records()).is_empty());
    }

    #[test]
    fn predicates_are_conjunctive() {
        let ds = ComplianceDataset::embedded().unwrap();
        let filter = FilterState::all()
            .with_dimensions([Dimension::Transparency])
            .with_statuses([ComplianceStatus::NonConforming]);
        let rows = filter.apply(ds.records());
        assert_eq!(rows.len(), 7);
        assert!(rows
            .iter()
            .all(|r| r.dimension == Dimension::Transparency && !r.is_conforming()));
    }

    #[test]
    fn apply_preserves_dataset_order() {
        let ds = ComplianceDataset::embedded().unwrap();
        let rows = FilterState::all()
            .with_priorities([Priority::High])
            .apply(ds.records());
        let positions: Vec<usize> = rows
            .iter()
            .map(|r| ds.records().iter().position(|x| x.id == r.id).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
