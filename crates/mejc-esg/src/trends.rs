//! # Study Trends
//!
//! Summaries of the 2014–2023 study table: first and last value of each
//! metric with the percent change between them, the study's published
//! pillar scores run through the same composite as computed scores, and
//! the cited correlations passed through unchanged.

use serde::Serialize;

use mejc_core::{CitedCorrelation, StudyDataset, TimeSeriesMetric};

use crate::score::{classified_pillars, composite, ClassifiedScore, PillarScore};

/// First-to-last movement of one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricTrend {
    pub metric: TimeSeriesMetric,
    pub first_year: u16,
    pub first: f64,
    pub last_year: u16,
    pub last: f64,
    /// `(last - first) / first × 100`; `None` when `first` is 0.
    pub percent_change: Option<f64>,
}

/// Percent change from `first` to `last`, undefined from zero.
pub fn percent_change(first: f64, last: f64) -> Option<f64> {
    (first != 0.0).then(|| (last - first) / first * 100.0)
}

/// Trend for `metric`, or `None` when the study has no values for it.
pub fn metric_trend(study: &StudyDataset, metric: TimeSeriesMetric) -> Option<MetricTrend> {
    let series = study.series(metric);
    let (first_year, first) = *series.first()?;
    let (last_year, last) = *series.last()?;
    Some(MetricTrend {
        metric,
        first_year,
        first,
        last_year,
        last,
        percent_change: percent_change(first, last),
    })
}

/// Trends for every metric present in the study.
pub fn all_trends(study: &StudyDataset) -> Vec<MetricTrend> {
    TimeSeriesMetric::all()
        .iter()
        .filter_map(|m| metric_trend(study, *m))
        .collect()
}

/// Study-level summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyView {
    pub institution: String,
    pub trends: Vec<MetricTrend>,
    pub reported_pillars: Vec<PillarScore>,
    pub reported_composite: Option<ClassifiedScore>,
    pub correlations: Vec<CitedCorrelation>,
}

/// Summarize `study`.
pub fn compute_study_view(study: &StudyDataset) -> StudyView {
    let reported = study.reported_scores();
    StudyView {
        institution: study.institution().to_string(),
        trends: all_trends(study),
        reported_pillars: classified_pillars(reported),
        reported_composite: composite(reported).map(ClassifiedScore::new),
        correlations: study.cited_correlations().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::Classification;

    #[test]
    fn employees_trend() {
        let study = StudyDataset::embedded().unwrap();
        let t = metric_trend(&study, TimeSeriesMetric::Employees).unwrap();
        assert_eq!((t.first_year, t.last_year), (2014, 2023));
        assert_eq!((t.first, t.last), (307.0, 785.0));
        assert!((t.percent_change.unwrap() - (785.0 - 307.0) / 307.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn water_consumption_fell() {
        let study = StudyDataset::embedded().unwrap();
        let t = metric_trend(&study, TimeSeriesMetric::WaterConsumptionM3).unwrap();
        assert!((t.percent_change.unwrap() - (-30.0)).abs() < 1e-9);
    }

    #[test]
    fn incidents_to_zero_is_minus_hundred() {
        let study = StudyDataset::embedded().unwrap();
        let t = metric_trend(&study, TimeSeriesMetric::ComplianceIncidents).unwrap();
        assert_eq!(t.last, 0.0);
        assert_eq!(t.percent_change, Some(-100.0));
    }

    #[test]
    fn change_from_zero_is_undefined() {
        assert_eq!(percent_change(0.0, 5.0), None);
        assert_eq!(percent_change(4.0, 5.0), Some(25.0));
    }

    #[test]
    fn every_metric_has_a_trend_in_embedded_study() {
        let study = StudyDataset::embedded().unwrap();
        assert_eq!(all_trends(&study).len(), TimeSeriesMetric::all().len());
    }

    #[test]
    fn reported_scores_composite() {
        let study = StudyDataset::embedded().unwrap();
        let view = compute_study_view(&study);
        let c = view.reported_composite.unwrap();
        assert!((c.score - 49.3).abs() < 1e-9);
        assert_eq!(c.classification, Classification::Attention);
        assert_eq!(view.reported_pillars.len(), 3);
        assert_eq!(view.correlations.len(), 5);
        assert_eq!(view.correlations[0].coefficient, -0.98);
    }
}
