//! # ESG View
//!
//! [`compute_view`] builds everything the scorecard shows for one filter
//! state: scored indicators, pillar and composite scores, alert lists,
//! the optional market benchmark overlay and the monthly evolution.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use mejc_core::{EsgDataset, Pillar};

use crate::performance::{score_indicators, ScoredIndicator};
use crate::score::{classified_pillars, composite, pillar_means, ClassifiedScore, PillarScore};

/// Indicators below this ratio are flagged critical.
pub const CRITICAL_THRESHOLD: f64 = 75.0;
/// Indicators at or above this ratio are highlighted.
pub const HIGHLIGHT_THRESHOLD: f64 = 100.0;

/// Pillar selection and overlay toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EsgFilter {
    pub pillars: BTreeSet<Pillar>,
    pub show_benchmark: bool,
}

impl Default for EsgFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl EsgFilter {
    /// Every pillar, benchmark shown.
    pub fn all() -> Self {
        Self {
            pillars: Pillar::all().iter().copied().collect(),
            show_benchmark: true,
        }
    }

    pub fn with_pillars(mut self, pillars: impl IntoIterator<Item = Pillar>) -> Self {
        self.pillars = pillars.into_iter().collect();
        self
    }

    pub fn with_benchmark(mut self, show: bool) -> Self {
        self.show_benchmark = show;
        self
    }
}

/// Own score against the market reference for one pillar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkPoint {
    pub pillar: Pillar,
    pub score: f64,
    pub benchmark: f64,
    pub gap: f64,
}

/// First-to-last change of a pillar's monthly score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarEvolution {
    pub pillar: Pillar,
    pub first_month: String,
    pub first: f64,
    pub last_month: String,
    pub last: f64,
    pub change: f64,
}

/// Everything the ESG scorecard needs for one filter state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EsgView {
    pub reference_period: String,
    pub filter: EsgFilter,
    pub indicators: Vec<ScoredIndicator>,
    pub pillar_scores: Vec<PillarScore>,
    /// `None` when no pillar is selected.
    pub composite: Option<ClassifiedScore>,
    /// Ratio below [`CRITICAL_THRESHOLD`].
    pub critical: Vec<ScoredIndicator>,
    /// Ratio at or above [`HIGHLIGHT_THRESHOLD`].
    pub highlights: Vec<ScoredIndicator>,
    /// Present only when the overlay is toggled on.
    pub benchmark: Option<Vec<BenchmarkPoint>>,
    pub evolution: Vec<PillarEvolution>,
}

/// Compute the scorecard for `filter` over `dataset`.
pub fn compute_view(dataset: &EsgDataset, filter: &EsgFilter) -> EsgView {
    let indicators: Vec<ScoredIndicator> = score_indicators(dataset.indicators())
        .into_iter()
        .filter(|s| filter.pillars.contains(&s.pillar()))
        .collect();
    if indicators.is_empty() {
        tracing::warn!("pillar filter selects no ESG indicators");
    }

    let means = pillar_means(&indicators);
    let composite = composite(&means).map(ClassifiedScore::new);

    let critical = indicators
        .iter()
        .filter(|s| s.performance < CRITICAL_THRESHOLD)
        .cloned()
        .collect();
    let highlights = indicators
        .iter()
        .filter(|s| s.performance >= HIGHLIGHT_THRESHOLD)
        .cloned()
        .collect();

    let benchmark = filter.show_benchmark.then(|| {
        means
            .iter()
            .filter_map(|(pillar, score)| {
                let reference = dataset.market_benchmark().get(pillar)?;
                Some(BenchmarkPoint {
                    pillar: *pillar,
                    score: *score,
                    benchmark: *reference,
                    gap: score - reference,
                })
            })
            .collect()
    });

    let evolution = match (dataset.evolution().first(), dataset.evolution().last()) {
        (Some(first), Some(last)) => filter
            .pillars
            .iter()
            .map(|pillar| PillarEvolution {
                pillar: *pillar,
                first_month: first.month.clone(),
                first: first.score(*pillar),
                last_month: last.month.clone(),
                last: last.score(*pillar),
                change: last.score(*pillar) - first.score(*pillar),
            })
            .collect(),
        _ => Vec::new(),
    };

    tracing::debug!(
        indicators = indicators.len(),
        composite = composite.map(|c| c.score),
        "computed esg view"
    );

    EsgView {
        reference_period: dataset.reference_period().to_string(),
        filter: filter.clone(),
        pillar_scores: classified_pillars(&means),
        composite,
        critical,
        highlights,
        benchmark,
        evolution,
        indicators,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::Classification;

    fn names(list: &[ScoredIndicator]) -> Vec<&str> {
        list.iter().map(|s| s.indicator.name.as_str()).collect()
    }

    #[test]
    fn full_view_of_embedded_dataset() {
        let ds = EsgDataset::embedded().unwrap();
        let view = compute_view(&ds, &EsgFilter::all());
        assert_eq!(view.indicators.len(), 24);
        assert_eq!(view.pillar_scores.len(), 3);
        let composite = view.composite.unwrap();
        assert!((composite.score - 84.89129153).abs() < 1e-6);
        assert_eq!(composite.classification, Classification::Good);
        assert_eq!(
            names(&view.critical),
            vec!["Energia Renovável", "Acidentes Trabalho", "Tempo Resposta"]
        );
        assert_eq!(
            names(&view.highlights),
            vec!["Diversidade Gênero", "Reuniões Governança"]
        );
    }

    #[test]
    fn benchmark_only_when_toggled() {
        let ds = EsgDataset::embedded().unwrap();
        let on = compute_view(&ds, &EsgFilter::all());
        let points = on.benchmark.unwrap();
        assert_eq!(points.len(), 3);
        let social = points.iter().find(|p| p.pillar == Pillar::Social).unwrap();
        assert_eq!(social.benchmark, 80.0);

        let off = compute_view(&ds, &EsgFilter::all().with_benchmark(false));
        assert!(off.benchmark.is_none());
    }

    #[test]
    fn composite_uses_selected_pillars_only() {
        let ds = EsgDataset::embedded().unwrap();
        let view = compute_view(&ds, &EsgFilter::all().with_pillars([Pillar::Governance]));
        assert_eq!(view.indicators.len(), 8);
        let composite = view.composite.unwrap();
        assert!((composite.score - 91.97937179).abs() < 1e-6);
        assert_eq!(composite.classification, Classification::Excellent);
        assert_eq!(view.evolution.len(), 1);
    }

    #[test]
    fn empty_selection_has_no_composite() {
        let ds = EsgDataset::embedded().unwrap();
        let view = compute_view(&ds, &EsgFilter::all().with_pillars([]));
        assert!(view.indicators.is_empty());
        assert!(view.pillar_scores.is_empty());
        assert!(view.composite.is_none());
        assert_eq!(view.benchmark, Some(vec![]));
    }

    #[test]
    fn monthly_evolution_first_to_last() {
        let ds = EsgDataset::embedded().unwrap();
        let view = compute_view(&ds, &EsgFilter::all());
        let env = &view.evolution[0];
        assert_eq!(env.pillar, Pillar::Environmental);
        assert_eq!((env.first, env.last, env.change), (65.0, 91.0, 26.0));
        assert_eq!(env.first_month, "Jan");
        assert_eq!(env.last_month, "Dez");
    }

    #[test]
    fn view_serializes_to_json() {
        let ds = EsgDataset::embedded().unwrap();
        let view = compute_view(&ds, &EsgFilter::all());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["indicators"][0]["pillar"], "Environmental");
        assert!(json["indicators"][0]["performance"].is_number());
        assert_eq!(json["composite"]["classification"], "good");
    }
}
