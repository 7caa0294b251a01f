//! # Pillar and Composite Scores
//!
//! A pillar score is the arithmetic mean of its indicators' performance
//! ratios. The composite is the unweighted mean of the pillar scores that
//! are present, so a pillar with eight indicators weighs the same as one
//! with two. Classification bands are fixed:
//!
//! | Score      | Band      |
//! |------------|-----------|
//! | ≥ 90       | Excellent |
//! | ≥ 75       | Good      |
//! | otherwise  | Attention |

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use mejc_core::Pillar;

use crate::performance::ScoredIndicator;

/// Lowest score classified as excellent.
pub const EXCELLENT_THRESHOLD: f64 = 90.0;
/// Lowest score classified as good.
pub const GOOD_THRESHOLD: f64 = 75.0;

/// Performance band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Excellent,
    Good,
    Attention,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Attention => "attention",
        }
    }

    /// Portuguese label used in reports.
    pub fn label_pt(&self) -> &'static str {
        match self {
            Self::Excellent => "Excelente",
            Self::Good => "Bom",
            Self::Attention => "Atenção",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Band for `score`.
pub fn classify(score: f64) -> Classification {
    if score >= EXCELLENT_THRESHOLD {
        Classification::Excellent
    } else if score >= GOOD_THRESHOLD {
        Classification::Good
    } else {
        Classification::Attention
    }
}

/// Mean performance per pillar, for pillars with at least one indicator.
pub fn pillar_means(indicators: &[ScoredIndicator]) -> BTreeMap<Pillar, f64> {
    let mut sums: BTreeMap<Pillar, (f64, usize)> = BTreeMap::new();
    for s in indicators {
        let entry = sums.entry(s.pillar()).or_insert((0.0, 0));
        entry.0 += s.performance;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(pillar, (sum, n))| (pillar, sum / n as f64))
        .collect()
}

/// Mean of the given pillar scores; `None` when there are none.
pub fn composite(pillar_scores: &BTreeMap<Pillar, f64>) -> Option<f64> {
    if pillar_scores.is_empty() {
        return None;
    }
    Some(pillar_scores.values().sum::<f64>() / pillar_scores.len() as f64)
}

/// A score with its band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedScore {
    pub score: f64,
    pub classification: Classification,
}

impl ClassifiedScore {
    pub fn new(score: f64) -> Self {
        Self {
            score,
            classification: classify(score),
        }
    }
}

/// One pillar's score with its band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PillarScore {
    pub pillar: Pillar,
    #[serde(flatten)]
    pub score: ClassifiedScore,
}

/// Pillar scores in pillar order, each classified.
pub fn classified_pillars(pillar_scores: &BTreeMap<Pillar, f64>) -> Vec<PillarScore> {
    pillar_scores
        .iter()
        .map(|(pillar, score)| PillarScore {
            pillar: *pillar,
            score: ClassifiedScore::new(*score),
        })
        .collect()
}
