//! # ESG Indicators
//!
//! Indicator records for the three-pillar ESG scorecard. Each indicator
//! carries its own [`Direction`]: whether a value below target is good
//! (emissions, consumption, turnover) or bad (everything else).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PanelError;

/// ESG pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Pillar {
    /// Emissions, consumption, waste.
    Environmental,
    /// People, diversity, safety, community.
    Social,
    /// Transparency, compliance, oversight.
    Governance,
}

/// Number of ESG pillars.
pub const PILLAR_COUNT: usize = 3;

impl Pillar {
    /// All pillars in canonical order.
    pub fn all() -> &'static [Pillar] {
        &[Self::Environmental, Self::Social, Self::Governance]
    }

    /// English pillar name, as used by the indicator dataset.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Environmental => "Environmental",
            Self::Social => "Social",
            Self::Governance => "Governance",
        }
    }

    /// Portuguese pillar name, as used by the published study.
    pub fn label_pt(&self) -> &'static str {
        match self {
            Self::Environmental => "Ambiental",
            Self::Social => "Social",
            Self::Governance => "Governança",
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pillar {
    type Err = PanelError;

    /// Accepts the English name, the Portuguese name, or either lowercased.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|p| {
                p.as_str() == s
                    || p.label_pt() == s
                    || p.as_str().to_lowercase() == s
                    || p.label_pt().to_lowercase() == s
            })
            .ok_or_else(|| PanelError::UnknownLabel {
                kind: "pillar",
                value: s.to_string(),
            })
    }
}

/// Which side of the target counts as good performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Exceeding the target is good (recycling rate, training hours).
    HigherIsBetter,
    /// Staying below the target is good (emissions, accidents).
    LowerIsBetter,
}

/// One scorecard indicator with its current value and target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EsgIndicator {
    /// Pillar the indicator rolls up into.
    pub pillar: Pillar,
    /// Indicator name.
    pub name: String,
    /// Current measured value.
    pub current: f64,
    /// Target for the reference period.
    pub target: f64,
    /// Unit of both `current` and `target`.
    pub unit: String,
    /// Which side of the target is good.
    pub direction: Direction,
}

/// Monthly pillar scores for the trend chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonthlyScores {
    /// Month label (`Jan`, `Fev`, ...).
    pub month: String,
    /// Environmental pillar score.
    pub environmental: f64,
    /// Social pillar score.
    pub social: f64,
    /// Governance pillar score.
    pub governance: f64,
}

impl MonthlyScores {
    /// Score for a given pillar.
    pub fn score(&self, pillar: Pillar) -> f64 {
        match pillar {
            Pillar::Environmental => self.environmental,
            Pillar::Social => self.social,
            Pillar::Governance => self.governance,
        }
    }
}
