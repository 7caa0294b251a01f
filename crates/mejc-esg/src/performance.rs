//! # Indicator Performance
//!
//! Each indicator is scored as a percentage of its target:
//!
//! ```text
//! higher is better:  current / target × 100
//! lower is better:   target / current × 100
//! ```
//!
//! clamped to `[0, 150]`. Two zero denominators are defined rather than
//! rejected: a lower-is-better indicator at 0 has met any target (100),
//! and a higher-is-better indicator with a target of 0 scores 0. A NaN
//! result scores 0.

use serde::Serialize;

use mejc_core::{Direction, EsgIndicator, Pillar};

use crate::score::{classify, Classification};

/// Lower bound of a performance ratio.
pub const RATIO_MIN: f64 = 0.0;
/// Upper bound of a performance ratio.
pub const RATIO_MAX: f64 = 150.0;

/// Bounded performance ratio for one indicator, in percent.
pub fn performance_ratio(current: f64, target: f64, direction: Direction) -> f64 {
    let raw = match direction {
        Direction::LowerIsBetter => {
            if current == 0.0 {
                return 100.0;
            }
            target / current * 100.0
        }
        Direction::HigherIsBetter => {
            if target == 0.0 {
                return RATIO_MIN;
            }
            current / target * 100.0
        }
    };
    if raw.is_nan() {
        RATIO_MIN
    } else {
        raw.clamp(RATIO_MIN, RATIO_MAX)
    }
}

/// An indicator with its performance ratio and band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredIndicator {
    #[serde(flatten)]
    pub indicator: EsgIndicator,
    pub performance: f64,
    pub classification: Classification,
}

impl ScoredIndicator {
    pub fn new(indicator: EsgIndicator) -> Self {
        let zero_guarded = match indicator.direction {
            Direction::LowerIsBetter => indicator.current == 0.0,
            Direction::HigherIsBetter => indicator.target == 0.0,
        };
        if zero_guarded {
            tracing::warn!(
                indicator = %indicator.name,
                "zero denominator in performance ratio; using fixed score"
            );
        }
        let performance =
            performance_ratio(indicator.current, indicator.target, indicator.direction);
        Self {
            classification: classify(performance),
            performance,
            indicator,
        }
    }

    pub fn pillar(&self) -> Pillar {
        self.indicator.pillar
    }
}

/// Score every indicator, preserving order.
pub fn score_indicators(indicators: &[EsgIndicator]) -> Vec<ScoredIndicator> {
    indicators.iter().cloned().map(ScoredIndicator::new).collect()
}
