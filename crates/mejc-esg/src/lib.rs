//! # mejc-esg — ESG Scorecard Aggregation
//!
//! Scores each indicator against its target, rolls indicators up into
//! Environmental, Social and Governance pillar scores and a composite,
//! and classifies every score into a fixed band.
//!
//! ## Design
//!
//! - [`performance_ratio`] is total: every `f64` input, NaN included,
//!   maps into `[0, 150]`.
//! - The composite averages whichever pillars survive the filter; with
//!   none selected there is no composite.
//! - The study's published pillar scores go through the same
//!   [`composite`] function as computed scores.
//! - [`compute_view`] and [`compute_study_view`] are pure.
//!
//! ## Crate Policy
//!
//! - Depends only on `mejc-core` within the workspace.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

pub mod error;
pub mod export;
pub mod performance;
pub mod score;
pub mod trends;
pub mod view;

pub use error::EsgExportError;
pub use performance::{performance_ratio, score_indicators, ScoredIndicator, RATIO_MAX, RATIO_MIN};
pub use score::{
    classified_pillars, classify, composite, pillar_means, Classification, ClassifiedScore,
    PillarScore, EXCELLENT_THRESHOLD, GOOD_THRESHOLD,
};
pub use trends::{
    all_trends, compute_study_view, metric_trend, percent_change, MetricTrend, StudyView,
};
pub use view::{
    compute_view, BenchmarkPoint, EsgFilter, EsgView, PillarEvolution, CRITICAL_THRESHOLD,
    HIGHLIGHT_THRESHOLD,
};
