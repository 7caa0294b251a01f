//! # mejc-stats — Simple Regression for the Econometrics Exercises
//!
//! Closed-form ordinary least squares on one regressor, the four
//! log/level functional forms with their slope readings, column
//! summaries, and deterministic synthetic samples for the three course
//! exercises.
//!
//! ## Design
//!
//! - Every routine validates its input and returns [`StatsError`] rather
//!   than NaN: empty or mismatched sequences, fewer than two points, a
//!   constant regressor, non-finite values and logs of non-positive
//!   values are all rejected with the variable name and index.
//! - Fits are plain values ([`LinearFit`], [`RegressionModel`]) that
//!   serialize for the CLI's JSON output.
//! - Randomness is confined to [`simulate`] and always seeded.
//!
//! ## Crate Policy
//!
//! - Depends on no other `mejc-*` crate.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

pub mod describe;
pub mod error;
pub mod forms;
pub mod ols;
pub mod simulate;

pub use describe::{describe, describe_named, percentile, Summary};
pub use error::StatsError;
pub use forms::{
    best_by_r_squared, fit_all_forms, fit_form, fit_form_named, level_log_effect, percent_change,
    verify_form, ElasticityClass, FunctionalForm, Interpretation, PercentChange, RegressionModel,
};
pub use ols::{fit_ols, fit_ols_named, verify_fit, FitVerification, LinearFit};
pub use simulate::{simulate, Exercise, Sample, DEFAULT_SEED};
