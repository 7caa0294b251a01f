//! Descriptive statistics for a single numeric column.
//!
//! Standard deviation uses the sample (n − 1) denominator. Percentiles
//! interpolate linearly between closest ranks, so the median of an even
//! count is the mean of the two middle values.

use serde::{Deserialize, Serialize};

use crate::error::StatsError;
use crate::ols::check_finite;

/// Count, location, spread and quartiles of a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// `None` with a single observation.
    pub std: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

/// Summarize `values`.
pub fn describe(values: &[f64]) -> Result<Summary, StatsError> {
    describe_named(values, "values")
}

/// [`describe`] with a variable name used in error messages.
pub fn describe_named(values: &[f64], variable: &str) -> Result<Summary, StatsError> {
    if values.is_empty() {
        return Err(StatsError::Empty {
            variable: variable.to_string(),
        });
    }
    check_finite(values, variable)?;

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let std = (n > 1).then(|| {
        let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
        (ss / (n - 1) as f64).sqrt()
    });

    Ok(Summary {
        count: n,
        mean,
        std,
        min: sorted[0],
        p25: interpolate(&sorted, 25.0),
        median: interpolate(&sorted, 50.0),
        p75: interpolate(&sorted, 75.0),
        max: sorted[n - 1],
    })
}

/// Linear-interpolation percentile `q` (0 to 100) of `values`.
pub fn percentile(values: &[f64], q: f64) -> Result<f64, StatsError> {
    if !(0.0..=100.0).contains(&q) {
        return Err(StatsError::InvalidPercentile(q));
    }
    if values.is_empty() {
        return Err(StatsError::Empty {
            variable: "values".to_string(),
        });
    }
    check_finite(values, "values")?;
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(interpolate(&sorted, q))
}

fn interpolate(sorted: &[f64], q: f64) -> f64 {
    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
