//! # Ordinary Least Squares
//!
//! Closed-form single-regressor fit:
//!
//! ```text
//! β₁ = Σ(x - x̄)(y - ȳ) / Σ(x - x̄)²
//! β₀ = ȳ - β₁·x̄
//! R² = 1 - SS_res / SS_tot
//! ```
//!
//! The centred form above is the primary computation. [`verify_fit`]
//! recomputes the slope from the uncentred normal equations
//! (`Σxy - n·x̄·ȳ` over `Σx² - n·x̄²`) so callers can report that the two
//! agree.
//!
//! A constant regressor is rejected with [`StatsError::UndefinedSlope`]
//! before any division happens. A constant response is a flat line with
//! R² = 1, decided on the raw values so rounding in ȳ cannot turn it
//! into R² = 0. Inputs large enough to overflow the sums are rejected
//! with [`StatsError::NumericOverflow`] instead of yielding NaN.

use serde::{Deserialize, Serialize};

use crate::error::StatsError;

/// Result of fitting `y = β₀ + β₁·x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    /// β₀.
    pub intercept: f64,
    /// β₁.
    pub slope: f64,
    /// Coefficient of determination.
    pub r_squared: f64,
    /// Number of observations.
    pub n: usize,
    /// Residual sum of squares.
    pub ss_res: f64,
    /// Total sum of squares around ȳ.
    pub ss_tot: f64,
}

impl LinearFit {
    /// Fitted value at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Reject empty, mismatched, short or non-finite input.
pub(crate) fn check_pair(x: &[f64], y: &[f64], x_name: &str, y_name: &str) -> Result<(), StatsError> {
    if x.is_empty() {
        return Err(StatsError::Empty {
            variable: x_name.to_string(),
        });
    }
    if y.is_empty() {
        return Err(StatsError::Empty {
            variable: y_name.to_string(),
        });
    }
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(StatsError::InsufficientObservations {
            required: 2,
            got: x.len(),
        });
    }
    check_finite(x, x_name)?;
    check_finite(y, y_name)?;
    Ok(())
}

pub(crate) fn check_finite(values: &[f64], name: &str) -> Result<(), StatsError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(StatsError::NonFinite {
            variable: name.to_string(),
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

fn overflow(x_name: &str, y_name: &str) -> StatsError {
    StatsError::NumericOverflow {
        x_variable: x_name.to_string(),
        y_variable: y_name.to_string(),
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Fit `y = β₀ + β₁·x` by ordinary least squares.
///
/// # Errors
///
/// - [`StatsError::Empty`], [`StatsError::LengthMismatch`],
///   [`StatsError::InsufficientObservations`], [`StatsError::NonFinite`]
///   for malformed input.
/// - [`StatsError::UndefinedSlope`] when every `x` is identical.
/// - [`StatsError::NumericOverflow`] when the sums leave the `f64` range.
pub fn fit_ols(x: &[f64], y: &[f64]) -> Result<LinearFit, StatsError> {
    fit_ols_named(x, y, "x", "y")
}

/// [`fit_ols`] with variable names used in error messages.
pub fn fit_ols_named(
    x: &[f64],
    y: &[f64],
    x_name: &str,
    y_name: &str,
) -> Result<LinearFit, StatsError> {
    check_pair(x, y, x_name, y_name)?;

    let x_bar = mean(x);
    let y_bar = mean(y);

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - x_bar;
        sxx += dx * dx;
        sxy += dx * (yi - y_bar);
    }

    // Identical values can still leave rounding residue in sxx, so test
    // constancy on the raw data as well.
    if sxx == 0.0 || x.iter().all(|v| *v == x[0]) {
        return Err(StatsError::UndefinedSlope {
            variable: x_name.to_string(),
            value: x[0],
        });
    }

    if y.iter().all(|v| *v == y[0]) {
        return Ok(LinearFit {
            intercept: y[0],
            slope: 0.0,
            r_squared: 1.0,
            n: x.len(),
            ss_res: 0.0,
            ss_tot: 0.0,
        });
    }

    let slope = sxy / sxx;
    let intercept = y_bar - slope * x_bar;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let resid = yi - (intercept + slope * xi);
        ss_res += resid * resid;
        let dev = yi - y_bar;
        ss_tot += dev * dev;
    }

    let r_squared = 1.0 - ss_res / ss_tot;
    if !(slope.is_finite() && intercept.is_finite() && r_squared.is_finite()) {
        return Err(overflow(x_name, y_name));
    }

    tracing::trace!(n = x.len(), slope, intercept, r_squared, "ols fit");

    Ok(LinearFit {
        intercept,
        slope,
        r_squared,
        n: x.len(),
        ss_res,
        ss_tot,
    })
}

/// Independent recomputation of a fit's coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitVerification {
    /// Slope from the centred closed form.
    pub closed_form_slope: f64,
    /// Slope from the uncentred normal equations.
    pub normal_equation_slope: f64,
    /// Intercept from the centred closed form.
    pub closed_form_intercept: f64,
    /// Intercept from the uncentred normal equations.
    pub normal_equation_intercept: f64,
}

impl FitVerification {
    /// Largest relative difference between the two computations.
    pub fn relative_difference(&self) -> f64 {
        fn rel(a: f64, b: f64) -> f64 {
            let scale = a.abs().max(b.abs()).max(1.0);
            (a - b).abs() / scale
        }
        rel(self.closed_form_slope, self.normal_equation_slope).max(rel(
            self.closed_form_intercept,
            self.normal_equation_intercept,
        ))
    }

    /// Whether both computations agree within `tolerance`.
    pub fn agrees(&self, tolerance: f64) -> bool {
        self.relative_difference() <= tolerance
    }
}

/// Fit by the closed form and cross-check against the normal equations.
///
/// The uncentred sums overflow sooner than the centred ones; that case is
/// [`StatsError::NumericOverflow`].
pub fn verify_fit(x: &[f64], y: &[f64]) -> Result<FitVerification, StatsError> {
    let fit = fit_ols(x, y)?;

    let n = x.len() as f64;
    let x_bar = mean(x);
    let y_bar = mean(y);
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
    let sum_xx: f64 = x.iter().map(|a| a * a).sum();

    let slope = (sum_xy - n * x_bar * y_bar) / (sum_xx - n * x_bar * x_bar);
    let intercept = y_bar - slope * x_bar;
    if !(slope.is_finite() && intercept.is_finite()) {
        return Err(overflow("x", "y"));
    }

    Ok(FitVerification {
        closed_form_slope: fit.slope,
        normal_equation_slope: slope,
        closed_form_intercept: fit.intercept,
        normal_equation_intercept: intercept,
    })
}
