//! # Functional Forms
//!
//! The four single-regressor specifications taught in the course, each a
//! plain OLS fit on transformed variables:
//!
//! | Form         | Regression           | Reading of β₁                         |
//! |--------------|----------------------|---------------------------------------|
//! | level-level  | `y = β₀ + β₁x`       | Δy per unit of x                      |
//! | log-level    | `ln y = β₀ + β₁x`    | ≈ 100·β₁ % change in y per unit of x  |
//! | level-log    | `y = β₀ + β₁ ln x`   | β₁/100 change in y per 1 % of x       |
//! | log-log      | `ln y = β₀ + β₁ ln x`| elasticity of y with respect to x     |
//!
//! The log-level approximation `100·β₁` drifts from the exact
//! `100·(e^β₁ − 1)` as |β₁| grows; [`percent_change`] returns both.
//!
//! Predictions are returned in the original units of `y`. The log
//! retransformation is the naive `exp(ŷ)` without a smearing correction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StatsError;
use crate::ols::{check_pair, fit_ols_named, verify_fit, FitVerification, LinearFit};

/// Tolerance within which an elasticity counts as unit-elastic.
pub const UNIT_ELASTICITY_TOLERANCE: f64 = 1e-9;

/// Which side(s) of the regression enter in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FunctionalForm {
    /// `y` on `x`.
    LevelLevel,
    /// `ln y` on `x`.
    LogLevel,
    /// `y` on `ln x`.
    LevelLog,
    /// `ln y` on `ln x`.
    LogLog,
}

impl FunctionalForm {
    /// All forms in presentation order.
    pub fn all() -> &'static [FunctionalForm] {
        &[
            Self::LevelLevel,
            Self::LogLevel,
            Self::LevelLog,
            Self::LogLog,
        ]
    }

    /// Kebab-case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LevelLevel => "level-level",
            Self::LogLevel => "log-level",
            Self::LevelLog => "level-log",
            Self::LogLog => "log-log",
        }
    }

    /// Whether `x` is logged.
    pub fn logs_x(&self) -> bool {
        matches!(self, Self::LevelLog | Self::LogLog)
    }

    /// Whether `y` is logged.
    pub fn logs_y(&self) -> bool {
        matches!(self, Self::LogLevel | Self::LogLog)
    }

    /// Equation with the given variable names.
    pub fn equation(&self, x_name: &str, y_name: &str) -> String {
        let lhs = if self.logs_y() {
            format!("ln({y_name})")
        } else {
            y_name.to_string()
        };
        let rhs = if self.logs_x() {
            format!("ln({x_name})")
        } else {
            x_name.to_string()
        };
        format!("{lhs} = β₀ + β₁·{rhs}")
    }
}

impl fmt::Display for FunctionalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FunctionalForm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "level-level" | "linear" => Ok(Self::LevelLevel),
            "log-level" => Ok(Self::LogLevel),
            "level-log" => Ok(Self::LevelLog),
            "log-log" => Ok(Self::LogLog),
            other => Err(format!(
                "unknown functional form {other:?}; expected one of level-level, log-level, level-log, log-log"
            )),
        }
    }
}

/// Approximate and exact percent change implied by a log-level slope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentChange {
    /// `100·β₁·Δx`.
    pub approximate: f64,
    /// `100·(e^{β₁·Δx} − 1)`.
    pub exact: f64,
}

/// Percent change in `y` when `x` moves by `delta` in a log-level model.
pub fn percent_change(slope: f64, delta: f64) -> PercentChange {
    let effect = slope * delta;
    PercentChange {
        approximate: 100.0 * effect,
        exact: 100.0 * effect.exp_m1(),
    }
}

/// Change in `y` for a 1 % increase in `x` in a level-log model.
pub fn level_log_effect(slope: f64) -> f64 {
    slope / 100.0
}

/// Response class of a log-log slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElasticityClass {
    /// |β₁| > 1.
    Elastic,
    /// |β₁| < 1.
    Inelastic,
    /// |β₁| = 1.
    Unit,
}

impl ElasticityClass {
    /// Classify a log-log slope by its absolute value.
    pub fn of(elasticity: f64) -> Self {
        let magnitude = elasticity.abs();
        if (magnitude - 1.0).abs() <= UNIT_ELASTICITY_TOLERANCE {
            Self::Unit
        } else if magnitude > 1.0 {
            Self::Elastic
        } else {
            Self::Inelastic
        }
    }

    /// Lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Elastic => "elastic",
            Self::Inelastic => "inelastic",
            Self::Unit => "unit",
        }
    }
}

impl fmt::Display for ElasticityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reading of β₁ appropriate to the model's form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Interpretation {
    /// Change in `y` per unit of `x`.
    UnitChange {
        /// β₁.
        per_unit: f64,
    },
    /// Percent change in `y` per unit of `x`.
    SemiElasticity {
        /// Approximate and exact percent change for Δx = 1.
        per_unit: PercentChange,
    },
    /// Change in `y` per 1 % change in `x`.
    PerPercent {
        /// β₁ / 100.
        per_one_percent: f64,
    },
    /// Percent change in `y` per 1 % change in `x`.
    Elasticity {
        /// β₁.
        elasticity: f64,
        /// Response class.
        class: ElasticityClass,
    },
}

impl Interpretation {
    fn for_form(form: FunctionalForm, slope: f64) -> Self {
        match form {
            FunctionalForm::LevelLevel => Self::UnitChange { per_unit: slope },
            FunctionalForm::LogLevel => Self::SemiElasticity {
                per_unit: percent_change(slope, 1.0),
            },
            FunctionalForm::LevelLog => Self::PerPercent {
                per_one_percent: level_log_effect(slope),
            },
            FunctionalForm::LogLog => Self::Elasticity {
                elasticity: slope,
                class: ElasticityClass::of(slope),
            },
        }
    }

    /// One-line reading in the given variable names.
    pub fn describe(&self, x_name: &str, y_name: &str) -> String {
        match self {
            Self::UnitChange { per_unit } => {
                format!("each additional unit of {x_name} changes {y_name} by {per_unit:.4}")
            }
            Self::SemiElasticity { per_unit } => format!(
                "each additional unit of {x_name} changes {y_name} by about {:.4}% (exact {:.4}%)",
                per_unit.approximate, per_unit.exact
            ),
            Self::PerPercent { per_one_percent } => {
                format!("a 1% increase in {x_name} changes {y_name} by {per_one_percent:.4}")
            }
            Self::Elasticity { elasticity, class } => format!(
                "a 1% increase in {x_name} changes {y_name} by {elasticity:.4}% ({class})"
            ),
        }
    }
}

/// A fitted regression in a specific functional form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionModel {
    /// Specification.
    pub form: FunctionalForm,
    /// Coefficients on the transformed variables.
    pub fit: LinearFit,
    /// Reading of the slope.
    pub interpretation: Interpretation,
}

impl RegressionModel {
    /// Predicted `y` in original units at regressor value `x`.
    ///
    /// # Errors
    ///
    /// [`StatsError::NonPositiveLog`] when the form logs `x` and `x <= 0`.
    pub fn predict(&self, x: f64) -> Result<f64, StatsError> {
        let rhs = if self.form.logs_x() {
            checked_ln(x, "x", 0)?
        } else {
            x
        };
        let fitted = self.fit.predict(rhs);
        Ok(if self.form.logs_y() {
            fitted.exp()
        } else {
            fitted
        })
    }

    /// Coefficient of determination on the transformed scale.
    pub fn r_squared(&self) -> f64 {
        self.fit.r_squared
    }
}

fn checked_ln(value: f64, variable: &str, index: usize) -> Result<f64, StatsError> {
    if value > 0.0 {
        Ok(value.ln())
    } else {
        Err(StatsError::NonPositiveLog {
            variable: variable.to_string(),
            index,
            value,
        })
    }
}

fn log_all(values: &[f64], variable: &str) -> Result<Vec<f64>, StatsError> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| checked_ln(*v, variable, i))
        .collect()
}

/// The variables `form` regresses, after its log transforms.
fn transform(
    form: FunctionalForm,
    x: &[f64],
    y: &[f64],
    x_name: &str,
    y_name: &str,
) -> Result<(Vec<f64>, Vec<f64>), StatsError> {
    check_pair(x, y, x_name, y_name)?;
    let tx = if form.logs_x() {
        log_all(x, x_name)?
    } else {
        x.to_vec()
    };
    let ty = if form.logs_y() {
        log_all(y, y_name)?
    } else {
        y.to_vec()
    };
    Ok((tx, ty))
}

/// Fit `form` to `(x, y)`.
pub fn fit_form(form: FunctionalForm, x: &[f64], y: &[f64]) -> Result<RegressionModel, StatsError> {
    fit_form_named(form, x, y, "x", "y")
}

/// [`fit_form`] with variable names used in error messages.
///
/// # Errors
///
/// Everything [`fit_ols_named`](crate::ols::fit_ols_named) rejects, plus
/// [`StatsError::NonPositiveLog`] naming the variable and first
/// offending index when a logged variable is `<= 0`.
pub fn fit_form_named(
    form: FunctionalForm,
    x: &[f64],
    y: &[f64],
    x_name: &str,
    y_name: &str,
) -> Result<RegressionModel, StatsError> {
    let (tx, ty) = transform(form, x, y, x_name, y_name)?;
    let fit = fit_ols_named(&tx, &ty, x_name, y_name)?;
    tracing::debug!(form = %form, slope = fit.slope, r_squared = fit.r_squared, "fitted model");

    Ok(RegressionModel {
        form,
        fit,
        interpretation: Interpretation::for_form(form, fit.slope),
    })
}

/// Cross-check the fit of `form` against the normal equations, on the
/// same transformed variables [`fit_form`] regresses.
pub fn verify_form(
    form: FunctionalForm,
    x: &[f64],
    y: &[f64],
) -> Result<FitVerification, StatsError> {
    let (tx, ty) = transform(form, x, y, "x", "y")?;
    verify_fit(&tx, &ty)
}

/// Fit every form the data admits.
///
/// Forms that need a log of a non-positive value are skipped; any other
/// error aborts.
pub fn fit_all_forms(x: &[f64], y: &[f64]) -> Result<Vec<RegressionModel>, StatsError> {
    let mut models = Vec::with_capacity(FunctionalForm::all().len());
    for form in FunctionalForm::all() {
        match fit_form(*form, x, y) {
            Ok(model) => models.push(model),
            Err(StatsError::NonPositiveLog { .. }) => {
                tracing::debug!(form = %form, "skipping form: non-positive value under log");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(models)
}

/// Model with the highest R². Ties keep the earlier model.
///
/// R² on different transformations of `y` is not strictly comparable;
/// this is the classroom selection rule.
pub fn best_by_r_squared(models: &[RegressionModel]) -> Option<&RegressionModel> {
    models.iter().fold(None, |best: Option<&RegressionModel>, m| match best {
        Some(b) if b.r_squared() >= m.r_squared() => Some(b),
        _ => Some(m),
    })
}
