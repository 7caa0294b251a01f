//! # Seeded Course Exercises
//!
//! Synthetic samples shaped like three textbook datasets, each built to
//! illustrate one functional form:
//!
//! - **wage-iq** (WAGE2-like, n = 935): `IQ ~ N(100, 15)` clipped to
//!   [70, 140]; `wage = 500 + 8·(IQ − 100) + N(0, 300)` clipped to
//!   [200, 2500]. Level-level.
//! - **rd-sales** (chemical firms, n = 32): `sales ~ LogNormal(ln 500, 1.2)`
//!   clipped to [50, 5000]; `ln rd = −2 + 0.76·ln sales + N(0, 0.4)`, then
//!   `rd` clipped to [1 %, 15 %] of sales. Log-log.
//! - **math-expend** (MEAP93-like, n = 408): `expend ~ N(6000, 1500)`
//!   clipped to [3000, 12000]; `math10 = 20 + 15·ln(expend / 5000) + N(0, 8)`
//!   clipped to [5, 95]. Level-log.
//!
//! The regressor is drawn in full before the noise term, and the generator
//! is [`StdRng`] seeded from a `u64`, so a seed always yields the same
//! sample on every platform.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, LogNormal, Normal};
use serde::{Deserialize, Serialize};

use crate::error::StatsError;
use crate::forms::FunctionalForm;

/// Seed used when the caller does not supply one.
pub const DEFAULT_SEED: u64 = 42;

/// A course exercise with a synthetic data generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Exercise {
    WageIq,
    RdSales,
    MathExpend,
}

impl Exercise {
    pub fn all() -> &'static [Exercise] {
        &[Self::WageIq, Self::RdSales, Self::MathExpend]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WageIq => "wage-iq",
            Self::RdSales => "rd-sales",
            Self::MathExpend => "math-expend",
        }
    }

    /// Sample size matching the textbook dataset.
    pub fn sample_size(&self) -> usize {
        match self {
            Self::WageIq => 935,
            Self::RdSales => 32,
            Self::MathExpend => 408,
        }
    }

    /// Form the exercise is built to demonstrate.
    pub fn form(&self) -> FunctionalForm {
        match self {
            Self::WageIq => FunctionalForm::LevelLevel,
            Self::RdSales => FunctionalForm::LogLog,
            Self::MathExpend => FunctionalForm::LevelLog,
        }
    }

    /// `(x, y)` column names.
    pub fn variables(&self) -> (&'static str, &'static str) {
        match self {
            Self::WageIq => ("IQ", "wage"),
            Self::RdSales => ("sales", "rd"),
            Self::MathExpend => ("expend", "math10"),
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Exercise {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| format!("unknown exercise {s:?}; expected wage-iq, rd-sales or math-expend"))
    }
}

/// A generated `(x, y)` sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub exercise: Exercise,
    pub seed: u64,
    pub x_name: String,
    pub y_name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Sample {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

fn normal(mean: f64, std_dev: f64) -> Result<Normal<f64>, StatsError> {
    Normal::new(mean, std_dev).map_err(|e| StatsError::InvalidDistribution(e.to_string()))
}

fn draw<D: Distribution<f64>>(dist: &D, rng: &mut StdRng, n: usize) -> Vec<f64> {
    (0..n).map(|_| dist.sample(rng)).collect()
}

/// Generate the sample for `exercise` from `seed`.
pub fn simulate(exercise: Exercise, seed: u64) -> Result<Sample, StatsError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = exercise.sample_size();

    let (x, y) = match exercise {
        Exercise::WageIq => {
            let iq: Vec<f64> = draw(&normal(100.0, 15.0)?, &mut rng, n)
                .into_iter()
                .map(|v| v.clamp(70.0, 140.0))
                .collect();
            let noise = draw(&normal(0.0, 300.0)?, &mut rng, n);
            let wage = iq
                .iter()
                .zip(&noise)
                .map(|(q, e)| (500.0 + 8.0 * (q - 100.0) + e).clamp(200.0, 2500.0))
                .collect();
            (iq, wage)
        }
        Exercise::RdSales => {
            let lognormal = LogNormal::new(500f64.ln(), 1.2)
                .map_err(|e| StatsError::InvalidDistribution(e.to_string()))?;
            let sales: Vec<f64> = draw(&lognormal, &mut rng, n)
                .into_iter()
                .map(|v| v.clamp(50.0, 5000.0))
                .collect();
            let noise = draw(&normal(0.0, 0.4)?, &mut rng, n);
            let rd = sales
                .iter()
                .zip(&noise)
                .map(|(s, e)| (-2.0 + 0.76 * s.ln() + e).exp().clamp(0.01 * s, 0.15 * s))
                .collect();
            (sales, rd)
        }
        Exercise::MathExpend => {
            let expend: Vec<f64> = draw(&normal(6000.0, 1500.0)?, &mut rng, n)
                .into_iter()
                .map(|v| v.clamp(3000.0, 12000.0))
                .collect();
            let noise = draw(&normal(0.0, 8.0)?, &mut rng, n);
            let math10 = expend
                .iter()
                .zip(&noise)
                .map(|(x, e)| (20.0 + 15.0 * (x / 5000.0).ln() + e).clamp(5.0, 95.0))
                .collect();
            (expend, math10)
        }
    };

    let (x_name, y_name) = exercise.variables();
    tracing::debug!(exercise = %exercise, seed, n, "generated sample");

    Ok(Sample {
        exercise,
        seed,
        x_name: x_name.to_string(),
        y_name: y_name.to_string(),
        x,
        y,
    })
}
