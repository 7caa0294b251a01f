//! # Datasets — Loading and Validation
//!
//! Every dataset enters the process through [`DataFormat::parse`] followed
//! by [`Validate::validate`]. A dataset that parses but violates an
//! invariant (duplicate question code, non-finite value, years out of
//! order) is rejected as a whole; there is no partial load.
//!
//! The shipped MEJC data is embedded at compile time and exposed through
//! the `embedded()` constructors. It goes through the same validation as
//! an external file, so a broken resource fails the first test run rather
//! than a dashboard session.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::compliance::ComplianceRecord;
use crate::error::PanelError;
use crate::esg::{EsgIndicator, MonthlyScores, Pillar};
use crate::timeseries::{CitedCorrelation, TimeSeriesMetric, TimeSeriesRow};

const EMBEDDED_COMPLIANCE: &str = include_str!("../data/compliance_records.json");
const EMBEDDED_ESG: &str = include_str!("../data/esg_indicators.json");
const EMBEDDED_STUDY: &str = include_str!("../data/esg_study.json");

// ---------------------------------------------------------------------------
// Format dispatch
// ---------------------------------------------------------------------------

/// Serialization format of a dataset resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// `.json`
    Json,
    /// `.yaml` / `.yml`
    Yaml,
}

impl DataFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, PanelError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            other => Err(PanelError::UnsupportedFormat(format!(
                "{} (extension {:?})",
                path.display(),
                other.unwrap_or("")
            ))),
        }
    }

    /// Deserialize `bytes` in this format.
    pub fn parse<T: DeserializeOwned>(self, bytes: &[u8]) -> Result<T, PanelError> {
        match self {
            Self::Json => Ok(serde_json::from_slice(bytes)?),
            Self::Yaml => Ok(serde_yaml::from_slice(bytes)?),
        }
    }
}

/// Structural checks run after deserialization.
pub trait Validate {
    /// Reject the dataset if any invariant is violated.
    fn validate(&self) -> Result<(), PanelError>;
}

/// Parse and validate a dataset from in-memory bytes.
pub fn parse_validated<T>(format: DataFormat, bytes: &[u8]) -> Result<T, PanelError>
where
    T: DeserializeOwned + Validate,
{
    let value: T = format.parse(bytes)?;
    value.validate()?;
    Ok(value)
}

/// Read, parse and validate a dataset file.
pub fn load_validated<T>(path: &Path) -> Result<T, PanelError>
where
    T: DeserializeOwned + Validate,
{
    let format = DataFormat::from_path(path)?;
    let bytes = std::fs::read(path)?;
    let value = parse_validated(format, &bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "dataset loaded");
    Ok(value)
}

fn ensure_finite(value: f64, what: impl FnOnce() -> String) -> Result<(), PanelError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PanelError::DatasetValidation(format!(
            "{} is not finite: {value}",
            what()
        )))
    }
}

// ---------------------------------------------------------------------------
// Compliance assessment
// ---------------------------------------------------------------------------

/// The full governance assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComplianceDataset {
    records: Vec<ComplianceRecord>,
}

impl ComplianceDataset {
    /// Build a dataset from records, validating them.
    pub fn from_records(records: Vec<ComplianceRecord>) -> Result<Self, PanelError> {
        let dataset = Self { records };
        dataset.validate()?;
        Ok(dataset)
    }

    /// The MEJC-UFRN assessment shipped with the crate.
    pub fn embedded() -> Result<Self, PanelError> {
        parse_validated(DataFormat::Json, EMBEDDED_COMPLIANCE.as_bytes())
    }

    /// Load an assessment from a JSON or YAML file.
    pub fn load(path: &Path) -> Result<Self, PanelError> {
        load_validated(path)
    }

    /// Records in assessment order.
    pub fn records(&self) -> &[ComplianceRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the assessment has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Validate for ComplianceDataset {
    fn validate(&self) -> Result<(), PanelError> {
        let mut seen = HashSet::new();
        for (idx, record) in self.records.iter().enumerate() {
            if record.id.as_str().trim().is_empty() {
                return Err(PanelError::DatasetValidation(format!(
                    "record #{idx} has an empty question code"
                )));
            }
            if record.description.trim().is_empty() {
                return Err(PanelError::DatasetValidation(format!(
                    "record {} has an empty description",
                    record.id
                )));
            }
            if !seen.insert(record.id.as_str()) {
                return Err(PanelError::DatasetValidation(format!(
                    "duplicate question code {}",
                    record.id
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ESG scorecard
// ---------------------------------------------------------------------------

/// The ESG scorecard: indicators, monthly evolution and market benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EsgDataset {
    reference_period: String,
    indicators: Vec<EsgIndicator>,
    #[serde(default)]
    evolution: Vec<MonthlyScores>,
    #[serde(default)]
    market_benchmark: BTreeMap<Pillar, f64>,
}

impl EsgDataset {
    /// Build a scorecard from its parts, validating them.
    pub fn new(
        reference_period: impl Into<String>,
        indicators: Vec<EsgIndicator>,
        evolution: Vec<MonthlyScores>,
        market_benchmark: BTreeMap<Pillar, f64>,
    ) -> Result<Self, PanelError> {
        let dataset = Self {
            reference_period: reference_period.into(),
            indicators,
            evolution,
            market_benchmark,
        };
        dataset.validate()?;
        Ok(dataset)
    }

    /// The MEJC scorecard shipped with the crate.
    pub fn embedded() -> Result<Self, PanelError> {
        parse_validated(DataFormat::Json, EMBEDDED_ESG.as_bytes())
    }

    /// Load a scorecard from a JSON or YAML file.
    pub fn load(path: &Path) -> Result<Self, PanelError> {
        load_validated(path)
    }

    /// Reference period the targets apply to (e.g. `"2024"`).
    pub fn reference_period(&self) -> &str {
        &self.reference_period
    }

    /// Indicators in scorecard order.
    pub fn indicators(&self) -> &[EsgIndicator] {
        &self.indicators
    }

    /// Monthly pillar scores, January first.
    pub fn evolution(&self) -> &[MonthlyScores] {
        &self.evolution
    }

    /// Market benchmark score per pillar.
    pub fn market_benchmark(&self) -> &BTreeMap<Pillar, f64> {
        &self.market_benchmark
    }
}

impl Validate for EsgDataset {
    fn validate(&self) -> Result<(), PanelError> {
        let mut seen = HashSet::new();
        for ind in &self.indicators {
            if ind.name.trim().is_empty() {
                return Err(PanelError::DatasetValidation(
                    "indicator with an empty name".into(),
                ));
            }
            if !seen.insert((ind.pillar, ind.name.as_str())) {
                return Err(PanelError::DatasetValidation(format!(
                    "duplicate indicator {} in pillar {}",
                    ind.name, ind.pillar
                )));
            }
            ensure_finite(ind.current, || format!("current value of {}", ind.name))?;
            ensure_finite(ind.target, || format!("target of {}", ind.name))?;
            if ind.target < 0.0 || ind.current < 0.0 {
                return Err(PanelError::DatasetValidation(format!(
                    "negative value for indicator {} (current {}, target {})",
                    ind.name, ind.current, ind.target
                )));
            }
        }
        for month in &self.evolution {
            for pillar in Pillar::all() {
                ensure_finite(month.score(*pillar), || {
                    format!("{pillar} score for {}", month.month)
                })?;
            }
        }
        for (pillar, score) in &self.market_benchmark {
            ensure_finite(*score, || format!("{pillar} benchmark"))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ESG study
// ---------------------------------------------------------------------------

/// The published ESG study: yearly table, reported pillar scores and cited
/// correlations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudyDataset {
    institution: String,
    timeseries: Vec<TimeSeriesRow>,
    reported_scores: BTreeMap<Pillar, f64>,
    #[serde(default)]
    cited_correlations: Vec<CitedCorrelation>,
}

impl StudyDataset {
    /// The MEJC study shipped with the crate.
    pub fn embedded() -> Result<Self, PanelError> {
        parse_validated(DataFormat::Json, EMBEDDED_STUDY.as_bytes())
    }

    /// Load a study from a JSON or YAML file.
    pub fn load(path: &Path) -> Result<Self, PanelError> {
        load_validated(path)
    }

    /// Institution the study covers.
    pub fn institution(&self) -> &str {
        &self.institution
    }

    /// Yearly rows in ascending year order.
    pub fn timeseries(&self) -> &[TimeSeriesRow] {
        &self.timeseries
    }

    /// Pillar scores as published by the study.
    pub fn reported_scores(&self) -> &BTreeMap<Pillar, f64> {
        &self.reported_scores
    }

    /// Correlations as published by the study.
    pub fn cited_correlations(&self) -> &[CitedCorrelation] {
        &self.cited_correlations
    }

    /// `(year, value)` pairs for a metric, skipping years where the
    /// optional column is absent.
    pub fn series(&self, metric: TimeSeriesMetric) -> Vec<(u16, f64)> {
        self.timeseries
            .iter()
            .filter_map(|row| row.value(metric).map(|v| (row.year, v)))
            .collect()
    }
}

impl Validate for StudyDataset {
    fn validate(&self) -> Result<(), PanelError> {
        for pair in self.timeseries.windows(2) {
            if pair[1].year <= pair[0].year {
                return Err(PanelError::DatasetValidation(format!(
                    "time series years must be strictly increasing: {} then {}",
                    pair[0].year, pair[1].year
                )));
            }
        }
        for row in &self.timeseries {
            for metric in TimeSeriesMetric::all() {
                if let Some(v) = row.value(*metric) {
                    ensure_finite(v, || format!("{metric} in {}", row.year))?;
                }
            }
        }
        for (pillar, score) in &self.reported_scores {
            ensure_finite(*score, || format!("reported {pillar} score"))?;
        }
        for c in &self.cited_correlations {
            if !(-1.0..=1.0).contains(&c.coefficient) {
                return Err(PanelError::DatasetValidation(format!(
                    "correlation {} outside [-1, 1]: {}",
                    c.variables, c.coefficient
                )));
            }
        }
        Ok(())
    }
}
