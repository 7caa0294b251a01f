//! # Panel Configuration
//!
//! Optional YAML file naming the datasets and export directory:
//!
//! ```yaml
//! compliance_data: data/compliance_2025.json
//! esg_data: data/esg.yaml
//! timeseries_data: data/study.json
//! output_dir: exports
//! ebserh_benchmark: 95.65
//! ```
//!
//! Every field is optional. A missing dataset path falls back to the
//! embedded MEJC data. Relative paths resolve against the directory that
//! holds the config file. Command-line flags override file values.
//!
//! Configured dataset files are read through a [`DatasetCache`] owned by
//! the [`RunContext`], so a file asked for twice is parsed once unless its
//! content changed in between.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use mejc_compliance::EBSERH_BENCHMARK;
use mejc_core::{CacheStats, ComplianceDataset, DatasetCache, EsgDataset, StudyDataset};

use crate::resolve_path;

/// File looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "mejc.yaml";

/// Contents of `mejc.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanelConfig {
    pub compliance_data: Option<PathBuf>,
    pub esg_data: Option<PathBuf>,
    pub timeseries_data: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub ebserh_benchmark: Option<f64>,
}

impl PanelConfig {
    /// Parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        if let Some(b) = config.ebserh_benchmark {
            anyhow::ensure!(
                b.is_finite() && (0.0..=100.0).contains(&b),
                "ebserh_benchmark must lie in [0, 100], got {b}"
            );
        }
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Locate and load the config.
    ///
    /// An explicit path must exist. Otherwise `mejc.yaml` in `cwd` is used
    /// when present, and defaults when not. Returns the config together
    /// with the directory its relative paths resolve against.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<(Self, PathBuf)> {
        let path = match explicit {
            Some(p) => resolve_path(p, cwd),
            None => {
                let candidate = cwd.join(DEFAULT_CONFIG_FILE);
                if !candidate.is_file() {
                    tracing::debug!("no config file; using defaults");
                    return Ok((Self::default(), cwd.to_path_buf()));
                }
                candidate
            }
        };
        let config = Self::load(&path)?;
        let base = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.to_path_buf());
        Ok((config, base))
    }

    /// Benchmark rate, defaulting to the EBSERH network figure.
    pub fn benchmark(&self) -> f64 {
        self.ebserh_benchmark.unwrap_or(EBSERH_BENCHMARK)
    }
}

#[derive(Debug, Default)]
struct Caches {
    compliance: DatasetCache<ComplianceDataset>,
    esg: DatasetCache<EsgDataset>,
    study: DatasetCache<StudyDataset>,
}

/// Resolved configuration for one CLI invocation.
#[derive(Debug)]
pub struct RunContext {
    pub config: PanelConfig,
    /// Directory relative config paths resolve against.
    pub base_dir: PathBuf,
    /// Where exports go unless a subcommand overrides it.
    pub output_dir: PathBuf,
    caches: RefCell<Caches>,
}

impl RunContext {
    /// Combine file config with the `--output-dir` flag.
    pub fn new(config: PanelConfig, base_dir: PathBuf, output_dir: Option<PathBuf>) -> Self {
        let output_dir = output_dir
            .or_else(|| {
                config
                    .output_dir
                    .as_deref()
                    .map(|p| resolve_path(p, &base_dir))
            })
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            config,
            base_dir,
            output_dir,
            caches: RefCell::new(Caches::default()),
        }
    }

    pub fn compliance_dataset(&self) -> Result<Arc<ComplianceDataset>> {
        match &self.config.compliance_data {
            Some(p) => {
                let path = resolve_path(p, &self.base_dir);
                self.caches
                    .borrow_mut()
                    .compliance
                    .get_or_load(&path)
                    .with_context(|| {
                        format!("failed to load compliance data: {}", path.display())
                    })
            }
            None => ComplianceDataset::embedded()
                .map(Arc::new)
                .context("embedded compliance data is invalid"),
        }
    }

    pub fn esg_dataset(&self) -> Result<Arc<EsgDataset>> {
        match &self.config.esg_data {
            Some(p) => {
                let path = resolve_path(p, &self.base_dir);
                self.caches
                    .borrow_mut()
                    .esg
                    .get_or_load(&path)
                    .with_context(|| format!("failed to load ESG data: {}", path.display()))
            }
            None => EsgDataset::embedded()
                .map(Arc::new)
                .context("embedded ESG data is invalid"),
        }
    }

    pub fn study_dataset(&self) -> Result<Arc<StudyDataset>> {
        match &self.config.timeseries_data {
            Some(p) => {
                let path = resolve_path(p, &self.base_dir);
                self.caches
                    .borrow_mut()
                    .study
                    .get_or_load(&path)
                    .with_context(|| format!("failed to load study data: {}", path.display()))
            }
            None => StudyDataset::embedded()
                .map(Arc::new)
                .context("embedded study data is invalid"),
        }
    }

    /// Cache counters summed over the three dataset kinds.
    pub fn cache_stats(&self) -> CacheStats {
        let caches = self.caches.borrow();
        [
            caches.compliance.stats(),
            caches.esg.stats(),
            caches.study.stats(),
        ]
        .into_iter()
        .fold(CacheStats::default(), |acc, s| CacheStats {
            hits: acc.hits + s.hits,
            misses: acc.misses + s.misses,
        })
    }
}
