//! # mejc-cli — Command-Line Front End for the Governance Panel
//!
//! Provides the `mejc` binary. Each subcommand loads its dataset once,
//! computes a view with the library crates, and prints a text report or
//! JSON.
//!
//! ## Subcommands
//!
//! - `mejc compliance` — IG-SEST conformity summary and CSV/XLSX export.
//! - `mejc esg` — ESG scorecard, study trends and indicator export.
//! - `mejc regress` — single-variable regression on a data file or a
//!   seeded course exercise.
//!
//! ```bash
//! mejc compliance summary --priority high
//! mejc esg scores --benchmark
//! mejc regress simulate wage-iq --seed 42
//! ```

pub mod compliance;
pub mod config;
pub mod esg;
pub mod regress;

use std::path::{Path, PathBuf};

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
