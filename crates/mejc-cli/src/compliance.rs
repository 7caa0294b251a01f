//! # Compliance CLI
//!
//! ```bash
//! # Report over the whole assessment:
//! mejc compliance summary
//!
//! # Only open high-priority items in two dimensions, as JSON:
//! mejc compliance summary --dimension transparency --dimension risks \
//!     --status non-conforming --priority high --json
//!
//! # Workbook with the three summary sheets:
//! mejc compliance export --format xlsx --out reports/
//! ```
//!
//! A filter flag that is not given selects every value of that field.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};

use mejc_compliance::{compute_view, write_csv_file, write_xlsx_file, ComplianceView, FilterState};
use mejc_core::{ComplianceStatus, Dimension, Priority};

use crate::config::RunContext;

/// Compliance subcommand arguments.
#[derive(Args, Debug)]
pub struct ComplianceArgs {
    #[command(subcommand)]
    pub command: ComplianceCommand,
}

/// Available compliance subcommands.
#[derive(Subcommand, Debug)]
pub enum ComplianceCommand {
    /// Print conformity metrics for the selected records.
    Summary {
        #[command(flatten)]
        filter: FilterArgs,

        /// Emit the full view as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Write the selected records to a dated CSV or XLSX file.
    Export {
        /// Output format.
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        #[command(flatten)]
        filter: FilterArgs,

        /// Target directory (defaults to --output-dir).
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

/// Record filter flags. Each accepts a label (`Transparência`) or a slug
/// (`transparency`) and may be repeated.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Dimension to include.
    #[arg(long = "dimension")]
    pub dimensions: Vec<Dimension>,

    /// Status to include (conforming, non-conforming).
    #[arg(long = "status")]
    pub statuses: Vec<ComplianceStatus>,

    /// Priority to include (high, medium, low).
    #[arg(long = "priority")]
    pub priorities: Vec<Priority>,
}

impl FilterArgs {
    /// Build a filter; an absent flag keeps every value of its field.
    pub fn to_filter(&self) -> FilterState {
        let mut filter = FilterState::all();
        if !self.dimensions.is_empty() {
            filter = filter.with_dimensions(self.dimensions.iter().copied());
        }
        if !self.statuses.is_empty() {
            filter = filter.with_statuses(self.statuses.iter().copied());
        }
        if !self.priorities.is_empty() {
            filter = filter.with_priorities(self.priorities.iter().copied());
        }
        filter
    }
}

/// Execute the compliance subcommand.
pub fn run_compliance(args: &ComplianceArgs, ctx: &RunContext) -> Result<u8> {
    let dataset = ctx.compliance_dataset()?;
    match &args.command {
        ComplianceCommand::Summary { filter, json } => {
            let view = compute_view(&dataset, &filter.to_filter(), ctx.config.benchmark());
            if *json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_summary(&view);
            }
            Ok(0)
        }
        ComplianceCommand::Export {
            format,
            filter,
            out,
        } => {
            let view = compute_view(&dataset, &filter.to_filter(), ctx.config.benchmark());
            let dir = out.clone().unwrap_or_else(|| ctx.output_dir.clone());
            let date = chrono::Local::now().date_naive();
            let path = match format {
                ExportFormat::Csv => write_csv_file(&dir, date, &view.records),
                ExportFormat::Xlsx => {
                    let rows: Vec<_> = view.records.iter().collect();
                    write_xlsx_file(&dir, date, &rows)
                }
            }
            .with_context(|| format!("failed to export to {}", dir.display()))?;
            println!("  records:  {}", view.records.len());
            println!("  written:  {}", path.display());
            Ok(0)
        }
    }
}

fn print_summary(view: &ComplianceView) {
    let m = &view.metrics;
    println!("IG-SEST conformity");
    println!();
    println!("  questions:       {}", m.total);
    println!("  conforming:      {}", m.conforming);
    println!("  non-conforming:  {}", m.non_conforming);
    println!("  rate:            {:.1}%", m.rate);
    println!(
        "  EBSERH:          {:.2}% (delta {:+.1} pp)",
        view.benchmark.benchmark, view.benchmark.delta
    );
    println!();

    if !view.dimensions.is_empty() {
        println!("  {:<26} {:>6} {:>6} {:>7}", "dimension", "total", "conf.", "rate");
        for d in &view.dimensions {
            println!(
                "  {:<26} {:>6} {:>6} {:>6.1}%",
                d.dimension.label(),
                d.metrics.total,
                d.metrics.conforming,
                d.metrics.rate
            );
        }
        println!();
    }

    println!("  non-conformities by priority:");
    for c in &view.non_conformities_by_priority {
        println!("    {:<6} {}", c.priority.label(), c.count);
    }

    if !view.high_priority_gaps.is_empty() {
        println!();
        println!("  high-priority gaps:");
        for r in &view.high_priority_gaps {
            println!("    {:<4} {} ({})", r.id, r.description, r.dimension);
        }
    }
}
