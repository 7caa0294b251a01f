//! # ESG CLI
//!
//! ```bash
//! mejc esg scores --benchmark
//! mejc esg scores --pillar social --pillar governance --json
//! mejc esg trends
//! mejc esg export --pillar environmental --out reports/
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use mejc_core::Pillar;
use mejc_esg::{compute_study_view, compute_view, export, EsgFilter, EsgView, StudyView};

use crate::config::RunContext;

/// ESG subcommand arguments.
#[derive(Args, Debug)]
pub struct EsgArgs {
    #[command(subcommand)]
    pub command: EsgCommand,
}

/// Available ESG subcommands.
#[derive(Subcommand, Debug)]
pub enum EsgCommand {
    /// Print indicator, pillar and composite scores.
    Scores {
        /// Pillar to include; repeatable. Defaults to all three.
        #[arg(long = "pillar")]
        pillars: Vec<Pillar>,

        /// Compare pillar scores with the market benchmark.
        #[arg(long)]
        benchmark: bool,

        /// Emit the full view as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print 2014-2023 study trends, reported scores and cited correlations.
    Trends {
        /// Emit the study view as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Write the selected indicators to a timestamped CSV file.
    Export {
        /// Pillar to include; repeatable. Defaults to all three.
        #[arg(long = "pillar")]
        pillars: Vec<Pillar>,

        /// Target directory (defaults to --output-dir).
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn filter_for(pillars: &[Pillar], benchmark: bool) -> EsgFilter {
    let filter = EsgFilter::all().with_benchmark(benchmark);
    if pillars.is_empty() {
        filter
    } else {
        filter.with_pillars(pillars.iter().copied())
    }
}

/// Execute the ESG subcommand.
pub fn run_esg(args: &EsgArgs, ctx: &RunContext) -> Result<u8> {
    match &args.command {
        EsgCommand::Scores {
            pillars,
            benchmark,
            json,
        } => {
            let dataset = ctx.esg_dataset()?;
            let view = compute_view(&dataset, &filter_for(pillars, *benchmark));
            if *json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_scores(&view);
            }
            Ok(0)
        }
        EsgCommand::Trends { json } => {
            let study = ctx.study_dataset()?;
            let view = compute_study_view(&study);
            if *json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_trends(&view);
            }
            Ok(0)
        }
        EsgCommand::Export { pillars, out } => {
            let dataset = ctx.esg_dataset()?;
            let view = compute_view(&dataset, &filter_for(pillars, false));
            let dir = out.clone().unwrap_or_else(|| ctx.output_dir.clone());
            let at = chrono::Local::now().naive_local();
            let path = export::write_csv_file(&dir, at, &view.reference_period, &view.indicators)
                .with_context(|| format!("failed to export to {}", dir.display()))?;
            println!("  indicators:  {}", view.indicators.len());
            println!("  written:     {}", path.display());
            Ok(0)
        }
    }
}

fn print_scores(view: &EsgView) {
    println!("ESG scorecard ({})", view.reference_period);
    println!();
    match &view.composite {
        Some(c) => println!(
            "  composite:  {:.1}% ({})",
            c.score,
            c.classification.label_pt()
        ),
        None => println!("  composite:  n/a (no pillar selected)"),
    }
    for p in &view.pillar_scores {
        println!(
            "  {:<13} {:>6.1}% ({})",
            p.pillar.label_pt(),
            p.score.score,
            p.score.classification.label_pt()
        );
    }

    if let Some(points) = &view.benchmark {
        println!();
        println!("  market benchmark:");
        for b in points {
            println!(
                "    {:<13} {:>6.1}% vs {:>5.1}% ({:+.1})",
                b.pillar.label_pt(),
                b.score,
                b.benchmark,
                b.gap
            );
        }
    }

    println!();
    println!("  {:<14} {:<28} {:>10} {:>10} {:>8}", "pillar", "indicator", "current", "target", "perf.");
    for s in &view.indicators {
        let i = &s.indicator;
        println!(
            "  {:<14} {:<28} {:>10} {:>10} {:>7.1}%",
            i.pillar.as_str(),
            i.name,
            format!("{} {}", i.current, i.unit),
            format!("{} {}", i.target, i.unit),
            s.performance
        );
    }

    if !view.critical.is_empty() {
        println!();
        println!("  critical (< 75%):");
        for s in &view.critical {
            println!("    {} ({}): {:.1}%", s.indicator.name, s.indicator.pillar, s.performance);
        }
    }
    if !view.highlights.is_empty() {
        println!();
        println!("  highlights (>= 100%):");
        for s in &view.highlights {
            println!("    {} ({}): {:.1}%", s.indicator.name, s.indicator.pillar, s.performance);
        }
    }

    if !view.evolution.is_empty() {
        println!();
        println!("  monthly evolution:");
        for e in &view.evolution {
            println!(
                "    {:<13} {} {:.0} -> {} {:.0} ({:+.0})",
                e.pillar.label_pt(),
                e.first_month,
                e.first,
                e.last_month,
                e.last,
                e.change
            );
        }
    }
}

fn print_trends(view: &StudyView) {
    println!("{}", view.institution);
    println!();
    println!("  {:<34} {:>12} {:>12} {:>9}", "metric", "first", "last", "change");
    for t in &view.trends {
        let change = t
            .percent_change
            .map(|c| format!("{c:+.1}%"))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "  {:<34} {:>12} {:>12} {:>9}",
            t.metric.label(),
            format!("{} ({})", t.first, t.first_year),
            format!("{} ({})", t.last, t.last_year),
            change
        );
    }

    println!();
    println!("  reported pillar scores:");
    for p in &view.reported_pillars {
        println!(
            "    {:<13} {:>5.1} ({})",
            p.pillar.label_pt(),
            p.score.score,
            p.score.classification.label_pt()
        );
    }
    if let Some(c) = &view.reported_composite {
        println!("    {:<13} {:>5.1} ({})", "composite", c.score, c.classification.label_pt());
    }

    if !view.correlations.is_empty() {
        println!();
        println!("  cited correlations:");
        for c in &view.correlations {
            println!("    {:+.2}  {}  [{}]", c.coefficient, c.variables, c.significance);
        }
    }
}
