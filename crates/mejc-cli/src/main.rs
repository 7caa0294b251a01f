//! # mejc CLI entry point
//!
//! Parses command-line arguments, initializes logging, resolves the
//! configuration and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mejc_cli::compliance::{run_compliance, ComplianceArgs};
use mejc_cli::config::{PanelConfig, RunContext};
use mejc_cli::esg::{run_esg, EsgArgs};
use mejc_cli::regress::{run_regress, RegressArgs};

/// MEJC governance panel
///
/// IG-SEST compliance metrics, ESG scorecard and econometrics exercises
/// for the Maternidade Escola Januário Cicco (UFRN).
#[derive(Parser, Debug)]
#[command(name = "mejc", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (defaults to ./mejc.yaml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output directory for exported files.
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// IG-SEST conformity reports and exports.
    Compliance(ComplianceArgs),

    /// ESG scorecard, study trends and indicator export.
    Esg(EsgArgs),

    /// Single-variable regression fits and seeded exercises.
    Regress(RegressArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "mejc starting");

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let ctx = match PanelConfig::discover(cli.config.as_deref(), &cwd) {
        Ok((config, base_dir)) => RunContext::new(config, base_dir, cli.output_dir.clone()),
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    tracing::debug!(output_dir = %ctx.output_dir.display(), "resolved run context");

    let result = match cli.command {
        Commands::Compliance(args) => run_compliance(&args, &ctx),
        Commands::Esg(args) => run_esg(&args, &ctx),
        Commands::Regress(args) => run_regress(&args, &ctx),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
