//! # Regression CLI
//!
//! ```bash
//! # Fit every admissible form to two columns of a CSV file:
//! mejc regress fit --data wage2.csv --x IQ --y wage
//!
//! # One form, with a prediction at x = 6000:
//! mejc regress fit --data meap93.json --x expend --y math10 --form level-log --predict 6000
//!
//! # Generate and fit a course exercise:
//! mejc regress simulate rd-sales --seed 7 --csv rd.csv
//! ```
//!
//! Data files are CSV with a header row, or JSON holding an array of
//! objects. Every row must have a finite number in both columns.
//!
//! The reported normal-equation check is run on the same transformed
//! variables as the best model, so a log-log fit is verified in logs.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use mejc_stats::{
    best_by_r_squared, describe_named, fit_all_forms, fit_form_named, simulate, verify_form,
    Exercise, FitVerification, FunctionalForm, RegressionModel, Summary, DEFAULT_SEED,
};

use crate::config::RunContext;

/// Agreement required between the two slope computations.
const VERIFY_TOLERANCE: f64 = 1e-9;

/// Regression subcommand arguments.
#[derive(Args, Debug)]
pub struct RegressArgs {
    #[command(subcommand)]
    pub command: RegressCommand,
}

/// Available regression subcommands.
#[derive(Subcommand, Debug)]
pub enum RegressCommand {
    /// Fit y on x from a data file.
    Fit {
        /// CSV or JSON data file.
        #[arg(long)]
        data: PathBuf,

        /// Regressor column.
        #[arg(long)]
        x: String,

        /// Response column.
        #[arg(long)]
        y: String,

        /// Functional form; all admissible forms are fitted when omitted.
        #[arg(long)]
        form: Option<FunctionalForm>,

        /// Predict y at this x with the chosen (or best) model.
        #[arg(long)]
        predict: Option<f64>,

        /// Emit the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate a seeded course sample and fit its form.
    Simulate {
        /// Exercise to generate.
        exercise: Exercise,

        /// RNG seed.
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Also write the sample to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Emit the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Fit report for one `(x, y)` pair.
#[derive(Debug, Serialize)]
pub struct FitReport {
    pub x_name: String,
    pub y_name: String,
    pub x_summary: Summary,
    pub y_summary: Summary,
    pub models: Vec<RegressionModel>,
    /// Form with the highest R².
    pub best: FunctionalForm,
    /// Normal-equation cross-check of the `best` model.
    pub verification: FitVerification,
    pub prediction: Option<Prediction>,
}

/// A prediction in original units.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Prediction {
    pub form: FunctionalForm,
    pub x: f64,
    pub y: f64,
}

/// Build the fit report.
pub fn fit_report(
    x: &[f64],
    y: &[f64],
    x_name: &str,
    y_name: &str,
    form: Option<FunctionalForm>,
    predict_at: Option<f64>,
) -> Result<FitReport> {
    let models = match form {
        Some(f) => vec![fit_form_named(f, x, y, x_name, y_name)?],
        None => fit_all_forms(x, y)?,
    };
    let best = *best_by_r_squared(&models).context("no functional form could be fitted")?;
    let verification = verify_form(best.form, x, y)?;
    if !verification.agrees(VERIFY_TOLERANCE) {
        tracing::warn!(
            form = %best.form,
            difference = verification.relative_difference(),
            "closed-form and normal-equation coefficients disagree"
        );
    }
    let prediction = match predict_at {
        Some(at) => Some(Prediction {
            form: best.form,
            x: at,
            y: best.predict(at)?,
        }),
        None => None,
    };
    Ok(FitReport {
        x_name: x_name.to_string(),
        y_name: y_name.to_string(),
        x_summary: describe_named(x, x_name)?,
        y_summary: describe_named(y, y_name)?,
        best: best.form,
        models,
        verification,
        prediction,
    })
}

/// Execute the regression subcommand.
pub fn run_regress(args: &RegressArgs, ctx: &RunContext) -> Result<u8> {
    match &args.command {
        RegressCommand::Fit {
            data,
            x,
            y,
            form,
            predict,
            json,
        } => {
            // Relative to the working directory, not the config file.
            let path = data.as_path();
            let (xs, ys) = read_columns(path, x, y)?;
            tracing::info!(path = %path.display(), n = xs.len(), "loaded regression data");
            let report = fit_report(&xs, &ys, x, y, *form, *predict)
                .with_context(|| format!("regression of {y} on {x} failed"))?;
            emit(&report, *json)
        }
        RegressCommand::Simulate {
            exercise,
            seed,
            csv,
            json,
        } => {
            let sample = simulate(*exercise, *seed)?;
            if let Some(out) = csv {
                write_sample(out, &sample.x_name, &sample.y_name, &sample.x, &sample.y)?;
                tracing::info!(path = %out.display(), "wrote sample");
            }
            let report = fit_report(
                &sample.x,
                &sample.y,
                &sample.x_name,
                &sample.y_name,
                Some(exercise.form()),
                None,
            )?;
            emit(&report, *json)
        }
    }
}

fn emit(report: &FitReport, json: bool) -> Result<u8> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_report(report);
    }
    Ok(0)
}

fn print_summary_line(name: &str, s: &Summary) {
    println!(
        "  {:<10} n={} mean={:.3} sd={} min={:.3} median={:.3} max={:.3}",
        name,
        s.count,
        s.mean,
        s.std.map(|v| format!("{v:.3}")).unwrap_or_else(|| "n/a".into()),
        s.min,
        s.median,
        s.max
    );
}

fn print_report(report: &FitReport) {
    print_summary_line(&report.x_name, &report.x_summary);
    print_summary_line(&report.y_name, &report.y_summary);
    println!();
    for m in &report.models {
        let marker = if m.form == report.best { "*" } else { " " };
        println!("{marker} {}", m.form.equation(&report.x_name, &report.y_name));
        println!(
            "    β₀ = {:.6}  β₁ = {:.6}  R² = {:.4}  n = {}",
            m.fit.intercept, m.fit.slope, m.fit.r_squared, m.fit.n
        );
        println!(
            "    {}",
            m.interpretation.describe(&report.x_name, &report.y_name)
        );
    }
    println!();
    println!(
        "  normal equations ({}): β₁ = {:.6} (relative difference {:.2e})",
        report.best,
        report.verification.normal_equation_slope,
        report.verification.relative_difference()
    );
    if let Some(p) = &report.prediction {
        println!(
            "  predicted {} at {} = {}: {:.4} ({})",
            report.y_name, report.x_name, p.x, p.y, p.form
        );
    }
}

/// Read two numeric columns from a CSV or JSON file.
pub fn read_columns(path: &Path, x: &str, y: &str) -> Result<(Vec<f64>, Vec<f64>)> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("csv") => read_csv_columns(path, x, y),
        Some("json") => read_json_columns(path, x, y),
        _ => bail!(
            "unsupported data file {}: expected .csv or .json",
            path.display()
        ),
    }
}

fn read_csv_columns(path: &Path, x: &str, y: &str) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("column {name:?} not found in {}", path.display()))
    };
    let (xi, yi) = (column(x)?, column(y)?);

    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("bad CSV row {}", row + 1))?;
        xs.push(parse_cell(record.get(xi), x, row)?);
        ys.push(parse_cell(record.get(yi), y, row)?);
    }
    Ok((xs, ys))
}

fn parse_cell(cell: Option<&str>, column: &str, row: usize) -> Result<f64> {
    let cell = cell.with_context(|| format!("row {} has no {column} value", row + 1))?;
    cell.trim()
        .parse::<f64>()
        .with_context(|| format!("row {}: {column} = {cell:?} is not a number", row + 1))
}

fn read_json_columns(path: &Path, x: &str, y: &str) -> Result<(Vec<f64>, Vec<f64>)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let rows: Vec<serde_json::Map<String, serde_json::Value>> = serde_json::from_str(&text)
        .with_context(|| format!("{} must hold an array of objects", path.display()))?;
    let field = |row: &serde_json::Map<String, serde_json::Value>, name: &str, i: usize| {
        row.get(name)
            .and_then(serde_json::Value::as_f64)
            .with_context(|| format!("row {}: {name} missing or not a number", i + 1))
    };
    let mut xs = Vec::with_capacity(rows.len());
    let mut ys = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        xs.push(field(row, x, i)?);
        ys.push(field(row, y, i)?);
    }
    Ok((xs, ys))
}

fn write_sample(path: &Path, x_name: &str, y_name: &str, x: &[f64], y: &[f64]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    wtr.write_record([x_name, y_name])?;
    for (a, b) in x.iter().zip(y) {
        wtr.write_record([a.to_string(), b.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PanelConfig;
    use mejc_stats::StatsError;

    #[test]
    fn csv_columns_by_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("d.csv");
        std::fs::write(&path, "id,x,y\n1,1,7\n2,2,9\n3,3,11\n").unwrap();
        let (x, y) = read_columns(&path, "x", "y").unwrap();
        assert_eq!(x, vec![1.0, 2.0, 3.0]);
        assert_eq!(y, vec![7.0, 9.0, 11.0]);
    }

    #[test]
    fn json_columns_by_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("d.json");
        std::fs::write(&path, r#"[{"a":1,"b":2.5},{"a":2,"b":3.5}]"#).unwrap();
        let (x, y) = read_columns(&path, "a", "b").unwrap();
        assert_eq!(x, vec![1.0, 2.0]);
        assert_eq!(y, vec![2.5, 3.5]);
    }

    #[test]
    fn missing_column_and_bad_cell_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("d.csv");
        std::fs::write(&path, "x,y\n1,abc\n").unwrap();
        let err = read_columns(&path, "x", "z").unwrap_err();
        assert!(format!("{err:#}").contains("\"z\""));
        let err = read_columns(&path, "x", "y").unwrap_err();
        assert!(format!("{err:#}").contains("abc"));
    }

    #[test]
    fn unsupported_extension() {
        assert!(read_columns(Path::new("data.xlsx"), "x", "y").is_err());
    }

    #[test]
    fn report_on_exact_line() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [7.0, 9.0, 11.0, 13.0, 15.0];
        let r = fit_report(&x, &y, "x", "y", Some(FunctionalForm::LevelLevel), Some(6.0)).unwrap();
        assert_eq!(r.models.len(), 1);
        assert!((r.models[0].fit.slope - 2.0).abs() < 1e-12);
        assert!(r.verification.agrees(VERIFY_TOLERANCE));
        assert!((r.prediction.unwrap().y - 17.0).abs() < 1e-9);
    }

    #[test]
    fn verification_follows_the_reported_form() {
        let x: Vec<f64> = (1..=20).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|v| 3.0 * v.powf(0.76)).collect();
        let r = fit_report(&x, &y, "x", "y", Some(FunctionalForm::LogLog), None).unwrap();
        assert_eq!(r.best, FunctionalForm::LogLog);
        assert_eq!(r.verification.closed_form_slope, r.models[0].fit.slope);
        assert!((r.verification.normal_equation_slope - 0.76).abs() < 1e-9);

        let all = fit_report(&x, &y, "x", "y", None, None).unwrap();
        let best = all.models.iter().find(|m| m.form == all.best).unwrap();
        assert_eq!(all.verification.closed_form_slope, best.fit.slope);
    }

    #[test]
    fn data_path_ignores_config_directory() {
        let config_dir = tempfile::tempdir().unwrap();
        let name = "mejc-points-only-beside-config.csv";
        std::fs::write(config_dir.path().join(name), "x,y
1,2
2,4
3,7
").unwrap();
        let ctx = RunContext::new(PanelConfig::default(), config_dir.path().to_path_buf(), None);

        let relative = RegressArgs {
            command: RegressCommand::Fit {
                data: PathBuf::from(name),
                x: "x".into(),
                y: "y".into(),
                form: None,
                predict: None,
                json: true,
            },
        };
        let err = run_regress(&relative, &ctx).unwrap_err();
        assert!(format!("{err:#}").contains("failed to open"));

        let absolute = RegressArgs {
            command: RegressCommand::Fit {
                data: config_dir.path().join(name),
                x: "x".into(),
                y: "y".into(),
                form: None,
                predict: None,
                json: true,
            },
        };
        assert_eq!(run_regress(&absolute, &ctx).unwrap(), 0);
    }

    #[test]
    fn constant_regressor_surfaces_undefined_slope() {
        let err = fit_report(&[3.0; 4], &[1.0, 2.0, 3.0, 4.0], "x", "y", None, None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StatsError>(),
            Some(StatsError::UndefinedSlope { .. })
        ));
    }

    #[test]
    fn simulate_writes_sample_csv_that_fit_can_read() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("rd.csv");
        let ctx = RunContext::new(PanelConfig::default(), dir.path().to_path_buf(), None);
        let args = RegressArgs {
            command: RegressCommand::Simulate {
                exercise: Exercise::RdSales,
                seed: 7,
                csv: Some(out.clone()),
                json: true,
            },
        };
        assert_eq!(run_regress(&args, &ctx).unwrap(), 0);

        let (x, y) = read_columns(&out, "sales", "rd").unwrap();
        assert_eq!(x.len(), 32);
        let fit = fit_args(&out);
        assert_eq!(run_regress(&fit, &ctx).unwrap(), 0);
        assert!(y.iter().all(|v| *v > 0.0));
    }

    fn fit_args(data: &Path) -> RegressArgs {
        RegressArgs {
            command: RegressCommand::Fit {
                data: data.to_path_buf(),
                x: "sales".into(),
                y: "rd".into(),
                form: Some(FunctionalForm::LogLog),
                predict: Some(500.0),
                json: false,
            },
        }
    }
}
