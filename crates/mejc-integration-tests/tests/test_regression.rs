//! # Regression — Integration Tests
//!
//! Seeded course exercises through the functional-form fitter, and the
//! CLI fit path over files on disk.

use mejc_cli::config::{PanelConfig, RunContext};
use mejc_cli::regress::{fit_report, read_columns, run_regress, RegressArgs, RegressCommand};
use mejc_stats::{
    best_by_r_squared, fit_all_forms, fit_form, fit_ols, simulate, verify_form, Exercise,
    FunctionalForm, Interpretation, StatsError, DEFAULT_SEED,
};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// 1. Seeded exercises
// ---------------------------------------------------------------------------

#[test]
fn every_exercise_is_reproducible_and_fits_its_form() {
    for exercise in Exercise::all() {
        let a = simulate(*exercise, DEFAULT_SEED).unwrap();
        let b = simulate(*exercise, DEFAULT_SEED).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), exercise.sample_size());

        let model = fit_form(exercise.form(), &a.x, &a.y).unwrap();
        assert_eq!(model.fit.n, exercise.sample_size());
        assert!((0.0..=1.0).contains(&model.r_squared()));
        let check = verify_form(exercise.form(), &a.x, &a.y).unwrap();
        assert_eq!(check.closed_form_slope, model.fit.slope);
        assert!(check.agrees(1e-8));
    }
}

#[test]
fn rd_sales_elasticity_is_reported_as_such() {
    let sample = simulate(Exercise::RdSales, DEFAULT_SEED).unwrap();
    let model = fit_form(FunctionalForm::LogLog, &sample.x, &sample.y).unwrap();
    match model.interpretation {
        Interpretation::Elasticity { elasticity, .. } => {
            assert_eq!(elasticity, model.fit.slope);
        }
        other => panic!("unexpected interpretation {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// 2. Degenerate inputs
// ---------------------------------------------------------------------------

#[test]
fn exact_line_recovered() {
    let x: Vec<f64> = (1..=20).map(f64::from).collect();
    let y: Vec<f64> = x.iter().map(|v| 3.0 + 0.5 * v).collect();
    let models = fit_all_forms(&x, &y).unwrap();
    assert_eq!(models.len(), 4);

    let best = best_by_r_squared(&models).unwrap();
    assert_eq!(best.form, FunctionalForm::LevelLevel);
    assert!((best.fit.slope - 0.5).abs() < 1e-12);
    assert!((best.fit.intercept - 3.0).abs() < 1e-12);
    assert!((best.r_squared() - 1.0).abs() < 1e-12);
}

#[test]
fn constant_regressor_is_rejected() {
    let err = fit_form(FunctionalForm::LevelLevel, &[2.0; 5], &[1.0, 2.0, 3.0, 4.0, 5.0])
        .unwrap_err();
    assert!(matches!(err, StatsError::UndefinedSlope { .. }));
}

#[test]
fn flat_response_and_huge_regressor() {
    let flat = fit_ols(&[1.0, 2.0, 3.0, 4.0], &[0.1; 4]).unwrap();
    assert_eq!(flat.r_squared, 1.0);
    assert_eq!(flat.slope, 0.0);

    assert!(matches!(
        fit_ols(&[1.7e308, 1.6e308, 1.5e308], &[1.0, 2.0, 3.0]),
        Err(StatsError::NumericOverflow { .. })
    ));
}

#[test]
fn logs_of_non_positive_values_are_skipped_when_fitting_all() {
    let x = [-1.0, 0.0, 1.0, 2.0];
    let y = [1.0, 2.0, 3.0, 4.0];
    assert!(matches!(
        fit_form(FunctionalForm::LevelLog, &x, &y),
        Err(StatsError::NonPositiveLog { .. })
    ));
    let forms: Vec<_> = fit_all_forms(&x, &y).unwrap().iter().map(|m| m.form).collect();
    assert_eq!(forms, vec![FunctionalForm::LevelLevel, FunctionalForm::LogLevel]);
}

// ---------------------------------------------------------------------------
// 3. CLI fit over files
// ---------------------------------------------------------------------------

#[test]
fn simulated_sample_written_then_refitted_from_csv() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("wage.csv");
    let ctx = RunContext::new(PanelConfig::default(), dir.path().to_path_buf(), None);

    let args = RegressArgs {
        command: RegressCommand::Simulate {
            exercise: Exercise::WageIq,
            seed: DEFAULT_SEED,
            csv: Some(csv_path.clone()),
            json: true,
        },
    };
    assert_eq!(run_regress(&args, &ctx).unwrap(), 0);

    let sample = simulate(Exercise::WageIq, DEFAULT_SEED).unwrap();
    let (x, y) = read_columns(&csv_path, &sample.x_name, &sample.y_name).unwrap();
    assert_eq!(x.len(), sample.len());

    let report = fit_report(
        &x,
        &y,
        &sample.x_name,
        &sample.y_name,
        Some(FunctionalForm::LevelLevel),
        Some(100.0),
    )
    .unwrap();
    let direct = fit_form(FunctionalForm::LevelLevel, &sample.x, &sample.y).unwrap();
    assert!((report.models[0].fit.slope - direct.fit.slope).abs() < 1e-6);
    assert_eq!(report.prediction.unwrap().form, FunctionalForm::LevelLevel);
}

#[test]
fn fit_command_reads_absolute_data_path() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("points.json"),
        r#"[{"x":1,"y":2},{"x":2,"y":4.1},{"x":3,"y":5.9},{"x":4,"y":8.2}]"#,
    )
    .unwrap();
    let elsewhere = tempfile::tempdir().unwrap();
    let ctx = RunContext::new(PanelConfig::default(), elsewhere.path().to_path_buf(), None);
    let args = RegressArgs {
        command: RegressCommand::Fit {
            data: dir.path().join("points.json"),
            x: "x".into(),
            y: "y".into(),
            form: None,
            predict: Some(5.0),
            json: false,
        },
    };
    assert_eq!(run_regress(&args, &ctx).unwrap(), 0);
}

#[test]
fn fit_command_reports_missing_column() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("d.csv"), "a,b\n1,2\n2,3\n").unwrap();
    let ctx = RunContext::new(PanelConfig::default(), dir.path().to_path_buf(), None);
    let args = RegressArgs {
        command: RegressCommand::Fit {
            data: dir.path().join("d.csv"),
            x: "a".into(),
            y: "missing".into(),
            form: None,
            predict: None,
            json: true,
        },
    };
    let err = run_regress(&args, &ctx).unwrap_err();
    assert!(format!("{err:#}").contains("missing"));
}

// ---------------------------------------------------------------------------
// 4. Property: seeds never leave the admissible domain
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn any_seed_admits_the_exercise_form(seed in any::<u64>()) {
        for exercise in Exercise::all() {
            let sample = simulate(*exercise, seed).unwrap();
            prop_assert!(fit_form(exercise.form(), &sample.x, &sample.y).is_ok());
        }
    }
}
