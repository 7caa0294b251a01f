//! # ESG Pipeline — Integration Tests
//!
//! Scorecard dataset through scoring, the pillar filter and the CSV
//! export, plus the 2014-2023 study view.

use chrono::NaiveDate;
use mejc_core::{EsgDataset, PanelError, Pillar, StudyDataset, TimeSeriesMetric};
use mejc_esg::{
    classify, compute_study_view, compute_view, export, Classification, EsgFilter,
    CRITICAL_THRESHOLD, HIGHLIGHT_THRESHOLD, RATIO_MAX, RATIO_MIN,
};

// ---------------------------------------------------------------------------
// 1. Scorecard totals
// ---------------------------------------------------------------------------

#[test]
fn embedded_scorecard_composite_is_good() {
    let ds = EsgDataset::embedded().unwrap();
    let view = compute_view(&ds, &EsgFilter::all());

    let composite = view.composite.unwrap();
    assert!((composite.score - 84.89129153).abs() < 1e-6);
    assert_eq!(composite.classification, Classification::Good);

    for s in &view.indicators {
        assert!((RATIO_MIN..=RATIO_MAX).contains(&s.performance));
        assert_eq!(s.classification, classify(s.performance));
    }
    assert!(view.critical.iter().all(|s| s.performance < CRITICAL_THRESHOLD));
    assert!(view
        .highlights
        .iter()
        .all(|s| s.performance >= HIGHLIGHT_THRESHOLD));
}

#[test]
fn composite_is_mean_of_selected_pillars() {
    let ds = EsgDataset::embedded().unwrap();
    let filter = EsgFilter::all().with_pillars([Pillar::Environmental, Pillar::Governance]);
    let view = compute_view(&ds, &filter);

    assert_eq!(view.pillar_scores.len(), 2);
    let mean = view.pillar_scores.iter().map(|p| p.score.score).sum::<f64>() / 2.0;
    assert!((view.composite.unwrap().score - mean).abs() < 1e-9);
    assert!(view.indicators.iter().all(|s| s.indicator.pillar != Pillar::Social));

    let points = view.benchmark.unwrap();
    assert_eq!(points.len(), 2);
    for p in points {
        assert!((p.gap - (p.score - p.benchmark)).abs() < 1e-12);
    }
}

#[test]
fn empty_pillar_selection_has_no_composite() {
    let ds = EsgDataset::embedded().unwrap();
    let view = compute_view(&ds, &EsgFilter::all().with_pillars([]));
    assert!(view.indicators.is_empty());
    assert!(view.composite.is_none());
    assert!(view.evolution.is_empty());
}

// ---------------------------------------------------------------------------
// 2. Injected datasets
// ---------------------------------------------------------------------------

#[test]
fn yaml_copy_scores_identically() {
    let dir = tempfile::tempdir().unwrap();
    let ds = EsgDataset::embedded().unwrap();
    let path = dir.path().join("esg.yaml");
    std::fs::write(&path, serde_yaml::to_string(&ds).unwrap()).unwrap();

    let loaded = EsgDataset::load(&path).unwrap();
    assert_eq!(
        compute_view(&loaded, &EsgFilter::all()),
        compute_view(&ds, &EsgFilter::all())
    );
}

#[test]
fn negative_target_aborts_loading() {
    let dir = tempfile::tempdir().unwrap();
    let ds = EsgDataset::embedded().unwrap();
    let mut json = serde_json::to_value(&ds).unwrap();
    json["indicators"][0]["target"] = serde_json::json!(-1.0);
    let path = dir.path().join("esg.json");
    std::fs::write(&path, serde_json::to_vec(&json).unwrap()).unwrap();

    let err = EsgDataset::load(&path).unwrap_err();
    assert!(matches!(err, PanelError::DatasetValidation(_)), "{err}");
}

// ---------------------------------------------------------------------------
// 3. Indicator export
// ---------------------------------------------------------------------------

#[test]
fn export_of_filtered_indicators() {
    let dir = tempfile::tempdir().unwrap();
    let ds = EsgDataset::embedded().unwrap();
    let view = compute_view(&ds, &EsgFilter::all().with_pillars([Pillar::Social]));
    let at = NaiveDate::from_ymd_opt(2025, 3, 7)
        .unwrap()
        .and_hms_opt(9, 5, 0)
        .unwrap();

    let path =
        export::write_csv_file(dir.path(), at, &view.reference_period, &view.indicators).unwrap();
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "indicadores_esg_20250307_0905.csv"
    );

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(headers.len(), 6);
    assert_eq!(&headers[3], format!("Meta_{}", view.reference_period));
    let rows: Vec<csv::StringRecord> = rdr.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), view.indicators.len());
    assert!(rows.iter().all(|r| &r[0] == "Social"));
}

// ---------------------------------------------------------------------------
// 4. Study view
// ---------------------------------------------------------------------------

#[test]
fn study_view_reports_cited_composite() {
    let study = StudyDataset::embedded().unwrap();
    let view = compute_study_view(&study);

    let reported = view.reported_composite.unwrap();
    assert!((reported.score - 49.3).abs() < 1e-9);
    assert_eq!(reported.classification, Classification::Attention);
    assert_eq!(view.trends.len(), TimeSeriesMetric::all().len());

    let staff = view
        .trends
        .iter()
        .find(|t| t.metric == TimeSeriesMetric::Employees)
        .unwrap();
    assert_eq!((staff.first_year, staff.last_year), (2014, 2023));
    assert_eq!((staff.first, staff.last), (307.0, 785.0));
}
