use std::fs;
use std::path::Path;

use segcast_forecast::{
    DirectoryModelSource, ExecutionMode, ForecastEngine, ForecastRequest, HierarchySpec,
    LinearExogModel, ModelArtifact, RecursiveLagModel, ReportExporter, SegmentOutcome,
    WarningKind,
};

fn write_artifact(dir: &Path, name: &str, artifact: &ModelArtifact) {
    fs::write(dir.join(name), artifact.to_json_bytes().unwrap()).unwrap();
}

fn hierarchy() -> HierarchySpec {
    HierarchySpec::from_json(
        br#"{"segments":[
            {"id":"INDUSTRIA","kind":"total"},
            {"id":"ACEROS","kind":"detail"},
            {"id":"SALES","kind":"total"},
            {"id":"QUIMICOS","kind":"total"}
        ]}"#,
    )
    .unwrap()
}

#[test]
fn serves_a_model_directory_end_to_end() {
    let dir = tempfile::tempdir().unwrap();

    write_artifact(
        dir.path(),
        "forecaster_INDUSTRIA.json",
        &ModelArtifact::LinearExog(LinearExogModel {
            intercept: 1234.5,
            business_days_coef: 0.0,
            budget_coef: 0.0,
        }),
    );
    write_artifact(
        dir.path(),
        "forecaster_ACEROS.json",
        &ModelArtifact::RecursiveLag(RecursiveLagModel {
            intercept: 10.0,
            lag_coefs: vec![0.5],
            last_window: vec![200.0],
            business_days_coef: 2.0,
            budget_coef: 1.0,
        }),
    );
    // Corrupt artifact: warned at load, then reported as unavailable.
    fs::write(dir.path().join("forecaster_SALES.json"), b"\x80\x04joblib").unwrap();
    fs::write(dir.path().join("README.txt"), b"models trained 2025-06").unwrap();

    let source = DirectoryModelSource::new(dir.path());
    let (engine, load_warnings) = ForecastEngine::load(&source, hierarchy()).unwrap();
    assert_eq!(load_warnings.len(), 1);
    assert_eq!(load_warnings[0].artifact, "forecaster_SALES.json");

    let engine = engine.with_mode(ExecutionMode::Parallel);
    let request = ForecastRequest::new(2025, 6, 2, 5, 500.0).unwrap();
    let out = engine.forecast(&request).unwrap();

    let labels: Vec<&str> = out.report.labels().collect();
    assert_eq!(labels, vec!["INDUSTRIA", "    - ACEROS", "SALES", "QUIMICOS"]);
    assert_eq!(out.report.rows[0].outcome, SegmentOutcome::Predicted { value: 1234.5 });
    // 10 + 0.5*200 + 2*5 + 1*500
    assert_eq!(out.report.rows[1].outcome, SegmentOutcome::Predicted { value: 620.0 });
    assert_eq!(out.report.rows[2].outcome, SegmentOutcome::Unavailable);
    assert_eq!(out.report.rows[3].outcome, SegmentOutcome::Unavailable);
    assert!(out.warnings.iter().all(|w| w.kind == WarningKind::Unavailable));

    let artifact = engine.export(&out.report).unwrap();
    assert_eq!(artifact.file_name, "forecast_Y2025_M6_W2.csv");

    let parsed = ReportExporter::new().parse(&artifact.bytes).unwrap();
    let cells: Vec<(&str, &str)> = parsed
        .iter()
        .map(|r| (r.label.as_str(), r.value.as_str()))
        .collect();
    assert_eq!(
        cells,
        vec![
            ("INDUSTRIA", "1,234.50"),
            ("    - ACEROS", "620.00"),
            ("SALES", "N/A"),
            ("QUIMICOS", "N/A"),
        ]
    );
}

#[test]
fn missing_model_directory_refuses_to_start() {
    let dir = tempfile::tempdir().unwrap();
    let source = DirectoryModelSource::new(dir.path().join("mejores_modelos"));
    assert!(ForecastEngine::load(&source, HierarchySpec::builtin()).is_err());
}
