//! Orchestrator smoke test (spec.md 4.6, 6): running the pipeline
//! against an empty repository must succeed with zero files and zero
//! findings, exit `NoFindings`, and still write all three artifacts.

use auditor_core::PipelineConfig;
use auditor_analysis::run_pipeline_quiet;

#[test]
fn empty_repository_produces_a_clean_zero_finding_report() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_path_buf();

    let config = PipelineConfig { root_path: Some(root.clone()), ..Default::default() };

    let report = run_pipeline_quiet(config).unwrap();

    assert_eq!(report.files_indexed, 0);
    assert_eq!(report.findings_total, 0);
    assert_eq!(report.error_count, 0);
    assert_eq!(report.exit_code(), auditor_core::errors::ExitCode::NoFindings);

    let output_directory = root.join(".pf");
    assert!(output_directory.join("findings.json").is_file());
    assert!(output_directory.join("diagnostics.log").is_file());
    assert!(output_directory.join("manifest.json").is_file());
}

#[test]
fn missing_root_path_is_a_config_error() {
    let config = PipelineConfig::default();
    let result = run_pipeline_quiet(config);
    assert!(result.is_err());
}
