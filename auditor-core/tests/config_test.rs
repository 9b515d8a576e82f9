use auditor_core::config::{PipelineConfig, TaintConfig};

#[test]
fn default_max_file_bytes_is_two_mebibytes() {
    let cfg = PipelineConfig::default();
    assert_eq!(cfg.effective_max_file_bytes(), 2 * 1024 * 1024);
}

#[test]
fn default_output_directory_is_dot_pf_under_root() {
    let mut cfg = PipelineConfig::default();
    cfg.root_path = Some("/repo".into());
    assert_eq!(cfg.effective_output_directory(), std::path::PathBuf::from("/repo/.pf"));
}

#[test]
fn explicit_output_directory_overrides_default() {
    let mut cfg = PipelineConfig::default();
    cfg.root_path = Some("/repo".into());
    cfg.output_directory = Some("/tmp/out".into());
    assert_eq!(cfg.effective_output_directory(), std::path::PathBuf::from("/tmp/out"));
}

#[test]
fn empty_language_set_enables_every_language() {
    let cfg = PipelineConfig::default();
    assert!(cfg.language_enabled("python"));
    assert!(cfg.language_enabled("typescript"));
}

#[test]
fn non_empty_language_set_restricts_extraction() {
    let mut cfg = PipelineConfig::default();
    cfg.extractor_language_set = vec!["python".to_string()];
    assert!(cfg.language_enabled("python"));
    assert!(!cfg.language_enabled("javascript"));
}

#[test]
fn taint_access_path_k_is_clamped_to_documented_range() {
    let mut taint = TaintConfig::default();
    taint.access_path_k = Some(20);
    assert_eq!(taint.effective_access_path_k(), 8);
    taint.access_path_k = Some(0);
    assert_eq!(taint.effective_access_path_k(), 2);
}

#[test]
fn taint_defaults_match_spec() {
    let taint = TaintConfig::default();
    assert_eq!(taint.effective_max_worklist_entries(), 1_000_000);
    assert_eq!(taint.effective_max_worklist_entries_per_sink(), 10_000);
    assert_eq!(taint.effective_access_path_k(), 5);
    assert_eq!(taint.effective_per_entry_timeout_ms(), 500);
}
