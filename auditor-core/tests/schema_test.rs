use auditor_core::schema::{schema_digest, table_def, SCHEMA};

#[test]
fn schema_digest_is_deterministic() {
    assert_eq!(schema_digest(), schema_digest());
}

#[test]
fn every_table_has_at_least_one_column() {
    for table in SCHEMA {
        assert!(!table.columns.is_empty(), "table {} has no columns", table.name);
    }
}

#[test]
fn files_table_is_declared() {
    let files = table_def("files").expect("files table must be declared");
    assert!(files.columns.iter().any(|c| c.name == "path"));
    assert!(files.columns.iter().any(|c| c.name == "sha256"));
}

#[test]
fn unknown_table_is_not_found() {
    assert!(table_def("not_a_real_table").is_none());
}

#[test]
fn findings_consolidated_carries_confidence_and_provenance() {
    let findings = table_def("findings_consolidated").unwrap();
    let names: Vec<_> = findings.columns.iter().map(|c| c.name).collect();
    assert!(names.contains(&"confidence"));
    assert!(names.contains(&"provenance_json"));
    assert!(names.contains(&"sanitizers_json"));
}
