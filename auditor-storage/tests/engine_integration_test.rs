//! `FactStorageEngine` integration tests exercising the full
//! insert → batch-write → read path against a real file-backed fact
//! base (spec.md 4.3, 4.4, 4.5.7). In-memory SQLite databases are each
//! their own universe, so these need a TempDir to let the writer,
//! reader pool, and batch-writer connections all see the same file.

use auditor_core::traits::storage::{
    CallRow, FileBatch, FileRow, FindingRow, IBatchWriter, IFactCalls, IFactFiles, IFactFindings,
    IFactSymbols, SymbolRow,
};
use auditor_storage::FactStorageEngine;
use tempfile::TempDir;

fn temp_engine() -> (TempDir, FactStorageEngine) {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("test.db");
    let engine = FactStorageEngine::open(&db_path).unwrap();
    (dir, engine)
}

#[test]
fn file_metadata_round_trips_through_direct_insert() {
    let (_dir, engine) = temp_engine();

    assert!(engine.load_all_files().unwrap().is_empty());

    engine
        .insert_files(&[FileRow {
            path: "src/main.rs".to_string(),
            language: "rust".to_string(),
            sha256: "abc123".to_string(),
            size_bytes: 1024,
            line_count: 42,
        }])
        .unwrap();

    let files = engine.load_all_files().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path, "src/main.rs");
    assert_eq!(files[0].size_bytes, 1024);
}

#[test]
fn batch_writer_commits_a_full_file_batch_atomically() {
    let (_dir, engine) = temp_engine();

    let batch = FileBatch {
        file: FileRow {
            path: "a.py".to_string(),
            language: "python".to_string(),
            sha256: "sha".to_string(),
            size_bytes: 10,
            line_count: 1,
        },
        symbols: vec![SymbolRow {
            file: "a.py".to_string(),
            name: "handler".to_string(),
            kind: "function".to_string(),
            line: 1,
            column: 0,
            scope: "a.py::handler".to_string(),
            signature: None,
        }],
        calls: vec![CallRow {
            file: "a.py".to_string(),
            caller_scope: "a.py::handler".to_string(),
            callee_name: "helper".to_string(),
            callee_resolved: None,
            line: 2,
            argument_index: 0,
            argument_expression: "request.args.get('q')".to_string(),
            argument_kind: "call".to_string(),
        }],
        ..Default::default()
    };

    engine.enqueue_file_batch(batch).unwrap();
    let stats = engine.flush_sync().unwrap();

    assert_eq!(stats.files, 1);
    assert_eq!(stats.symbols, 1);
    assert_eq!(stats.calls, 1);
    assert_eq!(engine.symbols_for_file("a.py").unwrap().len(), 1);
    assert_eq!(engine.calls_for_file("a.py").unwrap().len(), 1);
}

#[test]
fn re_enqueuing_a_file_batch_replaces_prior_rows() {
    let (_dir, engine) = temp_engine();

    let file = FileRow {
        path: "a.py".to_string(),
        language: "python".to_string(),
        sha256: "v1".to_string(),
        size_bytes: 10,
        line_count: 1,
    };
    engine
        .enqueue_file_batch(FileBatch {
            file: file.clone(),
            symbols: vec![SymbolRow {
                file: "a.py".to_string(),
                name: "old_fn".to_string(),
                kind: "function".to_string(),
                line: 1,
                column: 0,
                scope: "a.py::old_fn".to_string(),
                signature: None,
            }],
            ..Default::default()
        })
        .unwrap();
    engine.flush_sync().unwrap();

    engine
        .enqueue_file_batch(FileBatch {
            file: FileRow {
                sha256: "v2".to_string(),
                ..file
            },
            symbols: vec![SymbolRow {
                file: "a.py".to_string(),
                name: "new_fn".to_string(),
                kind: "function".to_string(),
                line: 1,
                column: 0,
                scope: "a.py::new_fn".to_string(),
                signature: None,
            }],
            ..Default::default()
        })
        .unwrap();
    engine.flush_sync().unwrap();

    let symbols = engine.symbols_for_file("a.py").unwrap();
    assert_eq!(symbols.len(), 1, "replace semantics: only the latest row-set survives");
    assert_eq!(symbols[0].name, "new_fn");
    assert_eq!(engine.get_file("a.py").unwrap().unwrap().sha256, "v2");
}

#[test]
fn findings_enqueued_through_batch_writer_are_queryable() {
    let (_dir, engine) = temp_engine();

    engine
        .enqueue_findings(vec![FindingRow {
            id: "f1".to_string(),
            category: "sqli".to_string(),
            severity: "high".to_string(),
            source_file: "routes.py".to_string(),
            source_line: 10,
            source_kind: "route_param".to_string(),
            access_path_start: "request.args.q".to_string(),
            sink_file: "db.py".to_string(),
            sink_line: 30,
            sink_kind: "sql_exec".to_string(),
            vulnerable_argument_index: 0,
            provenance_json: "[]".to_string(),
            sanitizers_json: "[]".to_string(),
            confidence: "high".to_string(),
            rule_id: None,
            truncated: false,
            forward_verified: true,
            created_at: 0,
        }])
        .unwrap();

    let stats = engine.flush_sync().unwrap();
    assert_eq!(stats.findings, 1);
    assert_eq!(engine.count_findings().unwrap(), 1);
    assert_eq!(engine.findings_for_sink_file("db.py").unwrap().len(), 1);
}
