//! Schema digest mismatch (spec.md 8 test 6): a fact base opened
//! against a schema definition that no longer matches what was
//! recorded at creation time must fail loud with
//! `StorageError::SchemaDigestMismatch`, not silently proceed.

use auditor_core::errors::StorageError;
use auditor_storage::FactStorageEngine;

#[test]
fn tampered_digest_is_rejected_on_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("repo_index.db");

    {
        let engine = FactStorageEngine::open(&db_path).unwrap();
        drop(engine);
    }

    {
        let conn = rusqlite::Connection::open(&db_path).unwrap();
        conn.execute(
            "UPDATE _schema_meta SET value = ?1 WHERE key = 'schema_digest'",
            rusqlite::params!["0"],
        )
        .unwrap();
    }

    let result = FactStorageEngine::open(&db_path);
    match result {
        Err(StorageError::SchemaDigestMismatch { found, .. }) => {
            assert_eq!(found, "0");
        }
        Err(other) => panic!("expected SchemaDigestMismatch, got {other:?}"),
        Ok(_) => panic!("expected SchemaDigestMismatch, got Ok"),
    }
}

#[test]
fn fresh_fact_base_records_digest_and_reopens_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("repo_index.db");

    {
        let engine = FactStorageEngine::open(&db_path).unwrap();
        drop(engine);
    }

    // A second open against the same unmodified file must succeed: the
    // recorded digest matches the current schema exactly.
    let reopened = FactStorageEngine::open(&db_path);
    assert!(reopened.is_ok());
}
