//! Schema DDL generation and the digest check (spec.md 4.3, 8 test 6).
//!
//! `ensure_schema` is idempotent: on a fresh database it creates every
//! table/index from `auditor_core::schema::SCHEMA` and records the
//! current digest in `_schema_meta`; on an existing database it compares
//! the recorded digest against `schema_digest()` and fails loud
//! (`StorageError::SchemaDigestMismatch`) on mismatch, since the fact
//! base was written by a different schema shape and cannot be trusted.
//!
//! Pattern reference: `drift-core/src/workspace/migration.rs`.

use auditor_core::errors::StorageError;
use auditor_core::schema::{schema_digest, TableDef, SCHEMA, SCHEMA_VERSION};
use rusqlite::Connection;

const DIGEST_KEY: &str = "schema_digest";
const VERSION_KEY: &str = "schema_version";

fn create_table_sql(table: &TableDef) -> String {
    let mut cols = Vec::with_capacity(table.columns.len());
    for col in table.columns {
        let null_clause = if col.nullable { "" } else { " NOT NULL" };
        cols.push(format!("{} {}{}", col.name, col.ty.sql_type(), null_clause));
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({}) STRICT;",
        table.name,
        cols.join(", ")
    )
}

fn create_index_sql(table: &TableDef) -> Vec<String> {
    table
        .indices
        .iter()
        .map(|cols| {
            let idx_name = format!("idx_{}_{}", table.name, cols.join("_"));
            format!(
                "CREATE INDEX IF NOT EXISTS {} ON {} ({});",
                idx_name,
                table.name,
                cols.join(", ")
            )
        })
        .collect()
}

/// Render the full DDL for the declarative schema. Exposed for tooling
/// that wants to inspect or dump it without opening a connection.
pub fn render_ddl() -> String {
    let mut sql = String::new();
    for table in SCHEMA {
        sql.push_str(&create_table_sql(table));
        sql.push('\n');
        for idx in create_index_sql(table) {
            sql.push_str(&idx);
            sql.push('\n');
        }
    }
    sql
}

/// Create the schema if missing, then check (or, on first run, record)
/// the schema digest in `_schema_meta`.
pub fn ensure_schema(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(&render_ddl())?;

    let recorded: Option<String> = conn
        .query_row(
            "SELECT value FROM _schema_meta WHERE key = ?1",
            [DIGEST_KEY],
            |row| row.get(0),
        )
        .ok();

    let current_digest = schema_digest().to_string();

    match recorded {
        None => {
            conn.execute(
                "INSERT INTO _schema_meta (key, value) VALUES (?1, ?2)",
                rusqlite::params![DIGEST_KEY, current_digest],
            )?;
            conn.execute(
                "INSERT INTO _schema_meta (key, value) VALUES (?1, ?2)",
                rusqlite::params![VERSION_KEY, SCHEMA_VERSION.to_string()],
            )?;
            Ok(())
        }
        Some(found) if found == current_digest => Ok(()),
        Some(found) => Err(StorageError::SchemaDigestMismatch {
            expected: current_digest,
            found,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_database_records_digest() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        let value: String = conn
            .query_row(
                "SELECT value FROM _schema_meta WHERE key = 'schema_digest'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(value, schema_digest().to_string());
    }

    #[test]
    fn reopening_with_matching_digest_succeeds() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        ensure_schema(&conn).unwrap();
    }

    #[test]
    fn mismatched_digest_is_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn.execute(
            "UPDATE _schema_meta SET value = 'not-a-real-digest' WHERE key = 'schema_digest'",
            [],
        )
        .unwrap();
        let err = ensure_schema(&conn).unwrap_err();
        assert!(matches!(err, StorageError::SchemaDigestMismatch { .. }));
    }

    #[test]
    fn every_declared_table_exists_after_ensure_schema() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        for table in SCHEMA {
            let count: i64 = conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table.name), [], |row| {
                    row.get(0)
                })
                .unwrap_or_else(|_| panic!("table {} should exist", table.name));
            assert_eq!(count, 0);
        }
    }
}
