//! call_graph_edges, import_graph_edges (spec.md 4.4.3), materialized by
//! the resolver from resolved calls/imports.

use auditor_core::errors::StorageError;
use auditor_core::traits::storage::{CallGraphEdgeRow, ImportGraphEdgeRow};
use rusqlite::{params, Connection};

const CALL_EDGE_COLUMNS: &str = "caller_scope, callee_scope, call_site_file, call_site_line";

fn map_call_edge(row: &rusqlite::Row<'_>) -> rusqlite::Result<CallGraphEdgeRow> {
    Ok(CallGraphEdgeRow {
        caller_scope: row.get(0)?,
        callee_scope: row.get(1)?,
        call_site_file: row.get(2)?,
        call_site_line: row.get(3)?,
    })
}

pub fn insert_call_graph_edges(
    conn: &Connection,
    rows: &[CallGraphEdgeRow],
) -> Result<usize, StorageError> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO call_graph_edges (caller_scope, callee_scope, call_site_file, call_site_line)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    for row in rows {
        stmt.execute(params![
            row.caller_scope, row.callee_scope, row.call_site_file, row.call_site_line
        ])?;
    }
    Ok(rows.len())
}

pub fn all_call_graph_edges(conn: &Connection) -> Result<Vec<CallGraphEdgeRow>, StorageError> {
    let mut stmt = conn.prepare_cached(&format!("SELECT {CALL_EDGE_COLUMNS} FROM call_graph_edges"))?;
    let rows = stmt.query_map([], map_call_edge)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn callers_of(conn: &Connection, callee_scope: &str) -> Result<Vec<CallGraphEdgeRow>, StorageError> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {CALL_EDGE_COLUMNS} FROM call_graph_edges WHERE callee_scope = ?1"
    ))?;
    let rows = stmt.query_map(params![callee_scope], map_call_edge)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn callees_of(conn: &Connection, caller_scope: &str) -> Result<Vec<CallGraphEdgeRow>, StorageError> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {CALL_EDGE_COLUMNS} FROM call_graph_edges WHERE caller_scope = ?1"
    ))?;
    let rows = stmt.query_map(params![caller_scope], map_call_edge)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

const IMPORT_EDGE_COLUMNS: &str = "importer_file, imported_file, line";

fn map_import_edge(row: &rusqlite::Row<'_>) -> rusqlite::Result<ImportGraphEdgeRow> {
    Ok(ImportGraphEdgeRow {
        importer_file: row.get(0)?,
        imported_file: row.get(1)?,
        line: row.get(2)?,
    })
}

pub fn insert_import_graph_edges(
    conn: &Connection,
    rows: &[ImportGraphEdgeRow],
) -> Result<usize, StorageError> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO import_graph_edges (importer_file, imported_file, line) VALUES (?1, ?2, ?3)",
    )?;
    for row in rows {
        stmt.execute(params![row.importer_file, row.imported_file, row.line])?;
    }
    Ok(rows.len())
}

pub fn all_import_graph_edges(conn: &Connection) -> Result<Vec<ImportGraphEdgeRow>, StorageError> {
    let mut stmt =
        conn.prepare_cached(&format!("SELECT {IMPORT_EDGE_COLUMNS} FROM import_graph_edges"))?;
    let rows = stmt.query_map([], map_import_edge)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}
