//! symbols, imports (spec.md 3, 4.4).

use auditor_core::errors::StorageError;
use auditor_core::traits::storage::{ImportRow, SymbolRow};
use rusqlite::{params, Connection};

fn map_symbol(row: &rusqlite::Row<'_>) -> rusqlite::Result<SymbolRow> {
    Ok(SymbolRow {
        file: row.get(0)?,
        name: row.get(1)?,
        kind: row.get(2)?,
        line: row.get(3)?,
        column: row.get(4)?,
        scope: row.get(5)?,
        signature: row.get(6)?,
    })
}

const SYMBOL_COLUMNS: &str = "file, name, type, line, column, scope, signature";

pub fn insert_symbols(conn: &Connection, rows: &[SymbolRow]) -> Result<usize, StorageError> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO symbols (file, name, type, line, column, scope, signature)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;
    for row in rows {
        stmt.execute(params![
            row.file, row.name, row.kind, row.line, row.column, row.scope, row.signature
        ])?;
    }
    Ok(rows.len())
}

pub fn symbols_for_file(conn: &Connection, file: &str) -> Result<Vec<SymbolRow>, StorageError> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {SYMBOL_COLUMNS} FROM symbols WHERE file = ?1 ORDER BY line"
    ))?;
    let rows = stmt.query_map(params![file], map_symbol)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn symbols_by_name(conn: &Connection, name: &str) -> Result<Vec<SymbolRow>, StorageError> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {SYMBOL_COLUMNS} FROM symbols WHERE name = ?1"
    ))?;
    let rows = stmt.query_map(params![name], map_symbol)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn count_symbols(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM symbols", [], |row| row.get(0))
        .map_err(Into::into)
}

fn map_import(row: &rusqlite::Row<'_>) -> rusqlite::Result<ImportRow> {
    Ok(ImportRow {
        file: row.get(0)?,
        target: row.get(1)?,
        resolved_path: row.get(2)?,
        imported_names: row.get(3)?,
        line: row.get(4)?,
    })
}

const IMPORT_COLUMNS: &str = "file, target, resolved_path, imported_names, line";

pub fn insert_imports(conn: &Connection, rows: &[ImportRow]) -> Result<usize, StorageError> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO imports (file, target, resolved_path, imported_names, line)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for row in rows {
        stmt.execute(params![
            row.file, row.target, row.resolved_path, row.imported_names, row.line
        ])?;
    }
    Ok(rows.len())
}

pub fn imports_for_file(conn: &Connection, file: &str) -> Result<Vec<ImportRow>, StorageError> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {IMPORT_COLUMNS} FROM imports WHERE file = ?1 ORDER BY line"
    ))?;
    let rows = stmt.query_map(params![file], map_import)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn unresolved_imports(conn: &Connection) -> Result<Vec<ImportRow>, StorageError> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {IMPORT_COLUMNS} FROM imports WHERE resolved_path IS NULL"
    ))?;
    let rows = stmt.query_map([], map_import)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn set_import_resolved(
    conn: &Connection,
    file: &str,
    line: i64,
    target: &str,
    resolved_path: &str,
) -> Result<(), StorageError> {
    conn.prepare_cached(
        "UPDATE imports SET resolved_path = ?1 WHERE file = ?2 AND line = ?3 AND target = ?4",
    )?
    .execute(params![resolved_path, file, line, target])?;
    Ok(())
}
