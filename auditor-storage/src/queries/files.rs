//! files, diagnostics, scan_history (spec.md 3).

use auditor_core::errors::StorageError;
use auditor_core::traits::storage::{DiagnosticRow, FileRow, ScanHistoryRow, ScanHistoryStats};
use rusqlite::{params, Connection, OptionalExtension};

pub fn insert_files(conn: &Connection, rows: &[FileRow]) -> Result<usize, StorageError> {
    let mut stmt = conn.prepare_cached(
        "INSERT OR REPLACE INTO files (path, language, sha256, size_bytes, line_count)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for row in rows {
        stmt.execute(params![
            row.path,
            row.language,
            row.sha256,
            row.size_bytes,
            row.line_count
        ])?;
    }
    Ok(rows.len())
}

fn map_file(row: &rusqlite::Row<'_>) -> rusqlite::Result<FileRow> {
    Ok(FileRow {
        path: row.get(0)?,
        language: row.get(1)?,
        sha256: row.get(2)?,
        size_bytes: row.get(3)?,
        line_count: row.get(4)?,
    })
}

pub fn load_all_files(conn: &Connection) -> Result<Vec<FileRow>, StorageError> {
    let mut stmt =
        conn.prepare_cached("SELECT path, language, sha256, size_bytes, line_count FROM files")?;
    let rows = stmt.query_map([], map_file)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn get_file(conn: &Connection, path: &str) -> Result<Option<FileRow>, StorageError> {
    conn.query_row(
        "SELECT path, language, sha256, size_bytes, line_count FROM files WHERE path = ?1",
        params![path],
        map_file,
    )
    .optional()
    .map_err(Into::into)
}

pub fn delete_file(conn: &Connection, path: &str) -> Result<(), StorageError> {
    conn.execute("DELETE FROM files WHERE path = ?1", params![path])?;
    Ok(())
}

pub fn count_files(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM files", [], |row| row.get(0))
        .map_err(Into::into)
}

pub fn insert_diagnostic(conn: &Connection, row: &DiagnosticRow) -> Result<(), StorageError> {
    conn.prepare_cached(
        "INSERT INTO diagnostics (file, stage, severity, code, message, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?
    .execute(params![
        row.file,
        row.stage,
        row.severity,
        row.code,
        row.message,
        row.created_at
    ])?;
    Ok(())
}

fn map_diagnostic(row: &rusqlite::Row<'_>) -> rusqlite::Result<DiagnosticRow> {
    Ok(DiagnosticRow {
        file: row.get(0)?,
        stage: row.get(1)?,
        severity: row.get(2)?,
        code: row.get(3)?,
        message: row.get(4)?,
        created_at: row.get(5)?,
    })
}

pub fn all_diagnostics(conn: &Connection) -> Result<Vec<DiagnosticRow>, StorageError> {
    let mut stmt = conn.prepare_cached(
        "SELECT file, stage, severity, code, message, created_at FROM diagnostics ORDER BY created_at",
    )?;
    let rows = stmt.query_map([], map_diagnostic)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn diagnostics_for_file(
    conn: &Connection,
    file: &str,
) -> Result<Vec<DiagnosticRow>, StorageError> {
    let mut stmt = conn.prepare_cached(
        "SELECT file, stage, severity, code, message, created_at FROM diagnostics
         WHERE file = ?1 ORDER BY created_at",
    )?;
    let rows = stmt.query_map(params![file], map_diagnostic)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn start_scan_history(
    conn: &Connection,
    started_at: i64,
    root_path: &str,
) -> Result<i64, StorageError> {
    conn.prepare_cached(
        "INSERT INTO scan_history
         (id, started_at, completed_at, root_path, total_files, added_files,
          modified_files, removed_files, unchanged_files, duration_ms, status, error)
         VALUES ((SELECT COALESCE(MAX(id), 0) + 1 FROM scan_history),
                 ?1, NULL, ?2, 0, 0, 0, 0, 0, NULL, 'running', NULL)",
    )?
    .execute(params![started_at, root_path])?;
    conn.query_row("SELECT MAX(id) FROM scan_history", [], |row| row.get(0))
        .map_err(Into::into)
}

pub fn complete_scan_history(
    conn: &Connection,
    id: i64,
    completed_at: i64,
    stats: ScanHistoryStats,
) -> Result<(), StorageError> {
    conn.prepare_cached(
        "UPDATE scan_history SET completed_at = ?1, total_files = ?2, added_files = ?3,
         modified_files = ?4, removed_files = ?5, unchanged_files = ?6, duration_ms = ?7,
         status = ?8, error = ?9 WHERE id = ?10",
    )?
    .execute(params![
        completed_at,
        stats.total_files,
        stats.added_files,
        stats.modified_files,
        stats.removed_files,
        stats.unchanged_files,
        stats.duration_ms,
        stats.status,
        stats.error,
        id
    ])?;
    Ok(())
}

fn map_scan_history(row: &rusqlite::Row<'_>) -> rusqlite::Result<ScanHistoryRow> {
    Ok(ScanHistoryRow {
        id: row.get(0)?,
        started_at: row.get(1)?,
        completed_at: row.get(2)?,
        root_path: row.get(3)?,
        total_files: row.get(4)?,
        added_files: row.get(5)?,
        modified_files: row.get(6)?,
        removed_files: row.get(7)?,
        unchanged_files: row.get(8)?,
        duration_ms: row.get(9)?,
        status: row.get(10)?,
        error: row.get(11)?,
    })
}

pub fn latest_scan_history(conn: &Connection) -> Result<Option<ScanHistoryRow>, StorageError> {
    conn.query_row(
        "SELECT id, started_at, completed_at, root_path, total_files, added_files,
                modified_files, removed_files, unchanged_files, duration_ms, status, error
         FROM scan_history ORDER BY id DESC LIMIT 1",
        [],
        map_scan_history,
    )
    .optional()
    .map_err(Into::into)
}
