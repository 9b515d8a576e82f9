//! findings_consolidated (spec.md 4.5.7, 6).

use auditor_core::errors::StorageError;
use auditor_core::traits::storage::FindingRow;
use rusqlite::{params, Connection};

const FINDING_COLUMNS: &str = "id, category, severity, source_file, source_line, source_kind, \
    access_path_start, sink_file, sink_line, sink_kind, vulnerable_argument_index, \
    provenance_json, sanitizers_json, confidence, rule_id, truncated, forward_verified, created_at";

fn map_finding(row: &rusqlite::Row<'_>) -> rusqlite::Result<FindingRow> {
    Ok(FindingRow {
        id: row.get(0)?,
        category: row.get(1)?,
        severity: row.get(2)?,
        source_file: row.get(3)?,
        source_line: row.get(4)?,
        source_kind: row.get(5)?,
        access_path_start: row.get(6)?,
        sink_file: row.get(7)?,
        sink_line: row.get(8)?,
        sink_kind: row.get(9)?,
        vulnerable_argument_index: row.get(10)?,
        provenance_json: row.get(11)?,
        sanitizers_json: row.get(12)?,
        confidence: row.get(13)?,
        rule_id: row.get(14)?,
        truncated: row.get(15)?,
        forward_verified: row.get(16)?,
        created_at: row.get(17)?,
    })
}

pub fn insert_findings(conn: &Connection, rows: &[FindingRow]) -> Result<usize, StorageError> {
    let mut stmt = conn.prepare_cached(
        "INSERT OR REPLACE INTO findings_consolidated
         (id, category, severity, source_file, source_line, source_kind, access_path_start,
          sink_file, sink_line, sink_kind, vulnerable_argument_index, provenance_json,
          sanitizers_json, confidence, rule_id, truncated, forward_verified, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
    )?;
    for row in rows {
        stmt.execute(params![
            row.id,
            row.category,
            row.severity,
            row.source_file,
            row.source_line,
            row.source_kind,
            row.access_path_start,
            row.sink_file,
            row.sink_line,
            row.sink_kind,
            row.vulnerable_argument_index,
            row.provenance_json,
            row.sanitizers_json,
            row.confidence,
            row.rule_id,
            row.truncated,
            row.forward_verified,
            row.created_at
        ])?;
    }
    Ok(rows.len())
}

pub fn all_findings(conn: &Connection) -> Result<Vec<FindingRow>, StorageError> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {FINDING_COLUMNS} FROM findings_consolidated ORDER BY sink_file, sink_line"
    ))?;
    let rows = stmt.query_map([], map_finding)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn findings_for_sink_file(conn: &Connection, file: &str) -> Result<Vec<FindingRow>, StorageError> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {FINDING_COLUMNS} FROM findings_consolidated WHERE sink_file = ?1 ORDER BY sink_line"
    ))?;
    let rows = stmt.query_map(params![file], map_finding)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn count_findings(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM findings_consolidated", [], |row| {
        row.get(0)
    })
    .map_err(Into::into)
}
