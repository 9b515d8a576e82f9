//! function_call_args, assignments, refs (spec.md 3, 4.4, 4.5.3).

use auditor_core::errors::StorageError;
use auditor_core::traits::storage::{AssignmentRow, CallRow, RefRow};
use rusqlite::{params, Connection};

const CALL_COLUMNS: &str = "file, caller_scope, callee_name, callee_resolved, line, argument_index, argument_expression, argument_kind";

fn map_call(row: &rusqlite::Row<'_>) -> rusqlite::Result<CallRow> {
    Ok(CallRow {
        file: row.get(0)?,
        caller_scope: row.get(1)?,
        callee_name: row.get(2)?,
        callee_resolved: row.get(3)?,
        line: row.get(4)?,
        argument_index: row.get(5)?,
        argument_expression: row.get(6)?,
        argument_kind: row.get(7)?,
    })
}

pub fn insert_calls(conn: &Connection, rows: &[CallRow]) -> Result<usize, StorageError> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO function_call_args
         (file, caller_scope, callee_name, callee_resolved, line, argument_index, argument_expression, argument_kind)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;
    for row in rows {
        stmt.execute(params![
            row.file,
            row.caller_scope,
            row.callee_name,
            row.callee_resolved,
            row.line,
            row.argument_index,
            row.argument_expression,
            row.argument_kind
        ])?;
    }
    Ok(rows.len())
}

pub fn calls_for_file(conn: &Connection, file: &str) -> Result<Vec<CallRow>, StorageError> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {CALL_COLUMNS} FROM function_call_args WHERE file = ?1 ORDER BY line, argument_index"
    ))?;
    let rows = stmt.query_map(params![file], map_call)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn unresolved_calls(conn: &Connection) -> Result<Vec<CallRow>, StorageError> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {CALL_COLUMNS} FROM function_call_args WHERE callee_resolved IS NULL"
    ))?;
    let rows = stmt.query_map([], map_call)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn set_callee_resolved(
    conn: &Connection,
    file: &str,
    line: i64,
    argument_index: i64,
    resolved_scope: &str,
) -> Result<(), StorageError> {
    conn.prepare_cached(
        "UPDATE function_call_args SET callee_resolved = ?1
         WHERE file = ?2 AND line = ?3 AND argument_index = ?4",
    )?
    .execute(params![resolved_scope, file, line, argument_index])?;
    Ok(())
}

pub fn calls_at_site(conn: &Connection, file: &str, line: i64) -> Result<Vec<CallRow>, StorageError> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {CALL_COLUMNS} FROM function_call_args WHERE file = ?1 AND line = ?2 ORDER BY argument_index"
    ))?;
    let rows = stmt.query_map(params![file, line], map_call)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn calls_to_callee(conn: &Connection, callee_scope: &str) -> Result<Vec<CallRow>, StorageError> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {CALL_COLUMNS} FROM function_call_args WHERE callee_resolved = ?1"
    ))?;
    let rows = stmt.query_map(params![callee_scope], map_call)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

fn map_assignment(row: &rusqlite::Row<'_>) -> rusqlite::Result<AssignmentRow> {
    Ok(AssignmentRow {
        file: row.get(0)?,
        scope: row.get(1)?,
        target_name: row.get(2)?,
        rhs_expression: row.get(3)?,
        rhs_kind: row.get(4)?,
        rhs_refs: row.get(5)?,
        line: row.get(6)?,
    })
}

const ASSIGNMENT_COLUMNS: &str = "file, scope, target_name, rhs_expression, rhs_kind, rhs_refs, line";

pub fn insert_assignments(conn: &Connection, rows: &[AssignmentRow]) -> Result<usize, StorageError> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO assignments (file, scope, target_name, rhs_expression, rhs_kind, rhs_refs, line)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;
    for row in rows {
        stmt.execute(params![
            row.file,
            row.scope,
            row.target_name,
            row.rhs_expression,
            row.rhs_kind,
            row.rhs_refs,
            row.line
        ])?;
    }
    Ok(rows.len())
}

pub fn assignments_for_scope(
    conn: &Connection,
    file: &str,
    scope: &str,
) -> Result<Vec<AssignmentRow>, StorageError> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {ASSIGNMENT_COLUMNS} FROM assignments WHERE file = ?1 AND scope = ?2 ORDER BY line"
    ))?;
    let rows = stmt.query_map(params![file, scope], map_assignment)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

fn map_ref(row: &rusqlite::Row<'_>) -> rusqlite::Result<RefRow> {
    Ok(RefRow {
        file: row.get(0)?,
        scope: row.get(1)?,
        referenced_name: row.get(2)?,
        kind: row.get(3)?,
        line: row.get(4)?,
    })
}

const REF_COLUMNS: &str = "file, scope, referenced_name, kind, line";

pub fn insert_refs(conn: &Connection, rows: &[RefRow]) -> Result<usize, StorageError> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO refs (file, scope, referenced_name, kind, line)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for row in rows {
        stmt.execute(params![
            row.file, row.scope, row.referenced_name, row.kind, row.line
        ])?;
    }
    Ok(rows.len())
}

pub fn refs_for_scope(conn: &Connection, file: &str, scope: &str) -> Result<Vec<RefRow>, StorageError> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {REF_COLUMNS} FROM refs WHERE file = ?1 AND scope = ?2 ORDER BY line"
    ))?;
    let rows = stmt.query_map(params![file, scope], map_ref)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}
