//! routes, validation_framework_usage, sql_queries (spec.md 4.5.1).

use auditor_core::errors::StorageError;
use auditor_core::traits::storage::{RouteRow, SqlQueryRow, ValidationUsageRow};
use rusqlite::{params, Connection};

const ROUTE_COLUMNS: &str =
    "file, method, path_pattern, handler_symbol, auth_decorators, parameter_sources, line";

fn map_route(row: &rusqlite::Row<'_>) -> rusqlite::Result<RouteRow> {
    Ok(RouteRow {
        file: row.get(0)?,
        method: row.get(1)?,
        path_pattern: row.get(2)?,
        handler_symbol: row.get(3)?,
        auth_decorators: row.get(4)?,
        parameter_sources: row.get(5)?,
        line: row.get(6)?,
    })
}

pub fn insert_routes(conn: &Connection, rows: &[RouteRow]) -> Result<usize, StorageError> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO routes (file, method, path_pattern, handler_symbol, auth_decorators, parameter_sources, line)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;
    for row in rows {
        stmt.execute(params![
            row.file,
            row.method,
            row.path_pattern,
            row.handler_symbol,
            row.auth_decorators,
            row.parameter_sources,
            row.line
        ])?;
    }
    Ok(rows.len())
}

pub fn all_routes(conn: &Connection) -> Result<Vec<RouteRow>, StorageError> {
    let mut stmt = conn.prepare_cached(&format!("SELECT {ROUTE_COLUMNS} FROM routes"))?;
    let rows = stmt.query_map([], map_route)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn routes_for_file(conn: &Connection, file: &str) -> Result<Vec<RouteRow>, StorageError> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {ROUTE_COLUMNS} FROM routes WHERE file = ?1 ORDER BY line"
    ))?;
    let rows = stmt.query_map(params![file], map_route)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

const VALIDATION_COLUMNS: &str =
    "file, scope, framework, schema_symbol, validated_fields, line, is_sanitizer_boundary";

fn map_validation(row: &rusqlite::Row<'_>) -> rusqlite::Result<ValidationUsageRow> {
    Ok(ValidationUsageRow {
        file: row.get(0)?,
        scope: row.get(1)?,
        framework: row.get(2)?,
        schema_symbol: row.get(3)?,
        validated_fields: row.get(4)?,
        line: row.get(5)?,
        is_sanitizer_boundary: row.get(6)?,
    })
}

pub fn insert_validation_usage(
    conn: &Connection,
    rows: &[ValidationUsageRow],
) -> Result<usize, StorageError> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO validation_framework_usage
         (file, scope, framework, schema_symbol, validated_fields, line, is_sanitizer_boundary)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;
    for row in rows {
        stmt.execute(params![
            row.file,
            row.scope,
            row.framework,
            row.schema_symbol,
            row.validated_fields,
            row.line,
            row.is_sanitizer_boundary
        ])?;
    }
    Ok(rows.len())
}

pub fn all_validation_usage(conn: &Connection) -> Result<Vec<ValidationUsageRow>, StorageError> {
    let mut stmt =
        conn.prepare_cached(&format!("SELECT {VALIDATION_COLUMNS} FROM validation_framework_usage"))?;
    let rows = stmt.query_map([], map_validation)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn validation_usage_for_scope(
    conn: &Connection,
    file: &str,
    scope: &str,
) -> Result<Vec<ValidationUsageRow>, StorageError> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {VALIDATION_COLUMNS} FROM validation_framework_usage WHERE file = ?1 AND scope = ?2 ORDER BY line"
    ))?;
    let rows = stmt.query_map(params![file, scope], map_validation)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

const SQL_QUERY_COLUMNS: &str =
    "file, scope, line, query_text, query_kind, command, tables, is_static, interpolated_expressions";

fn map_sql_query(row: &rusqlite::Row<'_>) -> rusqlite::Result<SqlQueryRow> {
    Ok(SqlQueryRow {
        file: row.get(0)?,
        scope: row.get(1)?,
        line: row.get(2)?,
        query_text: row.get(3)?,
        query_kind: row.get(4)?,
        command: row.get(5)?,
        tables: row.get(6)?,
        is_static: row.get(7)?,
        interpolated_expressions: row.get(8)?,
    })
}

pub fn insert_sql_queries(conn: &Connection, rows: &[SqlQueryRow]) -> Result<usize, StorageError> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO sql_queries
         (file, scope, line, query_text, query_kind, command, tables, is_static, interpolated_expressions)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )?;
    for row in rows {
        stmt.execute(params![
            row.file,
            row.scope,
            row.line,
            row.query_text,
            row.query_kind,
            row.command,
            row.tables,
            row.is_static,
            row.interpolated_expressions
        ])?;
    }
    Ok(rows.len())
}

pub fn sql_queries_for_file(conn: &Connection, file: &str) -> Result<Vec<SqlQueryRow>, StorageError> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {SQL_QUERY_COLUMNS} FROM sql_queries WHERE file = ?1 ORDER BY line"
    ))?;
    let rows = stmt.query_map(params![file], map_sql_query)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn all_sql_queries(conn: &Connection) -> Result<Vec<SqlQueryRow>, StorageError> {
    let mut stmt = conn.prepare_cached(&format!("SELECT {SQL_QUERY_COLUMNS} FROM sql_queries"))?;
    let rows = stmt.query_map([], map_sql_query)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}
