//! cfg_blocks, cfg_edges, cfg_block_statements (spec.md 3, 4.5.3, 4.5.5).

use auditor_core::errors::StorageError;
use auditor_core::traits::storage::{CfgBlockRow, CfgEdgeRow, CfgStatementRow};
use rusqlite::{params, Connection};

const BLOCK_COLUMNS: &str = "block_id, file, scope, start_line, end_line, kind";

fn map_block(row: &rusqlite::Row<'_>) -> rusqlite::Result<CfgBlockRow> {
    Ok(CfgBlockRow {
        block_id: row.get(0)?,
        file: row.get(1)?,
        scope: row.get(2)?,
        start_line: row.get(3)?,
        end_line: row.get(4)?,
        kind: row.get(5)?,
    })
}

pub fn insert_cfg_blocks(conn: &Connection, rows: &[CfgBlockRow]) -> Result<usize, StorageError> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO cfg_blocks (block_id, file, scope, start_line, end_line, kind)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    for row in rows {
        stmt.execute(params![
            row.block_id, row.file, row.scope, row.start_line, row.end_line, row.kind
        ])?;
    }
    Ok(rows.len())
}

pub fn blocks_for_scope(
    conn: &Connection,
    file: &str,
    scope: &str,
) -> Result<Vec<CfgBlockRow>, StorageError> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {BLOCK_COLUMNS} FROM cfg_blocks WHERE file = ?1 AND scope = ?2 ORDER BY start_line"
    ))?;
    let rows = stmt.query_map(params![file, scope], map_block)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

const EDGE_COLUMNS: &str = "from_block, to_block, label";

fn map_edge(row: &rusqlite::Row<'_>) -> rusqlite::Result<CfgEdgeRow> {
    Ok(CfgEdgeRow {
        from_block: row.get(0)?,
        to_block: row.get(1)?,
        label: row.get(2)?,
    })
}

pub fn insert_cfg_edges(conn: &Connection, rows: &[CfgEdgeRow]) -> Result<usize, StorageError> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO cfg_edges (from_block, to_block, label) VALUES (?1, ?2, ?3)",
    )?;
    for row in rows {
        stmt.execute(params![row.from_block, row.to_block, row.label])?;
    }
    Ok(rows.len())
}

pub fn edges_from(conn: &Connection, block_id: &str) -> Result<Vec<CfgEdgeRow>, StorageError> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {EDGE_COLUMNS} FROM cfg_edges WHERE from_block = ?1"
    ))?;
    let rows = stmt.query_map(params![block_id], map_edge)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn edges_to(conn: &Connection, block_id: &str) -> Result<Vec<CfgEdgeRow>, StorageError> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {EDGE_COLUMNS} FROM cfg_edges WHERE to_block = ?1"
    ))?;
    let rows = stmt.query_map(params![block_id], map_edge)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

const STATEMENT_COLUMNS: &str = "block_id, statement_line, statement_kind, statement_text";

fn map_statement(row: &rusqlite::Row<'_>) -> rusqlite::Result<CfgStatementRow> {
    Ok(CfgStatementRow {
        block_id: row.get(0)?,
        statement_line: row.get(1)?,
        statement_kind: row.get(2)?,
        statement_text: row.get(3)?,
    })
}

pub fn insert_cfg_statements(
    conn: &Connection,
    rows: &[CfgStatementRow],
) -> Result<usize, StorageError> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO cfg_block_statements (block_id, statement_line, statement_kind, statement_text)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    for row in rows {
        stmt.execute(params![
            row.block_id, row.statement_line, row.statement_kind, row.statement_text
        ])?;
    }
    Ok(rows.len())
}

pub fn statements_for_block(
    conn: &Connection,
    block_id: &str,
) -> Result<Vec<CfgStatementRow>, StorageError> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {STATEMENT_COLUMNS} FROM cfg_block_statements WHERE block_id = ?1 ORDER BY statement_line"
    ))?;
    let rows = stmt.query_map(params![block_id], map_statement)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}
