//! `IFactCfg` — control-flow graph tables (spec.md 3): blocks, edges, and
//! per-block statements. Consumed by the taint engine for intra-procedural
//! backward walks (spec.md 4.5.3) and sanitizer-distance measurement
//! (spec.md 4.5.5).

use std::sync::Arc;

use crate::errors::StorageError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CfgBlockRow {
    pub block_id: String,
    pub file: String,
    pub scope: String,
    pub start_line: i64,
    pub end_line: i64,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CfgEdgeRow {
    pub from_block: String,
    pub to_block: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CfgStatementRow {
    pub block_id: String,
    pub statement_line: i64,
    pub statement_kind: String,
    pub statement_text: String,
}

pub trait IFactCfg: Send + Sync {
    fn insert_cfg_blocks(&self, rows: &[CfgBlockRow]) -> Result<usize, StorageError>;
    fn insert_cfg_edges(&self, rows: &[CfgEdgeRow]) -> Result<usize, StorageError>;
    fn insert_cfg_statements(&self, rows: &[CfgStatementRow]) -> Result<usize, StorageError>;

    fn blocks_for_scope(&self, file: &str, scope: &str) -> Result<Vec<CfgBlockRow>, StorageError>;
    fn edges_from(&self, block_id: &str) -> Result<Vec<CfgEdgeRow>, StorageError>;
    fn edges_to(&self, block_id: &str) -> Result<Vec<CfgEdgeRow>, StorageError>;
    fn statements_for_block(&self, block_id: &str) -> Result<Vec<CfgStatementRow>, StorageError>;
}

impl<T: IFactCfg + ?Sized> IFactCfg for Arc<T> {
    fn insert_cfg_blocks(&self, rows: &[CfgBlockRow]) -> Result<usize, StorageError> {
        (**self).insert_cfg_blocks(rows)
    }
    fn insert_cfg_edges(&self, rows: &[CfgEdgeRow]) -> Result<usize, StorageError> {
        (**self).insert_cfg_edges(rows)
    }
    fn insert_cfg_statements(&self, rows: &[CfgStatementRow]) -> Result<usize, StorageError> {
        (**self).insert_cfg_statements(rows)
    }
    fn blocks_for_scope(&self, file: &str, scope: &str) -> Result<Vec<CfgBlockRow>, StorageError> {
        (**self).blocks_for_scope(file, scope)
    }
    fn edges_from(&self, block_id: &str) -> Result<Vec<CfgEdgeRow>, StorageError> {
        (**self).edges_from(block_id)
    }
    fn edges_to(&self, block_id: &str) -> Result<Vec<CfgEdgeRow>, StorageError> {
        (**self).edges_to(block_id)
    }
    fn statements_for_block(&self, block_id: &str) -> Result<Vec<CfgStatementRow>, StorageError> {
        (**self).statements_for_block(block_id)
    }
}
