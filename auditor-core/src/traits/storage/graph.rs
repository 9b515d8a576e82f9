//! `IFactGraph` — `call_graph_edges` and `import_graph_edges` (spec.md
//! 3, 4.4.3), materialized by the resolver from resolved calls/imports.

use std::sync::Arc;

use crate::errors::StorageError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallGraphEdgeRow {
    pub caller_scope: String,
    pub callee_scope: String,
    pub call_site_file: String,
    pub call_site_line: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportGraphEdgeRow {
    pub importer_file: String,
    pub imported_file: String,
    pub line: i64,
}

pub trait IFactGraph: Send + Sync {
    fn insert_call_graph_edges(&self, rows: &[CallGraphEdgeRow]) -> Result<usize, StorageError>;
    fn insert_import_graph_edges(
        &self,
        rows: &[ImportGraphEdgeRow],
    ) -> Result<usize, StorageError>;

    fn all_call_graph_edges(&self) -> Result<Vec<CallGraphEdgeRow>, StorageError>;
    fn all_import_graph_edges(&self) -> Result<Vec<ImportGraphEdgeRow>, StorageError>;
    fn callers_of(&self, callee_scope: &str) -> Result<Vec<CallGraphEdgeRow>, StorageError>;
    fn callees_of(&self, caller_scope: &str) -> Result<Vec<CallGraphEdgeRow>, StorageError>;
}

impl<T: IFactGraph + ?Sized> IFactGraph for Arc<T> {
    fn insert_call_graph_edges(&self, rows: &[CallGraphEdgeRow]) -> Result<usize, StorageError> {
        (**self).insert_call_graph_edges(rows)
    }
    fn insert_import_graph_edges(
        &self,
        rows: &[ImportGraphEdgeRow],
    ) -> Result<usize, StorageError> {
        (**self).insert_import_graph_edges(rows)
    }
    fn all_call_graph_edges(&self) -> Result<Vec<CallGraphEdgeRow>, StorageError> {
        (**self).all_call_graph_edges()
    }
    fn all_import_graph_edges(&self) -> Result<Vec<ImportGraphEdgeRow>, StorageError> {
        (**self).all_import_graph_edges()
    }
    fn callers_of(&self, callee_scope: &str) -> Result<Vec<CallGraphEdgeRow>, StorageError> {
        (**self).callers_of(callee_scope)
    }
    fn callees_of(&self, caller_scope: &str) -> Result<Vec<CallGraphEdgeRow>, StorageError> {
        (**self).callees_of(caller_scope)
    }
}
