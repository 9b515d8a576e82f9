//! `IBatchWriter` — the single-writer serializer (spec.md 4.3, 5). All
//! rows for one file are queued as one `FileBatch` and committed in one
//! transaction, implementing `replace_file_rows` (delete then insert,
//! spec.md 3 "Ownership in design terms").

use std::sync::Arc;

use crate::errors::StorageError;
use super::calls::{AssignmentRow, CallRow, RefRow};
use super::cfg::{CfgBlockRow, CfgEdgeRow, CfgStatementRow};
use super::files::{DiagnosticRow, FileRow};
use super::findings::FindingRow;
use super::frameworks::{RouteRow, SqlQueryRow, ValidationUsageRow};
use super::graph::{CallGraphEdgeRow, ImportGraphEdgeRow};
use super::symbols::{ImportRow, SymbolRow};

/// Every row a single file's extraction produces, queued as one unit so
/// `BatchWriter` can commit them atomically (spec.md 3, 4.3).
#[derive(Debug, Clone, Default)]
pub struct FileBatch {
    pub file: FileRow,
    pub symbols: Vec<SymbolRow>,
    pub imports: Vec<ImportRow>,
    pub calls: Vec<CallRow>,
    pub assignments: Vec<AssignmentRow>,
    pub refs: Vec<RefRow>,
    pub routes: Vec<RouteRow>,
    pub validation_usage: Vec<ValidationUsageRow>,
    pub sql_queries: Vec<SqlQueryRow>,
    pub cfg_blocks: Vec<CfgBlockRow>,
    pub cfg_edges: Vec<CfgEdgeRow>,
    pub cfg_statements: Vec<CfgStatementRow>,
    pub diagnostics: Vec<DiagnosticRow>,
}

#[derive(Debug, Default, Clone)]
pub struct WriteStats {
    pub files: usize,
    pub symbols: usize,
    pub imports: usize,
    pub calls: usize,
    pub assignments: usize,
    pub refs: usize,
    pub routes: usize,
    pub validation_usage: usize,
    pub sql_queries: usize,
    pub cfg_blocks: usize,
    pub cfg_edges: usize,
    pub cfg_statements: usize,
    pub diagnostics: usize,
    pub call_graph_edges: usize,
    pub import_graph_edges: usize,
    pub findings: usize,
}

pub trait IBatchWriter: Send + Sync {
    /// Enqueue one file's complete row-set. Fire-and-forget: the caller
    /// does not block on the commit.
    fn enqueue_file_batch(&self, batch: FileBatch) -> Result<(), StorageError>;

    /// Enqueue resolver-produced graph edges (spec.md 4.4.3).
    fn enqueue_graph_edges(
        &self,
        call_graph_edges: Vec<CallGraphEdgeRow>,
        import_graph_edges: Vec<ImportGraphEdgeRow>,
    ) -> Result<(), StorageError>;

    /// Enqueue taint-engine findings (spec.md 4.5.7).
    fn enqueue_findings(&self, findings: Vec<FindingRow>) -> Result<(), StorageError>;

    /// Request a flush without waiting for completion.
    fn flush(&self) -> Result<(), StorageError>;

    /// Flush and block until every queued batch has committed.
    fn flush_sync(&self) -> Result<WriteStats, StorageError>;

    fn stats(&self) -> WriteStats;

    fn shutdown(self: Box<Self>) -> Result<WriteStats, StorageError>;
}

impl<T: IBatchWriter + ?Sized> IBatchWriter for Arc<T> {
    fn enqueue_file_batch(&self, batch: FileBatch) -> Result<(), StorageError> {
        (**self).enqueue_file_batch(batch)
    }
    fn enqueue_graph_edges(
        &self,
        call_graph_edges: Vec<CallGraphEdgeRow>,
        import_graph_edges: Vec<ImportGraphEdgeRow>,
    ) -> Result<(), StorageError> {
        (**self).enqueue_graph_edges(call_graph_edges, import_graph_edges)
    }
    fn enqueue_findings(&self, findings: Vec<FindingRow>) -> Result<(), StorageError> {
        (**self).enqueue_findings(findings)
    }
    fn flush(&self) -> Result<(), StorageError> {
        (**self).flush()
    }
    fn flush_sync(&self) -> Result<WriteStats, StorageError> {
        (**self).flush_sync()
    }
    fn stats(&self) -> WriteStats {
        (**self).stats()
    }
    fn shutdown(self: Box<Self>) -> Result<WriteStats, StorageError> {
        // Cannot consume Arc<T> through Box<Arc<T>>; flush instead of
        // dropping the writer thread out from under other Arc holders.
        self.flush_sync()
    }
}
