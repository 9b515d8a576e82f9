//! `BatchCommand` — everything the writer thread accepts (spec.md 4.3, 5).
//! One variant per `IBatchWriter` write operation, plus the three
//! control commands (`Flush`, `FlushSync`, `Shutdown`).

use auditor_core::traits::storage::{CallGraphEdgeRow, FileBatch, FindingRow, ImportGraphEdgeRow, WriteStats};

#[derive(Debug)]
pub enum BatchCommand {
    FileBatch(Box<FileBatch>),
    GraphEdges(Vec<CallGraphEdgeRow>, Vec<ImportGraphEdgeRow>),
    Findings(Vec<FindingRow>),
    Flush,
    FlushSync(std::sync::mpsc::SyncSender<WriteStats>),
    Shutdown,
}
