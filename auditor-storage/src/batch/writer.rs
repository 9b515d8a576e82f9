//! Dedicated writer thread with a crossbeam bounded(1024) channel.
//! Batches writes into single transactions for throughput (spec.md 4.3).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use auditor_core::errors::StorageError;
use auditor_core::traits::storage::{
    CallGraphEdgeRow, FileBatch, FindingRow, ImportGraphEdgeRow, WriteStats,
};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use rusqlite::Connection;

use super::commands::BatchCommand;
use crate::queries;

const CHANNEL_BOUND: usize = 1024;
const BATCH_SIZE: usize = 500;
const FLUSH_TIMEOUT: Duration = Duration::from_millis(100);

/// Accepts `BatchCommand`s over a channel and writes them in batched
/// transactions on a dedicated thread, so callers never block on a
/// commit (spec.md 4.3 "single writer").
pub struct BatchWriter {
    tx: Sender<BatchCommand>,
    handle: Option<JoinHandle<Result<WriteStats, StorageError>>>,
    stats: Arc<Mutex<WriteStats>>,
    pending: Arc<AtomicUsize>,
}

impl BatchWriter {
    /// `conn` is moved onto the writer thread; the caller keeps its own
    /// connection (typically the writer slot of `DatabaseManager`) for
    /// synchronous reads/writes that must not go through the queue.
    pub fn new(conn: Connection) -> Self {
        let (tx, rx) = bounded(CHANNEL_BOUND);
        let stats = Arc::new(Mutex::new(WriteStats::default()));
        let pending = Arc::new(AtomicUsize::new(0));

        let thread_stats = Arc::clone(&stats);
        let thread_pending = Arc::clone(&pending);
        let handle = thread::Builder::new()
            .name("auditor-batch-writer".to_string())
            .spawn(move || writer_loop(conn, rx, thread_stats, thread_pending))
            .expect("failed to spawn batch writer thread");

        Self {
            tx,
            handle: Some(handle),
            stats,
            pending,
        }
    }

    fn send(&self, cmd: BatchCommand) -> Result<(), StorageError> {
        self.pending.fetch_add(1, Ordering::SeqCst);
        self.tx.send(cmd).map_err(|_| StorageError::Sqlite {
            message: "batch writer channel disconnected".to_string(),
        })
    }

    pub fn enqueue_file_batch(&self, batch: FileBatch) -> Result<(), StorageError> {
        self.send(BatchCommand::FileBatch(Box::new(batch)))
    }

    pub fn enqueue_graph_edges(
        &self,
        call_graph_edges: Vec<CallGraphEdgeRow>,
        import_graph_edges: Vec<ImportGraphEdgeRow>,
    ) -> Result<(), StorageError> {
        self.send(BatchCommand::GraphEdges(call_graph_edges, import_graph_edges))
    }

    pub fn enqueue_findings(&self, findings: Vec<FindingRow>) -> Result<(), StorageError> {
        self.send(BatchCommand::Findings(findings))
    }

    /// Fire-and-forget: request a flush, don't wait for it to land.
    pub fn flush(&self) -> Result<(), StorageError> {
        self.send(BatchCommand::Flush)
    }

    /// Flush and block until the writer thread confirms every queued
    /// batch committed. Callers that need to read what they just wrote
    /// (e.g. the resolver reading calls after extraction) use this.
    pub fn flush_sync(&self) -> Result<WriteStats, StorageError> {
        let (tx, rx) = std::sync::mpsc::sync_channel(0);
        self.send(BatchCommand::FlushSync(tx))?;
        rx.recv().map_err(|_| StorageError::Sqlite {
            message: "batch writer thread did not respond to flush_sync".to_string(),
        })
    }

    pub fn stats(&self) -> WriteStats {
        self.stats.lock().expect("batch writer stats mutex poisoned").clone()
    }

    pub fn shutdown(mut self) -> Result<WriteStats, StorageError> {
        let _ = self.tx.send(BatchCommand::Shutdown);
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| StorageError::Sqlite {
                message: "batch writer thread panicked".to_string(),
            })?,
            None => Ok(WriteStats::default()),
        }
    }
}

impl Drop for BatchWriter {
    fn drop(&mut self) {
        let _ = self.tx.send(BatchCommand::Shutdown);
    }
}

fn writer_loop(
    conn: Connection,
    rx: Receiver<BatchCommand>,
    shared_stats: Arc<Mutex<WriteStats>>,
    pending: Arc<AtomicUsize>,
) -> Result<WriteStats, StorageError> {
    let mut buffer: Vec<BatchCommand> = Vec::with_capacity(BATCH_SIZE);
    let mut stats = WriteStats::default();

    loop {
        match rx.recv_timeout(FLUSH_TIMEOUT) {
            Ok(BatchCommand::Shutdown) => {
                flush_buffer(&conn, &mut buffer, &mut stats, &shared_stats, &pending)?;
                break;
            }
            Ok(BatchCommand::Flush) => {
                flush_buffer(&conn, &mut buffer, &mut stats, &shared_stats, &pending)?;
            }
            Ok(BatchCommand::FlushSync(done_tx)) => {
                flush_buffer(&conn, &mut buffer, &mut stats, &shared_stats, &pending)?;
                pending.fetch_sub(1, Ordering::SeqCst);
                let _ = done_tx.send(stats.clone());
            }
            Ok(cmd) => {
                buffer.push(cmd);
                if buffer.len() >= BATCH_SIZE {
                    flush_buffer(&conn, &mut buffer, &mut stats, &shared_stats, &pending)?;
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if !buffer.is_empty() {
                    flush_buffer(&conn, &mut buffer, &mut stats, &shared_stats, &pending)?;
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                flush_buffer(&conn, &mut buffer, &mut stats, &shared_stats, &pending)?;
                break;
            }
        }
    }

    Ok(stats)
}

fn merge(stats: &mut WriteStats, delta: &WriteStats) {
    stats.files += delta.files;
    stats.symbols += delta.symbols;
    stats.imports += delta.imports;
    stats.calls += delta.calls;
    stats.assignments += delta.assignments;
    stats.refs += delta.refs;
    stats.routes += delta.routes;
    stats.validation_usage += delta.validation_usage;
    stats.sql_queries += delta.sql_queries;
    stats.cfg_blocks += delta.cfg_blocks;
    stats.cfg_edges += delta.cfg_edges;
    stats.cfg_statements += delta.cfg_statements;
    stats.diagnostics += delta.diagnostics;
    stats.call_graph_edges += delta.call_graph_edges;
    stats.import_graph_edges += delta.import_graph_edges;
    stats.findings += delta.findings;
}

fn flush_buffer(
    conn: &Connection,
    buffer: &mut Vec<BatchCommand>,
    stats: &mut WriteStats,
    shared_stats: &Arc<Mutex<WriteStats>>,
    pending: &Arc<AtomicUsize>,
) -> Result<(), StorageError> {
    if buffer.is_empty() {
        return Ok(());
    }

    let tx = conn.unchecked_transaction()?;
    let mut batch_stats = WriteStats::default();

    // Iterate by reference so the buffer isn't consumed until commit
    // succeeds; if any insert fails the transaction drops (auto-rollback)
    // and the buffer retains its commands for the next attempt.
    for cmd in buffer.iter() {
        match cmd {
            BatchCommand::FileBatch(batch) => {
                write_file_batch(&tx, batch, &mut batch_stats)?;
            }
            BatchCommand::GraphEdges(call_edges, import_edges) => {
                if !call_edges.is_empty() {
                    batch_stats.call_graph_edges +=
                        queries::graph::insert_call_graph_edges(&tx, call_edges)?;
                }
                if !import_edges.is_empty() {
                    batch_stats.import_graph_edges +=
                        queries::graph::insert_import_graph_edges(&tx, import_edges)?;
                }
            }
            BatchCommand::Findings(findings) => {
                if !findings.is_empty() {
                    batch_stats.findings += queries::findings::insert_findings(&tx, findings)?;
                }
            }
            BatchCommand::Flush | BatchCommand::FlushSync(_) | BatchCommand::Shutdown => {}
        }
    }

    tx.commit()?;

    let drained = buffer
        .iter()
        .filter(|c| !matches!(c, BatchCommand::Flush | BatchCommand::FlushSync(_)))
        .count();
    buffer.clear();
    pending.fetch_sub(drained, Ordering::SeqCst);

    merge(stats, &batch_stats);
    *shared_stats.lock().expect("batch writer stats mutex poisoned") = stats.clone();

    Ok(())
}

fn write_file_batch(
    conn: &Connection,
    batch: &FileBatch,
    stats: &mut WriteStats,
) -> Result<(), StorageError> {
    // `replace_file_rows`: delete this file's prior extraction, then
    // insert the fresh row-set, all inside the caller's transaction.
    queries::files::delete_file(conn, &batch.file.path)?;
    stats.files += queries::files::insert_files(conn, std::slice::from_ref(&batch.file))?;

    if !batch.symbols.is_empty() {
        stats.symbols += queries::symbols::insert_symbols(conn, &batch.symbols)?;
    }
    if !batch.imports.is_empty() {
        stats.imports += queries::symbols::insert_imports(conn, &batch.imports)?;
    }
    if !batch.calls.is_empty() {
        stats.calls += queries::calls::insert_calls(conn, &batch.calls)?;
    }
    if !batch.assignments.is_empty() {
        stats.assignments += queries::calls::insert_assignments(conn, &batch.assignments)?;
    }
    if !batch.refs.is_empty() {
        stats.refs += queries::calls::insert_refs(conn, &batch.refs)?;
    }
    if !batch.routes.is_empty() {
        stats.routes += queries::frameworks::insert_routes(conn, &batch.routes)?;
    }
    if !batch.validation_usage.is_empty() {
        stats.validation_usage +=
            queries::frameworks::insert_validation_usage(conn, &batch.validation_usage)?;
    }
    if !batch.sql_queries.is_empty() {
        stats.sql_queries += queries::frameworks::insert_sql_queries(conn, &batch.sql_queries)?;
    }
    if !batch.cfg_blocks.is_empty() {
        stats.cfg_blocks += queries::cfg::insert_cfg_blocks(conn, &batch.cfg_blocks)?;
    }
    if !batch.cfg_edges.is_empty() {
        stats.cfg_edges += queries::cfg::insert_cfg_edges(conn, &batch.cfg_edges)?;
    }
    if !batch.cfg_statements.is_empty() {
        stats.cfg_statements += queries::cfg::insert_cfg_statements(conn, &batch.cfg_statements)?;
    }
    for diagnostic in &batch.diagnostics {
        queries::files::insert_diagnostic(conn, diagnostic)?;
        stats.diagnostics += 1;
    }
    Ok(())
}
