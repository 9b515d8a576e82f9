//! `FactStorageEngine` — the single type implementing every
//! `auditor_core::traits::storage` trait against a SQLite fact base
//! (spec.md 3, 4.3). Wraps a `DatabaseManager` (pooled connections) and
//! a `BatchWriter` (the single serialized writer).

use std::path::Path;

use auditor_core::errors::StorageError;
use auditor_core::traits::storage::{
    AssignmentRow, CallGraphEdgeRow, CallRow, CfgBlockRow, CfgEdgeRow, CfgStatementRow,
    DiagnosticRow, FileBatch, FileRow, FindingRow, IBatchWriter, IFactCalls, IFactCfg, IFactFiles,
    IFactFindings, IFactFrameworks, IFactGraph, IFactSymbols, ImportGraphEdgeRow, ImportRow,
    RefRow, RouteRow, ScanHistoryRow, ScanHistoryStats, SqlQueryRow, SymbolRow, ValidationUsageRow,
    WriteStats,
};

use crate::connection::DatabaseManager;
use crate::queries;
use crate::BatchWriter;

pub struct FactStorageEngine {
    db: DatabaseManager,
    batch: BatchWriter,
}

impl FactStorageEngine {
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let db = DatabaseManager::open(path)?;
        let batch_conn = db.open_batch_connection()?;
        Ok(Self {
            db,
            batch: BatchWriter::new(batch_conn),
        })
    }

    /// In-memory fact base for tests. SQLite in-memory databases are
    /// each their own universe, so the batch writer gets its own
    /// separately-opened in-memory connection rather than sharing the
    /// manager's.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let db = DatabaseManager::open_in_memory()?;
        let conn = rusqlite::Connection::open_in_memory()?;
        crate::connection::configure_writer(&conn)?;
        crate::migrations::ensure_schema(&conn)?;
        Ok(Self {
            db,
            batch: BatchWriter::new(conn),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.db.path()
    }

    pub fn checkpoint(&self) -> Result<(), StorageError> {
        self.db.checkpoint()
    }

    pub fn start_scan_history(
        &self,
        started_at: i64,
        root_path: &str,
    ) -> Result<i64, StorageError> {
        self.db
            .with_writer(|conn| queries::files::start_scan_history(conn, started_at, root_path))
    }

    pub fn complete_scan_history(
        &self,
        id: i64,
        completed_at: i64,
        stats: ScanHistoryStats,
    ) -> Result<(), StorageError> {
        self.db
            .with_writer(|conn| queries::files::complete_scan_history(conn, id, completed_at, stats))
    }

    pub fn latest_scan_history(&self) -> Result<Option<ScanHistoryRow>, StorageError> {
        self.db.with_reader(queries::files::latest_scan_history)
    }

    /// Escape hatch for callers that need arbitrary SQL against the
    /// writer connection (spec.md 6 "read-only connection" for readers;
    /// rule authors reach the fact base this way too).
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&rusqlite::Connection) -> Result<T, StorageError>,
    {
        self.db.with_writer(f)
    }

    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&rusqlite::Connection) -> Result<T, StorageError>,
    {
        self.db.with_reader(f)
    }
}

impl IFactFiles for FactStorageEngine {
    fn insert_files(&self, rows: &[FileRow]) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| queries::files::insert_files(conn, rows))
    }
    fn load_all_files(&self) -> Result<Vec<FileRow>, StorageError> {
        self.db.with_reader(queries::files::load_all_files)
    }
    fn get_file(&self, path: &str) -> Result<Option<FileRow>, StorageError> {
        self.db.with_reader(|conn| queries::files::get_file(conn, path))
    }
    fn delete_file(&self, path: &str) -> Result<(), StorageError> {
        self.db.with_writer(|conn| queries::files::delete_file(conn, path))
    }
    fn count_files(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::files::count_files)
    }
    fn insert_diagnostic(&self, row: &DiagnosticRow) -> Result<(), StorageError> {
        self.db.with_writer(|conn| queries::files::insert_diagnostic(conn, row))
    }
    fn all_diagnostics(&self) -> Result<Vec<DiagnosticRow>, StorageError> {
        self.db.with_reader(queries::files::all_diagnostics)
    }
    fn diagnostics_for_file(&self, file: &str) -> Result<Vec<DiagnosticRow>, StorageError> {
        self.db
            .with_reader(|conn| queries::files::diagnostics_for_file(conn, file))
    }
}

impl IFactSymbols for FactStorageEngine {
    fn insert_symbols(&self, rows: &[SymbolRow]) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| queries::symbols::insert_symbols(conn, rows))
    }
    fn symbols_for_file(&self, file: &str) -> Result<Vec<SymbolRow>, StorageError> {
        self.db.with_reader(|conn| queries::symbols::symbols_for_file(conn, file))
    }
    fn symbols_by_name(&self, name: &str) -> Result<Vec<SymbolRow>, StorageError> {
        self.db.with_reader(|conn| queries::symbols::symbols_by_name(conn, name))
    }
    fn count_symbols(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::symbols::count_symbols)
    }
    fn insert_imports(&self, rows: &[ImportRow]) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| queries::symbols::insert_imports(conn, rows))
    }
    fn imports_for_file(&self, file: &str) -> Result<Vec<ImportRow>, StorageError> {
        self.db.with_reader(|conn| queries::symbols::imports_for_file(conn, file))
    }
    fn unresolved_imports(&self) -> Result<Vec<ImportRow>, StorageError> {
        self.db.with_reader(queries::symbols::unresolved_imports)
    }
    fn set_import_resolved(
        &self,
        file: &str,
        line: i64,
        target: &str,
        resolved_path: &str,
    ) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            queries::symbols::set_import_resolved(conn, file, line, target, resolved_path)
        })
    }
}

impl IFactCalls for FactStorageEngine {
    fn insert_calls(&self, rows: &[CallRow]) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| queries::calls::insert_calls(conn, rows))
    }
    fn calls_for_file(&self, file: &str) -> Result<Vec<CallRow>, StorageError> {
        self.db.with_reader(|conn| queries::calls::calls_for_file(conn, file))
    }
    fn unresolved_calls(&self) -> Result<Vec<CallRow>, StorageError> {
        self.db.with_reader(queries::calls::unresolved_calls)
    }
    fn set_callee_resolved(
        &self,
        file: &str,
        line: i64,
        argument_index: i64,
        resolved_scope: &str,
    ) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            queries::calls::set_callee_resolved(conn, file, line, argument_index, resolved_scope)
        })
    }
    fn calls_at_site(&self, file: &str, line: i64) -> Result<Vec<CallRow>, StorageError> {
        self.db.with_reader(|conn| queries::calls::calls_at_site(conn, file, line))
    }
    fn calls_to_callee(&self, callee_scope: &str) -> Result<Vec<CallRow>, StorageError> {
        self.db
            .with_reader(|conn| queries::calls::calls_to_callee(conn, callee_scope))
    }
    fn insert_assignments(&self, rows: &[AssignmentRow]) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| queries::calls::insert_assignments(conn, rows))
    }
    fn assignments_for_scope(
        &self,
        file: &str,
        scope: &str,
    ) -> Result<Vec<AssignmentRow>, StorageError> {
        self.db
            .with_reader(|conn| queries::calls::assignments_for_scope(conn, file, scope))
    }
    fn insert_refs(&self, rows: &[RefRow]) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| queries::calls::insert_refs(conn, rows))
    }
    fn refs_for_scope(&self, file: &str, scope: &str) -> Result<Vec<RefRow>, StorageError> {
        self.db.with_reader(|conn| queries::calls::refs_for_scope(conn, file, scope))
    }
}

impl IFactFrameworks for FactStorageEngine {
    fn insert_routes(&self, rows: &[RouteRow]) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| queries::frameworks::insert_routes(conn, rows))
    }
    fn all_routes(&self) -> Result<Vec<RouteRow>, StorageError> {
        self.db.with_reader(queries::frameworks::all_routes)
    }
    fn routes_for_file(&self, file: &str) -> Result<Vec<RouteRow>, StorageError> {
        self.db.with_reader(|conn| queries::frameworks::routes_for_file(conn, file))
    }
    fn insert_validation_usage(&self, rows: &[ValidationUsageRow]) -> Result<usize, StorageError> {
        self.db
            .with_writer(|conn| queries::frameworks::insert_validation_usage(conn, rows))
    }
    fn all_validation_usage(&self) -> Result<Vec<ValidationUsageRow>, StorageError> {
        self.db.with_reader(queries::frameworks::all_validation_usage)
    }
    fn validation_usage_for_scope(
        &self,
        file: &str,
        scope: &str,
    ) -> Result<Vec<ValidationUsageRow>, StorageError> {
        self.db
            .with_reader(|conn| queries::frameworks::validation_usage_for_scope(conn, file, scope))
    }
    fn insert_sql_queries(&self, rows: &[SqlQueryRow]) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| queries::frameworks::insert_sql_queries(conn, rows))
    }
    fn sql_queries_for_file(&self, file: &str) -> Result<Vec<SqlQueryRow>, StorageError> {
        self.db
            .with_reader(|conn| queries::frameworks::sql_queries_for_file(conn, file))
    }
    fn all_sql_queries(&self) -> Result<Vec<SqlQueryRow>, StorageError> {
        self.db.with_reader(queries::frameworks::all_sql_queries)
    }
}

impl IFactCfg for FactStorageEngine {
    fn insert_cfg_blocks(&self, rows: &[CfgBlockRow]) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| queries::cfg::insert_cfg_blocks(conn, rows))
    }
    fn insert_cfg_edges(&self, rows: &[CfgEdgeRow]) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| queries::cfg::insert_cfg_edges(conn, rows))
    }
    fn insert_cfg_statements(&self, rows: &[CfgStatementRow]) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| queries::cfg::insert_cfg_statements(conn, rows))
    }
    fn blocks_for_scope(&self, file: &str, scope: &str) -> Result<Vec<CfgBlockRow>, StorageError> {
        self.db.with_reader(|conn| queries::cfg::blocks_for_scope(conn, file, scope))
    }
    fn edges_from(&self, block_id: &str) -> Result<Vec<CfgEdgeRow>, StorageError> {
        self.db.with_reader(|conn| queries::cfg::edges_from(conn, block_id))
    }
    fn edges_to(&self, block_id: &str) -> Result<Vec<CfgEdgeRow>, StorageError> {
        self.db.with_reader(|conn| queries::cfg::edges_to(conn, block_id))
    }
    fn statements_for_block(&self, block_id: &str) -> Result<Vec<CfgStatementRow>, StorageError> {
        self.db
            .with_reader(|conn| queries::cfg::statements_for_block(conn, block_id))
    }
}

impl IFactGraph for FactStorageEngine {
    fn insert_call_graph_edges(&self, rows: &[CallGraphEdgeRow]) -> Result<usize, StorageError> {
        self.db
            .with_writer(|conn| queries::graph::insert_call_graph_edges(conn, rows))
    }
    fn insert_import_graph_edges(
        &self,
        rows: &[ImportGraphEdgeRow],
    ) -> Result<usize, StorageError> {
        self.db
            .with_writer(|conn| queries::graph::insert_import_graph_edges(conn, rows))
    }
    fn all_call_graph_edges(&self) -> Result<Vec<CallGraphEdgeRow>, StorageError> {
        self.db.with_reader(queries::graph::all_call_graph_edges)
    }
    fn all_import_graph_edges(&self) -> Result<Vec<ImportGraphEdgeRow>, StorageError> {
        self.db.with_reader(queries::graph::all_import_graph_edges)
    }
    fn callers_of(&self, callee_scope: &str) -> Result<Vec<CallGraphEdgeRow>, StorageError> {
        self.db.with_reader(|conn| queries::graph::callers_of(conn, callee_scope))
    }
    fn callees_of(&self, caller_scope: &str) -> Result<Vec<CallGraphEdgeRow>, StorageError> {
        self.db.with_reader(|conn| queries::graph::callees_of(conn, caller_scope))
    }
}

impl IFactFindings for FactStorageEngine {
    fn insert_findings(&self, rows: &[FindingRow]) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| queries::findings::insert_findings(conn, rows))
    }
    fn all_findings(&self) -> Result<Vec<FindingRow>, StorageError> {
        self.db.with_reader(queries::findings::all_findings)
    }
    fn findings_for_sink_file(&self, file: &str) -> Result<Vec<FindingRow>, StorageError> {
        self.db
            .with_reader(|conn| queries::findings::findings_for_sink_file(conn, file))
    }
    fn count_findings(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::findings::count_findings)
    }
}

impl IBatchWriter for FactStorageEngine {
    fn enqueue_file_batch(&self, batch: FileBatch) -> Result<(), StorageError> {
        self.batch.enqueue_file_batch(batch)
    }
    fn enqueue_graph_edges(
        &self,
        call_graph_edges: Vec<CallGraphEdgeRow>,
        import_graph_edges: Vec<ImportGraphEdgeRow>,
    ) -> Result<(), StorageError> {
        self.batch.enqueue_graph_edges(call_graph_edges, import_graph_edges)
    }
    fn enqueue_findings(&self, findings: Vec<FindingRow>) -> Result<(), StorageError> {
        self.batch.enqueue_findings(findings)
    }
    fn flush(&self) -> Result<(), StorageError> {
        self.batch.flush()
    }
    fn flush_sync(&self) -> Result<WriteStats, StorageError> {
        self.batch.flush_sync()
    }
    fn stats(&self) -> WriteStats {
        self.batch.stats()
    }
    fn shutdown(self: Box<Self>) -> Result<WriteStats, StorageError> {
        let Self { db, batch } = *self;
        drop(db);
        batch.shutdown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_file(path: &str) -> FileRow {
        FileRow {
            path: path.to_string(),
            language: "python".to_string(),
            sha256: "abc123".to_string(),
            size_bytes: 42,
            line_count: 3,
        }
    }

    #[test]
    fn insert_and_load_files_round_trip() {
        let engine = FactStorageEngine::open_in_memory().unwrap();
        engine.insert_files(&[sample_file("a.py")]).unwrap();
        let files = engine.load_all_files().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "a.py");
    }

    #[test]
    fn enqueue_file_batch_commits_through_flush_sync() {
        let engine = FactStorageEngine::open_in_memory().unwrap();
        let batch = FileBatch {
            file: sample_file("b.py"),
            symbols: vec![SymbolRow {
                file: "b.py".to_string(),
                name: "handler".to_string(),
                kind: "function".to_string(),
                line: 10,
                column: 0,
                scope: "b.py::handler".to_string(),
                signature: None,
            }],
            ..Default::default()
        };
        engine.enqueue_file_batch(batch).unwrap();
        let stats = engine.flush_sync().unwrap();
        assert_eq!(stats.files, 1);
        assert_eq!(stats.symbols, 1);
        assert_eq!(engine.symbols_for_file("b.py").unwrap().len(), 1);
    }

    #[test]
    fn unresolved_calls_narrows_to_null_callee() {
        let engine = FactStorageEngine::open_in_memory().unwrap();
        engine
            .insert_calls(&[CallRow {
                file: "a.py".to_string(),
                caller_scope: "a.py::main".to_string(),
                callee_name: "helper".to_string(),
                callee_resolved: None,
                line: 5,
                argument_index: 0,
                argument_expression: "x".to_string(),
                argument_kind: "identifier".to_string(),
            }])
            .unwrap();
        assert_eq!(engine.unresolved_calls().unwrap().len(), 1);
        engine
            .set_callee_resolved("a.py", 5, 0, "a.py::helper")
            .unwrap();
        assert_eq!(engine.unresolved_calls().unwrap().len(), 0);
    }

    #[test]
    fn findings_are_scoped_by_sink_file() {
        let engine = FactStorageEngine::open_in_memory().unwrap();
        engine
            .insert_findings(&[FindingRow {
                id: "f1".to_string(),
                category: "sqli".to_string(),
                severity: "high".to_string(),
                source_file: "a.py".to_string(),
                source_line: 1,
                source_kind: "route_param".to_string(),
                access_path_start: "request.args.q".to_string(),
                sink_file: "b.py".to_string(),
                sink_line: 20,
                sink_kind: "sql_exec".to_string(),
                vulnerable_argument_index: 0,
                provenance_json: "[]".to_string(),
                sanitizers_json: "[]".to_string(),
                confidence: "high".to_string(),
                rule_id: None,
                truncated: false,
                forward_verified: true,
                created_at: 0,
            }])
            .unwrap();
        assert_eq!(engine.count_findings().unwrap(), 1);
        assert_eq!(engine.findings_for_sink_file("b.py").unwrap().len(), 1);
        assert_eq!(engine.findings_for_sink_file("missing.py").unwrap().len(), 0);
    }
}
