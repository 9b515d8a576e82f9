//! The orchestrator (spec.md 4.6): sequences discovery, extraction,
//! resolution, and taint analysis over one fact base, writing the
//! `findings.json`/`diagnostics.log`/`manifest.json` artifacts spec.md 6
//! names. Grounded on the teacher's `engine/pipeline.rs` phase-timed
//! struct shape and `drift-core/src/workspace/init.rs`'s
//! schema-check-then-proceed sequencing — `run_pipeline` is the single
//! library entry point; there is no CLI in this workspace's scope.

mod export;
mod findings;
mod report;
mod scan_cache;

pub use report::PipelineReport;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use auditor_core::errors::{ConfigError, DriftErrorCode, ParseError, PipelineError};
use auditor_core::schema::schema_digest;
use auditor_core::traits::storage::{
    DiagnosticRow, FileBatch, FileRow, IBatchWriter, IFactFiles, ScanHistoryStats,
};
use auditor_core::{FxHashMap, NoOpEventHandler, PipelineConfig, PipelineEventHandler};
use auditor_storage::FactStorageEngine;
use rayon::prelude::*;

use crate::call_graph;
use crate::graph::taint;
use crate::parsers::ParserManager;
use crate::scanner::{Language, Scanner};

fn now_unix() -> i64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs() as i64).unwrap_or(0)
}

fn storage_err(e: auditor_core::errors::StorageError) -> PipelineError {
    match e {
        auditor_core::errors::StorageError::SchemaDigestMismatch { .. } => PipelineError::SchemaMismatch(e),
        other => PipelineError::Storage(other),
    }
}

/// Runs one complete pipeline invocation against `config`. `events` drives
/// progress feedback; pass `&NoOpEventHandler` when none is wanted.
pub fn run_pipeline(
    config: PipelineConfig,
    events: &dyn PipelineEventHandler,
) -> Result<PipelineReport, PipelineError> {
    let total_start = Instant::now();
    let started_at = now_unix();

    let root = config.root_path.clone().ok_or(ConfigError::MissingRootPath)?;
    let output_directory = config.effective_output_directory();
    std::fs::create_dir_all(&output_directory).map_err(|e| PipelineError::Internal {
        message: format!("cannot create output directory {}: {e}", output_directory.display()),
    })?;

    let db_path = output_directory.join("repo_index.db");
    let storage = FactStorageEngine::open(&db_path).map_err(storage_err)?;

    let scan_history_id = storage
        .start_scan_history(started_at, &root.display().to_string())
        .map_err(storage_err)?;

    // --- Stage 1: discovery -------------------------------------------------
    let discovery_start = Instant::now();
    let cached_metadata =
        if config.effective_resume() { scan_cache::load(&output_directory) } else { FxHashMap::default() };

    let scanner = Scanner::new(config.clone());
    let diff = scanner
        .scan(&root, &cached_metadata, events)
        .map_err(PipelineError::DiscoveryFailed)?;
    let discovery_ms = discovery_start.elapsed().as_millis() as u64;

    // --- Stage 2: extraction -------------------------------------------------
    let extract_start = Instant::now();
    for removed in &diff.removed {
        storage.delete_file(&removed.display().to_string()).map_err(storage_err)?;
    }

    let to_extract: Vec<_> = diff.added.iter().chain(diff.modified.iter()).collect();
    let files_total = to_extract.len();
    let processed = AtomicUsize::new(0);
    let fatal: Mutex<Option<ParseError>> = Mutex::new(None);
    let parser = ParserManager::new();

    let diagnostics: Vec<DiagnosticRow> = to_extract
        .par_iter()
        .filter_map(|file| {
            let count = processed.fetch_add(1, Ordering::Relaxed);
            if count % 50 == 0 {
                events.on_extract_progress(count, files_total);
            }

            let path_str = file.path.display().to_string();
            let language_name =
                file.language.map(|l| l.as_str().to_string()).unwrap_or_else(|| "unknown".to_string());

            let lang = match file.language {
                Some(l) if l != Language::Unknown && config.language_enabled(l.as_str()) => l,
                _ => {
                    let row = FileRow {
                        path: path_str.clone(),
                        language: language_name,
                        sha256: file.sha256.clone(),
                        size_bytes: file.file_size as i64,
                        line_count: 0,
                    };
                    let _ = storage.enqueue_file_batch(FileBatch { file: row, ..Default::default() });
                    return None;
                }
            };

            let source = match std::fs::read_to_string(&file.path) {
                Ok(s) => s,
                Err(e) => {
                    events.on_extract_file_error(&path_str, &e.to_string());
                    return Some(DiagnosticRow {
                        file: Some(path_str),
                        stage: "extract".to_string(),
                        severity: "error".to_string(),
                        code: "SCAN_FILE_IO".to_string(),
                        message: e.to_string(),
                        created_at: now_unix(),
                    });
                }
            };

            let line_count = source.lines().count() as i64;
            let content_hash = xxhash_rust::xxh3::xxh3_64(source.as_bytes());

            match parser.parse(&path_str, &source, lang, content_hash) {
                Ok(extracted) => {
                    let row = FileRow {
                        path: path_str.clone(),
                        language: lang.as_str().to_string(),
                        sha256: file.sha256.clone(),
                        size_bytes: file.file_size as i64,
                        line_count,
                    };
                    let batch = FileBatch {
                        file: row,
                        symbols: extracted.symbols,
                        imports: extracted.imports,
                        calls: extracted.calls,
                        assignments: extracted.assignments,
                        refs: extracted.refs,
                        routes: extracted.routes,
                        validation_usage: extracted.validation_usage,
                        sql_queries: extracted.sql_queries,
                        cfg_blocks: extracted.cfg_blocks,
                        cfg_edges: extracted.cfg_edges,
                        cfg_statements: extracted.cfg_statements,
                        diagnostics: Vec::new(),
                    };
                    if let Err(e) = storage.enqueue_file_batch(batch) {
                        return Some(DiagnosticRow {
                            file: Some(path_str),
                            stage: "extract".to_string(),
                            severity: "error".to_string(),
                            code: "STORAGE_ERROR".to_string(),
                            message: e.to_string(),
                            created_at: now_unix(),
                        });
                    }
                    None
                }
                Err(ParseError::RowSchemaViolation { table, file: f, column, reason }) => {
                    let mut slot = fatal.lock().unwrap();
                    if slot.is_none() {
                        *slot = Some(ParseError::RowSchemaViolation { table, file: f, column, reason });
                    }
                    None
                }
                Err(e) => {
                    events.on_extract_file_error(&path_str, &e.to_string());
                    Some(DiagnosticRow {
                        file: Some(path_str),
                        stage: "extract".to_string(),
                        severity: "error".to_string(),
                        code: e.error_code().to_string(),
                        message: e.to_string(),
                        created_at: now_unix(),
                    })
                }
            }
        })
        .collect();

    if let Some(e) = fatal.into_inner().unwrap() {
        return Err(PipelineError::Internal { message: e.to_string() });
    }

    for d in &diagnostics {
        storage.insert_diagnostic(d).map_err(storage_err)?;
    }

    storage.flush_sync().map_err(storage_err)?;
    let extract_ms = extract_start.elapsed().as_millis() as u64;

    if config.effective_resume() {
        let mut next_cache = cached_metadata;
        for file in diff.unchanged.iter().chain(diff.added.iter()).chain(diff.modified.iter()) {
            next_cache.insert(
                file.path.clone(),
                crate::scanner::CachedFileMetadata {
                    mtime: file.mtime,
                    file_size: file.file_size,
                    sha256: file.sha256.clone(),
                },
            );
        }
        let _ = scan_cache::save(&output_directory, &next_cache);
    }

    // --- Stage 3: cross-file resolution --------------------------------------
    let resolve_start = Instant::now();
    let resolve_stats = call_graph::resolve_all(&storage)
        .map_err(|e| PipelineError::Internal { message: e.to_string() })?;
    let resolve_ms = resolve_start.elapsed().as_millis() as u64;
    events.on_resolve_complete(resolve_stats.resolved_imports, resolve_stats.resolved_calls);

    // --- Stage 4: taint analysis ----------------------------------------------
    let taint_start = Instant::now();
    let candidates = taint::engine::run(&storage, &config.taint)
        .map_err(|e| PipelineError::Internal { message: e.to_string() })?;
    let taint_ms = taint_start.elapsed().as_millis() as u64;

    let completed_at = now_unix();
    let finding_rows: Vec<_> =
        candidates.iter().map(|c| findings::to_finding_row(c, completed_at)).collect();
    storage.enqueue_findings(finding_rows.clone()).map_err(storage_err)?;
    storage.flush_sync().map_err(storage_err)?;

    events.on_taint_progress(finding_rows.len() as u64, finding_rows.len());

    let mut findings_by_category: FxHashMap<String, usize> = FxHashMap::default();
    for row in &finding_rows {
        *findings_by_category.entry(row.category.clone()).or_insert(0) += 1;
    }

    let all_diagnostics = storage.all_diagnostics().map_err(storage_err)?;
    let error_count = all_diagnostics.iter().filter(|d| d.severity == "error").count();

    storage
        .complete_scan_history(
            scan_history_id,
            completed_at,
            ScanHistoryStats {
                total_files: diff.added.len() as i64
                    + diff.modified.len() as i64
                    + diff.unchanged.len() as i64,
                added_files: diff.added.len() as i64,
                modified_files: diff.modified.len() as i64,
                removed_files: diff.removed.len() as i64,
                unchanged_files: diff.unchanged.len() as i64,
                duration_ms: total_start.elapsed().as_millis() as i64,
                status: "completed",
                error: None,
            },
        )
        .map_err(storage_err)?;

    let report = PipelineReport {
        pipeline_version: env!("CARGO_PKG_VERSION").to_string(),
        schema_digest: schema_digest(),
        started_at,
        completed_at,
        files_indexed: storage.count_files().map_err(storage_err)?,
        files_added: diff.added.len(),
        files_modified: diff.modified.len(),
        files_removed: diff.removed.len(),
        files_unchanged: diff.unchanged.len(),
        findings_total: finding_rows.len(),
        findings_by_category,
        error_count,
        durations: report::StageDurations {
            discovery_ms,
            extract_ms,
            resolve_ms,
            taint_ms,
            total_ms: total_start.elapsed().as_millis() as u64,
        },
    };

    export::write_findings_json(&output_directory, &report, &finding_rows, &all_diagnostics)
        .map_err(|e| PipelineError::Internal { message: e.to_string() })?;
    export::write_diagnostics_log(&output_directory, &all_diagnostics)
        .map_err(|e| PipelineError::Internal { message: e.to_string() })?;
    export::write_manifest_json(&output_directory, &report)
        .map_err(|e| PipelineError::Internal { message: e.to_string() })?;

    events.on_pipeline_complete(report.findings_total, error_count);

    Ok(report)
}

/// Convenience wrapper for callers that don't care about progress events.
pub fn run_pipeline_quiet(config: PipelineConfig) -> Result<PipelineReport, PipelineError> {
    run_pipeline(config, &NoOpEventHandler)
}
