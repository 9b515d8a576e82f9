//! `IFactFiles` — the Files table (spec.md 3), plus the satellite
//! diagnostics and scan_history tables that share its lifecycle (written
//! once per file / once per run, never mutated by the resolver or taint
//! engine).

use std::sync::Arc;

use crate::errors::StorageError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileRow {
    pub path: String,
    pub language: String,
    pub sha256: String,
    pub size_bytes: i64,
    pub line_count: i64,
}

#[derive(Debug, Clone)]
pub struct DiagnosticRow {
    pub file: Option<String>,
    pub stage: String,
    pub severity: String,
    pub code: String,
    pub message: String,
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct ScanHistoryRow {
    pub id: i64,
    pub started_at: i64,
    pub completed_at: Option<i64>,
    pub root_path: String,
    pub total_files: i64,
    pub added_files: i64,
    pub modified_files: i64,
    pub removed_files: i64,
    pub unchanged_files: i64,
    pub duration_ms: Option<i64>,
    pub status: String,
    pub error: Option<String>,
}

/// Counters recorded when a scan completes (spec.md 4.6 step 7 manifest).
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanHistoryStats {
    pub total_files: i64,
    pub added_files: i64,
    pub modified_files: i64,
    pub removed_files: i64,
    pub unchanged_files: i64,
    pub duration_ms: i64,
    pub status: &'static str,
    pub error: Option<&'static str>,
}

pub trait IFactFiles: Send + Sync {
    fn insert_files(&self, rows: &[FileRow]) -> Result<usize, StorageError>;
    fn load_all_files(&self) -> Result<Vec<FileRow>, StorageError>;
    fn get_file(&self, path: &str) -> Result<Option<FileRow>, StorageError>;
    fn delete_file(&self, path: &str) -> Result<(), StorageError>;
    fn count_files(&self) -> Result<i64, StorageError>;

    fn insert_diagnostic(&self, row: &DiagnosticRow) -> Result<(), StorageError>;
    fn all_diagnostics(&self) -> Result<Vec<DiagnosticRow>, StorageError>;
    fn diagnostics_for_file(&self, file: &str) -> Result<Vec<DiagnosticRow>, StorageError>;

    fn start_scan_history(&self, started_at: i64, root_path: &str) -> Result<i64, StorageError>;
    fn complete_scan_history(
        &self,
        id: i64,
        completed_at: i64,
        stats: ScanHistoryStats,
    ) -> Result<(), StorageError>;
    fn latest_scan_history(&self) -> Result<Option<ScanHistoryRow>, StorageError>;
}

impl<T: IFactFiles + ?Sized> IFactFiles for Arc<T> {
    fn insert_files(&self, rows: &[FileRow]) -> Result<usize, StorageError> {
        (**self).insert_files(rows)
    }
    fn load_all_files(&self) -> Result<Vec<FileRow>, StorageError> {
        (**self).load_all_files()
    }
    fn get_file(&self, path: &str) -> Result<Option<FileRow>, StorageError> {
        (**self).get_file(path)
    }
    fn delete_file(&self, path: &str) -> Result<(), StorageError> {
        (**self).delete_file(path)
    }
    fn count_files(&self) -> Result<i64, StorageError> {
        (**self).count_files()
    }
    fn insert_diagnostic(&self, row: &DiagnosticRow) -> Result<(), StorageError> {
        (**self).insert_diagnostic(row)
    }
    fn all_diagnostics(&self) -> Result<Vec<DiagnosticRow>, StorageError> {
        (**self).all_diagnostics()
    }
    fn diagnostics_for_file(&self, file: &str) -> Result<Vec<DiagnosticRow>, StorageError> {
        (**self).diagnostics_for_file(file)
    }
    fn start_scan_history(&self, started_at: i64, root_path: &str) -> Result<i64, StorageError> {
        (**self).start_scan_history(started_at, root_path)
    }
    fn complete_scan_history(
        &self,
        id: i64,
        completed_at: i64,
        stats: ScanHistoryStats,
    ) -> Result<(), StorageError> {
        (**self).complete_scan_history(id, completed_at, stats)
    }
    fn latest_scan_history(&self) -> Result<Option<ScanHistoryRow>, StorageError> {
        (**self).latest_scan_history()
    }
}
