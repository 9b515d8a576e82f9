//! `IFactFindings` — `findings_consolidated` (spec.md 4.5.7, 6). Findings
//! are rows in the fact base, not in-memory structures, so reports and
//! rules can query them independently of the engine that produced them.

use std::sync::Arc;

use crate::errors::StorageError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindingRow {
    pub id: String,
    pub category: String,
    pub severity: String,
    pub source_file: String,
    pub source_line: i64,
    pub source_kind: String,
    pub access_path_start: String,
    pub sink_file: String,
    pub sink_line: i64,
    pub sink_kind: String,
    pub vulnerable_argument_index: i64,
    /// JSON array of provenance hops.
    pub provenance_json: String,
    /// JSON array of sanitizer descriptions.
    pub sanitizers_json: String,
    pub confidence: String,
    pub rule_id: Option<String>,
    pub truncated: bool,
    pub forward_verified: bool,
    pub created_at: i64,
}

pub trait IFactFindings: Send + Sync {
    fn insert_findings(&self, rows: &[FindingRow]) -> Result<usize, StorageError>;
    fn all_findings(&self) -> Result<Vec<FindingRow>, StorageError>;
    fn findings_for_sink_file(&self, file: &str) -> Result<Vec<FindingRow>, StorageError>;
    fn count_findings(&self) -> Result<i64, StorageError>;
}

impl<T: IFactFindings + ?Sized> IFactFindings for Arc<T> {
    fn insert_findings(&self, rows: &[FindingRow]) -> Result<usize, StorageError> {
        (**self).insert_findings(rows)
    }
    fn all_findings(&self) -> Result<Vec<FindingRow>, StorageError> {
        (**self).all_findings()
    }
    fn findings_for_sink_file(&self, file: &str) -> Result<Vec<FindingRow>, StorageError> {
        (**self).findings_for_sink_file(file)
    }
    fn count_findings(&self) -> Result<i64, StorageError> {
        (**self).count_findings()
    }
}
