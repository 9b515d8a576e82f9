//! `PipelineReport` — the manifest data `run_pipeline` returns and
//! persists as `manifest.json` (spec.md 4.6, 6).
//!
//! Grounded on the teacher's `engine/types.rs` `AnalysisResult` shape:
//! per-stage timings alongside the summary counts, serialized the same
//! way.

use auditor_core::errors::ExitCode;
use auditor_core::FxHashMap;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct StageDurations {
    pub discovery_ms: u64,
    pub extract_ms: u64,
    pub resolve_ms: u64,
    pub taint_ms: u64,
    pub total_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub pipeline_version: String,
    pub schema_digest: u64,
    pub started_at: i64,
    pub completed_at: i64,
    pub files_indexed: i64,
    pub files_added: usize,
    pub files_modified: usize,
    pub files_removed: usize,
    pub files_unchanged: usize,
    pub findings_total: usize,
    pub findings_by_category: FxHashMap<String, usize>,
    pub error_count: usize,
    pub durations: StageDurations,
}

impl PipelineReport {
    /// The exit code a caller driving a CLI around `run_pipeline` should
    /// return for a successful run (spec.md 6) — fatal paths never reach
    /// here, they return `Err(PipelineError)` instead.
    pub fn exit_code(&self) -> ExitCode {
        if self.findings_total == 0 {
            ExitCode::NoFindings
        } else {
            ExitCode::FindingsEmitted
        }
    }
}
