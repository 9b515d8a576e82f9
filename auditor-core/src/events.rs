//! Progress events emitted during discovery and extraction. These are an
//! observability convenience, not part of the fact base contract — a
//! caller that ignores them gets the same fact base as one that doesn't.

/// Implemented by callers that want progress feedback during a pipeline
/// run. All methods have no-op default bodies so callers only implement
/// what they need.
pub trait PipelineEventHandler: Send + Sync {
    fn on_scan_started(&self, _root: &str) {}
    fn on_scan_progress(&self, _files_seen: usize) {}
    fn on_scan_complete(&self, _total_files: usize, _duration_ms: u64) {}
    fn on_extract_progress(&self, _files_done: usize, _files_total: usize) {}
    fn on_extract_file_error(&self, _file: &str, _message: &str) {}
    fn on_resolve_complete(&self, _import_edges: usize, _call_edges: usize) {}
    fn on_taint_progress(&self, _worklist_processed: u64, _findings_so_far: usize) {}
    fn on_pipeline_complete(&self, _findings: usize, _errors: usize) {}
}

/// A handler that discards every event. The default when a caller does not
/// care about progress feedback.
pub struct NoOpEventHandler;

impl PipelineEventHandler for NoOpEventHandler {}
