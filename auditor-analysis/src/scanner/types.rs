//! Value types shared between the walker, incremental classifier, and
//! `Scanner` (spec.md 4.1).

use std::path::PathBuf;
use std::time::SystemTime;

use auditor_core::FxHashMap;

use super::language_detect::Language;

/// One file found by `walk_directory`, before hashing or classification.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub file_size: u64,
    pub mtime: SystemTime,
    pub language: Option<Language>,
}

/// The persisted state a caller passes back in on the next run to enable
/// incremental scanning (spec.md 7 "Recovery"). Mirrors the subset of a
/// Files row needed to detect change without reopening the fact base.
#[derive(Debug, Clone)]
pub struct CachedFileMetadata {
    pub mtime: SystemTime,
    pub file_size: u64,
    pub sha256: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Added,
    Modified,
    Unchanged,
    Removed,
}

/// One file after hashing and classification against the cache.
#[derive(Debug, Clone)]
pub struct ClassifiedFile {
    pub path: PathBuf,
    pub file_size: u64,
    pub mtime: SystemTime,
    pub language: Option<Language>,
    pub sha256: String,
}

#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    pub total_files: usize,
    pub total_size_bytes: u64,
    pub discovery_ms: u64,
    pub hashing_ms: u64,
    pub diff_ms: u64,
    pub cache_hit_rate: f64,
    pub languages_found: FxHashMap<&'static str, usize>,
}

/// The result of one scan: which files changed since the cached metadata,
/// plus everything still on disk unchanged. `added ∪ modified` is exactly
/// the set the orchestrator re-extracts (spec.md 4.6 step 2).
#[derive(Debug, Clone, Default)]
pub struct ScanDiff {
    pub added: Vec<ClassifiedFile>,
    pub modified: Vec<ClassifiedFile>,
    pub unchanged: Vec<ClassifiedFile>,
    pub removed: Vec<PathBuf>,
    pub stats: ScanStats,
}
