//! Top-level `Scanner` orchestrating walker → hasher → classify → diff
//! (spec.md 4.1).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use auditor_core::errors::ScanError;
use auditor_core::{FxHashMap, PipelineConfig, PipelineEventHandler};
use rayon::prelude::*;

use super::incremental::{classify_file, compute_diff};
use super::types::{CachedFileMetadata, DiscoveredFile, FileStatus, ScanDiff, ScanStats};
use super::walker;
use auditor_core::traits::cancellation::CancellationToken;

/// Orchestrates file discovery, hashing, and incremental classification.
pub struct Scanner {
    config: PipelineConfig,
    cancellation: CancellationToken,
}

impl Scanner {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Perform a full scan of `root`. `cached_metadata` enables incremental
    /// detection; pass an empty map for a from-scratch scan.
    pub fn scan(
        &self,
        root: &Path,
        cached_metadata: &FxHashMap<PathBuf, CachedFileMetadata>,
        events: &dyn PipelineEventHandler,
    ) -> Result<ScanDiff, ScanError> {
        events.on_scan_started(&root.display().to_string());

        let discovery_start = Instant::now();
        let cancelled_flag = std::sync::atomic::AtomicBool::new(self.cancellation.is_cancelled());
        let files = walker::walk_directory(root, &self.config, &cancelled_flag)?;
        let discovery_ms = discovery_start.elapsed().as_millis() as u64;

        if self.cancellation.is_cancelled() {
            return Ok(ScanDiff {
                stats: ScanStats { discovery_ms, ..Default::default() },
                ..compute_diff(Vec::new(), cached_metadata, ScanStats::default())
            });
        }

        events.on_scan_progress(0);

        let hashing_start = Instant::now();
        let force_full = !self.config.effective_resume();
        let processed = AtomicUsize::new(0);
        let total = files.len();

        let entries: Vec<_> = files
            .par_iter()
            .filter_map(|file| {
                if self.cancellation.is_cancelled() {
                    return None;
                }
                let count = processed.fetch_add(1, Ordering::Relaxed);
                if count % 100 == 0 {
                    events.on_scan_progress(count);
                }

                let cached = cached_metadata.get(&file.path);
                match classify_file(file, cached, force_full) {
                    Ok(result) => Some(result),
                    Err(e) => {
                        tracing::warn!(path = %file.path.display(), error = %e, "file scan error");
                        None
                    }
                }
            })
            .collect();
        let hashing_ms = hashing_start.elapsed().as_millis() as u64;

        let diff_start = Instant::now();
        let mut languages_found = FxHashMap::default();
        for (_, entry) in &entries {
            if let Some(lang) = entry.language {
                *languages_found.entry(lang.as_str()).or_insert(0usize) += 1;
            }
        }
        let mtime_hits = entries.iter().filter(|(s, _)| *s == FileStatus::Unchanged).count();
        let cache_hit_rate = if total > 0 { mtime_hits as f64 / total as f64 } else { 0.0 };

        let stats = ScanStats {
            total_files: entries.len(),
            total_size_bytes: entries.iter().map(|(_, e)| e.file_size).sum(),
            discovery_ms,
            hashing_ms,
            diff_ms: 0,
            cache_hit_rate,
            languages_found,
        };

        let mut diff = compute_diff(entries, cached_metadata, stats);
        diff.stats.diff_ms = diff_start.elapsed().as_millis() as u64;

        events.on_scan_complete(diff.added.len() + diff.modified.len() + diff.unchanged.len(), discovery_ms + hashing_ms + diff.stats.diff_ms);

        Ok(diff)
    }
}
