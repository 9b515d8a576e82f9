//! mtime/size/sha256 change classification (spec.md 4.1, 7).
//!
//! A file is reconsidered unchanged only when mtime, size, *and* sha256 all
//! match the cached row — mtime/size alone is an optimization to skip the
//! hash, never a substitute for it.

use std::path::PathBuf;

use auditor_core::FxHashMap;

use super::types::{CachedFileMetadata, ClassifiedFile, DiscoveredFile, FileStatus, ScanDiff, ScanStats};

pub fn classify_file(
    file: &DiscoveredFile,
    cached: Option<&CachedFileMetadata>,
    force_full: bool,
) -> std::io::Result<(FileStatus, ClassifiedFile)> {
    let mtime_size_match = cached.is_some_and(|c| c.mtime == file.mtime && c.file_size == file.file_size);

    if !force_full && mtime_size_match {
        let cached = cached.unwrap();
        return Ok((
            FileStatus::Unchanged,
            ClassifiedFile {
                path: file.path.clone(),
                file_size: file.file_size,
                mtime: file.mtime,
                language: file.language,
                sha256: cached.sha256.clone(),
            },
        ));
    }

    let sha256 = hash_file(&file.path)?;
    let status = match cached {
        Some(c) if c.sha256 == sha256 => FileStatus::Unchanged,
        Some(_) => FileStatus::Modified,
        None => FileStatus::Added,
    };

    Ok((
        status,
        ClassifiedFile {
            path: file.path.clone(),
            file_size: file.file_size,
            mtime: file.mtime,
            language: file.language,
            sha256,
        },
    ))
}

fn hash_file(path: &std::path::Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    let hash = xxhash_rust::xxh3::xxh3_128(&bytes);
    Ok(format!("{hash:032x}"))
}

/// Fold classified files plus the set of paths that disappeared from disk
/// into one `ScanDiff`.
pub fn compute_diff(
    entries: Vec<(FileStatus, ClassifiedFile)>,
    cached_metadata: &FxHashMap<PathBuf, CachedFileMetadata>,
    stats: ScanStats,
) -> ScanDiff {
    let mut diff = ScanDiff {
        stats,
        ..Default::default()
    };

    let mut seen = auditor_core::types::collections::FxHashSet::default();
    for (status, file) in entries {
        seen.insert(file.path.clone());
        match status {
            FileStatus::Added => diff.added.push(file),
            FileStatus::Modified => diff.modified.push(file),
            FileStatus::Unchanged => diff.unchanged.push(file),
            FileStatus::Removed => {}
        }
    }

    for path in cached_metadata.keys() {
        if !seen.contains(path) {
            diff.removed.push(path.clone());
        }
    }
    diff.removed.sort();

    diff
}
