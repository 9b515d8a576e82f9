//! Persists the scanner's `CachedFileMetadata` between runs so `--resume`
//! (spec.md 6, 7) has something to compare against — `CachedFileMetadata`
//! itself documents that the caller is responsible for carrying it across
//! invocations, since the fact base's `FileRow` has no `mtime` column.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use auditor_core::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::scanner::CachedFileMetadata;

const SCAN_CACHE_FILE: &str = "scan_cache.json";

#[derive(Debug, Serialize, Deserialize)]
struct CachedEntry {
    path: PathBuf,
    mtime_unix_ms: i64,
    file_size: u64,
    sha256: String,
}

pub fn load(output_directory: &Path) -> FxHashMap<PathBuf, CachedFileMetadata> {
    let path = output_directory.join(SCAN_CACHE_FILE);
    let Ok(text) = std::fs::read_to_string(&path) else {
        return FxHashMap::default();
    };
    let Ok(entries) = serde_json::from_str::<Vec<CachedEntry>>(&text) else {
        return FxHashMap::default();
    };
    entries
        .into_iter()
        .map(|e| {
            let mtime = UNIX_EPOCH + std::time::Duration::from_millis(e.mtime_unix_ms.max(0) as u64);
            (e.path, CachedFileMetadata { mtime, file_size: e.file_size, sha256: e.sha256 })
        })
        .collect()
}

pub fn save(output_directory: &Path, metadata: &FxHashMap<PathBuf, CachedFileMetadata>) -> std::io::Result<()> {
    let entries: Vec<CachedEntry> = metadata
        .iter()
        .map(|(path, meta)| {
            let mtime_unix_ms = meta
                .mtime
                .duration_since(SystemTime::UNIX_EPOCH)
                .map(|d| d.as_millis() as i64)
                .unwrap_or(0);
            CachedEntry { path: path.clone(), mtime_unix_ms, file_size: meta.file_size, sha256: meta.sha256.clone() }
        })
        .collect();
    let text = serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string());
    std::fs::write(output_directory.join(SCAN_CACHE_FILE), text)
}
