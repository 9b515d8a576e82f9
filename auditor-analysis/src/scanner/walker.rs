//! Parallel file walker using the `ignore` crate's `WalkParallel`.
//!
//! Supports `.auditorignore` (gitignore syntax, hierarchical) and the
//! default ignore patterns below (spec.md 4.1).

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use auditor_core::errors::ScanError;
use auditor_core::PipelineConfig;
use crossbeam_channel as channel;

use super::language_detect::Language;
use super::types::DiscoveredFile;

/// Default vendor/build/VCS directories excluded from every scan.
pub const DEFAULT_IGNORES: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "target",
    ".next",
    ".nuxt",
    "__pycache__",
    ".pytest_cache",
    "coverage",
    ".nyc_output",
    "vendor",
    ".venv",
    "venv",
    ".tox",
    ".mypy_cache",
    "bin",
    "obj",
];

/// Walk a directory tree in parallel, collecting discovered files.
///
/// Respects `.gitignore`, `.auditorignore`, and [`DEFAULT_IGNORES`]. Returns
/// files sorted by path for deterministic output (spec.md 4.1, 8).
pub fn walk_directory(
    root: &Path,
    config: &PipelineConfig,
    cancelled: &AtomicBool,
) -> Result<Vec<DiscoveredFile>, ScanError> {
    let (tx, rx) = channel::unbounded();

    let max_file_size = config.effective_max_file_bytes();

    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .add_custom_ignore_filename(".auditorignore")
        .max_filesize(Some(max_file_size));

    let mut overrides = ignore::overrides::OverrideBuilder::new(root);
    for pattern in DEFAULT_IGNORES {
        let _ = overrides.add(&format!("!{pattern}/**"));
        let _ = overrides.add(&format!("!{pattern}"));
    }
    for pattern in &config.exclude_patterns {
        let _ = overrides.add(&format!("!{pattern}"));
    }
    if let Ok(built) = overrides.build() {
        builder.overrides(built);
    }

    let walker = builder.build_parallel();
    let cancelled = Arc::new(AtomicBool::new(cancelled.load(Ordering::Relaxed)));

    walker.run(|| {
        let tx = tx.clone();
        let cancelled = Arc::clone(&cancelled);
        Box::new(move |entry| {
            if cancelled.load(Ordering::Relaxed) {
                return ignore::WalkState::Quit;
            }

            let entry = match entry {
                Ok(e) => e,
                Err(_) => return ignore::WalkState::Continue,
            };

            match entry.file_type() {
                Some(ft) if ft.is_file() => {}
                _ => return ignore::WalkState::Continue,
            }

            let path = entry.path().to_path_buf();
            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(_) => return ignore::WalkState::Continue,
            };

            let language = Language::from_extension(path.extension().and_then(|e| e.to_str()));
            let mtime = metadata.modified().unwrap_or(std::time::SystemTime::UNIX_EPOCH);

            let _ = tx.send(DiscoveredFile {
                path,
                file_size: metadata.len(),
                mtime,
                language,
            });

            ignore::WalkState::Continue
        })
    });

    drop(tx);
    let mut files: Vec<DiscoveredFile> = rx.into_iter().collect();
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}
