//! Top-level pipeline configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::taint_config::TaintConfig;

/// Configuration accepted by `run_pipeline`. Every field is optional on the
/// wire (TOML/JSON) so partial configs layer over defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PipelineConfig {
    /// Repository root to analyze. Required in practice; callers must set it
    /// before running — there is no sane default for a root path.
    pub root_path: Option<PathBuf>,
    /// Where the fact base and findings are written. Default: `<root>/.pf/`.
    pub output_directory: Option<PathBuf>,
    /// Glob patterns excluded from discovery, in addition to the built-in
    /// vendor/build/VCS defaults.
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
    /// File size cap in bytes. Default: 2 MiB.
    pub max_file_bytes: Option<u64>,
    /// Restrict extraction to this language set. Default: all supported.
    #[serde(default)]
    pub extractor_language_set: Vec<String>,
    /// Number of extraction workers. Default: available CPU cores.
    pub extract_worker_count: Option<usize>,
    /// Optional path to a file listing changed paths, used to prioritize
    /// taint analysis.
    pub workset_file: Option<PathBuf>,
    /// Skip files whose sha256 matches the persisted Files row. Performance
    /// feature, not a correctness feature (spec.md 7).
    pub resume: Option<bool>,
    /// Per-file extraction timeout in seconds. Default: 30.
    pub file_timeout_secs: Option<u64>,
    /// Taint engine tuning.
    #[serde(default)]
    pub taint: TaintConfig,
}

const DEFAULT_MAX_FILE_BYTES: u64 = 2 * 1024 * 1024;
const DEFAULT_FILE_TIMEOUT_SECS: u64 = 30;

impl PipelineConfig {
    pub fn effective_output_directory(&self) -> PathBuf {
        match &self.output_directory {
            Some(dir) => dir.clone(),
            None => self
                .root_path
                .as_deref()
                .unwrap_or_else(|| std::path::Path::new("."))
                .join(".pf"),
        }
    }

    pub fn effective_max_file_bytes(&self) -> u64 {
        self.max_file_bytes.unwrap_or(DEFAULT_MAX_FILE_BYTES)
    }

    pub fn effective_worker_count(&self) -> usize {
        self.extract_worker_count
            .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
    }

    pub fn effective_resume(&self) -> bool {
        self.resume.unwrap_or(false)
    }

    pub fn effective_file_timeout_secs(&self) -> u64 {
        self.file_timeout_secs.unwrap_or(DEFAULT_FILE_TIMEOUT_SECS)
    }

    /// `true` if extraction should run for `language`; an empty
    /// `extractor_language_set` means "all supported".
    pub fn language_enabled(&self, language: &str) -> bool {
        self.extractor_language_set.is_empty()
            || self.extractor_language_set.iter().any(|l| l == language)
    }
}
