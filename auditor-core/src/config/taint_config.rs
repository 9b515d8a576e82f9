//! Taint engine tuning knobs (spec.md 6, 9).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TaintConfig {
    /// Global cap on total IFDS worklist entries processed. Default: 10^6.
    /// Valid range [10^4, 10^7] per spec.md 9.
    pub max_worklist_entries: Option<u64>,
    /// Per-sink cap on worklist entries. Default: 10^4.
    pub max_worklist_entries_per_sink: Option<u64>,
    /// Access path k-limit. Default: 5. Valid range [2, 8].
    pub access_path_k: Option<usize>,
    /// Wall-time budget per worklist entry before suspension, in
    /// milliseconds. Default: 500.
    pub per_entry_timeout_ms: Option<u64>,
}

const DEFAULT_MAX_WORKLIST_ENTRIES: u64 = 1_000_000;
const DEFAULT_MAX_WORKLIST_ENTRIES_PER_SINK: u64 = 10_000;
const DEFAULT_ACCESS_PATH_K: usize = 5;
const DEFAULT_PER_ENTRY_TIMEOUT_MS: u64 = 500;

impl TaintConfig {
    pub fn effective_max_worklist_entries(&self) -> u64 {
        self.max_worklist_entries.unwrap_or(DEFAULT_MAX_WORKLIST_ENTRIES)
    }

    pub fn effective_max_worklist_entries_per_sink(&self) -> u64 {
        self.max_worklist_entries_per_sink
            .unwrap_or(DEFAULT_MAX_WORKLIST_ENTRIES_PER_SINK)
    }

    pub fn effective_access_path_k(&self) -> usize {
        self.access_path_k.unwrap_or(DEFAULT_ACCESS_PATH_K).clamp(2, 8)
    }

    pub fn effective_per_entry_timeout_ms(&self) -> u64 {
        self.per_entry_timeout_ms.unwrap_or(DEFAULT_PER_ENTRY_TIMEOUT_MS)
    }
}
