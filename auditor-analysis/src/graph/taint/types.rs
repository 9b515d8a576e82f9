//! Access-path-sensitive worklist types for the backward IFDS taint pass
//! (spec.md 4.5.2, 4.5.3). Grounded on the teacher's
//! `graph/taint/propagation.rs` label-bookkeeping shape and
//! `graph/reachability/field_flow.rs` field-tracking shape, generalized
//! from whole-variable taint into k-limited access paths.

use std::cmp::Ordering;

use auditor_core::FxHashMap;

/// One field-access or array-index hop in an access path (spec.md 4.5.2).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Field(String),
    Wildcard,
}

/// `variable.field1.field2...`, truncated to `k` segments with a `.*`
/// sentinel once exceeded — over-approximates rather than drops taint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccessPath {
    pub root: String,
    pub segments: Vec<PathSegment>,
    pub truncated: bool,
}

impl AccessPath {
    pub fn root_only(root: impl Into<String>) -> Self {
        Self { root: root.into(), segments: Vec::new(), truncated: false }
    }

    /// Parses a source-text expression (an assignment RHS, a call
    /// argument, an interpolated query fragment) into an access path by
    /// taking its leading identifier-and-member-access run. Anything
    /// that doesn't start with an identifier (a literal, a function
    /// call) produces an immediately-truncated path rather than failing.
    pub fn from_expr(expr: &str, k: usize) -> Self {
        let trimmed = expr.trim();
        let end = trimmed
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.' || c == '[' || c == ']'))
            .unwrap_or(trimmed.len());
        let token = &trimmed[..end];
        let mut parts = token.split('.').filter(|p| !p.is_empty());
        let root = match parts.next() {
            Some(r) => r.trim_end_matches("[]").to_string(),
            None => return Self { root: "<expr>".to_string(), segments: Vec::new(), truncated: true },
        };
        if root.is_empty() {
            return Self { root: "<expr>".to_string(), segments: Vec::new(), truncated: true };
        }
        let segments: Vec<PathSegment> = parts
            .map(|p| {
                if let Some(stripped) = p.strip_suffix("[]") {
                    if stripped.is_empty() {
                        PathSegment::Wildcard
                    } else {
                        PathSegment::Field(stripped.to_string())
                    }
                } else {
                    PathSegment::Field(p.to_string())
                }
            })
            .collect();
        Self::with_segments(root, segments, k)
    }

    pub fn with_segments(root: impl Into<String>, segments: Vec<PathSegment>, k: usize) -> Self {
        if segments.len() > k {
            Self { root: root.into(), segments: segments.into_iter().take(k).collect(), truncated: true }
        } else {
            Self { root: root.into(), segments, truncated: false }
        }
    }

    pub fn extend(&self, segment: PathSegment, k: usize) -> Self {
        if self.truncated || self.segments.len() >= k {
            return Self { root: self.root.clone(), segments: self.segments.clone(), truncated: true };
        }
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { root: self.root.clone(), segments, truncated: false }
    }

    pub fn normalized(&self) -> String {
        let mut out = self.root.clone();
        for seg in &self.segments {
            match seg {
                PathSegment::Field(name) => {
                    out.push('.');
                    out.push_str(name);
                }
                PathSegment::Wildcard => out.push_str("[]"),
            }
        }
        if self.truncated {
            out.push_str(".*");
        }
        out
    }

    /// A truncated path over-approximates and so may alias anything
    /// sharing its root; otherwise paths intersect only on an exact or
    /// prefix match (spec.md 4.5.2).
    pub fn intersects(&self, other: &AccessPath) -> bool {
        if self.root != other.root {
            return false;
        }
        if self.truncated || other.truncated {
            return true;
        }
        self.segments.is_empty() || other.segments.is_empty() || self.segments == other.segments
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "LOW",
            Confidence::Medium => "MEDIUM",
            Confidence::High => "HIGH",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SourceFact {
    pub file: String,
    pub scope: String,
    pub line: i64,
    pub access_path_start: String,
    pub source_kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SinkFact {
    pub file: String,
    pub scope: String,
    pub line: i64,
    pub sink_kind: String,
    pub vulnerable_argument_index: i64,
}

#[derive(Debug, Clone)]
pub struct ProvenanceHop {
    pub file: String,
    pub line: i64,
    pub description: String,
    pub access_path_at_hop: String,
}

/// A confirmed (source, sink) pair awaiting a `FindingRow` (spec.md 4.5.7).
#[derive(Debug, Clone)]
pub struct TaintCandidate {
    pub source: SourceFact,
    pub sink: SinkFact,
    pub provenance: Vec<ProvenanceHop>,
    pub sanitizers_encountered: Vec<String>,
    pub confidence: Confidence,
    pub truncated: bool,
    pub forward_verified: bool,
}

/// A summary fact recorded when the backward walk hits a function
/// boundary (spec.md 4.5.3 step 1, third bullet).
#[derive(Debug, Clone)]
pub struct SummaryFact {
    pub function_scope: String,
    pub parameter_name: String,
    pub remaining_path: AccessPath,
}

/// Priority class for the worklist (spec.md 4.5.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Low,
}

#[derive(Debug, Clone)]
pub struct WorklistEntry {
    pub file: String,
    pub scope: String,
    pub access_path: AccessPath,
    pub sink: SinkFact,
    /// Line in `scope` to scan backward from — the sink's own line for
    /// the seed entry, the call-site line after a parameter substitution.
    pub line: i64,
    /// Scopes visited so far, innermost last — both the dedup context and
    /// the provenance call stack.
    pub call_context: Vec<String>,
    pub provenance: Vec<ProvenanceHop>,
    pub sanitizers_encountered: Vec<String>,
    pub priority: Priority,
    /// Set once this chain has crossed an unresolved call edge (spec.md
    /// 4.5.3's opaque-callee case); caps the eventual candidate's
    /// confidence at `Medium` even when its access path isn't truncated.
    pub opaque: bool,
}

impl WorklistEntry {
    /// `(file, scope, access_path_normalized, call_context_digest)` — the
    /// idempotent-revisit key (spec.md 4.5.3).
    pub fn dedup_key(&self) -> (String, String, String, u64) {
        let digest = xxhash_rust::xxh3::xxh3_64(self.call_context.join(">").as_bytes());
        (self.file.clone(), self.scope.clone(), self.access_path.normalized(), digest)
    }

    fn priority_rank(&self) -> u8 {
        match self.priority {
            Priority::High => 1,
            Priority::Low => 0,
        }
    }
}

// `BinaryHeap` is a max-heap; ranking High above Low means High pops
// first, matching spec.md 4.5.6's priority split.
impl Ord for WorklistEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority_rank().cmp(&other.priority_rank())
    }
}

impl PartialOrd for WorklistEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for WorklistEntry {
    fn eq(&self, other: &Self) -> bool {
        self.dedup_key() == other.dedup_key()
    }
}

impl Eq for WorklistEntry {}

/// Global and per-sink budgets (spec.md 4.5.3's 10^6/10^4 defaults).
/// Exhaustion flips `truncated` rather than raising an error (Kind C,
/// spec.md 7).
#[derive(Debug)]
pub struct TaintBudget {
    pub max_worklist_entries: usize,
    pub max_worklist_entries_per_sink: usize,
    pub access_path_k: usize,
    pub per_entry_timeout_ms: u64,
    total_processed: usize,
    per_sink_processed: FxHashMap<SinkFact, usize>,
}

impl TaintBudget {
    pub fn new(
        max_worklist_entries: usize,
        max_worklist_entries_per_sink: usize,
        access_path_k: usize,
        per_entry_timeout_ms: u64,
    ) -> Self {
        Self {
            max_worklist_entries,
            max_worklist_entries_per_sink,
            access_path_k,
            per_entry_timeout_ms,
            total_processed: 0,
            per_sink_processed: FxHashMap::default(),
        }
    }

    /// Records one worklist pop; `false` means the sink's budget (global
    /// or per-sink) is exhausted and the pop should be dropped truncated.
    pub fn charge(&mut self, sink: &SinkFact) -> bool {
        if self.total_processed >= self.max_worklist_entries {
            return false;
        }
        let count = self.per_sink_processed.entry(sink.clone()).or_insert(0);
        if *count >= self.max_worklist_entries_per_sink {
            return false;
        }
        self.total_processed += 1;
        *count += 1;
        true
    }
}
