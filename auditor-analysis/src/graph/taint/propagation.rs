//! Backward intra-procedural taint propagation (spec.md 4.5.3 step 1).
//! Walks a scope's assignments backward from a line, rewriting the
//! tracked access path through each matching assignment until it either
//! hits a sanitizer, terminates on a literal, or reaches the function
//! boundary as a summary fact for the inter-procedural pass.
//!
//! Grounded on the teacher's `graph/taint/propagation.rs` label-rewrite
//! shape, generalized from a single whole-variable label map to a set of
//! access paths forking and dying independently.

use auditor_core::errors::{StorageError, TaintError};
use auditor_core::traits::storage::IFactReader;

use super::discovery::sanitized_fields;
use super::types::{AccessPath, ProvenanceHop, SummaryFact};

fn storage_err(e: StorageError) -> TaintError {
    TaintError::Internal { message: e.to_string() }
}

pub struct IntraWalkOutcome {
    pub summaries: Vec<SummaryFact>,
    pub sanitizer_hits: Vec<String>,
    pub hops: Vec<ProvenanceHop>,
}

/// Walks `scope`'s assignments strictly before `line`, in descending line
/// order, rewriting `initial_paths` at each match. Paths a sanitizer
/// covers stop propagating; paths assigned a literal terminate; anything
/// still live when the scope is exhausted becomes a summary fact for the
/// enclosing function's parameter — this workspace doesn't verify the
/// root against the function's declared parameter list (soundness bias:
/// an unverified summary produces an extra hop to check, never a missed
/// flow).
pub fn backward_intra_walk(
    reader: &dyn IFactReader,
    file: &str,
    scope: &str,
    line: i64,
    initial_paths: Vec<AccessPath>,
    k: usize,
) -> Result<IntraWalkOutcome, TaintError> {
    let sanitized = sanitized_fields(reader, file, scope)?;
    let mut assignments = reader.assignments_for_scope(file, scope).map_err(storage_err)?;
    assignments.retain(|a| a.line < line);
    assignments.sort_by(|a, b| b.line.cmp(&a.line));

    let mut active = initial_paths;
    let mut sanitizer_hits = Vec::new();
    let mut hops = Vec::new();

    for assignment in &assignments {
        if active.is_empty() {
            break;
        }
        let mut next = Vec::new();
        for path in active {
            if path.root != assignment.target_name {
                next.push(path);
                continue;
            }
            if sanitized.contains(&path.root) {
                sanitizer_hits.push(format!("{}:{}", file, assignment.line));
                continue;
            }
            let refs: Vec<String> = serde_json::from_str(&assignment.rhs_refs).unwrap_or_default();
            if refs.is_empty() {
                // Assigned from a literal/opaque expression — this path
                // terminates here without reaching a source.
                continue;
            }
            hops.push(ProvenanceHop {
                file: file.to_string(),
                line: assignment.line,
                description: format!("assignment rewrites {}", path.normalized()),
                access_path_at_hop: path.normalized(),
            });
            for r in refs {
                next.push(AccessPath::with_segments(r, path.segments.clone(), k));
            }
        }
        active = next;
    }

    let summaries = active
        .into_iter()
        .map(|path| SummaryFact {
            function_scope: scope.to_string(),
            parameter_name: path.root.clone(),
            remaining_path: path,
        })
        .collect();

    Ok(IntraWalkOutcome { summaries, sanitizer_hits, hops })
}
