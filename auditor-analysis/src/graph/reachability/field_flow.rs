//! Forward flow-graph refinement (spec.md 4.5.4): confirms a candidate
//! the backward pass found by checking that the source scope can still
//! reach the sink scope by following call edges forward, and re-checks
//! sanitizer boundaries the backward pass may have missed under
//! different call-site context.
//!
//! Grounded on the teacher's `graph/reachability/field_flow.rs`
//! forward-BFS shape, retargeted from tracking a named object field
//! through function names to confirming a `TaintCandidate`'s source
//! reaches its sink in the resolved call graph.

use auditor_core::errors::{StorageError, TaintError};
use auditor_core::traits::storage::IFactReader;

use crate::call_graph::traversal::bfs_forward;
use crate::call_graph::types::CallGraph;

use super::cache::{ReachabilityCache, TraversalDirection};
use super::super::taint::discovery::sanitized_fields;
use super::super::taint::types::TaintCandidate;

fn storage_err(e: StorageError) -> TaintError {
    TaintError::Internal { message: e.to_string() }
}

/// Builds the in-memory call graph the forward pass walks, from the
/// edges the resolver already materialized (spec.md 4.4.3).
pub fn build_call_graph(reader: &dyn IFactReader) -> Result<CallGraph, TaintError> {
    let mut graph = CallGraph::new();
    let edges = reader.all_call_graph_edges().map_err(storage_err)?;
    for edge in &edges {
        graph.node_for(&edge.call_site_file, &edge.caller_scope, &edge.caller_scope, 0);
        graph.node_for(&edge.call_site_file, &edge.callee_scope, &edge.callee_scope, 0);
    }
    for edge in &edges {
        graph.add_edge(&edge.caller_scope, &edge.callee_scope);
    }
    Ok(graph)
}

/// Confirms forward reachability from the candidate's source scope to
/// its sink scope, and re-checks sanitizer boundaries along the
/// provenance chain the backward pass recorded.
pub fn verify_forward(
    reader: &dyn IFactReader,
    graph: &CallGraph,
    cache: &ReachabilityCache,
    candidate: &mut TaintCandidate,
) -> Result<(), TaintError> {
    let mut newly_sanitized = Vec::new();
    for hop in &candidate.provenance {
        let fields = sanitized_fields(reader, &hop.file, &candidate.source.scope)?;
        if fields.iter().any(|f| *f == candidate.source.access_path_start) {
            newly_sanitized.push(format!("{}:{}", hop.file, hop.line));
        }
    }
    let sanitizer_free = newly_sanitized.is_empty();
    candidate.sanitizers_encountered.extend(newly_sanitized);

    let reachable = match (graph.index_of(&candidate.source.scope), graph.index_of(&candidate.sink.scope)) {
        (Some(start), Some(target)) => {
            if start == target {
                true
            } else {
                let reachable_set = match cache.get(start, TraversalDirection::Forward) {
                    Some(cached) => cached,
                    None => {
                        let computed = bfs_forward(graph, start, None);
                        cache.put(start, TraversalDirection::Forward, computed.clone());
                        computed
                    }
                };
                reachable_set.contains(&target)
            }
        }
        // A scope with no call-graph edges at all (e.g. source and sink
        // share a scope with no intervening calls) is trivially reachable.
        _ => candidate.source.scope == candidate.sink.scope,
    };

    candidate.forward_verified = sanitizer_free && reachable;
    Ok(())
}
