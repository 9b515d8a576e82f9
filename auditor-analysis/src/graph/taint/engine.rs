//! The backward IFDS worklist driver (spec.md 4.5.3): pops entries off a
//! priority queue, runs the intra-procedural walk, substitutes resolved
//! call-sites for every summary fact it produces, and checks for source
//! matches at each step. Emits `TaintCandidate`s for the forward pass to
//! verify.

use std::collections::BinaryHeap;

use auditor_core::config::TaintConfig;
use auditor_core::errors::{StorageError, TaintError};
use auditor_core::traits::storage::{IFactReader, SymbolRow};
use auditor_core::FxHashSet;

use super::super::reachability::cache::ReachabilityCache;
use super::discovery::{discover_sinks, discover_sources};
use super::propagation::backward_intra_walk;
use super::types::{
    AccessPath, Confidence, Priority, ProvenanceHop, SourceFact, TaintBudget, TaintCandidate,
    WorklistEntry,
};

fn storage_err(e: StorageError) -> TaintError {
    TaintError::Internal { message: e.to_string() }
}

/// High priority for a sink with no sanitizers anywhere upstream in its
/// own scope (spec.md 4.5.6) — cheap proxy computed once at seed time;
/// the worklist doesn't re-rank as sanitizers are discovered mid-walk.
fn seed_priority(reader: &dyn IFactReader, file: &str, scope: &str) -> Priority {
    match reader.validation_usage_for_scope(file, scope) {
        Ok(rows) if rows.iter().any(|r| r.is_sanitizer_boundary) => Priority::Low,
        _ => Priority::High,
    }
}

fn find_signature<'a>(symbols: &'a [SymbolRow], short_name: &str) -> Option<&'a str> {
    symbols.iter().find(|s| s.name == short_name).and_then(|s| s.signature.as_deref())
}

fn parameter_index(signature: &str, param_name: &str) -> Option<i64> {
    let inner = signature.trim().trim_start_matches('(').trim_end_matches(')');
    inner
        .split(',')
        .map(|p| p.trim())
        .enumerate()
        .find_map(|(i, p)| {
            let name = p.split(':').next().unwrap_or(p).split('=').next().unwrap_or(p).trim();
            let name = name.trim_start_matches(['*', '&']);
            if name == param_name {
                Some(i as i64)
            } else {
                None
            }
        })
}

fn source_match(sources: &[SourceFact], file: &str, scope: &str, path: &AccessPath) -> Option<SourceFact> {
    sources
        .iter()
        .find(|s| s.file == file && s.scope == scope && path.root == s.access_path_start)
        .cloned()
}

fn confidence_for(truncated: bool, opaque: bool) -> Confidence {
    if truncated {
        Confidence::Low
    } else if opaque {
        Confidence::Medium
    } else {
        Confidence::High
    }
}

pub fn run(reader: &dyn IFactReader, config: &TaintConfig) -> Result<Vec<TaintCandidate>, TaintError> {
    let k = config.effective_access_path_k();
    let mut budget = TaintBudget::new(
        config.effective_max_worklist_entries() as usize,
        config.effective_max_worklist_entries_per_sink() as usize,
        k,
        config.effective_per_entry_timeout_ms(),
    );

    let sources = discover_sources(reader)?;
    let seeded_sinks = discover_sinks(reader, k)?;

    let mut heap: BinaryHeap<WorklistEntry> = BinaryHeap::new();
    let mut seen: FxHashSet<(String, String, String, u64)> = FxHashSet::default();
    let mut candidates = Vec::new();

    for (sink, paths) in &seeded_sinks {
        for path in paths {
            let entry = WorklistEntry {
                file: sink.file.clone(),
                scope: sink.scope.clone(),
                access_path: path.clone(),
                sink: sink.clone(),
                line: sink.line,
                call_context: vec![sink.scope.clone()],
                provenance: Vec::new(),
                sanitizers_encountered: Vec::new(),
                priority: seed_priority(reader, &sink.file, &sink.scope),
                opaque: false,
            };
            if seen.insert(entry.dedup_key()) {
                heap.push(entry);
            }
        }
    }

    let mut truncated_sinks: FxHashSet<(String, i64)> = FxHashSet::default();

    while let Some(entry) = heap.pop() {
        if !budget.charge(&entry.sink) {
            truncated_sinks.insert((entry.sink.file.clone(), entry.sink.line));
            continue;
        }

        if let Some(source) = source_match(&sources, &entry.file, &entry.scope, &entry.access_path) {
            candidates.push(TaintCandidate {
                source,
                sink: entry.sink.clone(),
                provenance: entry.provenance.clone(),
                sanitizers_encountered: entry.sanitizers_encountered.clone(),
                confidence: confidence_for(entry.access_path.truncated, entry.opaque),
                truncated: entry.access_path.truncated,
                forward_verified: false,
            });
            continue;
        }

        let outcome = backward_intra_walk(
            reader,
            &entry.file,
            &entry.scope,
            entry.line,
            vec![entry.access_path.clone()],
            k,
        )?;

        let mut provenance = entry.provenance.clone();
        provenance.extend(outcome.hops);
        let mut sanitizers_encountered = entry.sanitizers_encountered.clone();
        sanitizers_encountered.extend(outcome.sanitizer_hits);

        for summary in outcome.summaries {
            // A summary's root is a function parameter — if that parameter
            // is itself a declared source for this scope (the common case:
            // a route handler's own argument, never called explicitly from
            // extracted code), it's a match without crossing a call edge.
            if let Some(source) =
                source_match(&sources, &entry.file, &summary.function_scope, &summary.remaining_path)
            {
                candidates.push(TaintCandidate {
                    source,
                    sink: entry.sink.clone(),
                    provenance: provenance.clone(),
                    sanitizers_encountered: sanitizers_encountered.clone(),
                    confidence: confidence_for(summary.remaining_path.truncated, entry.opaque),
                    truncated: summary.remaining_path.truncated,
                    forward_verified: false,
                });
                continue;
            }

            // Otherwise every call-site that targets this function boundary
            // gets its own worklist entry (spec.md 4.5.3 step 2): resolved
            // call edges first, then — when none resolved — every call
            // whose bare callee name matches, an opaque substitution that
            // caps the eventual candidate's confidence (spec.md 4.5
            // "opaque callee degrades confidence").
            let resolved_callers = reader.calls_to_callee(&summary.function_scope).map_err(storage_err)?;
            let symbols = reader.symbols_for_file(&entry.file).map_err(storage_err)?;
            // Scopes are `{file}::{qualified.name}` (parsers::languages::walk's
            // `scope_path`) — strip the file prefix before splitting on `.`,
            // since the file name itself may contain dots (`db.py`).
            let qualified_name = summary
                .function_scope
                .rsplit_once("::")
                .map_or(summary.function_scope.as_str(), |(_, name)| name);
            let short_name = qualified_name.rsplit('.').next().unwrap_or(qualified_name);
            let target_index = find_signature(&symbols, short_name)
                .and_then(|sig| parameter_index(sig, &summary.parameter_name));

            let opaque_callers: Vec<_> = if resolved_callers.is_empty() {
                reader
                    .unresolved_calls()
                    .map_err(storage_err)?
                    .into_iter()
                    .filter(|c| c.callee_name == short_name)
                    .collect()
            } else {
                Vec::new()
            };

            for (call, is_opaque) in resolved_callers
                .into_iter()
                .map(|c| (c, false))
                .chain(opaque_callers.into_iter().map(|c| (c, true)))
            {
                if let Some(idx) = target_index {
                    if !is_opaque && call.argument_index != idx {
                        continue;
                    }
                }
                let argument_path = AccessPath::from_expr(&call.argument_expression, k);
                let merged_path = AccessPath::with_segments(
                    argument_path.root,
                    [argument_path.segments, summary.remaining_path.segments.clone()].concat(),
                    k,
                );
                let mut hop = provenance.clone();
                hop.push(ProvenanceHop {
                    file: call.file.clone(),
                    line: call.line,
                    description: if is_opaque {
                        format!("parameter `{}` substituted at opaque_call call site", summary.parameter_name)
                    } else {
                        format!("parameter `{}` substituted at call site", summary.parameter_name)
                    },
                    access_path_at_hop: merged_path.normalized(),
                });
                let mut next_context = entry.call_context.clone();
                next_context.push(call.caller_scope.clone());
                let next_entry = WorklistEntry {
                    file: call.file.clone(),
                    scope: call.caller_scope.clone(),
                    access_path: merged_path,
                    sink: entry.sink.clone(),
                    line: call.line,
                    call_context: next_context,
                    provenance: hop,
                    sanitizers_encountered: sanitizers_encountered.clone(),
                    priority: entry.priority,
                    opaque: entry.opaque || is_opaque,
                };
                if seen.insert(next_entry.dedup_key()) {
                    heap.push(next_entry);
                }
            }
        }
    }

    let call_graph = super::super::reachability::field_flow::build_call_graph(reader)?;
    let reachability_cache = ReachabilityCache::default();
    for candidate in &mut candidates {
        if truncated_sinks.contains(&(candidate.sink.file.clone(), candidate.sink.line)) {
            candidate.truncated = true;
        }
        super::super::reachability::field_flow::verify_forward(
            reader,
            &call_graph,
            &reachability_cache,
            candidate,
        )?;
        if let Some(distance) = super::super::reachability::sanitizer_distance::distance_to_sink(candidate) {
            tracing::debug!(
                sink_file = %candidate.sink.file,
                sink_line = candidate.sink.line,
                distance,
                "sanitizer-distance boundary"
            );
        }
    }

    Ok(candidates)
}
