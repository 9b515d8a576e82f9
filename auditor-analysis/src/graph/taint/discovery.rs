//! Source/sink/sanitizer discovery (spec.md 4.5.1): every fact comes
//! from a fact-base query, never a hardcoded pattern list — a
//! `req.body` source is known because the Routes row says so, not
//! because this module's code contains the string `"req.body"`.

use auditor_core::errors::{StorageError, TaintError};
use auditor_core::traits::storage::IFactReader;

use super::types::{AccessPath, SinkFact, SourceFact};

fn storage_err(e: StorageError) -> TaintError {
    TaintError::Internal { message: e.to_string() }
}

/// One source fact per parameter a route handler's signature declares as
/// user-controlled (spec.md 4.5.1).
pub fn discover_sources(reader: &dyn IFactReader) -> Result<Vec<SourceFact>, TaintError> {
    let mut sources = Vec::new();
    for route in reader.all_routes().map_err(storage_err)? {
        let params: Vec<String> = serde_json::from_str(&route.parameter_sources).unwrap_or_default();
        for param in params {
            sources.push(SourceFact {
                file: route.file.clone(),
                scope: route.handler_symbol.clone(),
                line: route.line,
                access_path_start: param,
                source_kind: format!("route:{}", route.method.to_lowercase()),
            });
        }
    }
    Ok(sources)
}

/// Sinks are every SQL query whose text is built from an interpolated
/// (non-static) expression (spec.md 4.5.1): the engine doesn't know or
/// care *which* call produced the query, only that one did. Each sink
/// comes back with the access path(s) parsed from its interpolated
/// expressions — the worklist's §4.5.3 initialization query.
pub fn discover_sinks(reader: &dyn IFactReader, k: usize) -> Result<Vec<(SinkFact, Vec<AccessPath>)>, TaintError> {
    let mut sinks = Vec::new();
    for query in reader.all_sql_queries().map_err(storage_err)? {
        if query.is_static {
            continue;
        }
        let interpolated: Vec<String> =
            serde_json::from_str(&query.interpolated_expressions).unwrap_or_default();
        if interpolated.is_empty() {
            continue;
        }
        let paths: Vec<AccessPath> = interpolated.iter().map(|e| AccessPath::from_expr(e, k)).collect();
        sinks.push((
            SinkFact {
                file: query.file,
                scope: query.scope,
                line: query.line,
                sink_kind: format!("sql:{}", query.command.to_lowercase()),
                vulnerable_argument_index: 0,
            },
            paths,
        ));
    }
    Ok(sinks)
}

/// Field names a Validation Framework Usage row marks as a sanitizer
/// boundary for the enclosing scope (spec.md 4.5.1 third bullet).
pub fn sanitized_fields(reader: &dyn IFactReader, file: &str, scope: &str) -> Result<Vec<String>, TaintError> {
    let mut fields = Vec::new();
    for usage in reader.validation_usage_for_scope(file, scope).map_err(storage_err)? {
        if !usage.is_sanitizer_boundary {
            continue;
        }
        let validated: Vec<String> = serde_json::from_str(&usage.validated_fields).unwrap_or_default();
        fields.extend(validated);
    }
    Ok(fields)
}
