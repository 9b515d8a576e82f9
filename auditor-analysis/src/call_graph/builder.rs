//! The cross-file resolver (spec.md 4.4): binds unresolved imports to
//! files and unresolved calls to callee scopes, then materializes
//! `call_graph_edges`/`import_graph_edges` (spec.md 4.4.3). Grounded on
//! the two-phase (imports-then-calls) shape of the teacher's
//! `call_graph/builder.rs`, with its DI-injection fallback and
//! confidence-scored resolution dropped (DESIGN.md Open Questions).

use std::collections::HashSet;

use auditor_core::errors::{ResolveError, StorageError};
use auditor_core::traits::storage::{CallGraphEdgeRow, FileRow, IFactReader, ImportGraphEdgeRow};
use rayon::prelude::*;

use super::resolution::resolve_callee;
use super::types::CallGraphStats;

fn storage_err(e: StorageError) -> ResolveError {
    ResolveError::Internal { message: e.to_string() }
}

/// Resolves every pending import and call site in the fact base, writes
/// the resolutions back, and materializes the call/import graph edges.
pub fn resolve_all(reader: &dyn IFactReader) -> Result<CallGraphStats, ResolveError> {
    let mut stats = CallGraphStats::default();

    let files = reader.load_all_files().map_err(storage_err)?;
    resolve_imports(reader, &files, &mut stats)?;
    resolve_calls(reader, &mut stats)?;

    let call_edges = materialize_call_edges(reader, &files)?;
    let import_edges = materialize_import_edges(reader, &files)?;
    reader.insert_call_graph_edges(&call_edges).map_err(storage_err)?;
    reader.insert_import_graph_edges(&import_edges).map_err(storage_err)?;

    Ok(stats)
}

fn normalize_join(base_dir: &str, rel: &str) -> String {
    let mut parts: Vec<&str> = if base_dir.is_empty() { Vec::new() } else { base_dir.split('/').collect() };
    for seg in rel.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            s => parts.push(s),
        }
    }
    parts.join("/")
}

/// Relative imports (`./foo`, `../bar`) resolve against the importer's
/// own directory, trying a fixed set of extensions/index-file shapes.
fn resolve_relative<'a>(target: &str, importer_file: &str, files: &'a [FileRow]) -> Vec<&'a str> {
    let base_dir = importer_file.rsplit_once('/').map(|(d, _)| d).unwrap_or("");
    let joined = normalize_join(base_dir, target);
    let candidates = [
        joined.clone(),
        format!("{joined}.py"),
        format!("{joined}.js"),
        format!("{joined}.ts"),
        format!("{joined}.tsx"),
        format!("{joined}.jsx"),
        format!("{joined}.rb"),
        format!("{joined}.php"),
        format!("{joined}/index.js"),
        format!("{joined}/index.ts"),
        format!("{joined}/__init__.py"),
    ];
    files.iter().filter(|f| candidates.contains(&f.path)).map(|f| f.path.as_str()).collect()
}

/// Absolute/package imports (`pkg.sub.mod`, `pkg/sub/mod`) resolve by
/// matching the dotted path as a suffix of a known file's stem.
fn resolve_by_suffix<'a>(target: &str, files: &'a [FileRow]) -> Vec<&'a str> {
    let dotted = target.replace('.', "/");
    files
        .iter()
        .filter(|f| {
            let stem = f.path.rsplit_once('.').map(|(s, _)| s).unwrap_or(&f.path);
            stem.ends_with(&dotted)
        })
        .map(|f| f.path.as_str())
        .collect()
}

fn resolve_import_target(target: &str, importer_file: &str, files: &[FileRow]) -> Option<String> {
    let candidates = if target.starts_with('.') {
        resolve_relative(target, importer_file, files)
    } else {
        resolve_by_suffix(target, files)
    };
    match candidates.len() {
        1 => Some(candidates[0].to_string()),
        _ => None,
    }
}

fn resolve_imports(
    reader: &dyn IFactReader,
    files: &[FileRow],
    stats: &mut CallGraphStats,
) -> Result<(), ResolveError> {
    let unresolved = reader.unresolved_imports().map_err(storage_err)?;
    let resolutions: Vec<(String, i64, String, Option<String>)> = unresolved
        .par_iter()
        .map(|import| {
            let resolved = resolve_import_target(&import.target, &import.file, files);
            (import.file.clone(), import.line, import.target.clone(), resolved)
        })
        .collect();

    for (file, line, target, resolved) in resolutions {
        match resolved {
            Some(path) => {
                reader.set_import_resolved(&file, line, &target, &path).map_err(storage_err)?;
                stats.resolved_imports += 1;
            }
            None => stats.unresolved_imports += 1,
        }
    }
    Ok(())
}

fn resolve_calls(reader: &dyn IFactReader, stats: &mut CallGraphStats) -> Result<(), ResolveError> {
    let unresolved = reader.unresolved_calls().map_err(storage_err)?;
    stats.total_calls += unresolved.len();

    // One resolution attempt per call site, not per argument row.
    let mut seen_sites = HashSet::new();
    let mut sites = Vec::new();
    for call in &unresolved {
        if seen_sites.insert((call.file.clone(), call.line)) {
            sites.push(call.clone());
        }
    }

    let resolutions: Vec<(String, i64, Option<String>)> = sites
        .par_iter()
        .map(|call| {
            let same_file = reader.symbols_for_file(&call.file).unwrap_or_default();
            let global = reader.symbols_by_name(&call.callee_name).unwrap_or_default();
            let imports = reader.imports_for_file(&call.file).unwrap_or_default();
            let resolved = resolve_callee(
                &call.caller_scope,
                &call.file,
                &call.callee_name,
                &same_file,
                &global,
                &imports,
            );
            (call.file.clone(), call.line, resolved)
        })
        .collect();

    for (file, line, resolved) in resolutions {
        match resolved {
            Some(scope) => {
                stats.resolved_calls += 1;
                for row in reader.calls_at_site(&file, line).map_err(storage_err)? {
                    reader
                        .set_callee_resolved(&row.file, row.line, row.argument_index, &scope)
                        .map_err(storage_err)?;
                }
            }
            None => stats.ambiguous_calls += 1,
        }
    }
    Ok(())
}

fn materialize_call_edges(
    reader: &dyn IFactReader,
    files: &[FileRow],
) -> Result<Vec<CallGraphEdgeRow>, ResolveError> {
    let mut edges = Vec::new();
    for file in files {
        for call in reader.calls_for_file(&file.path).map_err(storage_err)? {
            // Every call site emits exactly one row at argument_index 0,
            // even with zero arguments — skip the rest to avoid duplicate edges.
            if call.argument_index != 0 {
                continue;
            }
            if let Some(callee) = call.callee_resolved {
                edges.push(CallGraphEdgeRow {
                    caller_scope: call.caller_scope,
                    callee_scope: callee,
                    call_site_file: call.file,
                    call_site_line: call.line,
                });
            }
        }
    }
    Ok(edges)
}

fn materialize_import_edges(
    reader: &dyn IFactReader,
    files: &[FileRow],
) -> Result<Vec<ImportGraphEdgeRow>, ResolveError> {
    let mut edges = Vec::new();
    for file in files {
        for import in reader.imports_for_file(&file.path).map_err(storage_err)? {
            if let Some(resolved) = import.resolved_path {
                edges.push(ImportGraphEdgeRow {
                    importer_file: import.file,
                    imported_file: resolved,
                    line: import.line,
                });
            }
        }
    }
    Ok(edges)
}
