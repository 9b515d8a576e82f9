//! The cross-file resolver's binding rule (spec.md 4.4): qualified-name
//! match, then same-file name match, then resolved-import name match. At
//! each tier, more than one candidate leaves the callee unresolved rather
//! than guessing — ambiguity stops resolution outright, it does not fall
//! through to the next tier. Zero candidates at a tier does fall through.
//! This workspace explicitly drops the teacher's confidence-scored
//! fallback chain and its DI-injection fallback (DESIGN.md Open
//! Questions; SPEC_FULL.md 4.4).

use auditor_core::traits::storage::{ImportRow, SymbolRow};

enum Tier {
    Resolved(String),
    Ambiguous,
    NoMatch,
}

fn unique_match<'a>(matches: impl Iterator<Item = &'a SymbolRow>) -> Tier {
    let matches: Vec<&SymbolRow> = matches.collect();
    match matches.len() {
        0 => Tier::NoMatch,
        1 => Tier::Resolved(matches[0].scope.clone()),
        _ => Tier::Ambiguous,
    }
}

/// `caller_scope` is the calling function's own scope
/// (`{file}::{qualified_name}`); `global_by_name` is every symbol in the
/// fact base named `callee_name` (`IFactSymbols::symbols_by_name`);
/// `same_file_symbols` is every symbol in `file`
/// (`IFactSymbols::symbols_for_file`).
pub fn resolve_callee(
    caller_scope: &str,
    file: &str,
    callee_name: &str,
    same_file_symbols: &[SymbolRow],
    global_by_name: &[SymbolRow],
    file_imports: &[ImportRow],
) -> Option<String> {
    // Tier 1: qualified — a sibling method defined directly in the
    // caller's own enclosing class/object (covers `self.foo()`/`this.foo()`).
    // Scopes are `{file}::{qualified.name}` — strip the file prefix first so
    // a dotted file name (`db.py`) never masquerades as a nesting level.
    let qualified_caller = caller_scope.rsplit_once("::").map_or(caller_scope, |(_, name)| name);
    if let Some(enclosing) = qualified_caller.rsplit_once('.').map(|(prefix, _)| prefix) {
        let file_prefix = caller_scope.rsplit_once("::").map_or("", |(prefix, _)| prefix);
        let qualified_scope = format!("{file_prefix}::{enclosing}.{callee_name}");
        match unique_match(global_by_name.iter().filter(|s| s.scope == qualified_scope)) {
            Tier::Resolved(scope) => return Some(scope),
            Tier::Ambiguous => return None,
            Tier::NoMatch => {}
        }
    }

    // Tier 2: same-file.
    match unique_match(same_file_symbols.iter().filter(|s| s.name == callee_name)) {
        Tier::Resolved(scope) => return Some(scope),
        Tier::Ambiguous => return None,
        Tier::NoMatch => {}
    }

    // Tier 3: resolved-import — candidate lives in a file this file's
    // imports already resolved to.
    let resolved_targets: Vec<&str> =
        file_imports.iter().filter_map(|i| i.resolved_path.as_deref()).collect();
    if resolved_targets.is_empty() {
        return None;
    }
    match unique_match(
        global_by_name
            .iter()
            .filter(|s| s.name == callee_name && resolved_targets.contains(&s.file.as_str())),
    ) {
        Tier::Resolved(scope) => Some(scope),
        Tier::Ambiguous | Tier::NoMatch => None,
    }
}
