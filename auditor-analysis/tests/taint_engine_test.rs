//! End-to-end IFDS taint engine tests (spec.md 4.5, 8) against a
//! hand-built fact base — no parsing involved, every row is inserted
//! directly the way the extractors would have produced it. Mirrors the
//! teacher's `taint_test.rs` style of constructing fixtures with small
//! helper functions rather than parsing source text.

use auditor_core::config::TaintConfig;
use auditor_core::traits::storage::{
    AssignmentRow, CallRow, RouteRow, SqlQueryRow, SymbolRow, ValidationUsageRow,
};
use auditor_core::traits::{IFactCalls, IFactFrameworks, IFactSymbols};
use auditor_analysis::graph::taint::engine::run;
use auditor_analysis::graph::taint::types::Confidence;
use auditor_storage::FactStorageEngine;

fn route(file: &str, handler: &str, param: &str) -> RouteRow {
    RouteRow {
        file: file.to_string(),
        method: "GET".to_string(),
        path_pattern: "/search".to_string(),
        handler_symbol: handler.to_string(),
        auth_decorators: "[]".to_string(),
        parameter_sources: format!("[\"{param}\"]"),
        line: 1,
    }
}

fn sql_sink(file: &str, scope: &str, line: i64, expr: &str) -> SqlQueryRow {
    SqlQueryRow {
        file: file.to_string(),
        scope: scope.to_string(),
        line,
        query_text: "SELECT * FROM users WHERE name = ?".to_string(),
        query_kind: "raw".to_string(),
        command: "SELECT".to_string(),
        tables: "[\"users\"]".to_string(),
        is_static: false,
        interpolated_expressions: format!("[\"{expr}\"]"),
    }
}

/// Scenario 1 (spec.md 8): a route handler's own parameter flows
/// straight into an interpolated query in the same scope, with no
/// intervening call — the common case, since a handler is invoked by
/// the framework, never by an explicit `CallRow` in extracted code.
#[test]
fn direct_same_scope_flow_is_high_confidence() {
    let engine = FactStorageEngine::open_in_memory().unwrap();
    let file = "app.py";
    let scope = "app.py::search";

    // A bare (undotted) route parameter used verbatim at the sink: the
    // access path's root equals the source's full access path, so this
    // matches at the seed entry before any backward walk runs.
    engine.insert_routes(&[route(file, scope, "user_id")]).unwrap();
    engine.insert_sql_queries(&[sql_sink(file, scope, 10, "user_id")]).unwrap();

    let candidates = run(&engine, &TaintConfig::default()).unwrap();

    assert_eq!(candidates.len(), 1);
    let candidate = &candidates[0];
    assert_eq!(candidate.confidence, Confidence::High);
    assert!(!candidate.truncated);
    assert_eq!(candidate.sink.file, file);
    assert_eq!(candidate.source.access_path_start, "user_id");
}

/// Scenario 1 variant: the handler assigns the source into a local
/// before interpolating it — the backward walk must rewrite the path
/// through the assignment before matching the source.
#[test]
fn flow_through_one_assignment_is_high_confidence() {
    let engine = FactStorageEngine::open_in_memory().unwrap();
    let file = "app.py";
    let scope = "app.py::search";

    engine.insert_routes(&[route(file, scope, "request.args.name")]).unwrap();
    engine
        .insert_assignments(&[AssignmentRow {
            file: file.to_string(),
            scope: scope.to_string(),
            target_name: "name".to_string(),
            rhs_expression: "request.args.name".to_string(),
            rhs_kind: "member_access".to_string(),
            rhs_refs: "[\"request.args.name\"]".to_string(),
            line: 8,
        }])
        .unwrap();
    engine.insert_sql_queries(&[sql_sink(file, scope, 10, "name")]).unwrap();

    let candidates = run(&engine, &TaintConfig::default()).unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].confidence, Confidence::High);
    assert_eq!(candidates[0].provenance.len(), 1);
}

/// Scenario 2 (spec.md 8): a validation framework usage row marks the
/// field a sanitizer boundary before the query — no finding should
/// survive, and the sanitizer is recorded rather than silently dropped.
#[test]
fn sanitizer_boundary_suppresses_the_finding() {
    let engine = FactStorageEngine::open_in_memory().unwrap();
    let file = "app.py";
    let scope = "app.py::search";

    engine.insert_routes(&[route(file, scope, "request.args.name")]).unwrap();
    // The sanitizer boundary covers the variable the assignment below
    // binds ("name"), not the qualified source path — propagation checks
    // the sanitizer against the path's current root at the point it
    // reaches the assignment, before that assignment's RHS is followed.
    engine
        .insert_validation_usage(&[ValidationUsageRow {
            file: file.to_string(),
            scope: scope.to_string(),
            framework: "marshmallow".to_string(),
            schema_symbol: "SearchSchema".to_string(),
            validated_fields: "[\"name\"]".to_string(),
            line: 5,
            is_sanitizer_boundary: true,
        }])
        .unwrap();
    engine
        .insert_assignments(&[AssignmentRow {
            file: file.to_string(),
            scope: scope.to_string(),
            target_name: "name".to_string(),
            rhs_expression: "request.args.name".to_string(),
            rhs_kind: "member_access".to_string(),
            rhs_refs: "[\"request.args.name\"]".to_string(),
            line: 8,
        }])
        .unwrap();
    engine.insert_sql_queries(&[sql_sink(file, scope, 10, "name")]).unwrap();

    let candidates = run(&engine, &TaintConfig::default()).unwrap();

    assert!(candidates.is_empty());
}

/// Scenario 3 (spec.md 8): the tainted parameter crosses a resolved
/// cross-file call boundary before reaching the sink — provenance
/// should span both files and confidence stays High since nothing
/// truncated or went through an opaque call.
#[test]
fn cross_file_resolved_call_chain_is_high_confidence() {
    let engine = FactStorageEngine::open_in_memory().unwrap();
    let route_file = "routes.py";
    let handler_scope = "routes.py::search";
    let db_file = "db.py";
    let callee_scope = "db.py::run_query";

    engine.insert_routes(&[route(route_file, handler_scope, "request.args.q")]).unwrap();
    // The handler binds the source into a local before the call — a call
    // argument expression is parsed the same way any other expression is
    // (dots split into access-path segments), so a call site passing the
    // qualified source straight through is modeled as passing the local
    // the preceding assignment bound it to.
    engine
        .insert_assignments(&[AssignmentRow {
            file: route_file.to_string(),
            scope: handler_scope.to_string(),
            target_name: "q".to_string(),
            rhs_expression: "request.args.q".to_string(),
            rhs_kind: "member_access".to_string(),
            rhs_refs: "[\"request.args.q\"]".to_string(),
            line: 11,
        }])
        .unwrap();
    engine
        .insert_calls(&[CallRow {
            file: route_file.to_string(),
            caller_scope: handler_scope.to_string(),
            callee_name: "run_query".to_string(),
            callee_resolved: Some(callee_scope.to_string()),
            line: 12,
            argument_index: 0,
            argument_expression: "q".to_string(),
            argument_kind: "identifier".to_string(),
        }])
        .unwrap();
    engine
        .insert_symbols(&[SymbolRow {
            file: db_file.to_string(),
            name: "run_query".to_string(),
            kind: "function".to_string(),
            line: 1,
            column: 0,
            scope: callee_scope.to_string(),
            signature: Some("(term)".to_string()),
        }])
        .unwrap();
    engine.insert_sql_queries(&[sql_sink(db_file, callee_scope, 3, "term")]).unwrap();

    let candidates = run(&engine, &TaintConfig::default()).unwrap();

    assert_eq!(candidates.len(), 1);
    let candidate = &candidates[0];
    assert_eq!(candidate.confidence, Confidence::High);
    assert_eq!(candidate.source.file, route_file);
    assert_eq!(candidate.sink.file, db_file);
    // One hop from the call-site substitution, one from the assignment
    // that bound the source into the argument passed at that call.
    assert_eq!(candidate.provenance.len(), 2);
    assert_eq!(candidate.provenance[0].file, route_file);
}

/// Scenario 4 (spec.md 8): the same flow, but the call site was never
/// resolved by the cross-file resolver (`callee_resolved` stays null) —
/// the engine must still find the flow through the bare-name fallback,
/// but degrade confidence to Medium rather than claiming High.
#[test]
fn opaque_callee_degrades_confidence_to_medium() {
    let engine = FactStorageEngine::open_in_memory().unwrap();
    let route_file = "routes.py";
    let handler_scope = "routes.py::search";
    let db_file = "db.py";
    let callee_scope = "db.py::run_query";

    engine.insert_routes(&[route(route_file, handler_scope, "request.args.q")]).unwrap();
    engine
        .insert_assignments(&[AssignmentRow {
            file: route_file.to_string(),
            scope: handler_scope.to_string(),
            target_name: "q".to_string(),
            rhs_expression: "request.args.q".to_string(),
            rhs_kind: "member_access".to_string(),
            rhs_refs: "[\"request.args.q\"]".to_string(),
            line: 11,
        }])
        .unwrap();
    engine
        .insert_calls(&[CallRow {
            file: route_file.to_string(),
            caller_scope: handler_scope.to_string(),
            callee_name: "run_query".to_string(),
            callee_resolved: None,
            line: 12,
            argument_index: 0,
            argument_expression: "q".to_string(),
            argument_kind: "identifier".to_string(),
        }])
        .unwrap();
    engine
        .insert_symbols(&[SymbolRow {
            file: db_file.to_string(),
            name: "run_query".to_string(),
            kind: "function".to_string(),
            line: 1,
            column: 0,
            scope: callee_scope.to_string(),
            signature: Some("(term)".to_string()),
        }])
        .unwrap();
    engine.insert_sql_queries(&[sql_sink(db_file, callee_scope, 3, "term")]).unwrap();

    let candidates = run(&engine, &TaintConfig::default()).unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].confidence, Confidence::Medium);
    assert!(candidates[0].provenance[0].description.contains("opaque_call"));
}

/// Scenario 5: an unrelated source declared for a different scope must
/// never match a sink in a scope it was never declared for — access
/// path and scope isolation, not just root-string equality.
#[test]
fn unrelated_source_in_another_scope_does_not_leak() {
    let engine = FactStorageEngine::open_in_memory().unwrap();
    let file = "app.py";

    engine.insert_routes(&[route(file, "app.py::other_handler", "request.args.q")]).unwrap();
    engine
        .insert_sql_queries(&[sql_sink(file, "app.py::search", 10, "request.args.q")])
        .unwrap();

    let candidates = run(&engine, &TaintConfig::default()).unwrap();

    assert!(candidates.is_empty());
}
