//! The shared tree-sitter walk every per-language extractor runs (spec.md
//! 4.2). Classification is by node-kind *substring* rather than an
//! exact-kind table per grammar: with ten bundled grammars and no ability
//! to compile-check against their exact node-kind strings in this pass, a
//! substring match (`"call"`, `"function"` + `"definition"`/`"declaration"`,
//! `"string"`, ...) is the more robust choice — every mainstream
//! tree-sitter grammar names its call/definition/string nodes this way.

use auditor_core::traits::storage::{
    AssignmentRow, CallRow, CfgBlockRow, CfgStatementRow, ImportRow, RefRow, SymbolRow,
};
use tree_sitter::Node;

use crate::parsers::types::ExtractedFile;

const MAX_EXPR_LEN: usize = 240;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeClass {
    FunctionDef,
    ClassDef,
    Call,
    Assignment,
    Import,
    StringLiteral,
    Identifier,
    Other,
}

fn classify(kind: &str) -> NodeClass {
    let is_def = kind.contains("definition") || kind.contains("declaration") || kind.ends_with("_item");
    if (kind.contains("function") || kind.contains("method")) && is_def {
        NodeClass::FunctionDef
    } else if (kind.contains("class") || kind.contains("struct") || kind.contains("interface") || kind == "impl_item")
        && (is_def || kind == "impl_item")
    {
        NodeClass::ClassDef
    } else if kind.contains("call") || kind.contains("invocation") {
        NodeClass::Call
    } else if kind.contains("import") || kind.contains("use_declaration") || kind == "require" {
        NodeClass::Import
    } else if kind.contains("assignment")
        || kind == "variable_declarator"
        || kind == "short_var_declaration"
        || kind == "let_declaration"
        || kind.contains("property_declaration")
        || kind.contains("local_variable_declaration")
    {
        NodeClass::Assignment
    } else if kind.contains("string") {
        NodeClass::StringLiteral
    } else if kind == "identifier" || kind.ends_with("_identifier") || kind == "name" || kind == "variable_name" {
        NodeClass::Identifier
    } else {
        NodeClass::Other
    }
}

fn text(node: Node, source: &[u8]) -> String {
    String::from_utf8_lossy(&source[node.byte_range()]).into_owned()
}

fn truncated(s: String) -> String {
    if s.len() > MAX_EXPR_LEN {
        let mut t = s;
        t.truncate(MAX_EXPR_LEN);
        t.push('\u{2026}');
        t
    } else {
        s
    }
}

fn line_of(node: Node) -> i64 {
    node.start_position().row as i64 + 1
}

fn scope_path(file: &str, stack: &[String]) -> String {
    if stack.is_empty() {
        format!("{file}::<module>")
    } else {
        format!("{file}::{}", stack.join("."))
    }
}

fn def_name(node: Node, source: &[u8]) -> String {
    if let Some(n) = node.child_by_field_name("name") {
        return text(n, source);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if classify(child.kind()) == NodeClass::Identifier {
            return text(child, source);
        }
    }
    "<anonymous>".to_string()
}

fn extra_descriptor(node: Node, source: &[u8], is_class: bool) -> Option<String> {
    let field = if is_class { "superclasses" } else { "parameters" };
    node.child_by_field_name(field)
        .or_else(|| node.child_by_field_name("bases"))
        .or_else(|| node.child_by_field_name("class_heritage"))
        .map(|n| truncated(text(n, source)))
}

fn callee_name(node: Node, source: &[u8]) -> String {
    let callee = node
        .child_by_field_name("function")
        .or_else(|| node.child_by_field_name("method"))
        .or_else(|| node.child_by_field_name("name"));
    let raw = match callee {
        Some(n) => text(n, source),
        None => {
            // Fall back to the call's own text up to the first '('.
            let whole = text(node, source);
            whole.split('(').next().unwrap_or(&whole).to_string()
        }
    };
    raw.rsplit(['.', ':', '>']).next().unwrap_or(&raw).trim().to_string()
}

fn arg_kind_and_text(node: Node, source: &[u8]) -> (String, String) {
    let kind = match classify(node.kind()) {
        NodeClass::StringLiteral => "literal",
        NodeClass::Call => "call",
        NodeClass::Identifier => "identifier",
        _ => "expression",
    };
    (kind.to_string(), truncated(text(node, source)))
}

fn call_arguments(node: Node, source: &[u8]) -> Vec<(String, String)> {
    let Some(args) = node.child_by_field_name("arguments") else {
        return Vec::new();
    };
    let mut out = Vec::new();
    let mut cursor = args.walk();
    for child in args.named_children(&mut cursor) {
        let (kind, expr) = arg_kind_and_text(child, source);
        out.push((expr, kind));
    }
    out
}

fn binary_parts<'a>(node: Node<'a>) -> Option<(Node<'a>, Node<'a>)> {
    for (lhs_field, rhs_field) in [("left", "right"), ("name", "value"), ("pattern", "value"), ("target", "value")] {
        if let (Some(l), Some(r)) = (node.child_by_field_name(lhs_field), node.child_by_field_name(rhs_field)) {
            return Some((l, r));
        }
    }
    None
}

fn collect_identifiers(node: Node, source: &[u8], out: &mut Vec<String>) {
    if out.len() >= 10 {
        return;
    }
    if classify(node.kind()) == NodeClass::Identifier {
        out.push(text(node, source));
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_identifiers(child, source, out);
        if out.len() >= 10 {
            break;
        }
    }
}

fn import_target(node: Node, source: &[u8]) -> String {
    for field in ["module_name", "source", "path", "name"] {
        if let Some(n) = node.child_by_field_name(field) {
            return clean_literal(text(n, source));
        }
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if classify(child.kind()) == NodeClass::StringLiteral {
            return clean_literal(text(child, source));
        }
    }
    truncated(text(node, source))
}

fn clean_literal(s: String) -> String {
    s.trim_matches(|c| c == '"' || c == '\'' || c == '`').to_string()
}

/// Walk `root` and push every core-fact row onto `out`. `scope_stack`
/// starts empty (module scope) and is threaded through recursive calls.
pub fn walk(node: Node, source: &[u8], file: &str, scope_stack: &mut Vec<String>, out: &mut ExtractedFile) {
    let kind = node.kind();
    match classify(kind) {
        NodeClass::FunctionDef => {
            let name = def_name(node, source);
            let scope = scope_path(file, scope_stack);
            let line = line_of(node);
            out.symbols.push(SymbolRow {
                file: file.to_string(),
                name: name.clone(),
                kind: if scope_stack.is_empty() { "function".into() } else { "method".into() },
                line,
                column: node.start_position().column as i64,
                scope: scope.clone(),
                signature: extra_descriptor(node, source, false),
            });
            scope_stack.push(name.clone());
            let fn_scope = scope_path(file, scope_stack);
            if let Some(body) = node.child_by_field_name("body") {
                out.cfg_blocks.push(CfgBlockRow {
                    block_id: fn_scope.clone(),
                    file: file.to_string(),
                    scope: fn_scope.clone(),
                    start_line: line,
                    end_line: node.end_position().row as i64 + 1,
                    kind: "body".into(),
                });
                let mut cursor = body.walk();
                for stmt in body.named_children(&mut cursor) {
                    out.cfg_statements.push(CfgStatementRow {
                        block_id: fn_scope.clone(),
                        statement_line: line_of(stmt),
                        statement_kind: stmt.kind().to_string(),
                        statement_text: truncated(text(stmt, source)),
                    });
                }
                walk(body, source, file, scope_stack, out);
                let mut cursor2 = node.walk();
                for child in node.children(&mut cursor2) {
                    if child != body && Some(child) != node.child_by_field_name("name") {
                        walk(child, source, file, scope_stack, out);
                    }
                }
            } else {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    walk(child, source, file, scope_stack, out);
                }
            }
            scope_stack.pop();
            return;
        }
        NodeClass::ClassDef => {
            let name = def_name(node, source);
            let scope = scope_path(file, scope_stack);
            out.symbols.push(SymbolRow {
                file: file.to_string(),
                name: name.clone(),
                kind: "class".into(),
                line: line_of(node),
                column: node.start_position().column as i64,
                scope,
                signature: extra_descriptor(node, source, true),
            });
            scope_stack.push(name);
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                walk(child, source, file, scope_stack, out);
            }
            scope_stack.pop();
            return;
        }
        NodeClass::Call => {
            let scope = scope_path(file, scope_stack);
            let line = line_of(node);
            let callee = callee_name(node, source);
            let args = call_arguments(node, source);
            if args.is_empty() {
                out.calls.push(CallRow {
                    file: file.to_string(),
                    caller_scope: scope.clone(),
                    callee_name: callee.clone(),
                    callee_resolved: None,
                    line,
                    argument_index: 0,
                    argument_expression: String::new(),
                    argument_kind: "none".into(),
                });
            } else {
                for (i, (expr, argkind)) in args.into_iter().enumerate() {
                    out.calls.push(CallRow {
                        file: file.to_string(),
                        caller_scope: scope.clone(),
                        callee_name: callee.clone(),
                        callee_resolved: None,
                        line,
                        argument_index: i as i64,
                        argument_expression: expr,
                        argument_kind: argkind,
                    });
                }
            }
        }
        NodeClass::Assignment => {
            if let Some((lhs, rhs)) = binary_parts(node) {
                let scope = scope_path(file, scope_stack);
                let (rhs_kind, _) = arg_kind_and_text(rhs, source);
                let mut refs = Vec::new();
                collect_identifiers(rhs, source, &mut refs);
                out.assignments.push(AssignmentRow {
                    file: file.to_string(),
                    scope: scope.clone(),
                    target_name: truncated(text(lhs, source)),
                    rhs_expression: truncated(text(rhs, source)),
                    rhs_kind,
                    rhs_refs: serde_json::to_string(&refs).unwrap_or_else(|_| "[]".into()),
                    line: line_of(node),
                });
                for name in &refs {
                    out.refs.push(RefRow {
                        file: file.to_string(),
                        scope: scope.clone(),
                        referenced_name: name.clone(),
                        kind: "assignment_rhs".into(),
                        line: line_of(node),
                    });
                }
            }
        }
        NodeClass::Import => {
            let target = import_target(node, source);
            let mut names = Vec::new();
            collect_identifiers(node, source, &mut names);
            out.imports.push(ImportRow {
                file: file.to_string(),
                target,
                resolved_path: None,
                imported_names: serde_json::to_string(&names).unwrap_or_else(|_| "[]".into()),
                line: line_of(node),
            });
        }
        NodeClass::StringLiteral | NodeClass::Identifier | NodeClass::Other => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(child, source, file, scope_stack, out);
    }
}
