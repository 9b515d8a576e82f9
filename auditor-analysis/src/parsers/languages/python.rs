//! Python extractor family (spec.md 4.2): the generic core walk plus
//! Flask/FastAPI route recognition, Pydantic validation-boundary
//! recognition, and raw-SQL sink recognition over DB-API `execute` calls.
//! Framework passes are gated on `frameworks::detect` so a plain script
//! with no web/ORM imports pays no extra cost and gets no spurious rows.

use auditor_core::errors::ParseError;
use auditor_core::traits::storage::{RouteRow, SqlQueryRow, ValidationUsageRow};

use crate::frameworks::{self, FrameworkKind};
use crate::parsers::traits::LanguageExtractor;
use crate::parsers::types::ExtractedFile;
use crate::scanner::Language;

use super::generic::GenericExtractor;

pub struct PythonExtractor {
    core: GenericExtractor,
}

impl Default for PythonExtractor {
    fn default() -> Self {
        Self { core: GenericExtractor::new(Language::Python) }
    }
}

impl LanguageExtractor for PythonExtractor {
    fn extract(&self, file: &str, source: &str) -> Result<ExtractedFile, ParseError> {
        let mut out = self.core.extract(file, source)?;
        let frameworks = frameworks::detect(&out.imports);

        if frameworks.contains(&FrameworkKind::Flask) || frameworks.contains(&FrameworkKind::FastApi) {
            out.routes = extract_routes(&out, file);
        }
        if frameworks.contains(&FrameworkKind::Pydantic) {
            out.validation_usage = extract_validation(&out, file);
        }
        out.sql_queries = extract_sql(&out, file);
        Ok(out)
    }
}

fn route_method(callee: &str) -> Option<String> {
    match callee {
        "route" => Some("GET".to_string()),
        "get" | "post" | "put" | "delete" | "patch" | "options" | "head" => {
            Some(callee.to_ascii_uppercase())
        }
        _ => None,
    }
}

fn extract_routes(extracted: &ExtractedFile, file: &str) -> Vec<RouteRow> {
    let mut routes = Vec::new();
    for call in &extracted.calls {
        if call.argument_index != 0 {
            continue;
        }
        let Some(method) = route_method(&call.callee_name) else { continue };
        let handler = extracted
            .symbols
            .iter()
            .filter(|s| s.kind == "function" && s.line > call.line && s.line <= call.line + 5)
            .min_by_key(|s| s.line);
        if let Some(handler) = handler {
            routes.push(RouteRow {
                file: file.to_string(),
                method,
                path_pattern: call.argument_expression.clone(),
                handler_symbol: handler.scope.clone(),
                auth_decorators: "[]".to_string(),
                parameter_sources: "[]".to_string(),
                line: call.line,
            });
        }
    }
    routes
}

fn extract_validation(extracted: &ExtractedFile, file: &str) -> Vec<ValidationUsageRow> {
    extracted
        .symbols
        .iter()
        .filter(|s| s.kind == "class")
        .filter(|s| s.signature.as_deref().map(|sig| sig.contains("BaseModel")).unwrap_or(false))
        .map(|s| ValidationUsageRow {
            file: file.to_string(),
            scope: s.scope.clone(),
            framework: "pydantic".to_string(),
            schema_symbol: s.name.clone(),
            validated_fields: "[]".to_string(),
            line: s.line,
            is_sanitizer_boundary: true,
        })
        .collect()
}

fn extract_sql(extracted: &ExtractedFile, file: &str) -> Vec<SqlQueryRow> {
    let mut out = Vec::new();
    for call in &extracted.calls {
        if call.argument_index != 0 {
            continue;
        }
        if call.callee_name != "execute" && call.callee_name != "executemany" {
            continue;
        }
        let is_static = call.argument_kind == "literal";
        let command = call
            .argument_expression
            .trim_matches(|c| c == '"' || c == '\'')
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_ascii_uppercase();
        out.push(SqlQueryRow {
            file: file.to_string(),
            scope: call.caller_scope.clone(),
            line: call.line,
            query_text: call.argument_expression.clone(),
            query_kind: "raw".to_string(),
            command,
            tables: "[]".to_string(),
            is_static,
            interpolated_expressions: if is_static {
                "[]".to_string()
            } else {
                serde_json::to_string(&[call.argument_expression.clone()]).unwrap_or_else(|_| "[]".into())
            },
        });
    }
    out
}
