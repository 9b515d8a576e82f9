//! JavaScript/TypeScript extractor family (spec.md 4.2): the generic core
//! walk plus Express/Fastify/NestJS route recognition, Zod/Joi
//! validation-boundary recognition, and raw-SQL sink recognition over
//! `pg`/`mysql2`-style `query`/`execute` calls.

use auditor_core::errors::ParseError;
use auditor_core::traits::storage::{RouteRow, SqlQueryRow, ValidationUsageRow};

use crate::frameworks::{self, FrameworkKind};
use crate::parsers::traits::LanguageExtractor;
use crate::parsers::types::ExtractedFile;
use crate::scanner::Language;

use super::generic::GenericExtractor;

pub struct JavaScriptTypeScriptExtractor {
    core: GenericExtractor,
}

impl JavaScriptTypeScriptExtractor {
    pub fn new(language: Language) -> Self {
        Self { core: GenericExtractor::new(language) }
    }
}

impl LanguageExtractor for JavaScriptTypeScriptExtractor {
    fn extract(&self, file: &str, source: &str) -> Result<ExtractedFile, ParseError> {
        let mut out = self.core.extract(file, source)?;
        let frameworks = frameworks::detect(&out.imports);

        if frameworks.contains(&FrameworkKind::Express)
            || frameworks.contains(&FrameworkKind::Fastify)
            || frameworks.contains(&FrameworkKind::NestJs)
        {
            out.routes = extract_routes(&out, file);
        }
        if frameworks.contains(&FrameworkKind::Zod) || frameworks.contains(&FrameworkKind::Joi) {
            out.validation_usage = extract_validation(&out, file, &frameworks);
        }
        out.sql_queries = extract_sql(&out, file);
        Ok(out)
    }
}

fn route_method(callee: &str) -> Option<String> {
    match callee {
        "get" | "post" | "put" | "delete" | "patch" | "options" | "head" | "all" => {
            Some(if callee == "all" { "ANY".to_string() } else { callee.to_ascii_uppercase() })
        }
        _ => None,
    }
}

fn extract_routes(extracted: &ExtractedFile, file: &str) -> Vec<RouteRow> {
    extracted
        .calls
        .iter()
        .filter(|c| c.argument_index == 0)
        .filter_map(|c| {
            let method = route_method(&c.callee_name)?;
            Some(RouteRow {
                file: file.to_string(),
                method,
                path_pattern: c.argument_expression.clone(),
                handler_symbol: c.caller_scope.clone(),
                auth_decorators: "[]".to_string(),
                parameter_sources: "[]".to_string(),
                line: c.line,
            })
        })
        .collect()
}

fn extract_validation(
    extracted: &ExtractedFile,
    file: &str,
    frameworks: &[FrameworkKind],
) -> Vec<ValidationUsageRow> {
    let framework_name = if frameworks.contains(&FrameworkKind::Zod) { "zod" } else { "joi" };
    extracted
        .assignments
        .iter()
        .filter(|a| a.rhs_kind == "call")
        .filter(|a| a.rhs_expression.contains("z.object") || a.rhs_expression.contains("Joi.object"))
        .map(|a| ValidationUsageRow {
            file: file.to_string(),
            scope: a.scope.clone(),
            framework: framework_name.to_string(),
            schema_symbol: a.target_name.clone(),
            validated_fields: "[]".to_string(),
            line: a.line,
            is_sanitizer_boundary: true,
        })
        .collect()
}

fn extract_sql(extracted: &ExtractedFile, file: &str) -> Vec<SqlQueryRow> {
    extracted
        .calls
        .iter()
        .filter(|c| c.argument_index == 0)
        .filter(|c| c.callee_name == "query" || c.callee_name == "execute")
        .map(|c| {
            let is_static = c.argument_kind == "literal";
            let command = c
                .argument_expression
                .trim_matches(|ch| ch == '"' || ch == '\'' || ch == '`')
                .split_whitespace()
                .next()
                .unwrap_or("")
                .to_ascii_uppercase();
            SqlQueryRow {
                file: file.to_string(),
                scope: c.caller_scope.clone(),
                line: c.line,
                query_text: c.argument_expression.clone(),
                query_kind: "raw".to_string(),
                command,
                tables: "[]".to_string(),
                is_static,
                interpolated_expressions: if is_static {
                    "[]".to_string()
                } else {
                    serde_json::to_string(&[c.argument_expression.clone()]).unwrap_or_else(|_| "[]".into())
                },
            }
        })
        .collect()
}
