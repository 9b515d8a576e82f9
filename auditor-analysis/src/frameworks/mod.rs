//! Framework-family detection (spec.md 4.2): a small signature table
//! mapping an import target to a web/ORM/validation framework, gating the
//! HTTP-route, validation, and SQL-sink extraction passes in
//! `parsers::languages::{python, javascript_typescript}`. Rule packs and
//! learned conventions are explicitly out of scope (spec.md 1 Non-goals)
//! — this module only recognizes the small fixed set of frameworks named
//! in spec.md 4.2, nothing user-extensible.

use auditor_core::traits::storage::ImportRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameworkKind {
    Flask,
    FastApi,
    Django,
    Pydantic,
    Express,
    Fastify,
    NestJs,
    Zod,
    Joi,
}

impl FrameworkKind {
    pub fn name(self) -> &'static str {
        match self {
            FrameworkKind::Flask => "flask",
            FrameworkKind::FastApi => "fastapi",
            FrameworkKind::Django => "django",
            FrameworkKind::Pydantic => "pydantic",
            FrameworkKind::Express => "express",
            FrameworkKind::Fastify => "fastify",
            FrameworkKind::NestJs => "nestjs",
            FrameworkKind::Zod => "zod",
            FrameworkKind::Joi => "joi",
        }
    }

    fn from_import(target: &str) -> Option<Self> {
        let t = target.to_ascii_lowercase();
        Some(if t.contains("flask") {
            FrameworkKind::Flask
        } else if t.contains("fastapi") {
            FrameworkKind::FastApi
        } else if t.contains("django") {
            FrameworkKind::Django
        } else if t.contains("pydantic") {
            FrameworkKind::Pydantic
        } else if t == "express" || t.starts_with("express/") {
            FrameworkKind::Express
        } else if t.contains("fastify") {
            FrameworkKind::Fastify
        } else if t.contains("@nestjs") {
            FrameworkKind::NestJs
        } else if t == "zod" || t.starts_with("zod/") {
            FrameworkKind::Zod
        } else if t.contains("joi") {
            FrameworkKind::Joi
        } else {
            return None;
        })
    }
}

/// Every framework signaled by a file's import set, deduplicated.
pub fn detect(imports: &[ImportRow]) -> Vec<FrameworkKind> {
    let mut found = Vec::new();
    for import in imports {
        if let Some(kind) = FrameworkKind::from_import(&import.target) {
            if !found.contains(&kind) {
                found.push(kind);
            }
        }
    }
    found
}
