//! Thread-safe string interners for file paths and symbol scopes, built
//! once per pipeline run from the fact base snapshot and read-only
//! afterward (spec.md 5 — "no global mutable state outside the fact base").

use lasso::{ThreadedRodeo, Spur};

use super::ids::{FileId, ScopeId};

#[derive(Debug, Default)]
pub struct PathInterner(ThreadedRodeo<Spur>);

impl PathInterner {
    pub fn new() -> Self {
        Self(ThreadedRodeo::new())
    }

    pub fn intern(&self, path: &str) -> FileId {
        FileId(self.0.get_or_intern(path))
    }

    pub fn resolve(&self, id: FileId) -> &str {
        self.0.resolve(&id.0)
    }
}

#[derive(Debug, Default)]
pub struct ScopeInterner(ThreadedRodeo<Spur>);

impl ScopeInterner {
    pub fn new() -> Self {
        Self(ThreadedRodeo::new())
    }

    pub fn intern(&self, scope: &str) -> ScopeId {
        ScopeId(self.0.get_or_intern(scope))
    }

    pub fn resolve(&self, id: ScopeId) -> &str {
        self.0.resolve(&id.0)
    }
}
