//! Interned-string identifiers for hot paths that would otherwise clone
//! file paths and scope strings on every comparison (call graph adjacency,
//! taint worklist keys).

use lasso::Spur;

/// An interned repo-relative file path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub Spur);

/// An interned fully-qualified symbol scope (e.g. `module.Class.method`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub Spur);
