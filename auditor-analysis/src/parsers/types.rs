//! The extraction result every language extractor produces (spec.md 4.2).
//!
//! Extractors never build an intermediate generic AST summary: they push
//! `auditor_core` row types directly, the same no-translation-layer
//! discipline `auditor-storage`'s `queries` modules follow (there is no
//! NAPI bridge in this workspace to serve with a separate wire format).

use auditor_core::traits::storage::{
    AssignmentRow, CallRow, CfgBlockRow, CfgEdgeRow, CfgStatementRow, ImportRow, RefRow, RouteRow,
    SqlQueryRow, SymbolRow, ValidationUsageRow,
};

/// Everything extracted from one source file. `FileBatch` (auditor-storage)
/// is assembled from this plus the `FileRow` the scanner already knows.
#[derive(Debug, Clone, Default)]
pub struct ExtractedFile {
    pub symbols: Vec<SymbolRow>,
    pub imports: Vec<ImportRow>,
    pub calls: Vec<CallRow>,
    pub assignments: Vec<AssignmentRow>,
    pub refs: Vec<RefRow>,
    pub routes: Vec<RouteRow>,
    pub validation_usage: Vec<ValidationUsageRow>,
    pub sql_queries: Vec<SqlQueryRow>,
    pub cfg_blocks: Vec<CfgBlockRow>,
    pub cfg_edges: Vec<CfgEdgeRow>,
    pub cfg_statements: Vec<CfgStatementRow>,
}

/// A string literal found during the core walk, handed to the framework
/// extractors so they don't need to re-walk the tree looking for them
/// (spec.md 4.2 "string literal resolution").
#[derive(Debug, Clone)]
pub struct StringLiteral {
    pub scope: String,
    pub value: String,
    pub line: i64,
    /// `true` when the literal is an interpolated f-string/template
    /// literal and `value` is the cleaned static portion only.
    pub interpolated: bool,
}
