//! `LanguageExtractor` — the seam every per-language module implements
//! (spec.md 4.2). Framework-family extractors (HTTP routes, validation,
//! SQL sinks) are a second pass over the same tree, gated by
//! `crate::frameworks::detect` on the imports the core pass already
//! collected, not a separate trait.

use auditor_core::errors::ParseError;

use super::types::ExtractedFile;

pub trait LanguageExtractor: Send + Sync {
    /// Parse `source` and extract the core facts (spec.md 3): symbols,
    /// imports, calls, assignments, references, and a coarse CFG. Returns
    /// `ParseError::Syntax` on a tree-sitter parse failure, never panics.
    fn extract(&self, file: &str, source: &str) -> Result<ExtractedFile, ParseError>;
}
