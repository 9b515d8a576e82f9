//! Language extractors (spec.md 4.2): per-file AST extraction into
//! `auditor_core` fact rows, routed and cached by `ParserManager`.

pub mod cache;
pub mod languages;
pub mod manager;
pub mod traits;
pub mod types;

pub use cache::ParseCache;
pub use manager::ParserManager;
pub use traits::LanguageExtractor;
pub use types::{ExtractedFile, StringLiteral};
