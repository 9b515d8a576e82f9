//! Parse cache: Moka in-memory cache keyed by `(content_hash, language)` —
//! same content parsed as different languages produces separate entries.
//! Grounded on the teacher's `drift-analysis/src/parsers/cache.rs`, ported
//! to this crate's `ExtractedFile` result type (there is no `ParseResult`
//! AST-summary type here; extractors write `auditor_core` rows directly).

use moka::sync::Cache;

use crate::scanner::Language;

use super::types::ExtractedFile;

type CacheKey = (u64, std::mem::Discriminant<Language>);

fn make_key(content_hash: u64, lang: Language) -> CacheKey {
    (content_hash, std::mem::discriminant(&lang))
}

pub struct ParseCache {
    inner: Cache<CacheKey, ExtractedFile>,
}

impl ParseCache {
    pub fn new(capacity: u64) -> Self {
        Self { inner: Cache::new(capacity) }
    }

    pub fn get(&self, content_hash: u64, lang: Language) -> Option<ExtractedFile> {
        self.inner.get(&make_key(content_hash, lang))
    }

    pub fn insert(&self, content_hash: u64, lang: Language, result: ExtractedFile) {
        self.inner.insert(make_key(content_hash, lang), result);
    }

    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    pub fn invalidate(&self, content_hash: u64, lang: Language) {
        self.inner.invalidate(&make_key(content_hash, lang));
    }
}

impl Default for ParseCache {
    fn default() -> Self {
        Self::new(10_000)
    }
}
