//! Generic tree-sitter extractor (spec.md 4.2): the core fact set —
//! symbols, imports, calls, assignments, references, a coarse per-scope
//! CFG — for every bundled grammar that doesn't get a dedicated
//! per-concern extractor family.

use auditor_core::errors::ParseError;
use tree_sitter::Parser;

use crate::parsers::traits::LanguageExtractor;
use crate::parsers::types::ExtractedFile;
use crate::scanner::Language;

use super::walk::walk;

pub struct GenericExtractor {
    language: Language,
}

impl GenericExtractor {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    fn grammar(&self) -> Result<tree_sitter::Language, ParseError> {
        Ok(match self.language {
            Language::Python => tree_sitter_python::LANGUAGE.into(),
            Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Language::Java => tree_sitter_java::LANGUAGE.into(),
            Language::Go => tree_sitter_go::LANGUAGE.into(),
            Language::Rust => tree_sitter_rust::LANGUAGE.into(),
            Language::Ruby => tree_sitter_ruby::LANGUAGE.into(),
            Language::Php => tree_sitter_php::LANGUAGE_PHP.into(),
            Language::Kotlin => tree_sitter_kotlin_sg::LANGUAGE.into(),
            Language::CSharp => tree_sitter_c_sharp::LANGUAGE.into(),
            Language::Unknown => {
                return Err(ParseError::UnsupportedLanguage { language: "unknown".into() })
            }
        })
    }
}

impl LanguageExtractor for GenericExtractor {
    fn extract(&self, file: &str, source: &str) -> Result<ExtractedFile, ParseError> {
        let grammar = self.grammar()?;
        let mut parser = Parser::new();
        parser.set_language(&grammar).map_err(|_| ParseError::UnsupportedLanguage {
            language: self.language.as_str().to_string(),
        })?;
        let tree = parser.parse(source, None).ok_or_else(|| ParseError::Syntax {
            file: file.to_string(),
            line: 0,
            message: "tree-sitter produced no parse tree".to_string(),
        })?;

        let mut out = ExtractedFile::default();
        let mut scope_stack = Vec::new();
        walk(tree.root_node(), source.as_bytes(), file, &mut scope_stack, &mut out);
        Ok(out)
    }
}
