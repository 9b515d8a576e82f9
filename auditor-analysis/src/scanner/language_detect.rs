//! Extension-to-language classification (spec.md 4.1 "extensionless and
//! unknown-extension files are recorded with `language = \"unknown\"`").

/// A source language this workspace extracts facts from. `Other` covers
/// every tree-sitter grammar the generic core extractor handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Java,
    Go,
    Rust,
    Ruby,
    Php,
    Kotlin,
    CSharp,
    /// Recognized extension with no extractor wired up yet, or no extension
    /// at all. Still recorded as a Files row; never extracted.
    Unknown,
}

impl Language {
    pub fn from_extension(ext: Option<&str>) -> Option<Self> {
        let ext = ext?.to_ascii_lowercase();
        Some(match ext.as_str() {
            "py" | "pyi" => Language::Python,
            "js" | "jsx" | "mjs" | "cjs" => Language::JavaScript,
            "ts" | "tsx" | "mts" | "cts" => Language::TypeScript,
            "java" => Language::Java,
            "go" => Language::Go,
            "rs" => Language::Rust,
            "rb" => Language::Ruby,
            "php" => Language::Php,
            "kt" | "kts" => Language::Kotlin,
            "cs" => Language::CSharp,
            _ => return None,
        })
    }

    /// The identifier used in `Files.language` and
    /// `PipelineConfig::extractor_language_set`.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Ruby => "ruby",
            Language::Php => "php",
            Language::Kotlin => "kotlin",
            Language::CSharp => "csharp",
            Language::Unknown => "unknown",
        }
    }
}
