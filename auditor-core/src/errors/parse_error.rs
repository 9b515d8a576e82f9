//! Language-extractor errors (spec.md 4.2, 7 Kind B).

use super::error_code::{self, DriftErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Kind B: syntax error in a source file. The file is recorded with
    /// a diagnostics row; extraction continues for other files.
    #[error("syntax error in {file} at line {line}: {message}")]
    Syntax { file: String, line: u32, message: String },

    #[error("no extractor registered for language {language}")]
    UnsupportedLanguage { language: String },

    /// Kind A when surfaced by the orchestrator: a row produced by an
    /// extractor violates the declared schema for its table. No silent
    /// drops, no partial inserts (spec.md 4.2).
    #[error("row for table {table} in {file} violates column {column}: {reason}")]
    RowSchemaViolation { table: String, file: String, column: String, reason: String },

    #[error("extraction of {file} exceeded the per-file timeout")]
    Timeout { file: String },
}

impl DriftErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Syntax { .. } => error_code::PARSE_SYNTAX_ERROR,
            Self::UnsupportedLanguage { .. } => error_code::PARSE_UNSUPPORTED_LANGUAGE,
            Self::RowSchemaViolation { .. } => error_code::PARSE_ROW_SCHEMA_VIOLATION,
            Self::Timeout { .. } => error_code::PARSE_TIMEOUT,
        }
    }
}
