//! Configuration-loading errors (spec.md 7 Kind A — fatal, exit code 2).

use super::error_code::{self, DriftErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file unreadable at {path}: {source}")]
    Unreadable { path: String, source: String },

    #[error("config file malformed at {path}: {source}")]
    Malformed { path: String, source: String },

    #[error("root_path is required and has no sane default")]
    MissingRootPath,
}

impl DriftErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unreadable { .. } => error_code::CONFIG_UNREADABLE,
            Self::Malformed { .. } => error_code::CONFIG_MALFORMED,
            Self::MissingRootPath => error_code::CONFIG_MALFORMED,
        }
    }
}
