//! File discovery errors (spec.md 4.1, 7).

use super::error_code::{self, DriftErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Kind A: root traversal failure (permission, missing directory).
    #[error("cannot read root directory {path}: {source}")]
    RootUnreadable { path: String, source: String },

    /// Kind B: a single file's read failed; the file is still recorded
    /// with `language = "error"` (spec.md 4.1).
    #[error("cannot read file {path}: {source}")]
    FileUnreadable { path: String, source: String },
}

impl DriftErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::RootUnreadable { .. } => error_code::SCAN_ROOT_UNREADABLE,
            Self::FileUnreadable { .. } => error_code::SCAN_FILE_IO,
        }
    }
}
