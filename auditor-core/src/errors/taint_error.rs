//! Taint engine errors (spec.md 4.5). Budget exhaustion and suspension are
//! not errors (spec.md 7 Kind C) — they are annotations on findings. This
//! enum is reserved for genuine internal invariant violations.

use super::error_code::{self, DriftErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum TaintError {
    #[error("taint engine internal error: {message}")]
    Internal { message: String },
}

impl DriftErrorCode for TaintError {
    fn error_code(&self) -> &'static str {
        error_code::TAINT_INTERNAL
    }
}
