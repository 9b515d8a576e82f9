//! Cross-file resolver errors (spec.md 4.4). Resolution itself is
//! best-effort and never fatal; this enum exists only for the internal
//! invariant violations the resolver can hit (e.g. a snapshot read
//! failing), not for ordinary unresolved imports/callees.

use super::error_code::{self, DriftErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("resolver internal error: {message}")]
    Internal { message: String },
}

impl DriftErrorCode for ResolveError {
    fn error_code(&self) -> &'static str {
        error_code::RESOLVE_INTERNAL
    }
}
