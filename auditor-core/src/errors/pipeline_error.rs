//! Orchestrator-level errors (spec.md 4.6, 7). Every Kind A condition
//! ultimately surfaces as a `PipelineError`, which `run_pipeline`'s caller
//! maps to an exit code.

use super::config_error::ConfigError;
use super::error_code::{self, DriftErrorCode};
use super::scan_error::ScanError;
use super::storage_error::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Schema digest mismatch at startup (spec.md 4.6 step 1). Maps to
    /// exit code 2.
    #[error("schema contract violated: {0}")]
    SchemaMismatch(#[source] StorageError),

    /// File discovery failed outright (spec.md 4.6 step 2). Maps to exit
    /// code 2 if caused by configuration, 3 otherwise.
    #[error("file discovery failed: {0}")]
    DiscoveryFailed(#[source] ScanError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Any invariant violation not covered above: e.g. an extractor
    /// producing a row for an undeclared table. Maps to exit code 3.
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl DriftErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::SchemaMismatch(_) => error_code::PIPELINE_SCHEMA_MISMATCH,
            Self::DiscoveryFailed(_) => error_code::PIPELINE_DISCOVERY_FAILED,
            Self::Storage(e) => e.error_code(),
            Self::Internal { .. } => error_code::PIPELINE_INTERNAL,
        }
    }
}

/// Exit codes per spec.md 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    NoFindings = 0,
    FindingsEmitted = 1,
    FatalConfigOrSchema = 2,
    InternalError = 3,
}

impl PipelineError {
    /// The exit code an orchestrator entry point should return for this
    /// error (spec.md 6).
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Config(_) | Self::SchemaMismatch(_) => ExitCode::FatalConfigOrSchema,
            Self::DiscoveryFailed(_) => ExitCode::FatalConfigOrSchema,
            Self::Storage(_) | Self::Internal { .. } => ExitCode::InternalError,
        }
    }
}
