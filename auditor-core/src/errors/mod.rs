//! Per-subsystem error taxonomy (spec.md 7): every variant maps to exactly
//! one of Kind A (fatal), Kind B (file-local), or Kind C (informational,
//! not represented as an `Err` at all — see the taint and resolver modules
//! for how those outcomes are carried as ordinary data instead).

pub mod config_error;
pub mod error_code;
pub mod parse_error;
pub mod pipeline_error;
pub mod resolve_error;
pub mod scan_error;
pub mod storage_error;
pub mod taint_error;

pub use config_error::ConfigError;
pub use error_code::DriftErrorCode;
pub use parse_error::ParseError;
pub use pipeline_error::{ExitCode, PipelineError};
pub use resolve_error::ResolveError;
pub use scan_error::ScanError;
pub use storage_error::StorageError;
pub use taint_error::TaintError;
