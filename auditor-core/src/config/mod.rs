//! Configuration types, loaded from TOML and layered over documented
//! defaults (spec.md 6).

mod pipeline_config;
mod taint_config;

pub use pipeline_config::PipelineConfig;
pub use taint_config::TaintConfig;

use std::path::Path;

use crate::errors::ConfigError;

/// Load a `PipelineConfig` from a TOML file on disk.
pub fn load_config(path: &Path) -> Result<PipelineConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
        path: path.display().to_string(),
        source: e.to_string(),
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::Malformed {
        path: path.display().to_string(),
        source: e.to_string(),
    })
}
