//! # auditor-core
//!
//! Foundation crate: configuration, error taxonomy, the declarative fact
//! base schema, storage traits, shared identifiers, and progress events.
//! Every other crate in the workspace depends on this one.

#![allow(clippy::module_inception)]

pub mod config;
pub mod errors;
pub mod events;
pub mod schema;
pub mod traits;
pub mod types;

pub use config::PipelineConfig;
pub use errors::DriftErrorCode;
pub use events::{NoOpEventHandler, PipelineEventHandler};
pub use types::{FxHashMap, FxHashSet};
