//! Shared traits used across the workspace's crates.

pub mod cancellation;
pub mod storage;

pub use cancellation::CancellationToken;
pub use storage::{
    IBatchWriter, IFactCalls, IFactCfg, IFactFiles, IFactFindings, IFactFrameworks, IFactGraph,
    IFactReader, IFactSymbols,
};
