//! Cross-file resolver (spec.md 4.4): binds unresolved imports/calls
//! into `call_graph_edges`/`import_graph_edges`, then exposes BFS
//! traversal of the resolved graph for the taint engine.

pub mod builder;
pub mod resolution;
pub mod traversal;
pub mod types;

pub use builder::resolve_all;
pub use types::{CallGraph, CallGraphStats, ResolvedEdge, ScopeKey, ScopeNode};
