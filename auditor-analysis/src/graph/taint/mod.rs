//! Backward IFDS worklist: source/sink/sanitizer discovery, the
//! intra-procedural propagation walk, and the worklist driver that ties
//! them together (spec.md 4.5.1–4.5.3, 4.5.6).

pub mod discovery;
pub mod engine;
pub mod propagation;
pub mod types;

pub use discovery::{discover_sinks, discover_sources, sanitized_fields};
pub use engine::run;
pub use types::{
    AccessPath, Confidence, PathSegment, Priority, ProvenanceHop, SinkFact, SourceFact,
    SummaryFact, TaintBudget, TaintCandidate, WorklistEntry,
};
