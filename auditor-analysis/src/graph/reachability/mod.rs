//! Forward reachability verification (spec.md 4.5.4) and its supporting
//! cache and distance annotation (spec.md 4.5.5).

pub mod cache;
pub mod field_flow;
pub mod sanitizer_distance;

pub use cache::{ReachabilityCache, TraversalDirection};
pub use field_flow::{build_call_graph, verify_forward};
pub use sanitizer_distance::distance_to_sink;
