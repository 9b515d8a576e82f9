//! One query module per table family, following the `prepare_cached` +
//! `params!` + row-mapper template of `drift-storage/src/queries/detections.rs`.
//! Every function operates directly on `auditor_core` row types — there is
//! no NAPI bridge in this workspace, so the Record/Row translation layer
//! the teacher needed for its bindings crate has no remaining purpose here.

pub mod calls;
pub mod cfg;
pub mod files;
pub mod findings;
pub mod frameworks;
pub mod graph;
pub mod symbols;
