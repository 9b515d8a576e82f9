//! Batch writer thread: one `BatchCommand` queue serializing all writes
//! to the single writer connection (spec.md 4.3).

pub mod commands;
pub mod writer;

pub use commands::BatchCommand;
pub use writer::BatchWriter;
