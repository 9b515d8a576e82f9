//! # auditor-storage
//!
//! SQLite persistence for the fact base (spec.md 3, 4.3): WAL-mode
//! connection pool, schema DDL generated from `auditor_core::schema`,
//! a dedicated batch-writer thread, and one query module per table
//! family. `FactStorageEngine` is the single type that implements every
//! `auditor_core::traits::storage` trait.

pub mod batch;
pub mod connection;
pub mod engine;
pub mod migrations;
pub mod queries;

pub use batch::BatchWriter;
pub use connection::DatabaseManager;
pub use engine::FactStorageEngine;
