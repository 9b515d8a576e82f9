//! The declarative schema (spec.md 3, 4.3): one source of truth for every
//! table, column, and index in the fact base. `auditor-storage` generates
//! its SQL DDL and typed accessors from this definition; `schema_digest()`
//! is the hash recorded in `_schema_meta` and checked by the orchestrator
//! at startup (spec.md 4.6 step 1). Changing a table here without bumping
//! `SCHEMA_VERSION` is precisely the "schema regeneration required"
//! scenario in spec.md 8 test 6.

mod tables;

pub use tables::SCHEMA;

/// Bumped whenever the declarative schema changes shape. Stored alongside
/// the digest in `_schema_meta` so a version mismatch can be reported
/// distinctly from a same-version digest mismatch (corruption).
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
    Boolean,
}

impl ColumnType {
    pub fn sql_type(self) -> &'static str {
        match self {
            ColumnType::Text => "TEXT",
            ColumnType::Integer => "INTEGER",
            ColumnType::Boolean => "INTEGER",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
    pub nullable: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
    /// Index column groups; each entry becomes one `CREATE INDEX`.
    pub indices: &'static [&'static [&'static str]],
}

/// Compute a stable digest of the declarative schema. Order-sensitive by
/// design: reordering tables or columns is itself a schema change worth
/// invalidating on, since generated accessor code is positional.
pub fn schema_digest() -> u64 {
    use std::hash::Hasher;
    let mut hasher = xxhash_rust::xxh3::Xxh3::new();
    hasher.write_u32(SCHEMA_VERSION);
    for table in SCHEMA {
        hasher.write(table.name.as_bytes());
        for col in table.columns {
            hasher.write(col.name.as_bytes());
            hasher.write(col.ty.sql_type().as_bytes());
            hasher.write_u8(col.nullable as u8);
        }
        for idx in table.indices {
            for c in *idx {
                hasher.write(c.as_bytes());
            }
        }
    }
    hasher.finish()
}

/// Look up a table definition by name, used to validate extractor-produced
/// rows and to reject unknown table names (spec.md 4.3 "fail loud").
pub fn table_def(name: &str) -> Option<&'static TableDef> {
    SCHEMA.iter().find(|t| t.name == name)
}
