//! Storage-layer errors (spec.md 4.3, 7 Kind A).

use super::error_code::{self, DriftErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("sqlite error: {message}")]
    Sqlite { message: String },

    #[error("migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("database busy (another writer holds the lock)")]
    DbBusy,

    #[error("database corrupt: {details}")]
    DbCorrupt { details: String },

    #[error("disk full")]
    DiskFull,

    /// Hash-based invalidation check failure (spec.md 4.3): the schema
    /// definition's digest does not match the digest recorded in the
    /// fact base's `_schema_meta` table.
    #[error("schema digest mismatch: expected {expected}, found {found}; regenerate the fact base")]
    SchemaDigestMismatch { expected: String, found: String },

    /// An extractor or query referenced a table name not present in the
    /// declarative schema. This is a programmer error, fail loud
    /// (spec.md 4.3).
    #[error("unknown table: {table}")]
    UnknownTable { table: String },

    #[error("operation not supported: {operation} — {reason}")]
    NotSupported { operation: String, reason: String },
}

impl DriftErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DbBusy => error_code::DB_BUSY,
            Self::DbCorrupt { .. } => error_code::DB_CORRUPT,
            Self::DiskFull => error_code::DISK_FULL,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::SchemaDigestMismatch { .. } => error_code::SCHEMA_DIGEST_MISMATCH,
            Self::UnknownTable { .. } => error_code::UNKNOWN_TABLE,
            _ => error_code::STORAGE_ERROR,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        match &e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::DatabaseBusy =>
            {
                StorageError::DbBusy
            }
            _ => StorageError::Sqlite { message: e.to_string() },
        }
    }
}
