//! `DatabaseManager` — the fact base's only owner of raw `rusqlite::Connection`s.
//!
//! One writer connection plus a small round-robin reader pool, all in WAL
//! mode (spec.md 4.3 "single-writer/many-readers"). Everything outside this
//! module reaches SQLite through `FactStorageEngine`'s trait methods.
//!
//! Pattern reference: `cortex-drift-bridge/src/storage/{pragmas,pool}.rs`.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use auditor_core::errors::StorageError;
use rusqlite::{Connection, OpenFlags};

use crate::migrations;

const DEFAULT_READ_POOL_SIZE: usize = 4;

pub(crate) fn configure_writer(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA busy_timeout = 5000;
        PRAGMA cache_size = -8000;
        PRAGMA mmap_size = 268435456;
        PRAGMA temp_store = MEMORY;
        ",
    )?;
    Ok(())
}

fn configure_reader(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        PRAGMA cache_size = -8000;
        PRAGMA mmap_size = 268435456;
        PRAGMA temp_store = MEMORY;
        PRAGMA query_only = ON;
        ",
    )?;
    Ok(())
}

/// Owns the write connection and a pool of read-only connections against
/// the same file. Runs schema DDL and the digest check (spec.md 4.3) on
/// open.
pub struct DatabaseManager {
    path: Option<PathBuf>,
    writer: Mutex<Connection>,
    readers: Vec<Mutex<Connection>>,
    read_index: AtomicUsize,
}

impl DatabaseManager {
    /// Open a file-backed fact base at `path`, creating the schema if the
    /// file is new and checking the schema digest otherwise (spec.md 4.3).
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let writer = Connection::open(path)?;
        configure_writer(&writer)?;
        migrations::ensure_schema(&writer)?;

        let mut readers = Vec::with_capacity(DEFAULT_READ_POOL_SIZE);
        for _ in 0..DEFAULT_READ_POOL_SIZE {
            let reader = Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?;
            configure_reader(&reader)?;
            readers.push(Mutex::new(reader));
        }

        tracing::info!(path = %path.display(), readers = readers.len(), "opened fact base");
        Ok(Self {
            path: Some(path.to_path_buf()),
            writer: Mutex::new(writer),
            readers,
            read_index: AtomicUsize::new(0),
        })
    }

    /// Open an in-memory fact base (tests). A single connection serves both
    /// reads and writes — SQLite in-memory databases are not visible across
    /// separate connections without shared-cache mode, and shared cache
    /// introduces table-level locking we don't want to pay for in tests.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let writer = Connection::open_in_memory()?;
        configure_writer(&writer)?;
        migrations::ensure_schema(&writer)?;
        Ok(Self {
            path: None,
            writer: Mutex::new(writer),
            readers: Vec::new(),
            read_index: AtomicUsize::new(0),
        })
    }

    /// Open a second write-capable connection against the same file, for
    /// the batch writer thread (which needs to own its connection).
    pub fn open_batch_connection(&self) -> Result<Connection, StorageError> {
        match &self.path {
            Some(path) => {
                let conn = Connection::open(path)?;
                configure_writer(&conn)?;
                Ok(conn)
            }
            None => Err(StorageError::NotSupported {
                operation: "open_batch_connection".to_string(),
                reason: "in-memory engines share a single connection".to_string(),
            }),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let conn = self.writer.lock().map_err(|_| StorageError::DbBusy)?;
        f(&conn)
    }

    /// Round-robin over the reader pool; falls back to the writer
    /// connection when there is no pool (in-memory mode).
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        if self.readers.is_empty() {
            return self.with_writer(f);
        }
        let index = self.read_index.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        let conn = self.readers[index].lock().map_err(|_| StorageError::DbBusy)?;
        f(&conn)
    }

    /// Force a WAL checkpoint, folding the write-ahead log back into the
    /// main database file.
    pub fn checkpoint(&self) -> Result<(), StorageError> {
        self.with_writer(|conn| {
            conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
            Ok(())
        })
    }
}
