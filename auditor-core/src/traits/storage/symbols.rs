//! `IFactSymbols` — Symbols and Imports (spec.md 3). Imports carry a
//! `resolved_path` column mutated exactly once by the resolver
//! (spec.md 4.4); every other column here is write-once-per-extraction.

use std::sync::Arc;

use crate::errors::StorageError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRow {
    pub file: String,
    pub name: String,
    pub kind: String,
    pub line: i64,
    pub column: i64,
    pub scope: String,
    pub signature: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    pub file: String,
    pub target: String,
    pub resolved_path: Option<String>,
    pub imported_names: String,
    pub line: i64,
}

pub trait IFactSymbols: Send + Sync {
    fn insert_symbols(&self, rows: &[SymbolRow]) -> Result<usize, StorageError>;
    fn symbols_for_file(&self, file: &str) -> Result<Vec<SymbolRow>, StorageError>;
    /// All symbols with the given name, used by the resolver's callee
    /// binding (spec.md 4.4): zero or multiple matches mean "leave null".
    fn symbols_by_name(&self, name: &str) -> Result<Vec<SymbolRow>, StorageError>;
    fn count_symbols(&self) -> Result<i64, StorageError>;

    fn insert_imports(&self, rows: &[ImportRow]) -> Result<usize, StorageError>;
    fn imports_for_file(&self, file: &str) -> Result<Vec<ImportRow>, StorageError>;
    fn unresolved_imports(&self) -> Result<Vec<ImportRow>, StorageError>;
    fn set_import_resolved(
        &self,
        file: &str,
        line: i64,
        target: &str,
        resolved_path: &str,
    ) -> Result<(), StorageError>;
}

impl<T: IFactSymbols + ?Sized> IFactSymbols for Arc<T> {
    fn insert_symbols(&self, rows: &[SymbolRow]) -> Result<usize, StorageError> {
        (**self).insert_symbols(rows)
    }
    fn symbols_for_file(&self, file: &str) -> Result<Vec<SymbolRow>, StorageError> {
        (**self).symbols_for_file(file)
    }
    fn symbols_by_name(&self, name: &str) -> Result<Vec<SymbolRow>, StorageError> {
        (**self).symbols_by_name(name)
    }
    fn count_symbols(&self) -> Result<i64, StorageError> {
        (**self).count_symbols()
    }
    fn insert_imports(&self, rows: &[ImportRow]) -> Result<usize, StorageError> {
        (**self).insert_imports(rows)
    }
    fn imports_for_file(&self, file: &str) -> Result<Vec<ImportRow>, StorageError> {
        (**self).imports_for_file(file)
    }
    fn unresolved_imports(&self) -> Result<Vec<ImportRow>, StorageError> {
        (**self).unresolved_imports()
    }
    fn set_import_resolved(
        &self,
        file: &str,
        line: i64,
        target: &str,
        resolved_path: &str,
    ) -> Result<(), StorageError> {
        (**self).set_import_resolved(file, line, target, resolved_path)
    }
}
