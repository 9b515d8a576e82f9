//! `IFactCalls` — function_call_args, Assignments, References (spec.md 3).
//! `callee_resolved` is mutated exactly once by the resolver (spec.md 4.4);
//! everything else here is write-once-per-extraction.

use std::sync::Arc;

use crate::errors::StorageError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRow {
    pub file: String,
    pub caller_scope: String,
    pub callee_name: String,
    pub callee_resolved: Option<String>,
    pub line: i64,
    pub argument_index: i64,
    pub argument_expression: String,
    pub argument_kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentRow {
    pub file: String,
    pub scope: String,
    pub target_name: String,
    pub rhs_expression: String,
    pub rhs_kind: String,
    /// JSON array of variable names read on the RHS.
    pub rhs_refs: String,
    pub line: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefRow {
    pub file: String,
    pub scope: String,
    pub referenced_name: String,
    pub kind: String,
    pub line: i64,
}

pub trait IFactCalls: Send + Sync {
    fn insert_calls(&self, rows: &[CallRow]) -> Result<usize, StorageError>;
    fn calls_for_file(&self, file: &str) -> Result<Vec<CallRow>, StorageError>;
    fn unresolved_calls(&self) -> Result<Vec<CallRow>, StorageError>;
    fn set_callee_resolved(
        &self,
        file: &str,
        line: i64,
        argument_index: i64,
        resolved_scope: &str,
    ) -> Result<(), StorageError>;
    /// All call rows at a given call site (one row per argument position);
    /// used by the IFDS engine when substituting a parameter with the
    /// argument expression at a call-site (spec.md 4.5.3 step 2).
    fn calls_at_site(&self, file: &str, line: i64) -> Result<Vec<CallRow>, StorageError>;
    fn calls_to_callee(&self, callee_scope: &str) -> Result<Vec<CallRow>, StorageError>;

    fn insert_assignments(&self, rows: &[AssignmentRow]) -> Result<usize, StorageError>;
    fn assignments_for_scope(
        &self,
        file: &str,
        scope: &str,
    ) -> Result<Vec<AssignmentRow>, StorageError>;

    fn insert_refs(&self, rows: &[RefRow]) -> Result<usize, StorageError>;
    fn refs_for_scope(&self, file: &str, scope: &str) -> Result<Vec<RefRow>, StorageError>;
}

impl<T: IFactCalls + ?Sized> IFactCalls for Arc<T> {
    fn insert_calls(&self, rows: &[CallRow]) -> Result<usize, StorageError> {
        (**self).insert_calls(rows)
    }
    fn calls_for_file(&self, file: &str) -> Result<Vec<CallRow>, StorageError> {
        (**self).calls_for_file(file)
    }
    fn unresolved_calls(&self) -> Result<Vec<CallRow>, StorageError> {
        (**self).unresolved_calls()
    }
    fn set_callee_resolved(
        &self,
        file: &str,
        line: i64,
        argument_index: i64,
        resolved_scope: &str,
    ) -> Result<(), StorageError> {
        (**self).set_callee_resolved(file, line, argument_index, resolved_scope)
    }
    fn calls_at_site(&self, file: &str, line: i64) -> Result<Vec<CallRow>, StorageError> {
        (**self).calls_at_site(file, line)
    }
    fn calls_to_callee(&self, callee_scope: &str) -> Result<Vec<CallRow>, StorageError> {
        (**self).calls_to_callee(callee_scope)
    }
    fn insert_assignments(&self, rows: &[AssignmentRow]) -> Result<usize, StorageError> {
        (**self).insert_assignments(rows)
    }
    fn assignments_for_scope(
        &self,
        file: &str,
        scope: &str,
    ) -> Result<Vec<AssignmentRow>, StorageError> {
        (**self).assignments_for_scope(file, scope)
    }
    fn insert_refs(&self, rows: &[RefRow]) -> Result<usize, StorageError> {
        (**self).insert_refs(rows)
    }
    fn refs_for_scope(&self, file: &str, scope: &str) -> Result<Vec<RefRow>, StorageError> {
        (**self).refs_for_scope(file, scope)
    }
}
