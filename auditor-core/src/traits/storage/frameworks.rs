//! `IFactFrameworks` — Routes/Endpoints, Validation Framework Usage, SQL
//! Queries (spec.md 3). These are the canonical source/sanitizer/sink
//! facts the taint engine's discovery phase queries (spec.md 4.5.1).

use std::sync::Arc;

use crate::errors::StorageError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRow {
    pub file: String,
    pub method: String,
    pub path_pattern: String,
    pub handler_symbol: String,
    /// JSON array.
    pub auth_decorators: String,
    /// JSON array describing `query`/`body`/`path`/`header` origins.
    pub parameter_sources: String,
    pub line: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationUsageRow {
    pub file: String,
    pub scope: String,
    pub framework: String,
    pub schema_symbol: String,
    /// JSON array.
    pub validated_fields: String,
    pub line: i64,
    pub is_sanitizer_boundary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlQueryRow {
    pub file: String,
    pub scope: String,
    pub line: i64,
    pub query_text: String,
    pub query_kind: String,
    pub command: String,
    /// JSON array.
    pub tables: String,
    pub is_static: bool,
    /// JSON array of expressions spliced into the query.
    pub interpolated_expressions: String,
}

pub trait IFactFrameworks: Send + Sync {
    fn insert_routes(&self, rows: &[RouteRow]) -> Result<usize, StorageError>;
    fn all_routes(&self) -> Result<Vec<RouteRow>, StorageError>;
    fn routes_for_file(&self, file: &str) -> Result<Vec<RouteRow>, StorageError>;

    fn insert_validation_usage(&self, rows: &[ValidationUsageRow]) -> Result<usize, StorageError>;
    fn all_validation_usage(&self) -> Result<Vec<ValidationUsageRow>, StorageError>;
    fn validation_usage_for_scope(
        &self,
        file: &str,
        scope: &str,
    ) -> Result<Vec<ValidationUsageRow>, StorageError>;

    fn insert_sql_queries(&self, rows: &[SqlQueryRow]) -> Result<usize, StorageError>;
    fn sql_queries_for_file(&self, file: &str) -> Result<Vec<SqlQueryRow>, StorageError>;
    fn all_sql_queries(&self) -> Result<Vec<SqlQueryRow>, StorageError>;
}

impl<T: IFactFrameworks + ?Sized> IFactFrameworks for Arc<T> {
    fn insert_routes(&self, rows: &[RouteRow]) -> Result<usize, StorageError> {
        (**self).insert_routes(rows)
    }
    fn all_routes(&self) -> Result<Vec<RouteRow>, StorageError> {
        (**self).all_routes()
    }
    fn routes_for_file(&self, file: &str) -> Result<Vec<RouteRow>, StorageError> {
        (**self).routes_for_file(file)
    }
    fn insert_validation_usage(&self, rows: &[ValidationUsageRow]) -> Result<usize, StorageError> {
        (**self).insert_validation_usage(rows)
    }
    fn all_validation_usage(&self) -> Result<Vec<ValidationUsageRow>, StorageError> {
        (**self).all_validation_usage()
    }
    fn validation_usage_for_scope(
        &self,
        file: &str,
        scope: &str,
    ) -> Result<Vec<ValidationUsageRow>, StorageError> {
        (**self).validation_usage_for_scope(file, scope)
    }
    fn insert_sql_queries(&self, rows: &[SqlQueryRow]) -> Result<usize, StorageError> {
        (**self).insert_sql_queries(rows)
    }
    fn sql_queries_for_file(&self, file: &str) -> Result<Vec<SqlQueryRow>, StorageError> {
        (**self).sql_queries_for_file(file)
    }
    fn all_sql_queries(&self) -> Result<Vec<SqlQueryRow>, StorageError> {
        (**self).all_sql_queries()
    }
}
