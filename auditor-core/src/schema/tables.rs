use super::{ColumnDef, ColumnType::{Boolean, Integer, Text}, TableDef};

const fn col(name: &'static str, ty: super::ColumnType, nullable: bool) -> ColumnDef {
    ColumnDef { name, ty, nullable }
}

pub const SCHEMA: &[TableDef] = &[
    TableDef {
        name: "files",
        columns: &[
            col("path", Text, false),
            col("language", Text, false),
            col("sha256", Text, false),
            col("size_bytes", Integer, false),
            col("line_count", Integer, false),
        ],
        indices: &[],
    },
    TableDef {
        name: "symbols",
        columns: &[
            col("file", Text, false),
            col("name", Text, false),
            col("type", Text, false),
            col("line", Integer, false),
            col("column", Integer, false),
            col("scope", Text, false),
            col("signature", Text, true),
        ],
        indices: &[&["file", "line"], &["scope"]],
    },
    TableDef {
        name: "imports",
        columns: &[
            col("file", Text, false),
            col("target", Text, false),
            col("resolved_path", Text, true),
            col("imported_names", Text, false),
            col("line", Integer, false),
        ],
        indices: &[&["file", "line"]],
    },
    TableDef {
        name: "function_call_args",
        columns: &[
            col("file", Text, false),
            col("caller_scope", Text, false),
            col("callee_name", Text, false),
            col("callee_resolved", Text, true),
            col("line", Integer, false),
            col("argument_index", Integer, false),
            col("argument_expression", Text, false),
            col("argument_kind", Text, false),
        ],
        indices: &[&["file", "line"], &["callee_name"]],
    },
    TableDef {
        name: "assignments",
        columns: &[
            col("file", Text, false),
            col("scope", Text, false),
            col("target_name", Text, false),
            col("rhs_expression", Text, false),
            col("rhs_kind", Text, false),
            col("rhs_refs", Text, false),
            col("line", Integer, false),
        ],
        indices: &[&["file", "line"], &["scope"]],
    },
    TableDef {
        name: "refs",
        columns: &[
            col("file", Text, false),
            col("scope", Text, false),
            col("referenced_name", Text, false),
            col("kind", Text, false),
            col("line", Integer, false),
        ],
        indices: &[&["file", "line"], &["referenced_name"]],
    },
    TableDef {
        name: "routes",
        columns: &[
            col("file", Text, false),
            col("method", Text, false),
            col("path_pattern", Text, false),
            col("handler_symbol", Text, false),
            col("auth_decorators", Text, false),
            col("parameter_sources", Text, false),
            col("line", Integer, false),
        ],
        indices: &[&["file", "line"]],
    },
    TableDef {
        name: "validation_framework_usage",
        columns: &[
            col("file", Text, false),
            col("scope", Text, false),
            col("framework", Text, false),
            col("schema_symbol", Text, false),
            col("validated_fields", Text, false),
            col("line", Integer, false),
            col("is_sanitizer_boundary", Boolean, false),
        ],
        indices: &[&["file", "line"]],
    },
    TableDef {
        name: "sql_queries",
        columns: &[
            col("file", Text, false),
            col("scope", Text, false),
            col("line", Integer, false),
            col("query_text", Text, false),
            col("query_kind", Text, false),
            col("command", Text, false),
            col("tables", Text, false),
            col("is_static", Boolean, false),
            col("interpolated_expressions", Text, false),
        ],
        indices: &[&["file", "line"]],
    },
    TableDef {
        name: "cfg_blocks",
        columns: &[
            col("block_id", Text, false),
            col("file", Text, false),
            col("scope", Text, false),
            col("start_line", Integer, false),
            col("end_line", Integer, false),
            col("kind", Text, false),
        ],
        indices: &[&["file", "scope"]],
    },
    TableDef {
        name: "cfg_edges",
        columns: &[
            col("from_block", Text, false),
            col("to_block", Text, false),
            col("label", Text, false),
        ],
        indices: &[&["from_block"]],
    },
    TableDef {
        name: "cfg_block_statements",
        columns: &[
            col("block_id", Text, false),
            col("statement_line", Integer, false),
            col("statement_kind", Text, false),
            col("statement_text", Text, false),
        ],
        indices: &[&["block_id"]],
    },
    TableDef {
        name: "call_graph_edges",
        columns: &[
            col("caller_scope", Text, false),
            col("callee_scope", Text, false),
            col("call_site_file", Text, false),
            col("call_site_line", Integer, false),
        ],
        indices: &[&["caller_scope"], &["callee_scope"]],
    },
    TableDef {
        name: "import_graph_edges",
        columns: &[
            col("importer_file", Text, false),
            col("imported_file", Text, false),
            col("line", Integer, false),
        ],
        indices: &[&["importer_file"], &["imported_file"]],
    },
    TableDef {
        name: "findings_consolidated",
        columns: &[
            col("id", Text, false),
            col("category", Text, false),
            col("severity", Text, false),
            col("source_file", Text, false),
            col("source_line", Integer, false),
            col("source_kind", Text, false),
            col("access_path_start", Text, false),
            col("sink_file", Text, false),
            col("sink_line", Integer, false),
            col("sink_kind", Text, false),
            col("vulnerable_argument_index", Integer, false),
            col("provenance_json", Text, false),
            col("sanitizers_json", Text, false),
            col("confidence", Text, false),
            col("rule_id", Text, true),
            col("truncated", Boolean, false),
            col("forward_verified", Boolean, false),
            col("created_at", Integer, false),
        ],
        indices: &[&["sink_file", "sink_line"]],
    },
    TableDef {
        name: "diagnostics",
        columns: &[
            col("file", Text, true),
            col("stage", Text, false),
            col("severity", Text, false),
            col("code", Text, false),
            col("message", Text, false),
            col("created_at", Integer, false),
        ],
        indices: &[&["file"]],
    },
    TableDef {
        name: "scan_history",
        columns: &[
            col("id", Integer, false),
            col("started_at", Integer, false),
            col("completed_at", Integer, true),
            col("root_path", Text, false),
            col("total_files", Integer, false),
            col("added_files", Integer, false),
            col("modified_files", Integer, false),
            col("removed_files", Integer, false),
            col("unchanged_files", Integer, false),
            col("duration_ms", Integer, true),
            col("status", Text, false),
            col("error", Text, true),
        ],
        indices: &[],
    },
    TableDef {
        name: "_schema_meta",
        columns: &[col("key", Text, false), col("value", Text, false)],
        indices: &[],
    },
];
