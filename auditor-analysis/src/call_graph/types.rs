//! In-memory call-graph shape the resolver builds before materializing
//! `CallGraphEdgeRow`/`ImportGraphEdgeRow` into the fact base (spec.md
//! 4.4.3). Grounded on the teacher's `call_graph/types.rs` `FunctionNode`/
//! `CallGraph` shape, stripped of confidence scoring — this workspace's
//! resolver is strict qualified/same-file/import matching with no
//! confidence-scored fallback (spec.md 4.4, DESIGN.md Open Questions).

use auditor_core::FxHashMap;
use petgraph::graph::{DiGraph, NodeIndex};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeKey {
    pub file: String,
    pub scope: String,
}

#[derive(Debug, Clone)]
pub struct ScopeNode {
    pub file: String,
    pub name: String,
    pub scope: String,
    pub line: i64,
}

/// A resolved call edge plus the call site it was resolved from.
#[derive(Debug, Clone)]
pub struct ResolvedEdge {
    pub caller_scope: String,
    pub callee_scope: String,
    pub call_site_file: String,
    pub call_site_line: i64,
}

#[derive(Debug, Default)]
pub struct CallGraphStats {
    pub total_calls: usize,
    pub resolved_calls: usize,
    pub ambiguous_calls: usize,
    pub resolved_imports: usize,
    pub unresolved_imports: usize,
}

/// The call graph built from resolved edges, used by `traversal` for
/// caller/callee BFS queries the taint engine needs (spec.md 4.5.3).
pub struct CallGraph {
    graph: DiGraph<ScopeNode, ()>,
    index_by_scope: FxHashMap<String, NodeIndex>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self { graph: DiGraph::new(), index_by_scope: FxHashMap::default() }
    }

    pub fn node_for(&mut self, file: &str, name: &str, scope: &str, line: i64) -> NodeIndex {
        if let Some(&idx) = self.index_by_scope.get(scope) {
            return idx;
        }
        let idx = self.graph.add_node(ScopeNode {
            file: file.to_string(),
            name: name.to_string(),
            scope: scope.to_string(),
            line,
        });
        self.index_by_scope.insert(scope.to_string(), idx);
        idx
    }

    pub fn add_edge(&mut self, caller_scope: &str, callee_scope: &str) {
        if let (Some(&from), Some(&to)) =
            (self.index_by_scope.get(caller_scope), self.index_by_scope.get(callee_scope))
        {
            self.graph.update_edge(from, to, ());
        }
    }

    pub fn inner(&self) -> &DiGraph<ScopeNode, ()> {
        &self.graph
    }

    pub fn index_of(&self, scope: &str) -> Option<NodeIndex> {
        self.index_by_scope.get(scope).copied()
    }
}

impl Default for CallGraph {
    fn default() -> Self {
        Self::new()
    }
}
