//! Forward/inverse BFS over the resolved call graph — the interprocedural
//! reachability primitive the taint engine uses to walk from a tainted
//! parameter into callees (forward) or from a sink back to its callers
//! (inverse) (spec.md 4.5.3). Grounded on the teacher's
//! `call_graph/traversal.rs` BFS shape; its entry-point-detection
//! heuristics are dropped — this workspace has no "entry point" concept,
//! taint sources/sinks are determined by the taint engine directly from
//! `frameworks`/`CallRow` data (spec.md 4.5).

use std::collections::VecDeque;

use auditor_core::FxHashSet;
use petgraph::graph::NodeIndex;
use petgraph::Direction;

use super::types::CallGraph;

/// All scopes reachable from `start` by following call edges forward.
pub fn bfs_forward(graph: &CallGraph, start: NodeIndex, max_depth: Option<usize>) -> Vec<NodeIndex> {
    bfs_directed(graph, start, Direction::Outgoing, max_depth)
}

/// All scopes that can reach `start` by following call edges backward.
pub fn bfs_inverse(graph: &CallGraph, start: NodeIndex, max_depth: Option<usize>) -> Vec<NodeIndex> {
    bfs_directed(graph, start, Direction::Incoming, max_depth)
}

fn bfs_directed(
    graph: &CallGraph,
    start: NodeIndex,
    direction: Direction,
    max_depth: Option<usize>,
) -> Vec<NodeIndex> {
    let mut visited = FxHashSet::default();
    let mut queue = VecDeque::new();
    let mut result = Vec::new();

    visited.insert(start);
    queue.push_back((start, 0usize));

    while let Some((node, depth)) = queue.pop_front() {
        if node != start {
            result.push(node);
        }

        if let Some(max) = max_depth {
            if depth >= max {
                continue;
            }
        }

        for neighbor in graph.inner().neighbors_directed(node, direction) {
            if visited.insert(neighbor) {
                queue.push_back((neighbor, depth + 1));
            }
        }
    }

    result
}
