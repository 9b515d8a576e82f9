//! Reachability cache: memoizes `bfs_forward`/`bfs_inverse` result sets
//! keyed by `(node, direction)`, invalidated wholesale by bumping a
//! generation counter rather than tracking individual edge mutations —
//! the resolver's fact base is read as a snapshot per run (spec.md 4.4),
//! so a single invalidation between pipeline runs is all correctness
//! requires. Grounded on the teacher's `graph/reachability/cache.rs`
//! generation-based LRU shape.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use auditor_core::FxHashMap;
use petgraph::graph::NodeIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalDirection {
    Forward,
    Inverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    node: NodeIndex,
    direction: TraversalDirection,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    reachable: Vec<NodeIndex>,
    generation: u64,
}

pub struct ReachabilityCache {
    entries: Mutex<FxHashMap<CacheKey, CacheEntry>>,
    generation: AtomicU64,
    max_entries: usize,
}

impl ReachabilityCache {
    pub fn new(max_entries: usize) -> Self {
        Self { entries: Mutex::new(FxHashMap::default()), generation: AtomicU64::new(0), max_entries }
    }

    pub fn get(&self, node: NodeIndex, direction: TraversalDirection) -> Option<Vec<NodeIndex>> {
        let key = CacheKey { node, direction };
        let current_gen = self.generation.load(Ordering::Acquire);
        let entries = self.entries.lock().unwrap();
        entries
            .get(&key)
            .filter(|entry| entry.generation == current_gen)
            .map(|entry| entry.reachable.clone())
    }

    pub fn put(&self, node: NodeIndex, direction: TraversalDirection, reachable: Vec<NodeIndex>) {
        let key = CacheKey { node, direction };
        let current_gen = self.generation.load(Ordering::Acquire);
        let mut entries = self.entries.lock().unwrap();
        if entries.len() >= self.max_entries {
            let to_remove: Vec<CacheKey> = entries.keys().take(self.max_entries / 2).copied().collect();
            for k in to_remove {
                entries.remove(&k);
            }
        }
        entries.insert(key, CacheEntry { reachable, generation: current_gen });
    }

    /// Drops every cached entry — called once per pipeline run before the
    /// forward pass starts, since the call graph is rebuilt from scratch
    /// each run (spec.md 4.6).
    pub fn invalidate_all(&self) {
        self.generation.fetch_add(1, Ordering::Release);
    }
}

impl Default for ReachabilityCache {
    fn default() -> Self {
        Self::new(10_000)
    }
}
