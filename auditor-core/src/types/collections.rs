//! Fast hash-map/set aliases used throughout the hot extraction and taint
//! paths, backed by `rustc-hash`'s FxHash (non-cryptographic, fast).

use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;

pub type FxHashMap<K, V> = std::collections::HashMap<K, V, BuildHasherDefault<FxHasher>>;
pub type FxHashSet<T> = std::collections::HashSet<T, BuildHasherDefault<FxHasher>>;
