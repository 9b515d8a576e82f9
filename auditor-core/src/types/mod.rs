pub mod collections;
pub mod ids;
pub mod interning;

pub use collections::{FxHashMap, FxHashSet};
pub use ids::{FileId, ScopeId};
pub use interning::{PathInterner, ScopeInterner};
