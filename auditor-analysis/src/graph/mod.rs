//! The IFDS-based interprocedural taint engine (spec.md 4.5) and its
//! forward-verification reachability pass (spec.md 4.5.4).

pub mod reachability;
pub mod taint;
