//! Sanitizer-distance boundary analysis (spec.md 4.5.5): an annotation,
//! not a finding — how many provenance hops separate the first
//! sanitizer a candidate's path crossed from its sink. A small distance
//! means the sanitizer sits right next to the vulnerable use; a large
//! one means there's room for a later hop to bypass it.

use super::super::taint::types::TaintCandidate;

/// `None` when no sanitizer was encountered on this candidate's path at
/// all — there's nothing to measure a distance to.
pub fn distance_to_sink(candidate: &TaintCandidate) -> Option<usize> {
    if candidate.sanitizers_encountered.is_empty() {
        return None;
    }
    Some(candidate.provenance.len())
}
