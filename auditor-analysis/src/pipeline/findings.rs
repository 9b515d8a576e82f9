//! Converts a `TaintCandidate` the engine verified into the `FindingRow`
//! the fact base persists (spec.md 4.5.7).

use auditor_core::traits::storage::FindingRow;

use crate::graph::taint::types::{Confidence, TaintCandidate};

fn category_for_sink_kind(sink_kind: &str) -> &'static str {
    if sink_kind.starts_with("sql:") {
        "sql_injection"
    } else {
        "injection"
    }
}

/// Confidence reflects the access-path precision the backward walk
/// carried; forward verification failing drops severity one notch since
/// the candidate's reachability or sanitizer status could not be
/// reconfirmed independently.
fn severity_for(confidence: Confidence, forward_verified: bool) -> &'static str {
    match (confidence, forward_verified) {
        (Confidence::High, true) => "high",
        (Confidence::High, false) => "medium",
        (Confidence::Medium, true) => "medium",
        (Confidence::Medium, false) => "low",
        (Confidence::Low, _) => "low",
    }
}

fn finding_id(candidate: &TaintCandidate) -> String {
    let key = format!(
        "{}:{}:{}:{}:{}",
        candidate.source.file,
        candidate.source.access_path_start,
        candidate.sink.file,
        candidate.sink.line,
        candidate.sink.vulnerable_argument_index,
    );
    format!("{:016x}", xxhash_rust::xxh3::xxh3_64(key.as_bytes()))
}

pub fn to_finding_row(candidate: &TaintCandidate, created_at: i64) -> FindingRow {
    let provenance: Vec<serde_json::Value> = candidate
        .provenance
        .iter()
        .map(|hop| {
            serde_json::json!({
                "file": hop.file,
                "line": hop.line,
                "description": hop.description,
                "access_path": hop.access_path_at_hop,
            })
        })
        .collect();

    FindingRow {
        id: finding_id(candidate),
        category: category_for_sink_kind(&candidate.sink.sink_kind).to_string(),
        severity: severity_for(candidate.confidence, candidate.forward_verified).to_string(),
        source_file: candidate.source.file.clone(),
        source_line: candidate.source.line,
        source_kind: candidate.source.source_kind.clone(),
        access_path_start: candidate.source.access_path_start.clone(),
        sink_file: candidate.sink.file.clone(),
        sink_line: candidate.sink.line,
        sink_kind: candidate.sink.sink_kind.clone(),
        vulnerable_argument_index: candidate.sink.vulnerable_argument_index,
        provenance_json: serde_json::to_string(&provenance).unwrap_or_else(|_| "[]".to_string()),
        sanitizers_json: serde_json::to_string(&candidate.sanitizers_encountered)
            .unwrap_or_else(|_| "[]".to_string()),
        confidence: candidate.confidence.as_str().to_string(),
        rule_id: None,
        truncated: candidate.truncated,
        forward_verified: candidate.forward_verified,
        created_at,
    }
}
