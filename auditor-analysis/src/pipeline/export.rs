//! Writes the three output artifacts spec.md 6 names beside the fact
//! base: `findings.json`, `diagnostics.log`, `manifest.json`.

use std::path::Path;

use auditor_core::traits::storage::{DiagnosticRow, FindingRow};
use serde::Serialize;

use super::report::PipelineReport;

#[derive(Serialize)]
struct FindingsExport<'a> {
    metadata: FindingsMetadata,
    files_indexed: i64,
    findings: Vec<FindingExport<'a>>,
    diagnostics: Vec<DiagnosticExport<'a>>,
}

#[derive(Serialize)]
struct FindingsMetadata {
    pipeline_version: String,
    schema_digest: String,
    started_at: i64,
    completed_at: i64,
}

#[derive(Serialize)]
struct SourceExport<'a> {
    file: &'a str,
    line: i64,
    kind: &'a str,
    access_path: &'a str,
}

#[derive(Serialize)]
struct SinkExport<'a> {
    file: &'a str,
    line: i64,
    kind: &'a str,
}

#[derive(Serialize)]
struct FindingExport<'a> {
    id: &'a str,
    category: &'a str,
    severity: &'a str,
    source: SourceExport<'a>,
    sink: SinkExport<'a>,
    provenance: serde_json::Value,
    sanitizers_encountered: serde_json::Value,
    confidence: &'a str,
    rule_id: Option<&'a str>,
}

#[derive(Serialize)]
struct DiagnosticExport<'a> {
    file: Option<&'a str>,
    stage: &'a str,
    message: &'a str,
}

fn finding_export(row: &FindingRow) -> FindingExport<'_> {
    FindingExport {
        id: &row.id,
        category: &row.category,
        severity: &row.severity,
        source: SourceExport {
            file: &row.source_file,
            line: row.source_line,
            kind: &row.source_kind,
            access_path: &row.access_path_start,
        },
        sink: SinkExport { file: &row.sink_file, line: row.sink_line, kind: &row.sink_kind },
        provenance: serde_json::from_str(&row.provenance_json).unwrap_or(serde_json::Value::Array(Vec::new())),
        sanitizers_encountered: serde_json::from_str(&row.sanitizers_json)
            .unwrap_or(serde_json::Value::Array(Vec::new())),
        confidence: &row.confidence,
        rule_id: row.rule_id.as_deref(),
    }
}

/// `findings.json` (spec.md 6's exact schema).
pub fn write_findings_json(
    output_directory: &Path,
    report: &PipelineReport,
    findings: &[FindingRow],
    diagnostics: &[DiagnosticRow],
) -> std::io::Result<()> {
    let export = FindingsExport {
        metadata: FindingsMetadata {
            pipeline_version: report.pipeline_version.clone(),
            schema_digest: format!("{:016x}", report.schema_digest),
            started_at: report.started_at,
            completed_at: report.completed_at,
        },
        files_indexed: report.files_indexed,
        findings: findings.iter().map(finding_export).collect(),
        diagnostics: diagnostics
            .iter()
            .map(|d| DiagnosticExport { file: d.file.as_deref(), stage: &d.stage, message: &d.message })
            .collect(),
    };
    let text = serde_json::to_string_pretty(&export).unwrap_or_else(|_| "{}".to_string());
    std::fs::write(output_directory.join("findings.json"), text)
}

/// `diagnostics.log` — one human-readable line per row, newest last.
pub fn write_diagnostics_log(output_directory: &Path, diagnostics: &[DiagnosticRow]) -> std::io::Result<()> {
    let mut text = String::new();
    for d in diagnostics {
        let file = d.file.as_deref().unwrap_or("<none>");
        text.push_str(&format!("[{}] {} {}: {}\n", d.severity, d.stage, file, d.message));
    }
    std::fs::write(output_directory.join("diagnostics.log"), text)
}

/// `manifest.json` — the run summary, i.e. `PipelineReport` itself.
pub fn write_manifest_json(output_directory: &Path, report: &PipelineReport) -> std::io::Result<()> {
    let text = serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
    std::fs::write(output_directory.join("manifest.json"), text)
}
