use super::RunArtifacts;
use crate::errors::FailureKind;
use std::path::Path;

/// Writes the full run, including failure kinds and unrounded latencies.
pub fn write_json(artifacts: &RunArtifacts, out: &Path) -> anyhow::Result<()> {
    let doc = serde_json::json!({
        "started_at": artifacts.started_at.to_rfc3339(),
        "config_fingerprint": artifacts.config_fingerprint,
        "summary": {
            "total": artifacts.results.len(),
            "succeeded": artifacts.succeeded(),
            "failed": artifacts.failed(),
            "failed_config": artifacts.failed_by(FailureKind::Config),
            "failed_gateway": artifacts.failed_by(FailureKind::Gateway),
            "failed_query": artifacts.failed_by(FailureKind::Query),
        },
        "results": artifacts.results,
    });
    std::fs::write(out, serde_json::to_string_pretty(&doc)?)?;
    Ok(())
}
