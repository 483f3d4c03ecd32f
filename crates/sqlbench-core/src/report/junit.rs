use crate::model::BenchmarkResult;
use std::path::Path;

/// One `<testcase>` per benchmark case, grouped into a suite per model.
pub fn write_junit(suite: &str, results: &[BenchmarkResult], out: &Path) -> anyhow::Result<()> {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<testsuites name="{}">"#, escape(suite)));
    xml.push('\n');

    let mut start = 0;
    while start < results.len() {
        let model = &results[start].model;
        let end = results[start..]
            .iter()
            .position(|r| &r.model != model)
            .map_or(results.len(), |n| start + n);
        let group = &results[start..end];
        let failures = group.iter().filter(|r| !r.success).count();

        xml.push_str(&format!(
            r#"  <testsuite name="{}" tests="{}" failures="{}">"#,
            escape(model),
            group.len(),
            failures
        ));
        xml.push('\n');
        for r in group {
            xml.push_str(&format!(
                r#"    <testcase classname="{}" name="{}" time="{:.3}">"#,
                escape(&r.prompt_type),
                escape(&r.question),
                r.latency_seconds
            ));
            if let Some(err) = &r.error {
                xml.push_str(&format!(r#"<failure message="{}"/>"#, escape(err)));
            }
            xml.push_str("</testcase>\n");
        }
        xml.push_str("  </testsuite>\n");
        start = end;
    }

    xml.push_str("</testsuites>\n");
    std::fs::write(out, xml)?;
    Ok(())
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
