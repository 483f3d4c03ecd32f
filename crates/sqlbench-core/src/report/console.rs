use super::RunArtifacts;
use crate::errors::FailureKind;

pub fn print_summary(artifacts: &RunArtifacts) {
    eprintln!("{}", render_summary(artifacts));
}

/// Success counts per model × prompt type, in first-seen order, then totals.
pub fn render_summary(artifacts: &RunArtifacts) -> String {
    let mut groups: Vec<(&str, &str, usize, usize, f64)> = Vec::new();
    for r in &artifacts.results {
        let idx = match groups
            .iter()
            .position(|(m, p, ..)| *m == r.model && *p == r.prompt_type)
        {
            Some(i) => i,
            None => {
                groups.push((r.model.as_str(), r.prompt_type.as_str(), 0, 0, 0.0));
                groups.len() - 1
            }
        };
        let g = &mut groups[idx];
        g.3 += 1;
        if r.success {
            g.2 += 1;
        }
        g.4 += r.latency_seconds;
    }

    let model_w = groups.iter().map(|g| g.0.len()).max().unwrap_or(5).max(5);
    let prompt_w = groups.iter().map(|g| g.1.len()).max().unwrap_or(6).max(6);

    let mut out = String::new();
    out.push_str(&format!(
        "\n{:<model_w$}  {:<prompt_w$}  {:>7}  {:>8}\n",
        "model", "prompt", "success", "avg (s)"
    ));
    for (model, prompt, ok, total, latency) in &groups {
        let icon = if ok == total { "✅" } else if *ok == 0 { "❌" } else { "⚠️ " };
        out.push_str(&format!(
            "{:<model_w$}  {:<prompt_w$}  {:>7}  {:>8.2}  {}\n",
            model,
            prompt,
            format!("{}/{}", ok, total),
            latency / *total as f64,
            icon
        ));
    }

    out.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    out.push_str(&format!(
        "Summary: {} cases, {} succeeded, {} failed ({} config, {} gateway, {} query)",
        artifacts.results.len(),
        artifacts.succeeded(),
        artifacts.failed(),
        artifacts.failed_by(FailureKind::Config),
        artifacts.failed_by(FailureKind::Gateway),
        artifacts.failed_by(FailureKind::Query),
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{CaseError, QueryError};
    use crate::model::{Backend, BenchmarkCase, BenchmarkResult};

    #[test]
    fn groups_by_model_and_prompt() {
        let case = |m: &str, p: &str| BenchmarkCase {
            backend: Backend::ollama(m),
            prompt_type: p.into(),
            question: "q".into(),
        };
        let err = CaseError::Query(QueryError::Empty);
        let artifacts = RunArtifacts {
            started_at: chrono::Utc::now(),
            config_fingerprint: String::new(),
            results: vec![
                BenchmarkResult::succeeded(&case("phi3", "minimal"), "SELECT 1".into(), 1, 1.0),
                BenchmarkResult::failed(&case("phi3", "minimal"), String::new(), &err, 3.0),
                BenchmarkResult::succeeded(&case("phi3", "few_shot"), "SELECT 1".into(), 1, 1.0),
            ],
        };

        let text = render_summary(&artifacts);
        assert!(text.contains("phi3   minimal       1/2      2.00  ⚠️"));
        assert!(text.contains("phi3   few_shot      1/1      1.00  ✅"));
        assert!(text.contains("Summary: 3 cases, 2 succeeded, 1 failed (0 config, 0 gateway, 1 query)"));
    }
}
