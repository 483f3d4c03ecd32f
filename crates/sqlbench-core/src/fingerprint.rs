use crate::model::BenchConfig;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone)]
pub struct Fingerprint {
    pub hex: String,
}

pub fn sha256_hex(s: &str) -> String {
    let mut h = Sha256::new();
    h.update(s.as_bytes());
    hex::encode(h.finalize())
}

/// Identifies the benchmark configuration that produced a result set, so two
/// artifacts can be checked for comparability before diffing.
///
/// Covers everything that changes which cases run or what the model sees:
/// backends, prompt names, questions, temperature. Paths and timeouts are
/// excluded.
pub fn config_fingerprint(cfg: &BenchConfig) -> Fingerprint {
    let mut parts = Vec::new();

    for b in &cfg.models {
        parts.push(format!("model={}:{}@{}", b.kind(), b.model(), b.endpoint()));
    }
    for p in &cfg.prompts {
        parts.push(format!("prompt={p}"));
    }
    for q in &cfg.questions {
        parts.push(format!("question={q}"));
    }
    parts.push(format!("temperature={}", cfg.settings.temperature));
    parts.push(format!("sqlbench_version={}", env!("CARGO_PKG_VERSION")));

    Fingerprint {
        hex: sha256_hex(&parts.join("\n")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_for_equal_configs() {
        let a = config_fingerprint(&BenchConfig::default());
        let b = config_fingerprint(&BenchConfig::default());
        assert_eq!(a.hex, b.hex);
        assert_eq!(a.hex.len(), 64);
    }

    #[test]
    fn order_matters() {
        let mut cfg = BenchConfig::default();
        let before = config_fingerprint(&cfg).hex;
        cfg.questions.reverse();
        assert_ne!(before, config_fingerprint(&cfg).hex);
    }

    #[test]
    fn output_path_does_not_matter() {
        let mut cfg = BenchConfig::default();
        let before = config_fingerprint(&cfg).hex;
        cfg.settings.output = "elsewhere.csv".into();
        cfg.settings.timeout_seconds = 5;
        assert_eq!(before, config_fingerprint(&cfg).hex);
    }
}
