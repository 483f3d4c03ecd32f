use crate::errors::ConfigError;
use crate::model::BenchConfig;
use std::path::Path;

pub mod path_resolver;

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;

/// Loads a benchmark config from YAML.
///
/// Unknown keys are reported as a warning, or rejected when `strict` is set.
/// Relative `settings.database` / `settings.output` paths are resolved against
/// the config file's directory.
pub fn load_config(path: &Path, strict: bool) -> Result<BenchConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::Invalid(format!("failed to read config {}: {}", path.display(), e))
    })?;

    let mut cfg = parse_config(&raw, strict)
        .map_err(|e| ConfigError::Invalid(format!("{} (file: {})", e, path.display())))?;

    let r = path_resolver::PathResolver::new(path);
    r.resolve(&mut cfg.settings.database);
    r.resolve(&mut cfg.settings.output);

    Ok(cfg)
}

pub fn parse_config(raw: &str, strict: bool) -> Result<BenchConfig, ConfigError> {
    let mut ignored_keys = std::collections::BTreeSet::new();
    let deserializer = serde_yaml::Deserializer::from_str(raw);

    let cfg: BenchConfig = serde_ignored::deserialize(deserializer, |path| {
        ignored_keys.insert(path.to_string());
    })
    .map_err(|e| ConfigError::Invalid(format!("failed to parse YAML: {}", e)))?;

    let meaningful_unknowns: Vec<_> = ignored_keys
        .iter()
        .filter(|k| !k.starts_with('_') && !k.starts_with("x-"))
        .collect();

    if !meaningful_unknowns.is_empty() {
        if strict {
            return Err(ConfigError::Invalid(format!(
                "unknown fields detected in strict mode: {:?}",
                meaningful_unknowns
            )));
        }
        tracing::warn!(
            event = "config_unknown_fields",
            fields = ?meaningful_unknowns,
            "ignored unknown config fields"
        );
    }

    validate(&cfg)?;
    Ok(cfg)
}

fn validate(cfg: &BenchConfig) -> Result<(), ConfigError> {
    if cfg.version != SUPPORTED_CONFIG_VERSION {
        return Err(ConfigError::Invalid(format!(
            "unsupported config version {} (supported: {})",
            cfg.version, SUPPORTED_CONFIG_VERSION
        )));
    }
    if cfg.models.is_empty() {
        return Err(ConfigError::Invalid("config has no models".into()));
    }
    if cfg.prompts.is_empty() {
        return Err(ConfigError::Invalid("config has no prompts".into()));
    }
    if cfg.questions.is_empty() {
        return Err(ConfigError::Invalid("config has no questions".into()));
    }
    if !(0.0..=2.0).contains(&cfg.settings.temperature) {
        return Err(ConfigError::Invalid(format!(
            "settings.temperature must be within 0.0..=2.0 (got {})",
            cfg.settings.temperature
        )));
    }
    if cfg.settings.timeout_seconds == 0 {
        return Err(ConfigError::Invalid(
            "settings.timeout_seconds must be positive".into(),
        ));
    }
    Ok(())
}

pub const SAMPLE_CONFIG: &str = r#"version: 1
settings:
  temperature: 0.2
  timeout_seconds: 60
  database: imf_data.db
  output: benchmark_results.csv
models:
  - kind: ollama
    model: "llama3.1:latest"
  - kind: ollama
    model: "qwen2:7b"
  - kind: ollama
    model: "mistral-nemo:latest"
  - kind: ollama
    model: "phi3:latest"
  - kind: ollama
    model: "deepseek-r1:latest"
  # Hosted backends read their key from the environment:
  # - kind: openai
  #   model: gpt-4o-mini
  #   api_key_env: OPENAI_API_KEY
prompts: [minimal, schema_aware, guardrails, few_shot]
questions:
  - "What was India's CPI in 2020?"
  - "Which country had the highest GDP in 2019?"
  - "Compare China and Japan's money supply (M2) in 2010."
  - "List the top 5 countries by GDP in 2022."
  - "How did Brazil's inflation change between 2010 and 2020?"
"#;

pub fn write_sample_config(path: &Path) -> Result<(), ConfigError> {
    std::fs::write(path, SAMPLE_CONFIG)
        .map_err(|e| ConfigError::Invalid(format!("failed to write sample config: {}", e)))?;
    Ok(())
}
