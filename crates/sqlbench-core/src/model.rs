use crate::errors::{CaseError, FailureKind};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434/v1";
pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    #[serde(default = "default_version", rename = "configVersion", alias = "version")]
    pub version: u32,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default = "default_models")]
    pub models: Vec<Backend>,
    #[serde(default = "default_prompts")]
    pub prompts: Vec<String>,
    #[serde(default = "default_questions")]
    pub questions: Vec<String>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            settings: Settings::default(),
            models: default_models(),
            prompts: default_prompts(),
            questions: default_questions(),
        }
    }
}

impl BenchConfig {
    /// Number of cases the full cross product will produce.
    pub fn case_count(&self) -> usize {
        self.models.len() * self.prompts.len() * self.questions.len()
    }

    /// Enumerates every case: models outer, prompt types middle, questions inner.
    pub fn cases(&self) -> impl Iterator<Item = BenchmarkCase> + '_ {
        self.models.iter().flat_map(move |backend| {
            self.prompts.iter().flat_map(move |prompt_type| {
                self.questions.iter().map(move |question| BenchmarkCase {
                    backend: backend.clone(),
                    prompt_type: prompt_type.clone(),
                    question: question.clone(),
                })
            })
        })
    }

    /// Keeps only the backends whose model identifier is listed. An empty
    /// filter keeps everything.
    pub fn retain_models(&mut self, ids: &[String]) {
        if ids.is_empty() {
            return;
        }
        self.models.retain(|b| ids.iter().any(|id| id == b.model()));
    }
}

fn default_version() -> u32 {
    1
}

fn default_models() -> Vec<Backend> {
    [
        "llama3.1:latest",
        "qwen2:7b",
        "mistral-nemo:latest",
        "phi3:latest",
        "deepseek-r1:latest",
    ]
    .into_iter()
    .map(Backend::ollama)
    .collect()
}

fn default_prompts() -> Vec<String> {
    crate::prompts::PromptTemplate::BENCHMARK
        .iter()
        .map(|t| t.name().to_string())
        .collect()
}

fn default_questions() -> Vec<String> {
    [
        "What was India's CPI in 2020?",
        "Which country had the highest GDP in 2019?",
        "Compare China and Japan's money supply (M2) in 2010.",
        "List the top 5 countries by GDP in 2022.",
        "How did Brazil's inflation change between 2010 and 2020?",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_database")]
    pub database: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            timeout_seconds: default_timeout_seconds(),
            database: default_database(),
            output: default_output(),
        }
    }
}

fn default_temperature() -> f32 {
    0.2
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_database() -> PathBuf {
    PathBuf::from("imf_data.db")
}

fn default_output() -> PathBuf {
    PathBuf::from("benchmark_results.csv")
}

/// Where a model is served and how to reach it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Backend {
    /// Local Ollama server speaking the OpenAI-compatible chat API.
    Ollama {
        model: String,
        #[serde(default = "default_ollama_endpoint")]
        endpoint: String,
    },
    /// Hosted OpenAI-compatible API. The key is read from `api_key_env` at
    /// request time.
    #[serde(rename = "openai")]
    OpenAi {
        model: String,
        #[serde(default = "default_openai_endpoint")]
        endpoint: String,
        #[serde(default = "default_api_key_env")]
        api_key_env: String,
    },
}

impl Backend {
    pub fn ollama(model: &str) -> Self {
        Backend::Ollama {
            model: model.to_string(),
            endpoint: default_ollama_endpoint(),
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Backend::Ollama { model, .. } | Backend::OpenAi { model, .. } => model,
        }
    }

    pub fn endpoint(&self) -> &str {
        match self {
            Backend::Ollama { endpoint, .. } | Backend::OpenAi { endpoint, .. } => endpoint,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Backend::Ollama { .. } => "ollama",
            Backend::OpenAi { .. } => "openai",
        }
    }
}

fn default_ollama_endpoint() -> String {
    DEFAULT_OLLAMA_ENDPOINT.to_string()
}

fn default_openai_endpoint() -> String {
    DEFAULT_OPENAI_ENDPOINT.to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkCase {
    pub backend: Backend,
    pub prompt_type: String,
    pub question: String,
}

impl BenchmarkCase {
    pub fn model(&self) -> &str {
        self.backend.model()
    }
}

/// One row of the benchmark table.
///
/// Built only through [`BenchmarkResult::succeeded`] and
/// [`BenchmarkResult::failed`], which keep `success == error.is_none()` and
/// force `row_count` to 0 on failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BenchmarkResult {
    pub model: String,
    pub prompt_type: String,
    pub question: String,
    pub generated_sql: String,
    pub success: bool,
    pub row_count: usize,
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
    pub latency_seconds: f64,
}

impl BenchmarkResult {
    pub fn succeeded(
        case: &BenchmarkCase,
        generated_sql: String,
        row_count: usize,
        latency_seconds: f64,
    ) -> Self {
        Self {
            model: case.model().to_string(),
            prompt_type: case.prompt_type.clone(),
            question: case.question.clone(),
            generated_sql,
            success: true,
            row_count,
            error: None,
            failure: None,
            latency_seconds: latency_seconds.max(0.0),
        }
    }

    pub fn failed(
        case: &BenchmarkCase,
        generated_sql: String,
        error: &CaseError,
        latency_seconds: f64,
    ) -> Self {
        Self {
            model: case.model().to_string(),
            prompt_type: case.prompt_type.clone(),
            question: case.question.clone(),
            generated_sql,
            success: false,
            row_count: 0,
            error: Some(error.to_string()),
            failure: Some(error.kind()),
            latency_seconds: latency_seconds.max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::QueryError;

    fn case() -> BenchmarkCase {
        BenchmarkCase {
            backend: Backend::ollama("phi3:latest"),
            prompt_type: "minimal".into(),
            question: "q".into(),
        }
    }

    #[test]
    fn failed_rows_have_no_rows_and_an_error() {
        let err = CaseError::Query(QueryError::Empty);
        let row = BenchmarkResult::failed(&case(), String::new(), &err, 0.5);
        assert!(!row.success);
        assert_eq!(row.row_count, 0);
        assert_eq!(row.error.as_deref(), Some("query error: empty SQL statement"));
        assert_eq!(row.failure, Some(FailureKind::Query));
    }

    #[test]
    fn succeeded_rows_have_no_error() {
        let row = BenchmarkResult::succeeded(&case(), "SELECT 1".into(), 1, 0.1);
        assert!(row.success);
        assert!(row.error.is_none());
        assert_eq!(row.model, "phi3:latest");
    }

    #[test]
    fn cases_follow_nested_order() {
        let cfg = BenchConfig {
            models: vec![Backend::ollama("a"), Backend::ollama("b")],
            prompts: vec!["minimal".into(), "few_shot".into()],
            questions: vec!["q1".into(), "q2".into(), "q3".into()],
            ..BenchConfig::default()
        };
        let cases: Vec<_> = cfg.cases().collect();
        assert_eq!(cases.len(), cfg.case_count());
        assert_eq!(cases.len(), 12);
        assert_eq!(
            (cases[0].model(), cases[0].prompt_type.as_str(), cases[0].question.as_str()),
            ("a", "minimal", "q1")
        );
        assert_eq!(
            (cases[3].model(), cases[3].prompt_type.as_str(), cases[3].question.as_str()),
            ("a", "few_shot", "q1")
        );
        assert_eq!(cases[6].model(), "b");
    }

    #[test]
    fn backend_yaml_is_tagged() {
        let b: Backend = serde_yaml::from_str("kind: ollama\nmodel: qwen2:7b").unwrap();
        assert_eq!(b, Backend::ollama("qwen2:7b"));
        assert_eq!(b.endpoint(), DEFAULT_OLLAMA_ENDPOINT);

        let b: Backend = serde_yaml::from_str("kind: openai\nmodel: gpt-4o-mini").unwrap();
        assert_eq!(b.kind(), "openai");
        assert!(matches!(b, Backend::OpenAi { ref api_key_env, .. } if api_key_env == "OPENAI_API_KEY"));
    }

    #[test]
    fn retain_models_filters_by_identifier() {
        let mut cfg = BenchConfig::default();
        cfg.retain_models(&["phi3:latest".to_string()]);
        assert_eq!(cfg.models.len(), 1);
        assert_eq!(cfg.models[0].model(), "phi3:latest");
    }
}
