use crate::errors::CaseError;
use crate::model::{BenchConfig, BenchmarkCase, BenchmarkResult, Settings};
use crate::prompts::{self, PromptTemplate};
use crate::providers::llm::{ChatRequest, ModelGateway};
use crate::report::RunArtifacts;
use crate::sanitize;
use crate::storage::{QueryExecutor, SchemaDescription};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Completed,
}

/// Sweeps models × prompt templates × questions, one case at a time.
///
/// Every case produces exactly one [`BenchmarkResult`]; only failures to set
/// the run up surface as `Err`. Rows stay in memory until the caller writes
/// the artifacts, so a crash mid-sweep loses the run.
pub struct Runner {
    pub executor: Arc<dyn QueryExecutor>,
    pub schema: SchemaDescription,
    pub client: Arc<dyn ModelGateway>,
    state: RunState,
}

impl Runner {
    pub fn new(
        executor: Arc<dyn QueryExecutor>,
        schema: SchemaDescription,
        client: Arc<dyn ModelGateway>,
    ) -> Self {
        Self {
            executor,
            schema,
            client,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub async fn run_suite(&mut self, cfg: &BenchConfig) -> anyhow::Result<RunArtifacts> {
        if self.state != RunState::Idle {
            anyhow::bail!("runner already used (state: {:?})", self.state);
        }
        self.state = RunState::Running;

        for name in &cfg.prompts {
            if let Err(e) = name.parse::<PromptTemplate>() {
                tracing::warn!(
                    event = "unknown_prompt_template",
                    prompt_type = %name,
                    "{}; its cases will be recorded as failed",
                    e
                );
            }
        }

        let started_at = chrono::Utc::now();
        let total = cfg.case_count();
        let mut results = Vec::with_capacity(total);

        for (i, case) in cfg.cases().enumerate() {
            tracing::info!(
                event = "case_start",
                case = i + 1,
                total,
                model = %case.model(),
                prompt_type = %case.prompt_type,
                "Testing {} | {} | {}",
                case.model(),
                case.prompt_type,
                case.question
            );
            let row = self.run_case(&cfg.settings, &case).await;
            if let Some(err) = &row.error {
                tracing::debug!(event = "case_failed", case = i + 1, error = %err);
            }
            results.push(row);
        }

        self.state = RunState::Completed;

        let artifacts = RunArtifacts {
            started_at,
            config_fingerprint: crate::fingerprint::config_fingerprint(cfg).hex,
            results,
        };
        tracing::info!(
            event = "run_complete",
            total = artifacts.results.len(),
            succeeded = artifacts.succeeded(),
            failed = artifacts.failed(),
        );
        Ok(artifacts)
    }

    /// Runs one case end to end. Latency covers prompt building through query
    /// execution.
    pub async fn run_case(&self, settings: &Settings, case: &BenchmarkCase) -> BenchmarkResult {
        let start = Instant::now();
        let outcome = self.evaluate(settings, case).await;
        let latency = start.elapsed().as_secs_f64();

        match outcome {
            Ok((sql, rows)) => BenchmarkResult::succeeded(case, sql, rows, latency),
            Err((sql, err)) => BenchmarkResult::failed(case, sql, &err, latency),
        }
    }

    async fn evaluate(
        &self,
        settings: &Settings,
        case: &BenchmarkCase,
    ) -> Result<(String, usize), (String, CaseError)> {
        let prompt = prompts::build(&case.prompt_type, &case.question, &self.schema)
            .map_err(|e| (String::new(), CaseError::Config(e)))?;

        let request = ChatRequest::new(
            prompt.messages(),
            settings.temperature,
            settings.timeout_seconds,
        );
        let raw = self
            .client
            .complete(&case.backend, &request)
            .await
            .map_err(|e| (String::new(), CaseError::Gateway(e)))?;

        let sql = sanitize::clean(Some(&raw));
        match self.executor.execute(&sql) {
            Ok(rs) => Ok((sql, rs.row_count())),
            Err(e) => Err((sql, CaseError::Query(e))),
        }
    }
}
