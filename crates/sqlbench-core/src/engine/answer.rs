use crate::errors::{GatewayError, QueryError};
use crate::model::{Backend, Settings};
use crate::prompts::{self, PromptTemplate};
use crate::providers::llm::{ChatRequest, ModelGateway};
use crate::sanitize;
use crate::storage::{QueryExecutor, ResultSet, SchemaDescription};
use std::sync::Arc;

/// Outcome of answering a single question.
#[derive(Debug, Clone)]
pub struct Answer {
    pub question: String,
    pub sql: String,
    pub result: Result<ResultSet, QueryError>,
    /// Plain-English explanation; `None` when explanation was not requested.
    pub summary: Option<Result<String, GatewayError>>,
}

/// Interactive question → SQL → result → explanation pipeline.
pub struct Answerer {
    pub executor: Arc<dyn QueryExecutor>,
    pub schema: SchemaDescription,
    pub client: Arc<dyn ModelGateway>,
    pub backend: Backend,
    pub template: PromptTemplate,
    pub settings: Settings,
    pub explain: bool,
}

impl Answerer {
    /// SQL generation failures are returned as `Err`; query and explanation
    /// failures are carried inside the [`Answer`].
    pub async fn ask(&self, question: &str) -> Result<Answer, GatewayError> {
        let prompt = self.template.build(question, &self.schema);
        let raw = self
            .client
            .complete(&self.backend, &self.request(prompt.messages()))
            .await?;
        let sql = sanitize::clean(Some(&raw));
        tracing::debug!(event = "sql_generated", model = %self.backend.model(), sql = %sql);

        let result = self.executor.execute(&sql);

        let summary = if self.explain {
            let result_text = match &result {
                Ok(rs) => rs.to_text(),
                Err(e) => e.to_string(),
            };
            let pair = prompts::explain(question, &result_text);
            Some(
                self.client
                    .complete(&self.backend, &self.request(pair.messages()))
                    .await,
            )
        } else {
            None
        };

        Ok(Answer {
            question: question.to_string(),
            sql,
            result,
            summary,
        })
    }

    fn request(&self, messages: Vec<crate::model::ChatMessage>) -> ChatRequest {
        ChatRequest::new(
            messages,
            self.settings.temperature,
            self.settings.timeout_seconds,
        )
    }
}
