use super::{ChatRequest, ModelGateway};
use crate::errors::GatewayError;
use crate::model::{Backend, ChatMessage};
use async_trait::async_trait;
use serde::Serialize;

/// OpenAI-compatible `/chat/completions` client. Serves both local Ollama and
/// hosted OpenAI backends.
#[derive(Clone, Default)]
pub struct HttpGateway {
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

impl HttpGateway {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    fn url(backend: &Backend) -> String {
        format!(
            "{}/chat/completions",
            backend.endpoint().trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ModelGateway for HttpGateway {
    async fn complete(
        &self,
        backend: &Backend,
        request: &ChatRequest,
    ) -> Result<String, GatewayError> {
        let body = ChatBody {
            model: backend.model(),
            messages: &request.messages,
            temperature: request.temperature,
        };

        let mut req = self
            .client
            .post(Self::url(backend))
            .timeout(request.timeout)
            .json(&body);

        if let Backend::OpenAi { api_key_env, .. } = backend {
            let key = std::env::var(api_key_env)
                .ok()
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| GatewayError::MissingCredentials(api_key_env.clone()))?;
            req = req.bearer_auth(key);
        }

        let timeout_err = || GatewayError::Timeout {
            seconds: request.timeout.as_secs(),
        };

        let resp = req.send().await.map_err(|e| {
            if e.is_timeout() {
                timeout_err()
            } else {
                GatewayError::Transport(e.to_string())
            }
        })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            if e.is_timeout() {
                timeout_err()
            } else {
                GatewayError::Transport(e.to_string())
            }
        })?;

        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let json: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| GatewayError::MalformedBody(e.to_string()))?;

        json.pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or(GatewayError::MissingContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_endpoint() {
        let b = Backend::Ollama {
            model: "m".into(),
            endpoint: "http://localhost:11434/v1/".into(),
        };
        assert_eq!(
            HttpGateway::url(&b),
            "http://localhost:11434/v1/chat/completions"
        );
    }

    #[test]
    fn body_matches_chat_shape() {
        let msgs = vec![ChatMessage::system("s"), ChatMessage::user("u")];
        let body = ChatBody {
            model: "llama3.1:latest",
            messages: &msgs,
            temperature: 0.5,
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "model": "llama3.1:latest",
                "messages": [
                    {"role": "system", "content": "s"},
                    {"role": "user", "content": "u"}
                ],
                "temperature": 0.5
            })
        );
    }

    #[tokio::test]
    async fn openai_without_key_fails_before_sending() {
        let b = Backend::OpenAi {
            model: "gpt-4o-mini".into(),
            endpoint: "http://127.0.0.1:9".into(),
            api_key_env: "SQLBENCH_TEST_KEY_THAT_IS_NEVER_SET".into(),
        };
        let req = ChatRequest::new(vec![ChatMessage::user("q")], 0.0, 1);
        let err = HttpGateway::new().complete(&b, &req).await.unwrap_err();
        assert_eq!(
            err,
            GatewayError::MissingCredentials("SQLBENCH_TEST_KEY_THAT_IS_NEVER_SET".into())
        );
    }
}
