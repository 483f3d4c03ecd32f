use crate::errors::GatewayError;
use crate::model::{Backend, ChatMessage};
use async_trait::async_trait;
use std::time::Duration;

/// One chat completion request, independent of the backend that serves it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub timeout: Duration,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>, temperature: f32, timeout_seconds: u64) -> Self {
        Self {
            messages,
            temperature,
            timeout: Duration::from_secs(timeout_seconds),
        }
    }
}

/// Boundary to language-model backends.
///
/// Implementations make exactly one attempt and report every failure as a
/// [`GatewayError`] value.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    async fn complete(
        &self,
        backend: &Backend,
        request: &ChatRequest,
    ) -> Result<String, GatewayError>;
}

pub mod fake;
pub mod http;

pub use fake::FakeGateway;
pub use http::HttpGateway;
