use super::{ChatRequest, ModelGateway};
use crate::errors::GatewayError;
use crate::model::Backend;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Gateway returning canned responses, keyed by model identifier.
pub struct FakeGateway {
    default: Result<String, GatewayError>,
    by_model: HashMap<String, Result<String, GatewayError>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<ChatRequest>>,
}

impl FakeGateway {
    pub fn fixed(text: impl Into<String>) -> Self {
        Self::with_default(Ok(text.into()))
    }

    pub fn failing(err: GatewayError) -> Self {
        Self::with_default(Err(err))
    }

    fn with_default(default: Result<String, GatewayError>) -> Self {
        Self {
            default,
            by_model: HashMap::new(),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn respond_for(mut self, model: &str, response: Result<String, GatewayError>) -> Self {
        self.by_model.insert(model.to_string(), response);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ModelGateway for FakeGateway {
    async fn complete(
        &self,
        backend: &Backend,
        request: &ChatRequest,
    ) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut r) = self.requests.lock() {
            r.push(request.clone());
        }
        self.by_model
            .get(backend.model())
            .unwrap_or(&self.default)
            .clone()
    }
}
