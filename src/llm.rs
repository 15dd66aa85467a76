//! Completion provider abstraction
//!
//! The dispatch layer only sees [`LlmService`]; the Groq client and the
//! logging wrapper are the production implementations.

mod error;
mod groq;
mod models;
mod registry;
mod types;

pub use error::LlmError;
pub use groq::GroqService;
pub use models::{all_models, find_model, DEFAULT_MODEL};
pub use registry::{LlmConfig, ModelRegistry};
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for completion providers
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Make a completion request
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Short provider name, used in logs
    fn provider_name(&self) -> &'static str;
}

/// Logging wrapper for completion providers
pub struct LoggingService {
    inner: Arc<dyn LlmService>,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl LlmService for LoggingService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    provider = self.inner.provider_name(),
                    model = %request.model,
                    messages = request.messages.len(),
                    duration_ms = %duration.as_millis(),
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    "Completion request finished"
                );
            }
            Err(e) => {
                tracing::error!(
                    provider = self.inner.provider_name(),
                    model = %request.model,
                    duration_ms = %duration.as_millis(),
                    kind = ?e.kind,
                    transient = e.kind.is_transient(),
                    error = %e.message,
                    "Completion request failed"
                );
            }
        }

        result
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }
}
