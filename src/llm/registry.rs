//! Provider configuration and the registry handed to the dispatch layer

use super::{all_models, find_model, GroqService, LlmService, LoggingService, SamplingParams};
use super::DEFAULT_MODEL;
use std::sync::Arc;

/// Configuration for the completion provider
#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    /// Override for the Groq API base URL (e.g. a local proxy)
    pub base_url: Option<String>,
    /// Default model ID
    pub default_model: Option<String>,
    pub sampling: SamplingParams,
}

impl LlmConfig {
    /// Build a config from any variable lookup. Unparseable sampling values
    /// fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = SamplingParams::default();
        let sampling = SamplingParams {
            max_tokens: lookup("CHAT_MAX_TOKENS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_tokens),
            temperature: lookup("CHAT_TEMPERATURE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.temperature),
            top_p: lookup("CHAT_TOP_P")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.top_p),
        };

        Self {
            api_key: lookup("GROQ_API_KEY"),
            base_url: lookup("GROQ_BASE_URL"),
            default_model: lookup("DEFAULT_MODEL"),
            sampling,
        }
    }
}

/// Registry of the configured provider and the supported models
pub struct ModelRegistry {
    service: Option<Arc<dyn LlmService>>,
    default_model: String,
    api_key_configured: bool,
    sampling: SamplingParams,
}

impl ModelRegistry {
    pub fn new(config: &LlmConfig) -> Self {
        let api_key = config.api_key.as_deref().filter(|k| !k.is_empty());

        let service = api_key.and_then(|key| {
            match GroqService::new(key.to_string(), config.base_url.as_deref()) {
                Ok(service) => {
                    let service: Arc<dyn LlmService> = Arc::new(service);
                    Some(Arc::new(LoggingService::new(service)) as Arc<dyn LlmService>)
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to initialize Groq client");
                    None
                }
            }
        });

        let default_model = match config.default_model.as_deref() {
            Some(id) if find_model(id).is_some() => id.to_string(),
            Some(id) => {
                tracing::warn!(model = %id, "Unknown DEFAULT_MODEL, using built-in default");
                DEFAULT_MODEL.to_string()
            }
            None => DEFAULT_MODEL.to_string(),
        };

        Self {
            service,
            default_model,
            api_key_configured: config.api_key.is_some(),
            sampling: config.sampling,
        }
    }

    /// Registry backed by an arbitrary service, for tests
    #[cfg(test)]
    pub fn with_service(service: Option<Arc<dyn LlmService>>) -> Self {
        Self {
            api_key_configured: service.is_some(),
            service,
            default_model: DEFAULT_MODEL.to_string(),
            sampling: SamplingParams::default(),
        }
    }

    /// The configured completion service, if any
    pub fn service(&self) -> Option<Arc<dyn LlmService>> {
        self.service.clone()
    }

    /// Whether a completion service was successfully created
    pub fn is_connected(&self) -> bool {
        self.service.is_some()
    }

    pub fn api_key_configured(&self) -> bool {
        self.api_key_configured
    }

    /// Get the default model ID
    pub fn default_model_id(&self) -> &str {
        &self.default_model
    }

    pub fn sampling(&self) -> SamplingParams {
        self.sampling
    }

    /// List all supported model IDs, in catalog order
    pub fn available_models(&self) -> Vec<String> {
        all_models().iter().map(|id| (*id).to_string()).collect()
    }
}
