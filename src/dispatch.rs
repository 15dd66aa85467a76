//! Chat exchange dispatch
//!
//! One exchange runs `Idle -> UserAppended -> {Completed | RolledBack}`
//! inside a single [`ChatDispatcher::submit`] call. A failed exchange leaves
//! no trace in the transcript.

#[cfg(test)]
pub mod testing;

use crate::llm::{LlmRequest, ModelRegistry};
use crate::session::{SessionStore, Turn};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// Why an exchange did not complete
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Message cannot be empty")]
    InvalidInput,
    #[error("AI service unavailable. Please check API key configuration.")]
    ServiceUnavailable,
    #[error("AI service error: {cause}")]
    Failure { cause: String },
}

/// Result of a completed exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    pub model: String,
    pub conversation_length: usize,
}

/// Orchestrates chat exchanges against the session store
pub struct ChatDispatcher {
    store: Arc<SessionStore>,
    registry: Arc<ModelRegistry>,
    /// Serializes `submit` per user key. `clear` and `read` skip it.
    submit_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ChatDispatcher {
    pub fn new(store: Arc<SessionStore>, registry: Arc<ModelRegistry>) -> Self {
        Self {
            store,
            registry,
            submit_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    async fn key_lock(&self, key: &str) -> Arc<Mutex<()>> {
        self.submit_locks
            .lock()
            .await
            .entry(key.to_string())
            .or_default()
            .clone()
    }

    /// Run one exchange for `key`.
    ///
    /// The user turn is stored trimmed. `model` falls back to the registry
    /// default when absent or blank.
    pub async fn submit(
        &self,
        key: &str,
        message: &str,
        model: Option<&str>,
    ) -> Result<ChatReply, DispatchError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(DispatchError::InvalidInput);
        }

        let Some(llm) = self.registry.service() else {
            tracing::warn!(user_id = %key, "Chat rejected, no completion service configured");
            return Err(DispatchError::ServiceUnavailable);
        };

        let model = model
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| self.registry.default_model_id())
            .to_string();

        let lock = self.key_lock(key).await;
        let _guard = lock.lock().await;

        let mut messages = self.store.get_or_create(key).await;
        let user_turn = Turn::user(message);
        let position = self.store.append(key, user_turn.clone()).await;
        messages.push(user_turn.clone());

        let request = LlmRequest {
            model: model.clone(),
            messages,
            sampling: self.registry.sampling(),
        };

        match llm.complete(&request).await {
            Ok(response) => {
                let conversation_length =
                    self.store.append(key, Turn::assistant(&response.text)).await;
                tracing::info!(
                    user_id = %key,
                    model = %model,
                    conversation_length,
                    "Chat exchange completed"
                );
                Ok(ChatReply {
                    text: response.text,
                    model,
                    conversation_length,
                })
            }
            Err(e) => {
                let rolled_back = self.store.remove_last_if(key, position, &user_turn).await;
                tracing::warn!(
                    user_id = %key,
                    model = %model,
                    rolled_back,
                    error = %e,
                    "Chat exchange failed"
                );
                Err(DispatchError::Failure { cause: e.message })
            }
        }
    }

    /// Empty a user's transcript
    pub async fn clear(&self, key: &str) {
        self.store.clear(key).await;
        tracing::info!(user_id = %key, "Conversation cleared");
    }

    /// Snapshot of a user's transcript
    pub async fn read(&self, key: &str) -> Vec<Turn> {
        self.store.read(key).await
    }
}
