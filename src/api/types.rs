//! API request and response types

use crate::session::Turn;
use serde::{Deserialize, Serialize};

pub const DEFAULT_USER_ID: &str = "default";

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Request to clear a conversation
#[derive(Debug, Default, Deserialize)]
pub struct ClearRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Resolve an optional user id to the shared default
pub fn user_key(user_id: Option<String>) -> String {
    user_id.unwrap_or_else(|| DEFAULT_USER_ID.to_string())
}

/// Response for the root liveness check
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub groq_connected: bool,
}

/// Response for a completed chat exchange
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub status: &'static str,
    pub response: String,
    pub model: String,
    pub conversation_length: usize,
}

/// Response for actions that only report success
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Response for model list
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub status: &'static str,
    pub models: Vec<String>,
    pub default_model: String,
}

/// Response for the detailed health check
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub groq_connected: bool,
    pub api_key_configured: bool,
    pub available_models: usize,
    pub active_conversations: usize,
}

/// Response with a conversation transcript
#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub status: &'static str,
    pub conversation: Vec<Turn>,
    pub length: usize,
}

/// Error response. `response` carries a displayable fallback for chat failures.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            response: None,
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = Some(response.into());
        self
    }
}
