//! HTTP request handlers

use super::types::{
    user_key, ChatRequest, ChatResponse, ClearRequest, ConversationResponse, ErrorResponse,
    HealthResponse, MessageResponse, ModelsResponse, StatusResponse,
};
use super::AppState;
use crate::dispatch::DispatchError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;

const UNAVAILABLE_REPLY: &str = "I'm sorry, but I'm currently unable to process your request. Please try again later or contact support.";
const FAILURE_REPLY: &str =
    "I'm sorry, I encountered an error while processing your request. Please try again.";

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    finish(routes().with_state(state))
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/api/chat", post(chat))
        .route("/api/clear", post(clear_conversation))
        .route("/api/models", get(list_models))
        .route("/api/health", get(health_check))
        .route("/api/conversation/:user_id", get(get_conversation))
}

/// JSON 404 for unmatched paths and a JSON 500 for handler panics
fn finish(router: Router) -> Router {
    router
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(panic_response))
}

// ============================================================
// Status
// ============================================================

async fn home(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "success",
        message: "AI Chatbot Backend is running",
        groq_connected: state.dispatcher.registry().is_connected(),
    })
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let registry = state.dispatcher.registry();
    Json(HealthResponse {
        status: "success",
        groq_connected: registry.is_connected(),
        api_key_configured: registry.api_key_configured(),
        available_models: registry.available_models().len(),
        active_conversations: state.dispatcher.store().session_count().await,
    })
}

async fn list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    let registry = state.dispatcher.registry();
    Json(ModelsResponse {
        status: "success",
        models: registry.available_models(),
        default_model: registry.default_model_id().to_string(),
    })
}

// ============================================================
// Conversation
// ============================================================

async fn chat(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<Json<ChatResponse>, AppError> {
    let Some(req) = parse_chat_body(body) else {
        return Err(AppError::BadRequest("No data provided".to_string()));
    };

    let user_id = user_key(req.user_id);
    let reply = state
        .dispatcher
        .submit(&user_id, &req.message, req.model.as_deref())
        .await?;

    Ok(Json(ChatResponse {
        status: "success",
        response: reply.text,
        model: reply.model,
        conversation_length: reply.conversation_length,
    }))
}

/// A chat body must be a non-empty JSON object of the expected shape
fn parse_chat_body(body: Option<Json<Value>>) -> Option<ChatRequest> {
    let Some(Json(Value::Object(fields))) = body else {
        return None;
    };
    if fields.is_empty() {
        return None;
    }
    serde_json::from_value(Value::Object(fields)).ok()
}

async fn clear_conversation(
    State(state): State<AppState>,
    body: Option<Json<ClearRequest>>,
) -> Json<MessageResponse> {
    let Json(req) = body.unwrap_or_default();
    state.dispatcher.clear(&user_key(req.user_id)).await;

    Json(MessageResponse {
        status: "success",
        message: "Conversation cleared",
    })
}

async fn get_conversation(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<ConversationResponse> {
    let conversation = state.dispatcher.read(&user_id).await;
    Json(ConversationResponse {
        status: "success",
        length: conversation.len(),
        conversation,
    })
}

// ============================================================
// Error Handling
// ============================================================

async fn not_found() -> AppError {
    AppError::NotFound("Endpoint not found".to_string())
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "Handler panicked");

    AppError::Internal("Internal server error".to_string()).into_response()
}

enum AppError {
    BadRequest(String),
    NotFound(String),
    Chat(DispatchError),
    Internal(String),
}

impl From<DispatchError> for AppError {
    fn from(e: DispatchError) -> Self {
        AppError::Chat(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new(msg)),
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(msg))
            }
            AppError::Chat(e) => match e {
                DispatchError::InvalidInput => {
                    (StatusCode::BAD_REQUEST, ErrorResponse::new(e.to_string()))
                }
                DispatchError::ServiceUnavailable => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::new(e.to_string()).with_response(UNAVAILABLE_REPLY),
                ),
                DispatchError::Failure { .. } => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(e.to_string()).with_response(FAILURE_REPLY),
                ),
            },
        };

        (status, Json(body)).into_response()
    }
}
