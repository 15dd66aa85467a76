//! Wellness chat backend
//!
//! Forwards user messages to a Groq-hosted model and keeps a per-user
//! transcript in memory.

mod api;
mod config;
mod dispatch;
mod llm;
mod session;

use api::{create_router, AppState};
use config::ServerConfig;
use dispatch::ChatDispatcher;
use llm::ModelRegistry;
use session::SessionStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let registry = Arc::new(ModelRegistry::new(&config.llm));
    if registry.is_connected() {
        tracing::info!(
            models = ?registry.available_models(),
            default = %registry.default_model_id(),
            "Groq client initialized"
        );
    } else {
        tracing::warn!("No GROQ_API_KEY configured, chat requests will return 503");
    }

    let store = Arc::new(SessionStore::new());
    let state = AppState::new(ChatDispatcher::new(store, registry));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new().gzip(true).br(true);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(compression);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, debug = config.debug, "Chat backend listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
