//! HTTP API for the chat backend

mod handlers;
mod types;

pub use handlers::create_router;

use crate::dispatch::ChatDispatcher;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<ChatDispatcher>,
}

impl AppState {
    pub fn new(dispatcher: ChatDispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }
}
