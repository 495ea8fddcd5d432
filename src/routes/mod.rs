// src/routes/mod.rs
pub mod chat;

use crate::state::SharedState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use chat::{chat_handler, status_handler};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Slack on top of the message cap for the JSON envelope and escaping.
const BODY_OVERHEAD: usize = 16 * 1024;

pub fn create_router(max_message_bytes: usize) -> Router<SharedState> {
    // Bodies over this limit are rejected before parsing; the handler maps
    // that rejection to the same 413 as an oversized rendered message.
    let body_limit = max_message_bytes.saturating_mul(2).saturating_add(BODY_OVERHEAD);

    Router::new()
        .route("/", get(status_handler))
        .route("/api/chat", post(chat_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}
