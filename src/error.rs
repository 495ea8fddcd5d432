// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    message::ErrorBody,
    services::{completion::CompletionError, template::TemplateError},
};

pub const UPSTREAM_FAILURE: &str = "Failed to process request";
pub const TOO_LARGE: &str = "Message is too large";

#[derive(Debug, Error)]
pub enum AppError {
    /// The request carried no usable `message`. Holds the text returned to the caller.
    #[error("{0}")]
    MissingMessage(&'static str),

    #[error("message exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("completion backend failed: {0}")]
    Upstream(#[from] CompletionError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MissingMessage(text) => (StatusCode::BAD_REQUEST, *text),
            AppError::PayloadTooLarge { limit } => {
                tracing::warn!(limit, "rejecting oversized message");
                (StatusCode::PAYLOAD_TOO_LARGE, TOO_LARGE)
            }
            AppError::Upstream(err) => {
                tracing::error!(kind = err.kind(), error = %err, "chat request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_FAILURE)
            }
        };

        (status, Json(ErrorBody { error: message.to_string() })).into_response()
    }
}

/// Failures that stop the relay before it binds its port.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("failed to build completion client: {0}")]
    Client(#[from] CompletionError),
}
