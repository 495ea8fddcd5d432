use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    error::AppError,
    message::{ChatReply, ChatRequest, StatusBody},
    services::forwarder::render_payload,
    state::SharedState,
};

pub const STATUS_MESSAGE: &str = "API is up and running!";

pub async fn status_handler() -> Json<StatusBody> {
    Json(StatusBody { message: STATUS_MESSAGE.to_string() })
}

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let missing = state.forwarder.mode().missing_message_text();
    let limit = state.max_message_bytes;

    let Json(request) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge { limit }
        } else {
            tracing::debug!(error = %rejection.body_text(), "unreadable chat body");
            AppError::MissingMessage(missing)
        }
    })?;

    let message = request.payload().ok_or(AppError::MissingMessage(missing))?;

    let rendered = render_payload(message);
    if rendered.len() > limit {
        tracing::debug!(size = rendered.len(), "rendered message over cap");
        return Err(AppError::PayloadTooLarge { limit });
    }

    let response = state.forwarder.forward(&rendered).await?;
    tracing::info!(%response, "Current action being taken");

    Ok(Json(ChatReply { response }))
}
