// src/services/completion.rs
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::message::ChatMessage;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("request to completion backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed completion envelope: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("completion envelope contained no choices")]
    EmptyChoices,

    /// Raised by non-HTTP backends.
    #[error("{0}")]
    Backend(String),
}

impl CompletionError {
    /// Short label kept for logs even though callers only see a generic failure.
    pub fn kind(&self) -> &'static str {
        match self {
            CompletionError::Transport(_) => "transport",
            CompletionError::Status { .. } => "status",
            CompletionError::Decode(_) => "decode",
            CompletionError::EmptyChoices => "empty_choices",
            CompletionError::Backend(_) => "backend",
        }
    }
}

/// A chat-completion service: takes a model id and an ordered message list,
/// returns the text of the first candidate.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> Result<String, CompletionError>;
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct CompletionEnvelope {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible `/chat/completions` client.
#[derive(Clone, Debug)]
pub struct OpenAiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, CompletionError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest { model, messages })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(CompletionError::Status { status, body });
        }

        let envelope: CompletionEnvelope =
            serde_json::from_str(&body).map_err(CompletionError::Decode)?;
        let first = envelope
            .choices
            .into_iter()
            .next()
            .ok_or(CompletionError::EmptyChoices)?;

        Ok(first.message.content.unwrap_or_default())
    }
}
