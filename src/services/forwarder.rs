// src/services/forwarder.rs
use std::sync::Arc;

use serde_json::Value;

use super::{
    completion::{CompletionBackend, CompletionError},
    template::PromptTemplate,
};
use crate::message::ChatMessage;

pub const GAMESTATE_PREFIX: &str = "Here is the current game state:\n\n";

/// How the caller's payload is turned into the outbound message list.
#[derive(Clone, Debug)]
pub enum PromptMode {
    /// The payload is the only entry.
    Plain,
    /// Template messages first, then the payload wrapped as a game state.
    Templated(Arc<PromptTemplate>),
}

impl PromptMode {
    /// Error text returned to callers that omit the message.
    pub fn missing_message_text(&self) -> &'static str {
        match self {
            PromptMode::Plain => "Message is required",
            PromptMode::Templated(_) => "Gamestate not found!",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PromptMode::Plain => "plain",
            PromptMode::Templated(_) => "templated",
        }
    }
}

/// Renders a payload as prompt text. Strings pass through untouched; any
/// other value is pretty-printed with two-space indentation.
pub fn render_payload(payload: &Value) -> String {
    match payload {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

#[derive(Clone)]
pub struct Forwarder {
    backend: Arc<dyn CompletionBackend>,
    model: String,
    mode: PromptMode,
}

impl std::fmt::Debug for Forwarder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Forwarder")
            .field("model", &self.model)
            .field("mode", &self.mode.name())
            .finish()
    }
}

impl Forwarder {
    pub fn new(backend: Arc<dyn CompletionBackend>, model: impl Into<String>, mode: PromptMode) -> Self {
        Self { backend, model: model.into(), mode }
    }

    pub fn mode(&self) -> &PromptMode {
        &self.mode
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Builds the message list for an already rendered payload. The caller's
    /// content is always the last entry.
    pub fn build_messages(&self, rendered: &str) -> Vec<ChatMessage> {
        match &self.mode {
            PromptMode::Plain => vec![ChatMessage::user(rendered)],
            PromptMode::Templated(template) => template
                .preamble()
                .cloned()
                .chain(std::iter::once(ChatMessage::user(format!("{GAMESTATE_PREFIX}{rendered}"))))
                .collect(),
        }
    }

    /// Makes exactly one backend call and returns the first choice verbatim.
    pub async fn forward(&self, rendered: &str) -> Result<String, CompletionError> {
        let messages = self.build_messages(rendered);
        tracing::debug!(model = %self.model, entries = messages.len(), "forwarding chat request");
        self.backend.complete(&self.model, &messages).await
    }
}
