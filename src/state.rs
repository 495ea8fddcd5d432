// src/state.rs
use std::sync::Arc;

use crate::{
    config::Config,
    error::StartupError,
    services::{
        completion::OpenAiClient,
        forwarder::{Forwarder, PromptMode},
        template::PromptTemplate,
    },
};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub forwarder: Forwarder,
    pub max_message_bytes: usize,
}

impl AppState {
    pub fn new(forwarder: Forwarder, max_message_bytes: usize) -> Self {
        Self { forwarder, max_message_bytes }
    }

    /// Wires the production backend and loads the template, if any.
    pub fn from_config(config: &Config) -> Result<Self, StartupError> {
        let mode = match &config.template_path {
            Some(path) => PromptMode::Templated(Arc::new(PromptTemplate::load(path)?)),
            None => PromptMode::Plain,
        };
        let client = OpenAiClient::new(&config.base_url, config.api_key.clone(), config.upstream_timeout)?;
        let forwarder = Forwarder::new(Arc::new(client), config.model.clone(), mode);

        Ok(Self::new(forwarder, config.max_message_bytes))
    }
}
