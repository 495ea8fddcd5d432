// src/services/template.rs
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::message::{ChatMessage, Role};

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read prompt template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse prompt template {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("template entry `{field}` must have role {expected:?}")]
    WrongRole { field: &'static str, expected: Role },

    #[error("template entry `{field}` has empty content")]
    EmptyContent { field: &'static str },
}

#[derive(Deserialize)]
struct TemplateFile {
    systemmsg: ChatMessage,
    #[serde(default)]
    usermsg: Option<ChatMessage>,
}

/// Fixed messages placed ahead of the caller's payload. Loaded once at
/// startup and never reloaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptTemplate {
    system: ChatMessage,
    user: Option<ChatMessage>,
}

impl PromptTemplate {
    pub fn new(system: ChatMessage, user: Option<ChatMessage>) -> Result<Self, TemplateError> {
        check(&system, "systemmsg", Role::System)?;
        if let Some(user) = &user {
            check(user, "usermsg", Role::User)?;
        }
        Ok(Self { system, user })
    }

    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let raw = std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: TemplateFile = serde_json::from_str(&raw).map_err(|source| TemplateError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(file.systemmsg, file.usermsg)
    }

    pub fn system(&self) -> &ChatMessage {
        &self.system
    }

    pub fn user(&self) -> Option<&ChatMessage> {
        self.user.as_ref()
    }

    /// The fixed messages in send order.
    pub fn preamble(&self) -> impl Iterator<Item = &ChatMessage> {
        std::iter::once(&self.system).chain(self.user.as_ref())
    }
}

fn check(msg: &ChatMessage, field: &'static str, expected: Role) -> Result<(), TemplateError> {
    if msg.role != expected {
        return Err(TemplateError::WrongRole { field, expected });
    }
    if msg.content.trim().is_empty() {
        return Err(TemplateError::EmptyContent { field });
    }
    Ok(())
}
