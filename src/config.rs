// Relay configuration, read once from the environment at startup.

use std::{path::PathBuf, time::Duration};

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 64 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is required")]
    Missing(&'static str),

    #[error("environment variable {name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Relay configuration.
#[derive(Clone)]
pub struct Config {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Credential for the completion backend.
    pub api_key: String,
    /// Base URL of the OpenAI-compatible backend.
    pub base_url: String,
    /// Fixed model id sent with every completion.
    pub model: String,
    /// Prompt template file. Enables the templated prompt mode when set.
    pub template_path: Option<PathBuf>,
    /// Upper bound on the rendered message, in bytes.
    pub max_message_bytes: usize,
    /// Client-side timeout for backend calls. `None` keeps the client default.
    pub upstream_timeout: Option<Duration>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("template_path", &self.template_path)
            .field("max_message_bytes", &self.max_message_bytes)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Environment variables:
    /// - `OPENAI_API_KEY` - backend credential (required)
    /// - `PORT` - HTTP server port (default: 3000)
    /// - `OPENAI_BASE_URL` - backend base URL (default: `https://api.openai.com/v1`)
    /// - `OPENAI_MODEL` - model id (default: `gpt-3.5-turbo`)
    /// - `PROMPT_TEMPLATE_PATH` - JSON template with `systemmsg` and optional `usermsg`
    /// - `MAX_MESSAGE_BYTES` - cap on the rendered message (default: 65536)
    /// - `UPSTREAM_TIMEOUT_SECS` - backend request timeout (default: none)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values are treated as unset.
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = get("OPENAI_API_KEY").ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;

        let port = parse(get("PORT"), "PORT")?.unwrap_or(DEFAULT_PORT);
        let max_message_bytes = parse(get("MAX_MESSAGE_BYTES"), "MAX_MESSAGE_BYTES")?
            .unwrap_or(DEFAULT_MAX_MESSAGE_BYTES);
        if max_message_bytes == 0 {
            return Err(ConfigError::Invalid { name: "MAX_MESSAGE_BYTES", value: "0".into() });
        }
        let upstream_timeout = parse::<u64>(get("UPSTREAM_TIMEOUT_SECS"), "UPSTREAM_TIMEOUT_SECS")?
            .map(Duration::from_secs);

        Ok(Config {
            port,
            api_key,
            base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            template_path: get("PROMPT_TEMPLATE_PATH").map(PathBuf::from),
            max_message_bytes,
            upstream_timeout,
        })
    }
}

fn parse<T: std::str::FromStr>(raw: Option<String>, name: &'static str) -> Result<Option<T>, ConfigError> {
    let Some(value) = raw else {
        return Ok(None);
    };
    match value.trim().parse() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => Err(ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply() {
        let config = load(&[("OPENAI_API_KEY", "sk-test")]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.template_path.is_none());
        assert_eq!(config.max_message_bytes, 65536);
        assert!(config.upstream_timeout.is_none());
    }

    #[test]
    fn api_key_is_required() {
        assert!(matches!(load(&[]), Err(ConfigError::Missing("OPENAI_API_KEY"))));
        assert!(matches!(
            load(&[("OPENAI_API_KEY", "  ")]),
            Err(ConfigError::Missing("OPENAI_API_KEY"))
        ));
    }

    #[test]
    fn legacy_token_name_is_not_read() {
        assert!(load(&[("API_TOKEN", "sk-test")]).is_err());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("PORT", "8080"),
            ("OPENAI_MODEL", "gpt-4o-mini"),
            ("PROMPT_TEMPLATE_PATH", "obj/messagetemplates.json"),
            ("MAX_MESSAGE_BYTES", "1024"),
            ("UPSTREAM_TIMEOUT_SECS", "30"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.template_path, Some(PathBuf::from("obj/messagetemplates.json")));
        assert_eq!(config.max_message_bytes, 1024);
        assert_eq!(config.upstream_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn bad_numbers_are_rejected() {
        assert!(matches!(
            load(&[("OPENAI_API_KEY", "k"), ("PORT", "http")]),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));
        assert!(matches!(
            load(&[("OPENAI_API_KEY", "k"), ("MAX_MESSAGE_BYTES", "0")]),
            Err(ConfigError::Invalid { name: "MAX_MESSAGE_BYTES", .. })
        ));
    }

    #[test]
    fn debug_output_hides_the_key() {
        let config = load(&[("OPENAI_API_KEY", "sk-secret")]).unwrap();
        assert!(!format!("{config:?}").contains("sk-secret"));
    }
}
