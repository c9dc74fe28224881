pub mod error;
pub mod groq;
pub mod provider;

pub use error::{LlmError, LlmResult};
pub use groq::GroqClient;
pub use provider::{Completion, CompletionProvider, Usage};

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Configuration for the chat-completions endpoint
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub timeout: Duration,
}

impl LlmConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 1.0,
            max_tokens: 1024,
            top_p: 1.0,
            timeout: Duration::from_secs(60),
        }
    }

    /// Read settings from the process environment.
    ///
    /// `groq_api` is accepted as a fallback for `GROQ_API_KEY` so existing
    /// `.env` files keep working.
    pub fn from_env() -> LlmResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> LlmResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GROQ_API_KEY")
            .or_else(|| lookup("groq_api"))
            .filter(|k| !k.trim().is_empty())
            .ok_or(LlmError::MissingApiKey)?;

        let mut config = Self::new(api_key.trim());

        if let Some(url) = lookup("GROQ_BASE_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(model) = lookup("GROQ_MODEL") {
            config.model = model;
        }
        if let Some(v) = lookup("GROQ_TEMPERATURE") {
            config.temperature = parse_setting("GROQ_TEMPERATURE", &v)?;
        }
        if let Some(v) = lookup("GROQ_MAX_TOKENS") {
            config.max_tokens = parse_setting("GROQ_MAX_TOKENS", &v)?;
        }
        if let Some(v) = lookup("GROQ_TOP_P") {
            config.top_p = parse_setting("GROQ_TOP_P", &v)?;
        }
        if let Some(v) = lookup("GROQ_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(parse_setting("GROQ_TIMEOUT_SECS", &v)?);
        }

        Ok(config)
    }
}

fn parse_setting<T: std::str::FromStr>(name: &str, value: &str) -> LlmResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| LlmError::InvalidConfig(format!("{} has invalid value '{}'", name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_groq_settings() {
        let config = LlmConfig::from_lookup(lookup_from(&[("GROQ_API_KEY", "gsk_test")])).unwrap();
        assert_eq!(config.api_key, "gsk_test");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.temperature, 1.0);
        assert_eq!(config.max_tokens, 1024);
        assert_eq!(config.top_p, 1.0);
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_legacy_key_name() {
        let config = LlmConfig::from_lookup(lookup_from(&[("groq_api", "legacy")])).unwrap();
        assert_eq!(config.api_key, "legacy");
    }

    #[test]
    fn test_missing_key() {
        let err = LlmConfig::from_lookup(lookup_from(&[("GROQ_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, LlmError::MissingApiKey));
    }

    #[test]
    fn test_overrides() {
        let config = LlmConfig::from_lookup(lookup_from(&[
            ("GROQ_API_KEY", "k"),
            ("GROQ_BASE_URL", "http://localhost:9000/v1/"),
            ("GROQ_MODEL", "llama-3.1-8b-instant"),
            ("GROQ_MAX_TOKENS", "2048"),
            ("GROQ_TEMPERATURE", "0.2"),
            ("GROQ_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:9000/v1");
        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.max_tokens, 2048);
        assert!((config.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_bad_number_is_config_error() {
        let err = LlmConfig::from_lookup(lookup_from(&[
            ("GROQ_API_KEY", "k"),
            ("GROQ_MAX_TOKENS", "lots"),
        ]))
        .unwrap_err();
        assert!(matches!(err, LlmError::InvalidConfig(msg) if msg.contains("GROQ_MAX_TOKENS")));
    }
}
