//! Upstream answer-generation service configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_base_url() -> String {
    String::from("https://api.perplexity.ai/chat/completions")
}

fn default_model() -> String {
    String::from("sonar-pro")
}

fn default_system_prompt() -> String {
    String::from("Be precise and concise.")
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_api_key_env() -> String {
    String::from("PERPLEXITY_API_KEY")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Chat-completions endpoint the proxy forwards to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,

    /// System instruction sent ahead of the user query.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Upper bound on one upstream call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Inline credential. Usually left empty in favor of `api_key_env`.
    #[serde(default)]
    pub api_key: String,

    /// Name of the process environment variable holding the credential.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            system_prompt: default_system_prompt(),
            timeout_secs: default_timeout_secs(),
            api_key: String::new(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl UpstreamConfig {
    /// Whether a credential is available right now, inline or from the environment.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.resolve_api_key().is_ok()
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve the credential: inline `api_key` first, then the environment
    /// variable named by `api_key_env`. Read on every call.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when neither source yields a
    /// non-empty value.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        if !self.api_key.trim().is_empty() {
            return Ok(self.api_key.trim().to_string());
        }
        match std::env::var(&self.api_key_env) {
            Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
            _ => Err(ConfigError::NotConfigured {
                section: format!("upstream (set {} or upstream.api_key)", self.api_key_env),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = UpstreamConfig::default();
        assert_eq!(config.base_url, "https://api.perplexity.ai/chat/completions");
        assert_eq!(config.model, "sonar-pro");
        assert_eq!(config.system_prompt, "Be precise and concise.");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.api_key_env, "PERPLEXITY_API_KEY");
    }

    #[test]
    fn inline_key_wins() {
        let config = UpstreamConfig {
            api_key: " pplx-inline ".into(),
            api_key_env: "BOARDROOM_TEST_UNSET_KEY".into(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().unwrap(), "pplx-inline");
        assert!(config.is_configured());
    }

    #[test]
    fn key_read_from_named_env_var() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("BOARDROOM_TEST_KEY", "pplx-from-env");
            let config = UpstreamConfig {
                api_key_env: "BOARDROOM_TEST_KEY".into(),
                ..Default::default()
            };
            assert_eq!(config.resolve_api_key().unwrap(), "pplx-from-env");
            Ok(())
        });
    }

    #[test]
    fn missing_key_is_not_configured() {
        let config = UpstreamConfig {
            api_key_env: "BOARDROOM_TEST_DEFINITELY_UNSET".into(),
            ..Default::default()
        };
        let err = config.resolve_api_key().unwrap_err();
        assert!(matches!(err, ConfigError::NotConfigured { .. }));
        assert!(err.to_string().contains("BOARDROOM_TEST_DEFINITELY_UNSET"));
        assert!(!config.is_configured());
    }
}
