//! Caller side of the proxy endpoint.

use board_config::ClientConfig;
use board_core::wire::{ChatCompletion, ProxyRequest};
use serde_json::Value;

use crate::error::ClientError;
use crate::http::check_response;

/// Sends questions to the proxy endpoint. One attempt per call, no retries
/// and no timeout beyond the one the gateway applies upstream.
#[derive(Debug, Clone)]
pub struct AnswerClient {
    http: reqwest::Client,
    proxy_url: String,
}

impl AnswerClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(proxy_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("boardroom/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            proxy_url: proxy_url.into(),
        })
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(config.proxy_url.clone())
    }

    #[must_use]
    pub fn proxy_url(&self) -> &str {
        &self.proxy_url
    }

    /// Ask and return the endpoint's JSON body unchanged.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Gateway`] for a non-2xx response
    /// - [`ClientError::Http`] for a transport failure
    /// - [`ClientError::Decode`] if the body is not JSON
    pub async fn ask_raw(&self, prompt: &str) -> Result<Value, ClientError> {
        tracing::debug!(url = %self.proxy_url, prompt_len = prompt.len(), "asking gateway");
        let resp = self
            .http
            .post(&self.proxy_url)
            .json(&ProxyRequest {
                query: prompt.to_string(),
            })
            .send()
            .await?;
        let resp = check_response(resp).await.inspect_err(|error| {
            tracing::warn!(%error, "gateway returned an error");
        })?;
        let text = resp.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Ask and decode the answer as a chat completion.
    ///
    /// # Errors
    ///
    /// As [`Self::ask_raw`], plus [`ClientError::Decode`] if the body does not
    /// have the chat-completion shape.
    pub async fn ask(&self, prompt: &str) -> Result<ChatCompletion, ClientError> {
        let value = self.ask_raw(prompt).await?;
        Ok(serde_json::from_value(value)?)
    }
}
