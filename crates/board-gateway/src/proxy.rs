//! Upstream forwarding.

use board_config::UpstreamConfig;
use board_core::wire::ChatRequest;
use reqwest::header::ACCEPT;
use serde_json::Value;

use crate::error::GatewayError;
use crate::http::classify_transport;

/// Forwards queries to the upstream chat-completion service.
///
/// The credential is resolved on every call, so a key exported after startup
/// is picked up without a restart.
#[derive(Debug, Clone)]
pub struct ProxyGateway {
    http: reqwest::Client,
    config: UpstreamConfig,
}

impl ProxyGateway {
    /// Build a gateway whose HTTP client enforces `config.timeout()` per call.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Request`] if the HTTP client cannot be built.
    pub fn new(config: UpstreamConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("boardroom/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()
            .map_err(|error| GatewayError::Request {
                message: format!("failed to build HTTP client: {error}"),
            })?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub const fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Send `query` upstream and return the upstream JSON body verbatim.
    ///
    /// An empty upstream body is returned as `{}`.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Configuration`] when no credential is available
    ///   (no request is sent)
    /// - [`GatewayError::Parse`] when the body is not JSON, whatever the status
    /// - [`GatewayError::Upstream`] for a non-2xx status with a JSON body
    /// - [`GatewayError::Timeout`], [`GatewayError::Network`],
    ///   [`GatewayError::Security`] or [`GatewayError::Request`] for
    ///   transport failures
    pub async fn forward(&self, query: &str) -> Result<Value, GatewayError> {
        let result = self.try_forward(query).await;
        if let Err(error) = &result {
            match error {
                GatewayError::Configuration { .. } => {
                    tracing::error!(kind = error.kind(), %error, "proxy request rejected");
                }
                _ => tracing::warn!(
                    kind = error.kind(),
                    status = error.status_code(),
                    %error,
                    "proxy request failed"
                ),
            }
        }
        result
    }

    async fn try_forward(&self, query: &str) -> Result<Value, GatewayError> {
        let api_key = self
            .config
            .resolve_api_key()
            .map_err(|error| GatewayError::Configuration {
                message: error.to_string(),
            })?;

        let request = ChatRequest::new(&self.config.model, &self.config.system_prompt, query);
        tracing::debug!(
            url = %self.config.base_url,
            body = %serde_json::to_string(&request).unwrap_or_default(),
            "forwarding to upstream"
        );

        let timeout = self.config.timeout();
        let response = self
            .http
            .post(&self.config.base_url)
            .bearer_auth(api_key)
            .header(ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|error| classify_transport(&error, timeout))?;

        let status = response.status();
        tracing::info!(status = status.as_u16(), "upstream responded");

        let text = response
            .text()
            .await
            .map_err(|error| classify_transport(&error, timeout))?;
        tracing::debug!(body = %text, "upstream raw body");

        let body = if text.is_empty() {
            Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_str(&text).map_err(|error| GatewayError::Parse {
                message: error.to_string(),
                raw: text,
            })?
        };

        if !status.is_success() {
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_fails_before_sending() {
        let config = UpstreamConfig {
            // Nothing listens here; a sent request would surface as a transport error.
            base_url: "http://127.0.0.1:9/unreachable".to_string(),
            api_key: String::new(),
            api_key_env: "BOARDROOM_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..UpstreamConfig::default()
        };
        let gateway = ProxyGateway::new(config).unwrap();
        let error = gateway.forward("anything").await.unwrap_err();
        assert!(matches!(error, GatewayError::Configuration { .. }), "{error:?}");
        assert_eq!(error.status_code(), 500);
        assert_eq!(error.to_body().error, "Missing Perplexity API key");
    }

    #[tokio::test]
    #[ignore] // requires network
    async fn live_dns_failure_is_network_error() {
        let config = UpstreamConfig {
            base_url: "https://boardroom-does-not-exist.invalid/chat".to_string(),
            api_key: "key".to_string(),
            ..UpstreamConfig::default()
        };
        let gateway = ProxyGateway::new(config).unwrap();
        let error = gateway.forward("q").await.unwrap_err();
        assert!(matches!(error, GatewayError::Network { .. }), "{error:?}");
        assert_eq!(error.status_code(), 502);
    }
}
