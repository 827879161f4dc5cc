//! Gateway, endpoint and client error types.

use board_core::wire::ProxyErrorBody;
use serde_json::Value;
use thiserror::Error;

/// Why a proxied request failed. Each variant has a fixed HTTP status.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No upstream credential is configured. Raised before any network call.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// The upstream answered with a non-success status.
    #[error("upstream returned status {status}")]
    Upstream {
        /// Upstream status, passed through to the caller.
        status: u16,
        /// Upstream body, already parsed as JSON.
        body: Value,
    },

    /// The upstream body is not valid JSON.
    #[error("invalid JSON from upstream: {message}")]
    Parse {
        /// The body exactly as received.
        raw: String,
        /// Parser error message.
        message: String,
    },

    /// The upstream did not answer within the configured bound.
    #[error("upstream request timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The upstream host name could not be resolved.
    #[error("DNS resolution failed: {message}")]
    Network { message: String },

    /// TLS handshake or certificate validation failed.
    #[error("TLS failure: {message}")]
    Security { message: String },

    /// Any other transport failure.
    #[error("request failed: {message}")]
    Request { message: String },
}

impl GatewayError {
    /// HTTP status the endpoint answers with for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Configuration { .. } | Self::Parse { .. } | Self::Request { .. } => 500,
            Self::Upstream { status, .. } => *status,
            Self::Timeout { .. } => 504,
            Self::Network { .. } | Self::Security { .. } => 502,
        }
    }

    /// Short classification used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "configuration",
            Self::Upstream { .. } => "upstream",
            Self::Parse { .. } => "parse",
            Self::Timeout { .. } => "timeout",
            Self::Network { .. } => "network",
            Self::Security { .. } => "security",
            Self::Request { .. } => "request",
        }
    }

    /// JSON error body sent back to the caller.
    #[must_use]
    pub fn to_body(&self) -> ProxyErrorBody {
        match self {
            Self::Configuration { message } => {
                ProxyErrorBody::new("Missing Perplexity API key", message.as_str())
            }
            Self::Upstream { status, body } => ProxyErrorBody {
                status: Some(*status),
                ..ProxyErrorBody::new("Perplexity API error", body.clone())
            },
            Self::Parse { raw, message } => ProxyErrorBody {
                parse_error: Some(message.clone()),
                ..ProxyErrorBody::new("Invalid JSON response", raw.as_str())
            },
            Self::Timeout { secs } => ProxyErrorBody::new(
                "Request timeout",
                format!("The request to the upstream API timed out after {secs} seconds"),
            ),
            Self::Network { .. } => ProxyErrorBody::new(
                "DNS Error",
                "Could not resolve the upstream API hostname",
            ),
            Self::Security { .. } => ProxyErrorBody::new(
                "SSL/TLS Error",
                "Failed to establish a secure connection to the upstream API",
            ),
            Self::Request { message } => ProxyErrorBody::new("Request failed", message.as_str()),
        }
    }
}

/// Failures of the endpoint itself, as opposed to a single request.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {message}")]
    Bind { addr: String, message: String },

    #[error("failed to accept connection: {0}")]
    Accept(#[from] std::io::Error),

    #[error("accept loop stopped unexpectedly: {0}")]
    Join(String),

    /// The gateway could not be constructed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Errors returned by [`crate::AnswerClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The endpoint answered with a non-success status.
    #[error("gateway error: status {status}")]
    Gateway { status: u16, body: String },

    /// Transport failure talking to the endpoint.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered 2xx with a body of the wrong shape.
    #[error("failed to decode answer: {0}")]
    Decode(#[from] serde_json::Error),
}
