//! Shared HTTP helpers: transport-failure classification and status checks.
//!
//! reqwest reports DNS and TLS failures as generic connect errors; the only
//! reliable signal is the message text somewhere in the source chain, so
//! classification walks the chain and matches on it.

use std::error::Error as StdError;
use std::time::Duration;

use crate::error::{ClientError, GatewayError};

/// Transport failure categories that get their own status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailure {
    Dns,
    Tls,
    Other,
}

/// Classify a flattened error message.
///
/// URLs are removed first; reqwest puts the request URL in its message and
/// a host name must not decide the category.
#[must_use]
pub fn classify_message(message: &str) -> TransportFailure {
    let lower = without_urls(message).to_ascii_lowercase();
    let dns_markers = [
        "dns error",
        "failed to lookup address",
        "name or service not known",
        "no such host",
        "nodename nor servname",
        "enotfound",
    ];
    let tls_markers = ["certificate", "tls", "ssl", "handshake"];

    if dns_markers.iter().any(|marker| lower.contains(marker)) {
        TransportFailure::Dns
    } else if tls_markers.iter().any(|marker| lower.contains(marker)) {
        TransportFailure::Tls
    } else {
        TransportFailure::Other
    }
}

/// `message` with every whitespace-separated token containing `://` dropped.
fn without_urls(message: &str) -> String {
    message
        .split_whitespace()
        .filter(|token| !token.contains("://"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Join an error and all of its sources into one `a: b: c` line.
#[must_use]
pub fn error_chain(error: &dyn StdError) -> String {
    let mut parts = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if parts.last() != Some(&text) {
            parts.push(text);
        }
        source = cause.source();
    }
    parts.join(": ")
}

/// Map a reqwest transport failure onto a [`GatewayError`].
pub fn classify_transport(error: &reqwest::Error, timeout: Duration) -> GatewayError {
    if error.is_timeout() {
        return GatewayError::Timeout {
            secs: timeout.as_secs(),
        };
    }
    let message = error_chain(error);
    match classify_message(&message) {
        TransportFailure::Dns => GatewayError::Network { message },
        TransportFailure::Tls => GatewayError::Security { message },
        TransportFailure::Other => GatewayError::Request { message },
    }
}

/// Pass 2xx responses through; turn anything else into
/// [`ClientError::Gateway`] carrying the status and body text.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if !resp.status().is_success() {
        return Err(ClientError::Gateway {
            status: resp.status().as_u16(),
            body: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}
