//! Proxy endpoint configuration.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_bind() -> String {
    String::from("127.0.0.1:3000")
}

fn default_path() -> String {
    String::from("/api/perplexity")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Socket address the proxy listens on.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// The single path that accepts `POST { "query": ... }`.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            path: default_path(),
        }
    }
}

impl ServerConfig {
    /// Parsed bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `bind` is not `host:port`.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .parse()
            .map_err(|error| ConfigError::InvalidValue {
                field: "server.bind".to_string(),
                reason: format!("'{}' is not a socket address: {error}", self.bind),
            })
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an unparsable bind address
    /// or a path that does not start with `/`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;
        if !self.path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "server.path".to_string(),
                reason: format!("'{}' must start with '/'", self.path),
            });
        }
        Ok(())
    }
}
