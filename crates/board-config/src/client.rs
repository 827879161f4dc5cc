//! Answer client configuration.

use serde::{Deserialize, Serialize};

fn default_proxy_url() -> String {
    String::from("http://127.0.0.1:3000/api/perplexity")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Full URL of the proxy endpoint.
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            proxy_url: default_proxy_url(),
        }
    }
}
