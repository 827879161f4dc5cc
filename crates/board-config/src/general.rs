//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_company() -> String {
    String::from("Perplexity")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Company the alert prompts are written about.
    #[serde(default = "default_company")]
    pub company: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            company: default_company(),
        }
    }
}
