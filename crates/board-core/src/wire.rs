//! Wire types for the proxy endpoint and the upstream chat-completion API.
//!
//! The upstream response shape (`choices[].message.content`, optional
//! `citations`) is dictated by the external service; unknown fields are
//! ignored on decode.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{References, number_references};

/// Body accepted by the proxy endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProxyRequest {
    pub query: String,
}

/// One message in an upstream chat request.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Fixed-shape request sent upstream: model, system instruction, user query.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    #[must_use]
    pub fn new(model: &str, system_prompt: &str, query: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage::system(system_prompt), ChatMessage::user(query)],
        }
    }
}

/// Message payload inside a completion choice.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AnswerMessage {
    #[serde(default)]
    pub content: String,
}

/// One completion choice.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Choice {
    #[serde(default)]
    pub message: AnswerMessage,
}

/// Upstream chat-completion body, as relayed by the proxy.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<Vec<String>>,
}

impl ChatCompletion {
    /// Text of the first choice, or `""` when the answer has no choices.
    #[must_use]
    pub fn first_content(&self) -> &str {
        self.choices
            .first()
            .map_or("", |choice| choice.message.content.as_str())
    }

    /// The top-level `citations` list numbered from 1. Empty when absent.
    #[must_use]
    pub fn citation_references(&self) -> References {
        number_references(self.citations.iter().flatten().cloned())
    }
}

/// Error body returned by the proxy endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProxyErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
}

impl ProxyErrorBody {
    #[must_use]
    pub fn new(error: impl Into<String>, details: impl Into<serde_json::Value>) -> Self {
        Self {
            error: error.into(),
            details: details.into(),
            status: None,
            parse_error: None,
        }
    }
}
