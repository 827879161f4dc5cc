//! # board-gateway
//!
//! Everything between a question and the raw answer text:
//!
//! - [`ProxyGateway`] forwards `{ "query": ... }` to the upstream
//!   chat-completion service with the credential and fixed model parameters
//!   attached, and classifies every failure into a [`GatewayError`].
//! - [`server`] exposes the gateway as a single `POST` endpoint on
//!   `tiny_http`, one tokio task per request.
//! - [`AnswerClient`] is the caller side: one `POST` to the endpoint per
//!   question, no retries.
//!
//! Every [`GatewayError`] maps to an HTTP status and a JSON error body
//! (`error` + `details`), so the endpoint never answers with an empty error.

mod client;
mod error;
mod http;
mod proxy;
pub mod server;

pub use client::AnswerClient;
pub use error::{ClientError, GatewayError, ServerError};
pub use proxy::ProxyGateway;
pub use server::ProxyServer;
