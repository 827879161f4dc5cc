//! The proxy endpoint: one `POST` path in front of [`ProxyGateway`].
//!
//! `tiny_http` accepts connections on a blocking thread. Each forwarded
//! request becomes its own tokio task; requests are never coordinated with
//! one another.

use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use board_config::{BoardConfig, ServerConfig};
use board_core::wire::{ProxyErrorBody, ProxyRequest};
use serde_json::Value;
use tiny_http::{Header, Method, Request, Response, Server};
use tokio::runtime::Handle;

use crate::error::ServerError;
use crate::proxy::ProxyGateway;

/// How often the accept loop checks the shutdown flag.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A bound, not yet running, proxy endpoint.
pub struct ProxyServer {
    server: Server,
    gateway: Arc<ProxyGateway>,
    path: String,
}

impl std::fmt::Debug for ProxyServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyServer")
            .field("addr", &self.local_addr())
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl ProxyServer {
    /// Bind `config.bind` and serve `config.path` with `gateway`.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] if the address cannot be bound.
    pub fn bind(config: &ServerConfig, gateway: ProxyGateway) -> Result<Self, ServerError> {
        let server = Server::http(&config.bind).map_err(|error| ServerError::Bind {
            addr: config.bind.clone(),
            message: error.to_string(),
        })?;
        Ok(Self {
            server,
            gateway: Arc::new(gateway),
            path: config.path.clone(),
        })
    }

    /// Build the gateway from `config.upstream` and bind `config.server`.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Gateway`] if the gateway cannot be built, or
    /// [`ServerError::Bind`] if the address cannot be bound.
    pub fn from_config(config: &BoardConfig) -> Result<Self, ServerError> {
        let gateway = ProxyGateway::new(config.upstream.clone())?;
        Self::bind(&config.server, gateway)
    }

    /// The address actually bound (useful after binding port 0).
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Serve until the process ends.
    ///
    /// # Errors
    ///
    /// See [`Self::serve_until`].
    pub async fn serve(self) -> Result<(), ServerError> {
        self.serve_until(Arc::new(AtomicBool::new(false))).await
    }

    /// Serve until `shutdown` is set. Requests already handed to a task still
    /// complete.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Accept`] if the listener fails, or
    /// [`ServerError::Join`] if the accept thread panics.
    pub async fn serve_until(self, shutdown: Arc<AtomicBool>) -> Result<(), ServerError> {
        let handle = Handle::current();
        tracing::info!(addr = ?self.local_addr(), path = %self.path, "proxy endpoint listening");
        tokio::task::spawn_blocking(move || self.accept_loop(&shutdown, &handle))
            .await
            .map_err(|error| ServerError::Join(error.to_string()))?
    }

    fn accept_loop(self, shutdown: &AtomicBool, runtime: &Handle) -> Result<(), ServerError> {
        while !shutdown.load(Ordering::SeqCst) {
            let Some(request) = self.server.recv_timeout(POLL_INTERVAL)? else {
                continue;
            };
            self.dispatch(request, runtime);
        }
        tracing::info!("proxy endpoint stopped");
        Ok(())
    }

    fn dispatch(&self, mut request: Request, runtime: &Handle) {
        let target = route(request.method(), request.url(), &self.path);
        tracing::debug!(method = %request.method(), url = %request.url(), route = ?target, "request");

        match target {
            Route::NotFound => respond_json(request, 404, &error_value("Not found", Value::Null)),
            Route::MethodNotAllowed => {
                let body = error_value("Method not allowed", Value::from("Only POST is accepted"));
                respond_json_with(request, 405, &body, Header::from_bytes("Allow", "POST").ok());
            }
            Route::Forward => {
                let query = match read_query(&mut request) {
                    Ok(query) => query,
                    Err(details) => {
                        tracing::warn!(%details, "rejecting malformed request body");
                        let body = error_value("Invalid request body", Value::from(details));
                        respond_json(request, 400, &body);
                        return;
                    }
                };
                let gateway = Arc::clone(&self.gateway);
                runtime.spawn(async move {
                    let (status, body) = match gateway.forward(&query).await {
                        Ok(body) => (200, body),
                        Err(error) => (
                            error.status_code(),
                            serde_json::to_value(error.to_body()).unwrap_or(Value::Null),
                        ),
                    };
                    let reply =
                        tokio::task::spawn_blocking(move || respond_json(request, status, &body));
                    if let Err(error) = reply.await {
                        tracing::warn!(%error, "response task failed");
                    }
                });
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Forward,
    MethodNotAllowed,
    NotFound,
}

fn route(method: &Method, url: &str, path: &str) -> Route {
    let request_path = url.split_once('?').map_or(url, |(path, _)| path);
    if request_path != path {
        Route::NotFound
    } else if *method == Method::Post {
        Route::Forward
    } else {
        Route::MethodNotAllowed
    }
}

fn read_query(request: &mut Request) -> Result<String, String> {
    let mut body = String::new();
    request
        .as_reader()
        .read_to_string(&mut body)
        .map_err(|error| format!("failed to read body: {error}"))?;
    serde_json::from_str::<ProxyRequest>(&body)
        .map(|parsed| parsed.query)
        .map_err(|error| error.to_string())
}

fn error_value(error: &str, details: Value) -> Value {
    serde_json::to_value(ProxyErrorBody::new(error, details)).unwrap_or(Value::Null)
}

fn respond_json(request: Request, status: u16, body: &Value) {
    respond_json_with(request, status, body, None);
}

fn respond_json_with(request: Request, status: u16, body: &Value, extra: Option<Header>) {
    let mut response = Response::from_data(body.to_string().into_bytes()).with_status_code(status);
    if let Ok(content_type) = Header::from_bytes("Content-Type", "application/json") {
        response.add_header(content_type);
    }
    if let Some(header) = extra {
        response.add_header(header);
    }
    if let Err(error) = request.respond(response) {
        tracing::warn!(%error, status, "failed to write response");
    }
}
