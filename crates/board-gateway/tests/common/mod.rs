//! Local `tiny_http` stand-ins for the upstream service and the proxy.

#![allow(dead_code)]

use std::io::Read;
use std::net::TcpListener;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use board_config::{ServerConfig, UpstreamConfig};
use board_gateway::{ProxyGateway, ProxyServer};

/// What the mock saw for one request.
#[derive(Debug, Clone)]
pub struct Captured {
    pub method: String,
    pub url: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

/// Canned reply for one request.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl Reply {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

pub struct MockUpstream {
    pub url: String,
    pub requests: mpsc::Receiver<Captured>,
}

/// Serve `replies` in order, one per incoming request, then stop.
pub fn mock_upstream(replies: Vec<Reply>) -> MockUpstream {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind mock upstream");
    let port = server.server_addr().to_ip().expect("ip addr").port();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for reply in replies {
            let Ok(Some(mut request)) = server.recv_timeout(Duration::from_secs(10)) else {
                return;
            };
            let header = |name: &'static str| {
                request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv(name))
                    .map(|h| h.value.as_str().to_string())
            };
            let authorization = header("Authorization");
            let content_type = header("Content-Type");
            let mut body = String::new();
            let _ = request.as_reader().read_to_string(&mut body);
            let _ = tx.send(Captured {
                method: request.method().to_string(),
                url: request.url().to_string(),
                authorization,
                content_type,
                body,
            });
            thread::sleep(reply.delay);
            let response = tiny_http::Response::from_string(reply.body)
                .with_status_code(reply.status)
                .with_header(
                    tiny_http::Header::from_bytes("Content-Type", "application/json").unwrap(),
                );
            let _ = request.respond(response);
        }
    });

    MockUpstream {
        url: format!("http://127.0.0.1:{port}/chat/completions"),
        requests: rx,
    }
}

/// Upstream config pointing at `url` with an inline test key.
pub fn upstream_config(url: &str) -> UpstreamConfig {
    UpstreamConfig {
        base_url: url.to_string(),
        api_key: "test-key".to_string(),
        ..UpstreamConfig::default()
    }
}

/// A port nothing is listening on.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    listener.local_addr().expect("addr").port()
}

pub struct RunningProxy {
    pub url: String,
    pub base: String,
    pub shutdown: Arc<AtomicBool>,
}

impl Drop for RunningProxy {
    fn drop(&mut self) {
        self.shutdown.store(true, std::sync::atomic::Ordering::SeqCst);
    }
}

/// Start the proxy endpoint on an ephemeral port in front of `upstream`.
pub fn start_proxy(upstream: UpstreamConfig) -> RunningProxy {
    let server_config = ServerConfig {
        bind: "127.0.0.1:0".to_string(),
        ..ServerConfig::default()
    };
    let gateway = ProxyGateway::new(upstream).expect("gateway");
    let server = ProxyServer::bind(&server_config, gateway).expect("bind proxy");
    let addr = server.local_addr().expect("proxy addr");
    let base = format!("http://{addr}");
    let url = format!("{base}{}", server.path());
    let shutdown = Arc::new(AtomicBool::new(false));
    tokio::spawn(server.serve_until(Arc::clone(&shutdown)));
    RunningProxy {
        url,
        base,
        shutdown,
    }
}
