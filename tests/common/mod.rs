//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use items_client::{ClientConfig, HttpServer, Shutdown};
use tokio::net::TcpListener;

/// One request as seen by the mock upstream.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub body: String,
    pub request_id: Option<String>,
}

impl Recorded {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// A running mock upstream that records every request it receives.
pub struct MockUpstream {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockUpstream {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start a programmable mock upstream on an ephemeral port.
///
/// `responder` sees each recorded request and returns the status and body to send.
pub async fn start_upstream<F>(responder: F) -> MockUpstream
where
    F: Fn(&Recorded) -> (u16, String) + Send + Sync + 'static,
{
    let requests = Arc::new(Mutex::new(Vec::new()));
    let responder = Arc::new(responder);

    let log = requests.clone();
    let app = Router::new().fallback(
        move |method: Method, uri: Uri, headers: HeaderMap, body: String| {
            let log = log.clone();
            let responder = responder.clone();
            async move {
                let recorded = Recorded {
                    method,
                    path: uri.path().to_string(),
                    body,
                    request_id: headers
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string),
                };
                let (status, body) = (*responder)(&recorded);
                log.lock().unwrap().push(recorded);
                (
                    StatusCode::from_u16(status).unwrap(),
                    [(header::CONTENT_TYPE, "application/json")],
                    body,
                )
                    .into_response()
            }
        },
    );

    let addr = serve(app).await;
    MockUpstream { addr, requests }
}

/// Serve `app` on an ephemeral local port.
pub async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Start the items client forwarding to `base_url`; returns its root URL.
pub async fn start_proxy(base_url: &str) -> (String, Shutdown) {
    let mut config = ClientConfig::default();
    config.upstream.base_url = base_url.to_string();
    config.listener.bind_address = "127.0.0.1:0".to_string();

    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.clone();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (format!("http://{}", addr), shutdown)
}
