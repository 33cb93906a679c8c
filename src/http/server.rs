//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the shared upstream client once
//! - Create the Axum Router with the `/items/client` routes
//! - Wire up middleware (request id, tracing)
//! - Serve until Ctrl+C or a shutdown trigger

use std::sync::Arc;

use axum::{
    body::Body,
    http::Request,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::ClientConfig;
use crate::error::ProxyResult;
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::lifecycle::{shutdown_signal, Shutdown};
use crate::upstream::UpstreamClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
}

/// HTTP server for the items client routes.
pub struct HttpServer {
    router: Router,
    config: ClientConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ClientConfig) -> ProxyResult<Self> {
        let upstream = Arc::new(UpstreamClient::new(&config.upstream, &config.timeouts)?);
        let router = build_router(AppState { upstream });
        Ok(Self { router, config })
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/items/client", post(handlers::create_item))
        .route(
            "/items/client/{id}",
            put(handlers::update_item).delete(handlers::delete_item),
        )
        .route("/items/client/retrieve", get(handlers::list_retrieve))
        .route("/items/client/exchange", get(handlers::list_exchange))
        .route("/items/client/retrieve/{id}", get(handlers::get_retrieve))
        .route("/items/client/exchange/{id}", get(handlers::get_exchange))
        .route(
            "/items/client/retrieve/exception/occurred",
            get(handlers::failing_retrieve),
        )
        .route(
            "/items/client/exchange/exception/occurred",
            get(handlers::failing_exchange),
        )
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = request_id(request.headers()).unwrap_or("unknown"),
                    )
                }))
                .layer(propagate_request_id_layer()),
        )
}
