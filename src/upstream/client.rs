//! Shared client for the upstream Items API.
//!
//! # Responsibilities
//! - Hold the one outbound HTTP client and the upstream base address
//! - Build outbound URLs under `/api/rest/items`
//! - Execute a request in one of two consumption styles
//!
//! # Request Styles
//! - `exchange()` hands back the raw response: status and headers are
//!   visible and the caller decides how to consume the body
//! - `retrieve()` runs the same call, then applies status hooks registered
//!   with `on_status` before any body is read, followed by the default
//!   check (404 is `NotFound`, any other non-2xx is an upstream error)

use std::time::{Duration, Instant};

use axum::http::{Method, StatusCode};
use serde::Serialize;
use url::Url;

use crate::config::{TimeoutConfig, UpstreamConfig};
use crate::error::{ProxyError, ProxyResult};
use crate::item::Item;
use crate::observability::metrics;
use crate::upstream::response::UpstreamResponse;

/// Path segments of the upstream items resource.
pub const ITEMS_SEGMENTS: [&str; 3] = ["api", "rest", "items"];

/// Header carrying the inbound request id to upstream.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Predicate selecting statuses a status hook reacts to.
pub type StatusPredicate = fn(&StatusCode) -> bool;

/// Process-wide client for the upstream Items API.
///
/// Cheap to clone; clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Url,
}

impl UpstreamClient {
    /// Build the client from configuration.
    pub fn new(upstream: &UpstreamConfig, timeouts: &TimeoutConfig) -> ProxyResult<Self> {
        let base_url = Url::parse(&upstream.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase.into());
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeouts.connect_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = timeouts.request_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        tracing::info!(base_url = %base_url, "Upstream client initialized");
        Ok(Self { http, base_url })
    }

    /// `GET {base}/api/rest/items`
    pub fn list(&self) -> UpstreamRequest {
        self.request(Method::GET, "/api/rest/items", &[])
    }

    /// `GET {base}/api/rest/items/{id}`
    pub fn fetch(&self, id: &str) -> UpstreamRequest {
        self.request(Method::GET, "/api/rest/items/{id}", &[id])
    }

    /// `POST {base}/api/rest/items` with the item as JSON.
    pub fn create(&self, item: &Item) -> UpstreamRequest {
        self.request(Method::POST, "/api/rest/items", &[]).json(item)
    }

    /// `PUT {base}/api/rest/items/{id}` with the item as JSON.
    pub fn update(&self, id: &str, item: &Item) -> UpstreamRequest {
        self.request(Method::PUT, "/api/rest/items/{id}", &[id]).json(item)
    }

    /// `DELETE {base}/api/rest/items/{id}`
    pub fn remove(&self, id: &str) -> UpstreamRequest {
        self.request(Method::DELETE, "/api/rest/items/{id}", &[id])
    }

    /// `GET {base}/api/rest/items/exception/occurred`
    pub fn list_failing(&self) -> UpstreamRequest {
        self.request(
            Method::GET,
            "/api/rest/items/exception/occurred",
            &["exception", "occurred"],
        )
    }

    /// Start a request to `{base}/api/rest/items/<segments..>`.
    ///
    /// `route` is the path template used as the metrics label.
    pub fn request(&self, method: Method, route: &'static str, segments: &[&str]) -> UpstreamRequest {
        let builder = self
            .url(segments)
            .map(|url| self.http.request(method.clone(), url));

        UpstreamRequest {
            builder,
            method,
            route,
            status_hooks: Vec::new(),
        }
    }

    /// Outbound URL; each segment is percent-encoded as one path segment.
    pub fn url(&self, segments: &[&str]) -> ProxyResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProxyError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(ITEMS_SEGMENTS)
            .extend(segments);
        Ok(url)
    }
}

/// An outbound call being prepared.
#[derive(Debug)]
pub struct UpstreamRequest {
    builder: ProxyResult<reqwest::RequestBuilder>,
    method: Method,
    route: &'static str,
    status_hooks: Vec<StatusPredicate>,
}

impl UpstreamRequest {
    /// Send `body` as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        self.builder = self.builder.map(|b| b.json(body));
        self
    }

    /// Forward the inbound request id, if any.
    pub fn request_id(mut self, request_id: Option<&str>) -> Self {
        if let Some(id) = request_id {
            self.builder = self.builder.map(|b| b.header(X_REQUEST_ID, id));
        }
        self
    }

    /// Fail with the upstream body text when `predicate` matches the status.
    ///
    /// Only consulted by `retrieve()`. The body is logged at error level.
    pub fn on_status(mut self, predicate: StatusPredicate) -> Self {
        self.status_hooks.push(predicate);
        self
    }

    /// Send the request and return the response without inspecting its status.
    pub async fn exchange(self) -> ProxyResult<UpstreamResponse> {
        let (http, request) = self.builder?.build_split();
        let request = request?;
        let url = request.url().clone();
        let start = Instant::now();

        match http.execute(request).await {
            Ok(response) => {
                let status = response.status();
                metrics::record_upstream_request(self.method.as_str(), self.route, Some(status), start);
                tracing::debug!(
                    method = %self.method,
                    url = %url,
                    status = %status,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Upstream responded"
                );
                Ok(UpstreamResponse::new(response))
            }
            Err(e) => {
                metrics::record_upstream_request(self.method.as_str(), self.route, None, start);
                tracing::error!(method = %self.method, url = %url, error = %e, "Upstream request failed");
                Err(e.into())
            }
        }
    }

    /// Send the request and fail on non-success statuses before the body is read.
    pub async fn retrieve(mut self) -> ProxyResult<UpstreamResponse> {
        let hooks = std::mem::take(&mut self.status_hooks);
        let response = self.exchange().await?;
        let status = response.status();

        if hooks.iter().any(|hook| hook(&status)) {
            let err = response.into_error().await;
            tracing::error!(status = %status, "{}", err);
            return Err(err);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ProxyError::NotFound);
        }
        if !status.is_success() {
            return Err(response.into_error().await);
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> UpstreamClient {
        let upstream = UpstreamConfig {
            base_url: base.to_string(),
        };
        UpstreamClient::new(&upstream, &TimeoutConfig::default()).unwrap()
    }

    #[test]
    fn test_url_building() {
        let c = client("http://localhost:8080");
        assert_eq!(c.url(&[]).unwrap().as_str(), "http://localhost:8080/api/rest/items");
        assert_eq!(
            c.url(&["42"]).unwrap().as_str(),
            "http://localhost:8080/api/rest/items/42"
        );
        assert_eq!(
            c.url(&["exception", "occurred"]).unwrap().as_str(),
            "http://localhost:8080/api/rest/items/exception/occurred"
        );
    }

    #[test]
    fn test_base_path_is_kept() {
        let c = client("http://gateway/prefix/");
        assert_eq!(
            c.url(&["1"]).unwrap().as_str(),
            "http://gateway/prefix/api/rest/items/1"
        );
    }

    #[test]
    fn test_id_is_a_single_encoded_segment() {
        let c = client("http://localhost:8080");
        assert_eq!(
            c.url(&["a/b c"]).unwrap().as_str(),
            "http://localhost:8080/api/rest/items/a%2Fb%20c"
        );
    }

    #[test]
    fn test_rejects_unusable_base() {
        let upstream = UpstreamConfig {
            base_url: "mailto:items@example.com".to_string(),
        };
        let err = UpstreamClient::new(&upstream, &TimeoutConfig::default()).unwrap_err();
        assert!(matches!(err, ProxyError::InvalidUrl(_)));
    }
}
